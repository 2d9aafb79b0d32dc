//! Scancode set 1 to ASCII tables, US layout.
//!
//! Indexed by the 7-bit key code (release bit masked off). A zero entry means
//! the key produces no character.

/// Builds a full 128-entry table from the leading printable range.
const fn table(prefix: &[u8]) -> [u8; 128] {
    let mut out = [0u8; 128];
    let mut i = 0;
    while i < prefix.len() {
        out[i] = prefix[i];
        i += 1;
    }
    out
}

/// Characters produced without shift.
pub static UNSHIFTED: [u8; 128] =
    table(b"\0\x1b1234567890-=\x08\tqwertyuiop[]\n\0asdfghjkl;'`\0\\zxcvbnm,./\0*\0 ");

/// Characters produced with shift.
pub static SHIFTED: [u8; 128] =
    table(b"\0\x1b!@#$%^&*()_+\x08\tQWERTYUIOP{}\n\0ASDFGHJKL:\"~\0|ZXCVBNM<>?\0*\0 ");

/// Looks up the character for a key code.
pub fn lookup(code: u8, shifted: bool) -> Option<u8> {
    let table = if shifted { &SHIFTED } else { &UNSHIFTED };
    match table[usize::from(code & 0x7F)] {
        0 => None,
        c => Some(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_printable_range_only() {
        for code in 58..128 {
            assert_eq!(UNSHIFTED[code], 0, "code {:#x}", code);
            assert_eq!(SHIFTED[code], 0, "code {:#x}", code);
        }
        assert_eq!(UNSHIFTED[57], b' ');
        assert_eq!(SHIFTED[57], b' ');
    }

    #[test]
    fn test_known_keys() {
        assert_eq!(lookup(0x01, false), Some(0x1B));
        assert_eq!(lookup(0x02, false), Some(b'1'));
        assert_eq!(lookup(0x02, true), Some(b'!'));
        assert_eq!(lookup(0x0E, false), Some(0x08));
        assert_eq!(lookup(0x1C, false), Some(b'\n'));
        assert_eq!(lookup(0x1E, false), Some(b'a'));
        assert_eq!(lookup(0x1E, true), Some(b'A'));
        assert_eq!(lookup(0x28, false), Some(b'\''));
        assert_eq!(lookup(0x28, true), Some(b'"'));
        assert_eq!(lookup(0x2B, false), Some(b'\\'));
        assert_eq!(lookup(0x2B, true), Some(b'|'));
        assert_eq!(lookup(0x35, true), Some(b'?'));
    }

    #[test]
    fn test_modifier_keys_have_no_character() {
        for code in [0x00, 0x1D, 0x2A, 0x36, 0x38, 0x3A] {
            assert_eq!(lookup(code, false), None);
            assert_eq!(lookup(code, true), None);
        }
    }
}
