//! PS/2 keyboard decoder.
//!
//! Turns one scancode per keyboard interrupt into at most one byte in the
//! input buffer. Only scancode set 1 with a fixed US layout is understood.
//!
//! # Known simplifications
//!
//! - The shifted table is chosen when shift XOR caps lock is active. Caps lock
//!   therefore also inverts digits and punctuation, unlike a real keyboard
//!   where it only affects letters.
//! - The `0xE0` extended prefix is recorded but never changes the lookup.
//!   Extended keys fall through to the base tables and mostly produce nothing.

pub mod scancodes;

use crate::input::InputBuffer;
use kronox_common::ps2::{StatusFlags, DATA_PORT, EXTENDED_PREFIX, RELEASE_BIT, STATUS_PORT};
use kronox_hal::PortIo;
use log::{trace, warn};

const LEFT_SHIFT: u8 = 0x2A;
const RIGHT_SHIFT: u8 = 0x36;
const CAPS_LOCK: u8 = 0x3A;

/// Upper bound on stale bytes discarded by [`drain`].
const MAX_DRAIN: usize = 16;

/// Modifier state carried from one interrupt to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// A shift key is held.
    pub shift: bool,
    /// Caps lock is latched on.
    pub caps_lock: bool,
    /// The previous scancode was the extended prefix.
    pub extended: bool,
}

impl Modifiers {
    /// Returns true if the shifted table applies.
    pub fn use_shifted(&self) -> bool {
        self.shift ^ self.caps_lock
    }
}

/// Keyboard decoder state, owned by the keyboard interrupt handler.
#[derive(Debug, Default)]
pub struct Decoder {
    modifiers: Modifiers,
}

impl Decoder {
    /// Creates a decoder with every modifier released.
    pub const fn new() -> Self {
        Decoder {
            modifiers: Modifiers {
                shift: false,
                caps_lock: false,
                extended: false,
            },
        }
    }

    /// Current modifier state.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Services one keyboard interrupt.
    ///
    /// Must run to completion without being re-entered; the caller is the
    /// keyboard IRQ handler, which the interrupt controller serializes. A
    /// spurious call with no data waiting does nothing. A decoded byte that
    /// does not fit in `buffer` is dropped.
    pub fn handle_interrupt<P: PortIo, const N: usize>(
        &mut self,
        ports: &mut P,
        buffer: &InputBuffer<N>,
    ) {
        let status = StatusFlags::from_bits_retain(ports.read_byte(STATUS_PORT));
        if !status.data_ready() {
            trace!("spurious keyboard interrupt (status {:#04x})", status.bits());
            return;
        }

        let scancode = ports.read_byte(DATA_PORT);
        trace!("scancode {:#04x}", scancode);

        if let Some(byte) = self.decode(scancode) {
            if let Err(err) = buffer.try_push(byte) {
                warn!("{}", err);
            }
        }
    }

    /// Feeds one scancode through the modifier state machine.
    ///
    /// Returns the character the key produces, if any.
    pub fn decode(&mut self, scancode: u8) -> Option<u8> {
        if scancode == EXTENDED_PREFIX {
            self.modifiers.extended = true;
            return None;
        }

        // The prefix only ever covers the scancode right after it.
        self.modifiers.extended = false;

        let released = scancode & RELEASE_BIT != 0;
        let code = scancode & !RELEASE_BIT;

        match code {
            LEFT_SHIFT | RIGHT_SHIFT => {
                self.modifiers.shift = !released;
                return None;
            }
            CAPS_LOCK => {
                if !released {
                    self.modifiers.caps_lock = !self.modifiers.caps_lock;
                }
                return None;
            }
            _ => {}
        }

        if released {
            return None;
        }

        scancodes::lookup(code, self.modifiers.use_shifted())
    }
}

/// Discards bytes left in the controller output buffer from before boot.
///
/// Returns how many bytes were thrown away.
pub fn drain<P: PortIo>(ports: &mut P) -> usize {
    let mut drained = 0;
    while drained < MAX_DRAIN
        && StatusFlags::from_bits_retain(ports.read_byte(STATUS_PORT)).data_ready()
    {
        let _ = ports.read_byte(DATA_PORT);
        drained += 1;
    }
    drained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScriptedPorts;

    const A_KEY: u8 = 0x1E;
    const ONE_KEY: u8 = 0x02;

    fn decode_with(shift: bool, caps: bool, code: u8) -> Option<u8> {
        let mut decoder = Decoder::new();
        if caps {
            decoder.decode(CAPS_LOCK);
            decoder.decode(CAPS_LOCK | RELEASE_BIT);
        }
        if shift {
            decoder.decode(LEFT_SHIFT);
        }
        decoder.decode(code)
    }

    #[test]
    fn test_shift_xor_caps_lock() {
        assert_eq!(decode_with(false, false, A_KEY), Some(b'a'));
        assert_eq!(decode_with(true, false, A_KEY), Some(b'A'));
        assert_eq!(decode_with(false, true, A_KEY), Some(b'A'));
        assert_eq!(decode_with(true, true, A_KEY), Some(b'a'));
    }

    #[test]
    fn test_caps_lock_also_shifts_symbols() {
        assert_eq!(decode_with(false, true, ONE_KEY), Some(b'!'));
        assert_eq!(decode_with(true, true, ONE_KEY), Some(b'1'));
    }

    #[test]
    fn test_shift_release_restores_lowercase() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(RIGHT_SHIFT), None);
        assert_eq!(decoder.decode(A_KEY), Some(b'A'));
        assert_eq!(decoder.decode(RIGHT_SHIFT | RELEASE_BIT), None);
        assert!(!decoder.modifiers().shift);
        assert_eq!(decoder.decode(A_KEY), Some(b'a'));
    }

    #[test]
    fn test_caps_lock_toggles_on_press_only() {
        let mut decoder = Decoder::new();
        decoder.decode(CAPS_LOCK);
        assert!(decoder.modifiers().caps_lock);
        decoder.decode(CAPS_LOCK | RELEASE_BIT);
        assert!(decoder.modifiers().caps_lock);
        decoder.decode(CAPS_LOCK);
        assert!(!decoder.modifiers().caps_lock);
    }

    #[test]
    fn test_key_release_emits_nothing() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(A_KEY | RELEASE_BIT), None);
    }

    #[test]
    fn test_extended_prefix_covers_one_scancode() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(EXTENDED_PREFIX), None);
        assert!(decoder.modifiers().extended);

        // Extended keys are looked up in the base table like any other.
        assert_eq!(decoder.decode(0x48), None);
        assert!(!decoder.modifiers().extended);

        decoder.decode(EXTENDED_PREFIX);
        decoder.decode(0x48 | RELEASE_BIT);
        assert!(!decoder.modifiers().extended);
    }

    #[test]
    fn test_interrupt_pushes_character() {
        let buffer: InputBuffer<8> = InputBuffer::new();
        let mut ports = ScriptedPorts::new(&[A_KEY]);
        let mut decoder = Decoder::new();

        decoder.handle_interrupt(&mut ports, &buffer);

        assert_eq!(buffer.pop(), Some(b'a'));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_spurious_interrupt_does_not_read_data() {
        let buffer: InputBuffer<8> = InputBuffer::new();
        let mut ports = ScriptedPorts::new(&[]);
        let mut decoder = Decoder::new();

        decoder.handle_interrupt(&mut ports, &buffer);

        assert_eq!(ports.data_reads(), 0);
        assert!(!buffer.has_data());
        assert_eq!(decoder.modifiers(), Modifiers::default());
    }

    #[test]
    fn test_full_buffer_drops_character() {
        let buffer: InputBuffer<2> = InputBuffer::new();
        let mut ports = ScriptedPorts::new(&[A_KEY, 0x30]);
        let mut decoder = Decoder::new();

        decoder.handle_interrupt(&mut ports, &buffer);
        decoder.handle_interrupt(&mut ports, &buffer);

        assert_eq!(buffer.pop(), Some(b'a'));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_drain_discards_stale_bytes() {
        let mut ports = ScriptedPorts::new(&[0xFA, 0xAA, A_KEY]);
        assert_eq!(drain(&mut ports), 3);
        assert_eq!(drain(&mut ports), 0);
    }
}
