//! Boot banner and branding.

use kronox_hal::TextMemory;

use crate::arch::x86_64::vga;
use crate::display::Display;
use crate::print;

const BANNER: &str = ":: KRONOX64 microkernel boot sequence ::\n\n";

/// Print the kronox boot banner in the current color.
pub fn print_banner() {
    draw_banner(&mut vga::writer().lock());
}

fn draw_banner<M: TextMemory>(display: &mut Display<M>) {
    display.print(BANNER);
}

/// Print the post-boot instructions.
pub fn print_ready() {
    print!("System initialized successfully.\n");
    print!("Type on the keyboard. Press ESC to halt.\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
    use crate::display::{Color, ColorCode};
    use crate::testutil::RamGrid;

    #[test]
    fn test_banner_is_white_on_black() {
        let mut display = Display::new(RamGrid::new());
        display.set_color(DEFAULT_FOREGROUND, DEFAULT_BACKGROUND);
        display.clear();
        draw_banner(&mut display);

        let white_on_black = ColorCode::new(Color::White, Color::Black);
        for col in 0..BANNER.trim_end().len() {
            assert_eq!(display.char_at(0, col).color_code, white_on_black);
        }
        assert_eq!(display.char_at(0, 3).ascii_character, b'K');
        assert_eq!(display.cursor(), (0, 2));
        assert_eq!(display.color_code(), white_on_black);
    }
}
