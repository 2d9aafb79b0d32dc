//! Text-mode display buffer manager.
//!
//! Keeps the cursor and the active color for a `BUFFER_WIDTH` x `BUFFER_HEIGHT`
//! grid of character cells and scrolls the grid up one row whenever output
//! runs past the bottom line. Rows scrolled off the top are gone; there is no
//! scrollback.

use core::fmt;
use kronox_hal::TextMemory;

use crate::config::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};

/// Number of rows in VGA text mode.
pub const BUFFER_HEIGHT: usize = 25;

/// Number of columns in VGA text mode.
pub const BUFFER_WIDTH: usize = 80;

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

impl From<u8> for Color {
    /// Uses the low four bits; the high bits are ignored.
    fn from(value: u8) -> Self {
        match value & 0x0F {
            0 => Color::Black,
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Cyan,
            4 => Color::Red,
            5 => Color::Magenta,
            6 => Color::Brown,
            7 => Color::LightGray,
            8 => Color::DarkGray,
            9 => Color::LightBlue,
            10 => Color::LightGreen,
            11 => Color::LightCyan,
            12 => Color::LightRed,
            13 => Color::Pink,
            14 => Color::Yellow,
            _ => Color::White,
        }
    }
}

/// Combined foreground and background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Creates a new color code from foreground and background colors.
    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }

    /// The raw attribute byte.
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenChar {
    /// Character code.
    pub ascii_character: u8,
    /// Color attribute.
    pub color_code: ColorCode,
}

impl ScreenChar {
    /// Packs the cell as display memory stores it: attribute in the high byte.
    pub const fn to_cell(self) -> u16 {
        (self.color_code.0 as u16) << 8 | self.ascii_character as u16
    }

    /// Unpacks a display memory cell.
    pub const fn from_cell(cell: u16) -> Self {
        ScreenChar {
            ascii_character: (cell & 0xFF) as u8,
            color_code: ColorCode((cell >> 8) as u8),
        }
    }
}

/// Display buffer manager over some text memory.
///
/// Invariant: between calls, `column < BUFFER_WIDTH` and `row < BUFFER_HEIGHT`.
pub struct Display<M> {
    memory: M,
    column: usize,
    row: usize,
    color_code: ColorCode,
}

impl<M: TextMemory> Display<M> {
    /// Wraps `memory` with the cursor at the top-left corner.
    ///
    /// The grid is left as it is; call [`Display::clear`] to blank it.
    pub fn new(memory: M) -> Self {
        Display {
            memory,
            column: 0,
            row: 0,
            color_code: ColorCode::new(DEFAULT_FOREGROUND, DEFAULT_BACKGROUND),
        }
    }

    /// Sets the foreground and background colors for subsequent writes.
    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.color_code = ColorCode::new(foreground, background);
    }

    /// The color applied to new cells.
    pub fn color_code(&self) -> ColorCode {
        self.color_code
    }

    /// Cursor position as `(column, row)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    /// Reads back the cell at `row`, `col`.
    pub fn char_at(&self, row: usize, col: usize) -> ScreenChar {
        ScreenChar::from_cell(self.memory.read_cell(row, col))
    }

    /// The underlying text memory.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Blanks every cell with the current color and homes the cursor.
    pub fn clear(&mut self) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row);
        }
        self.column = 0;
        self.row = 0;
    }

    /// Writes one byte at the cursor and advances it.
    ///
    /// `\n` moves to the start of the next line and `\r` to the start of the
    /// current one. Every other byte is stored as-is. Reaching the end of a
    /// line wraps, and moving past the last line scrolls.
    pub fn put_char(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.column = 0;
                self.row += 1;
            }
            b'\r' => self.column = 0,
            byte => {
                let screen_char = ScreenChar {
                    ascii_character: byte,
                    color_code: self.color_code,
                };
                self.memory
                    .write_cell(self.row, self.column, screen_char.to_cell());
                self.column += 1;
                if self.column == BUFFER_WIDTH {
                    self.column = 0;
                    self.row += 1;
                }
            }
        }

        if self.row == BUFFER_HEIGHT {
            self.scroll();
        }
    }

    /// Shifts every row up by one, blanks the last row and moves the cursor up.
    pub fn scroll(&mut self) {
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                let cell = self.memory.read_cell(row, col);
                self.memory.write_cell(row - 1, col, cell);
            }
        }
        self.clear_row(BUFFER_HEIGHT - 1);
        self.row = self.row.saturating_sub(1);
    }

    /// Writes every byte of `s` through [`Display::put_char`].
    pub fn print(&mut self, s: &str) {
        for byte in s.bytes() {
            self.put_char(byte);
        }
    }

    /// Writes `value` as `0x` and sixteen uppercase hex digits.
    pub fn print_hex(&mut self, value: u64) {
        const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        self.print("0x");
        for shift in (0..16).rev() {
            let nibble = (value >> (shift * 4)) & 0xF;
            self.put_char(DIGITS[nibble as usize]);
        }
    }

    /// Clears a single row by filling it with spaces.
    fn clear_row(&mut self, row: usize) {
        debug_assert!(row < BUFFER_HEIGHT, "row index out of bounds");

        let blank = ScreenChar {
            ascii_character: b' ',
            color_code: self.color_code,
        };
        for col in 0..BUFFER_WIDTH {
            self.memory.write_cell(row, col, blank.to_cell());
        }
    }
}

impl<M: TextMemory> fmt::Write for Display<M> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            match byte {
                // Printable ASCII, newline or carriage return
                0x20..=0x7e | b'\n' | b'\r' => self.put_char(byte),
                // Non-printable: show placeholder
                _ => self.put_char(0xfe),
            }
        }
        Ok(())
    }
}

impl<M: TextMemory> kronox_hal::Console for Display<M> {
    fn write_str(&mut self, s: &str) {
        let _ = <Self as fmt::Write>::write_str(self, s);
    }

    fn clear(&mut self) {
        Display::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RamGrid;
    use core::fmt::Write;

    const WHITE_ON_BLACK: u8 = 0x0F;

    fn display() -> Display<RamGrid> {
        let mut display = Display::new(RamGrid::new());
        display.set_color(Color::White, Color::Black);
        display.clear();
        display
    }

    fn row_text(display: &Display<RamGrid>, row: usize) -> std::string::String {
        (0..BUFFER_WIDTH)
            .map(|col| display.char_at(row, col).ascii_character as char)
            .collect()
    }

    #[test]
    fn test_put_char_writes_cell_and_advances() {
        let mut display = display();
        display.put_char(b'a');

        assert_eq!(display.memory().cell(0, 0), 0x0F61);
        assert_eq!(display.char_at(0, 0).color_code.as_u8(), WHITE_ON_BLACK);
        assert_eq!(display.cursor(), (1, 0));
    }

    #[test]
    fn test_newline_and_carriage_return() {
        let mut display = display();
        display.print("ab\r");
        assert_eq!(display.cursor(), (0, 0));
        display.print("c\n");
        assert_eq!(display.cursor(), (0, 1));
        assert_eq!(display.char_at(0, 0).ascii_character, b'c');
        assert_eq!(display.char_at(0, 1).ascii_character, b'b');
    }

    #[test]
    fn test_line_wrap() {
        let mut display = display();
        display.put_char(b'\n');
        for _ in 0..BUFFER_WIDTH {
            display.put_char(b'x');
        }

        assert_eq!(display.cursor(), (0, 2));
        assert!(row_text(&display, 1).bytes().all(|b| b == b'x'));
        assert!(row_text(&display, 2).bytes().all(|b| b == b' '));
        assert!(row_text(&display, 0).bytes().all(|b| b == b' '));
    }

    #[test]
    fn test_scroll_evicts_top_row() {
        let mut display = display();
        for row in 0..BUFFER_HEIGHT {
            display.put_char(b'A' + row as u8);
            if row < BUFFER_HEIGHT - 1 {
                display.put_char(b'\n');
            }
        }
        assert_eq!(display.cursor(), (1, BUFFER_HEIGHT - 1));

        display.set_color(Color::Yellow, Color::Blue);
        display.put_char(b'\n');

        assert_eq!(display.cursor(), (0, BUFFER_HEIGHT - 1));
        for row in 0..BUFFER_HEIGHT - 1 {
            assert_eq!(display.char_at(row, 0).ascii_character, b'B' + row as u8);
        }
        let blank = ColorCode::new(Color::Yellow, Color::Blue);
        for col in 0..BUFFER_WIDTH {
            let cell = display.char_at(BUFFER_HEIGHT - 1, col);
            assert_eq!(cell.ascii_character, b' ');
            assert_eq!(cell.color_code, blank);
        }
    }

    #[test]
    fn test_wrap_on_last_row_scrolls() {
        let mut display = display();
        for _ in 0..BUFFER_HEIGHT - 1 {
            display.put_char(b'\n');
        }
        for _ in 0..BUFFER_WIDTH {
            display.put_char(b'z');
        }

        assert_eq!(display.cursor(), (0, BUFFER_HEIGHT - 1));
        assert!(row_text(&display, BUFFER_HEIGHT - 2).bytes().all(|b| b == b'z'));
        assert!(row_text(&display, BUFFER_HEIGHT - 1).bytes().all(|b| b == b' '));
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut display = display();
        for i in 0..10_000u32 {
            let byte = match i % 97 {
                0 => b'\n',
                1 => b'\r',
                n => b' ' + (n as u8 % 90),
            };
            display.put_char(byte);
            let (col, row) = display.cursor();
            assert!(col < BUFFER_WIDTH);
            assert!(row < BUFFER_HEIGHT);
        }
    }

    #[test]
    fn test_clear_uses_current_color() {
        let mut display = display();
        display.print("some text\nmore");
        display.set_color(Color::Black, Color::LightGray);
        display.clear();

        assert_eq!(display.cursor(), (0, 0));
        let expected = ScreenChar {
            ascii_character: b' ',
            color_code: ColorCode::new(Color::Black, Color::LightGray),
        };
        for row in 0..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                assert_eq!(display.char_at(row, col), expected);
            }
        }
    }

    #[test]
    fn test_color_from_raw_masks_to_nibble() {
        assert_eq!(Color::from(0x1F), Color::White);
        assert_eq!(Color::from(0xF4), Color::Red);
        let mut display = display();
        display.set_color(Color::from(0x3F), Color::from(0x24));
        assert_eq!(display.color_code().as_u8(), 0x4F);
    }

    #[test]
    fn test_print_hex() {
        let mut display = display();
        display.print_hex(0x1234_ABCD);
        assert_eq!(&row_text(&display, 0)[..18], "0x000000001234ABCD");
        assert_eq!(display.cursor(), (18, 0));
    }

    #[test]
    fn test_fmt_write_replaces_non_printable() {
        let mut display = display();
        write!(display, "ok\u{7}").expect("write failed");
        assert_eq!(display.char_at(0, 0).ascii_character, b'o');
        assert_eq!(display.char_at(0, 2).ascii_character, 0xfe);
    }
}
