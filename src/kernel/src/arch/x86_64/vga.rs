//! VGA text mode output for x86_64.
//!
//! The text buffer lives at 0xB8000. Cursor and scroll handling is done by
//! [`Display`]; this module only provides volatile access to the hardware
//! cells and the global writer.

use core::fmt::{self, Write};
use core::ptr;
use kronox_hal::{PortIo, TextMemory};
use spin::Mutex;
use x86_64::instructions::interrupts;

pub use crate::display::Color;
use crate::display::{Display, BUFFER_HEIGHT, BUFFER_WIDTH};

use super::port::X86Ports;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// CRT controller index and data registers.
const CRTC_INDEX_PORT: u16 = 0x3D4;
const CRTC_DATA_PORT: u16 = 0x3D5;

/// CRTC register holding the cursor start scanline.
const CURSOR_START_REGISTER: u8 = 0x0A;

/// Bit 5 of the cursor start register turns the hardware cursor off.
const CURSOR_DISABLE: u8 = 0x20;

/// The VGA text buffer layout.
#[repr(transparent)]
struct Buffer {
    cells: [[u16; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

/// The physical VGA text buffer.
pub struct VgaMemory {
    /// SAFETY: This pointer is valid for the lifetime of the kernel.
    /// The VGA buffer at 0xB8000 is always mapped in x86 real/protected mode.
    buffer: *mut Buffer,
}

// SAFETY: VgaMemory only accesses the VGA buffer through volatile operations.
// The buffer is memory-mapped hardware that exists for the kernel's lifetime.
// Access is synchronized through the WRITER spinlock.
unsafe impl Send for VgaMemory {}

impl VgaMemory {
    /// # Safety
    ///
    /// At most one `VgaMemory` may exist, and 0xB8000 must be identity mapped.
    unsafe fn new() -> Self {
        VgaMemory {
            buffer: VGA_BUFFER_ADDR as *mut Buffer,
        }
    }
}

impl TextMemory for VgaMemory {
    fn read_cell(&self, row: usize, col: usize) -> u16 {
        // SAFETY: indexing is bounds checked and the pointer was validated at
        // construction. Volatile because the buffer is memory-mapped I/O.
        unsafe { ptr::read_volatile(&(*self.buffer).cells[row][col]) }
    }

    fn write_cell(&mut self, row: usize, col: usize, cell: u16) {
        // SAFETY: see `read_cell`.
        unsafe { ptr::write_volatile(&mut (*self.buffer).cells[row][col], cell) }
    }
}

/// Global VGA writer instance.
///
/// Uses a spinlock for safe concurrent access.
pub static WRITER: spin::Once<Mutex<Display<VgaMemory>>> = spin::Once::new();

/// Initializes the global VGA writer.
///
/// Idempotent - safe to call multiple times.
pub fn init() {
    // SAFETY: `call_once` guarantees this is the only VgaMemory. The
    // bootloader identity maps the VGA text buffer.
    WRITER.call_once(|| Mutex::new(Display::new(unsafe { VgaMemory::new() })));
}

/// Returns the VGA writer, initializing if necessary.
pub fn writer() -> &'static Mutex<Display<VgaMemory>> {
    init();
    WRITER.get().expect("VGA writer not initialized")
}

/// Prints to the VGA buffer without a newline.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::arch::x86_64::vga::_print(format_args!($($arg)*))
    };
}

/// Prints to the VGA buffer with a newline.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    interrupts::without_interrupts(|| {
        writer().lock().write_fmt(args).expect("vga write failed");
    });
}

/// Sets the VGA output color.
pub fn set_color(foreground: Color, background: Color) {
    writer().lock().set_color(foreground, background);
}

/// Clears the VGA screen.
pub fn clear_screen() {
    writer().lock().clear();
}

/// Hides the blinking hardware cursor; the console tracks its own.
pub fn disable_hardware_cursor() {
    let mut ports = X86Ports;
    ports.write_byte(CRTC_INDEX_PORT, CURSOR_START_REGISTER);
    ports.write_byte(CRTC_DATA_PORT, CURSOR_DISABLE);
}
