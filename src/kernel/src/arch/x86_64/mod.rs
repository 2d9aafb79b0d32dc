//! x86_64 architecture support.
//!
//! Provides VGA text mode output, serial port communication, descriptor
//! tables and interrupt handling for x86_64 platforms.

pub mod gdt;
pub mod interrupts;
pub mod keyboard;
pub mod pic;
pub mod port;
pub mod serial;
pub mod vga;

pub use serial::SERIAL;
pub use vga::{Color, WRITER};

/// Halts the CPU until the next interrupt.
///
/// Used in idle loops to reduce power consumption.
#[inline]
pub fn hlt() {
    x86_64::instructions::hlt();
}

/// Halts the CPU in an infinite loop.
///
/// Used after unrecoverable errors (panics).
pub fn halt_loop() -> ! {
    loop {
        hlt();
    }
}

/// Shows the fatal-halt screen with `message` and stops the machine.
pub fn fatal(message: &str) -> ! {
    log::error!("system halted: {}", message);
    x86_64::instructions::interrupts::disable();
    // SAFETY: interrupts are off and this function never returns, so any
    // guard held by the interrupted code is never used again.
    let mut display = unsafe { crate::console::seize(vga::writer()) };
    crate::console::halt_screen(&mut display, message);
    halt_loop()
}
