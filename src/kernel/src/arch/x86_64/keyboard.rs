//! Keyboard IRQ glue.

use crate::input::KEYBOARD_BUFFER;
use crate::keyboard::{self, Decoder};
use spin::Mutex;

use super::port::X86Ports;

/// Decoder state. Only the keyboard interrupt handler locks it after boot.
static DECODER: Mutex<Decoder> = Mutex::new(Decoder::new());

/// Prepares the controller before IRQ1 is enabled.
///
/// Returns the number of stale bytes discarded.
pub fn init() -> usize {
    let drained = keyboard::drain(&mut X86Ports);
    log::info!("keyboard ready, {} stale byte(s) discarded", drained);
    drained
}

/// Decodes the pending scancode into [`KEYBOARD_BUFFER`].
///
/// Only the IRQ1 handler calls this, so it never runs re-entrantly.
pub fn on_interrupt() {
    DECODER
        .lock()
        .handle_interrupt(&mut X86Ports, &KEYBOARD_BUFFER);
}
