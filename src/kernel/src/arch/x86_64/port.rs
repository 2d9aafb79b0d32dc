//! Port I/O through the `in`/`out` instructions.

use kronox_hal::PortIo;
use x86_64::instructions::port::Port;

/// Direct access to the x86 I/O port space.
///
/// Only meaningful in ring 0; every read and write goes straight to hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct X86Ports;

impl PortIo for X86Ports {
    fn read_byte(&mut self, port: u16) -> u8 {
        let mut port = Port::<u8>::new(port);
        // SAFETY: the kernel runs in ring 0 with full I/O privilege. Callers
        // only name ports of devices they drive.
        unsafe { port.read() }
    }

    fn write_byte(&mut self, port: u16, value: u8) {
        let mut port = Port::<u8>::new(port);
        // SAFETY: see `read_byte`.
        unsafe { port.write(value) }
    }
}
