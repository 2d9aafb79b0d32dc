//! PS/2 controller register layout.

use bitflags::bitflags;

/// Data port: scancodes are read from here.
pub const DATA_PORT: u16 = 0x60;

/// Status register (read) and command register (write).
pub const STATUS_PORT: u16 = 0x64;

/// Scancode that announces an extended (two-byte) key.
pub const EXTENDED_PREFIX: u8 = 0xE0;

/// High bit of a set-1 scancode: set on key release.
pub const RELEASE_BIT: u8 = 0x80;

bitflags! {
    /// Bits of the PS/2 controller status byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct StatusFlags: u8 {
        /// Output buffer full: a byte is waiting on `DATA_PORT`.
        const OUTPUT_FULL   = 1 << 0;
        /// Input buffer full: the controller has not consumed the last write.
        const INPUT_FULL    = 1 << 1;
        /// System flag, set by firmware after POST.
        const SYSTEM        = 1 << 2;
        /// Last write was a command rather than data.
        const COMMAND       = 1 << 3;
        /// Timeout error.
        const TIMEOUT_ERROR = 1 << 6;
        /// Parity error.
        const PARITY_ERROR  = 1 << 7;
    }
}

impl StatusFlags {
    /// Returns true if a byte is waiting on the data port.
    pub fn data_ready(self) -> bool {
        self.contains(StatusFlags::OUTPUT_FULL)
    }
}
