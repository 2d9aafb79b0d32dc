//! System-wide error types for kronox.

use core::fmt;

/// Input buffer error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputError {
    /// The ring is full; the byte was not stored.
    BufferFull(u8),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::BufferFull(byte) => {
                write!(f, "input buffer full, dropped byte {:#04x}", byte)
            }
        }
    }
}

/// Kernel bring-up error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KernelError {
    /// A global logger was already installed.
    LoggerAlreadySet,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LoggerAlreadySet => write!(f, "logger already installed"),
        }
    }
}
