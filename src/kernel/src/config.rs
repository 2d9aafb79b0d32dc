//! Compile-time kernel configuration.

use crate::display::Color;
use log::LevelFilter;

/// Slots in the keyboard ring buffer. One slot stays free, so 255 bytes fit.
pub const INPUT_BUFFER_CAPACITY: usize = 256;

/// Byte that stops the console loop and halts the machine (ESC).
pub const HALT_KEY: u8 = 0x1B;

/// Message handed to the fatal-halt screen when `HALT_KEY` is read.
pub const HALT_MESSAGE: &str = "Escape key pressed";

/// Console colors after boot.
pub const DEFAULT_FOREGROUND: Color = Color::White;
/// See [`DEFAULT_FOREGROUND`].
pub const DEFAULT_BACKGROUND: Color = Color::Black;

/// Colors of the fatal-halt screen.
pub const FATAL_FOREGROUND: Color = Color::White;
/// See [`FATAL_FOREGROUND`].
pub const FATAL_BACKGROUND: Color = Color::Red;

/// Most verbose level the serial logger emits.
#[cfg(feature = "trace-scancodes")]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Trace;
/// Most verbose level the serial logger emits.
#[cfg(not(feature = "trace-scancodes"))]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;
