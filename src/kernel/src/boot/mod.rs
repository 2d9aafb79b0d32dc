//! Boot logging with colored status indicators.
//!
//! Provides Linux-style boot messages with colored status brackets.

pub mod banner;

use core::fmt;

use crate::arch::x86_64::vga::{self, Color};
use crate::config::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
use crate::{print, println};

/// Boot status indicators.
#[derive(Debug, Clone, Copy)]
pub enum Status {
    /// Success - `[ OK ]` in green
    Ok,
    /// Failure - `[FAIL]` in red
    Fail,
    /// Warning - `[WARN]` in yellow
    Warn,
    /// Informational - `[INFO]` in cyan
    Info,
}

impl Status {
    fn bracket(self) -> (&'static str, Color) {
        match self {
            Status::Ok => ("[ OK ]", Color::LightGreen),
            Status::Fail => ("[FAIL]", Color::LightRed),
            Status::Warn => ("[WARN]", Color::Yellow),
            Status::Info => ("[INFO]", Color::LightCyan),
        }
    }
}

/// Log a boot stage with status, on screen and to the serial log.
///
/// Format: `[ OK ] Message text`
pub fn log(status: Status, message: &str) {
    match status {
        Status::Fail => log::error!("{}", message),
        Status::Warn => log::warn!("{}", message),
        Status::Ok | Status::Info => log::info!("{}", message),
    }
    print_status(status);
    println!(" {}", message);
}

/// Log an indented detail line (for sub-items).
///
/// Format: `       Detail text` (aligned with message after status)
pub fn log_detail(args: fmt::Arguments) {
    print!("{}", Detail(args));
}

/// A detail line, indented to sit under the message of a status line.
struct Detail<'a>(fmt::Arguments<'a>);

impl fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "       {}", self.0)
    }
}

fn print_status(status: Status) {
    let (text, color) = status.bracket();
    vga::set_color(color, DEFAULT_BACKGROUND);
    print!("{}", text);
    vga::set_color(DEFAULT_FOREGROUND, DEFAULT_BACKGROUND);
}
