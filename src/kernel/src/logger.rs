//! `log` backend that writes records to COM1.

use kronox_common::KernelError;
use log::{Level, Log, Metadata, Record};

use crate::config::LOG_LEVEL;
use crate::serial_println;

/// Logger that forwards every enabled record to the serial port.
struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= LOG_LEVEL
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            serial_println!(
                "[{}] {}: {}",
                label(record.level()),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn label(level: Level) -> &'static str {
    match level {
        Level::Error => "ERR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// Installs the serial logger as the global `log` backend.
pub fn init() -> Result<(), KernelError> {
    log::set_logger(&LOGGER).map_err(|_| KernelError::LoggerAlreadySet)?;
    log::set_max_level(LOG_LEVEL);
    Ok(())
}
