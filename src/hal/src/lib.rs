//! kronox Hardware Abstraction Layer (HAL) traits.
//!
//! This crate defines traits that abstract away platform-specific hardware details.

#![no_std]

/// Trait for byte-wide access to device I/O ports.
pub trait PortIo {
    /// Reads a single byte from the given port.
    fn read_byte(&mut self, port: u16) -> u8;
    /// Writes a single byte to the given port.
    fn write_byte(&mut self, port: u16, value: u8);
}

/// Trait for a character-cell display memory.
///
/// Each cell is `(attribute << 8) | character`, addressed row-major.
pub trait TextMemory {
    /// Reads the cell at `row`, `col`.
    fn read_cell(&self, row: usize, col: usize) -> u16;
    /// Writes the cell at `row`, `col`.
    fn write_cell(&mut self, row: usize, col: usize, cell: u16);
}

/// Trait for a text-based console output.
pub trait Console {
    /// Writes a string to the console.
    fn write_str(&mut self, s: &str);
    /// Clears the console screen.
    fn clear(&mut self);
}

/// Trait for controlling interrupts.
pub trait InterruptController {
    /// Globally enables interrupts.
    fn enable(&mut self);
    /// Globally disables interrupts.
    fn disable(&mut self);
    /// Signals the end of an interrupt to the controller.
    fn end_of_interrupt(&mut self, irq: u8);
}
