//! Test infrastructure for the kronox kernel.
//!
//! Provides in-memory stand-ins for the keyboard controller and the VGA text
//! buffer so the decoder, display and console loop can be exercised on the
//! host.
//!
//! # Usage
//!
//! ```rust,ignore
//! use kronox_kernel::testutil::{RamGrid, ScriptedPorts};
//!
//! let mut ports = ScriptedPorts::new(&[0x1E, 0x9E]);
//! let mut display = Display::new(RamGrid::new());
//! ```

use crate::display::{BUFFER_HEIGHT, BUFFER_WIDTH};
use kronox_common::ps2::{StatusFlags, DATA_PORT, STATUS_PORT};
use kronox_hal::{PortIo, TextMemory};

/// Longest scancode script a [`ScriptedPorts`] can hold.
pub const MAX_SCRIPT: usize = 64;

/// A text grid backed by ordinary memory.
#[derive(Clone)]
pub struct RamGrid {
    cells: [[u16; BUFFER_WIDTH]; BUFFER_HEIGHT],
    writes: usize,
}

impl RamGrid {
    /// Creates a grid with every cell zeroed.
    pub const fn new() -> Self {
        RamGrid {
            cells: [[0; BUFFER_WIDTH]; BUFFER_HEIGHT],
            writes: 0,
        }
    }

    /// Raw cell value at `row`, `col`.
    pub fn cell(&self, row: usize, col: usize) -> u16 {
        self.cells[row][col]
    }

    /// Number of cell writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Default for RamGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMemory for RamGrid {
    fn read_cell(&self, row: usize, col: usize) -> u16 {
        self.cells[row][col]
    }

    fn write_cell(&mut self, row: usize, col: usize, cell: u16) {
        self.cells[row][col] = cell;
        self.writes += 1;
    }
}

/// A fake PS/2 controller that replays a fixed list of scancodes.
///
/// The status port reports data ready while unread scancodes remain.
pub struct ScriptedPorts {
    script: [u8; MAX_SCRIPT],
    len: usize,
    next: usize,
    data_reads: usize,
}

impl ScriptedPorts {
    /// Creates a controller that will hand out `scancodes` in order.
    ///
    /// # Panics
    ///
    /// Panics if `scancodes` is longer than [`MAX_SCRIPT`].
    pub fn new(scancodes: &[u8]) -> Self {
        assert!(scancodes.len() <= MAX_SCRIPT, "scancode script too long");
        let mut script = [0; MAX_SCRIPT];
        script[..scancodes.len()].copy_from_slice(scancodes);
        ScriptedPorts {
            script,
            len: scancodes.len(),
            next: 0,
            data_reads: 0,
        }
    }

    /// Number of scancodes not yet read.
    pub fn remaining(&self) -> usize {
        self.len - self.next
    }

    /// Number of reads from the data port.
    pub fn data_reads(&self) -> usize {
        self.data_reads
    }
}

impl PortIo for ScriptedPorts {
    fn read_byte(&mut self, port: u16) -> u8 {
        match port {
            STATUS_PORT if self.remaining() > 0 => StatusFlags::OUTPUT_FULL.bits(),
            STATUS_PORT => StatusFlags::empty().bits(),
            DATA_PORT => {
                self.data_reads += 1;
                if self.remaining() == 0 {
                    return 0;
                }
                let byte = self.script[self.next];
                self.next += 1;
                byte
            }
            _ => 0xFF,
        }
    }

    fn write_byte(&mut self, _port: u16, _value: u8) {}
}
