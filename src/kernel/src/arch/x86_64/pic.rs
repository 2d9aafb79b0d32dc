//! Support for the primary and secondary 8259 Programmable Interrupt Controllers (PICs).

use kronox_hal::InterruptController;
use pic8259::ChainedPics;
use spin::Mutex;

/// The offset of the first PIC (master).
///
/// IRQs 0..7 are mapped to interrupts 32..39.
pub const PIC_1_OFFSET: u8 = 32;

/// The offset of the second PIC (slave).
///
/// IRQs 8..15 are mapped to interrupts 40..47.
pub const PIC_2_OFFSET: u8 = PIC_1_OFFSET + 8;

/// The global instance of the chained PICs.
pub static PICS: Mutex<ChainedPics> =
    Mutex::new(unsafe { ChainedPics::new(PIC_1_OFFSET, PIC_2_OFFSET) });

/// Possible IRQ indices.
#[derive(Debug, Clone, Copy)]
#[repr(u8)]
pub enum InterruptIndex {
    /// Timer interrupt.
    Timer = PIC_1_OFFSET,
    /// Keyboard interrupt.
    Keyboard,
}

impl InterruptIndex {
    /// Returns the internal u8 value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the internal usize value.
    pub fn as_usize(self) -> usize {
        usize::from(self as u8)
    }
}

/// Remaps the PICs away from the CPU exception vectors.
pub fn init() {
    // SAFETY: called once during boot with interrupts disabled; the offsets
    // do not overlap the exception vectors.
    unsafe {
        PICS.lock().initialize();
    }
}

/// The chained PICs behind the HAL interrupt controller trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct PicController;

impl InterruptController for PicController {
    fn enable(&mut self) {
        x86_64::instructions::interrupts::enable();
    }

    fn disable(&mut self) {
        x86_64::instructions::interrupts::disable();
    }

    fn end_of_interrupt(&mut self, irq: u8) {
        // SAFETY: `irq` is the vector currently being serviced.
        unsafe {
            PICS.lock().notify_end_of_interrupt(irq);
        }
    }
}
