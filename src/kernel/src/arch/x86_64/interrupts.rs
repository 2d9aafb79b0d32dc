//! Interrupt Descriptor Table (IDT) and exception handlers for x86_64.
//!
//! Faults are reported on the serial log and end in the fatal-halt screen.

use crate::arch::x86_64::pic::{InterruptIndex, PicController};
use crate::arch::x86_64::{fatal, gdt};
use crate::println;
use kronox_hal::InterruptController;
use lazy_static::lazy_static;
use log::{error, warn};
use x86_64::structures::idt::{InterruptDescriptorTable, InterruptStackFrame, PageFaultErrorCode};

lazy_static! {
    /// The Interrupt Descriptor Table (IDT).
    static ref IDT: InterruptDescriptorTable = {
        let mut idt = InterruptDescriptorTable::new();
        idt.breakpoint.set_handler_fn(breakpoint_handler);
        unsafe {
            idt.double_fault.set_handler_fn(double_fault_handler)
                .set_stack_index(gdt::DOUBLE_FAULT_IST_INDEX);
        }
        idt.page_fault.set_handler_fn(page_fault_handler);
        idt.general_protection_fault.set_handler_fn(general_protection_fault_handler);
        idt.divide_error.set_handler_fn(divide_error_handler);

        // Hardware interrupts
        idt[InterruptIndex::Timer.as_usize()]
            .set_handler_fn(timer_interrupt_handler);
        idt[InterruptIndex::Keyboard.as_usize()]
            .set_handler_fn(keyboard_interrupt_handler);

        idt
    };
}

/// Loads the IDT. Hardware interrupts stay disabled until the PICs are set up.
pub fn init_idt() {
    IDT.load();
}

/// Handler for the timer interrupt.
///
/// Only acknowledged, so that `hlt` in the idle loop wakes up regularly.
extern "x86-interrupt" fn timer_interrupt_handler(_stack_frame: InterruptStackFrame) {
    PicController.end_of_interrupt(InterruptIndex::Timer.as_u8());
}

/// Handler for the keyboard interrupt.
extern "x86-interrupt" fn keyboard_interrupt_handler(_stack_frame: InterruptStackFrame) {
    crate::arch::x86_64::keyboard::on_interrupt();
    PicController.end_of_interrupt(InterruptIndex::Keyboard.as_u8());
}

/// Handler for the breakpoint exception (INT3). Execution continues.
extern "x86-interrupt" fn breakpoint_handler(stack_frame: InterruptStackFrame) {
    warn!("breakpoint at {:?}", stack_frame.instruction_pointer);
    println!("EXCEPTION: BREAKPOINT\n{:#?}", stack_frame);
}

/// Handler for the double fault exception. Runs on its own IST stack.
extern "x86-interrupt" fn double_fault_handler(
    stack_frame: InterruptStackFrame,
    _error_code: u64,
) -> ! {
    error!("double fault\n{:#?}", stack_frame);
    fatal("EXCEPTION: DOUBLE FAULT")
}

/// Handler for the page fault exception.
extern "x86-interrupt" fn page_fault_handler(
    stack_frame: InterruptStackFrame,
    error_code: PageFaultErrorCode,
) {
    use x86_64::registers::control::Cr2;

    error!(
        "page fault at {:?} ({:?})\n{:#?}",
        Cr2::read(),
        error_code,
        stack_frame
    );
    fatal("EXCEPTION: PAGE FAULT");
}

/// Handler for the general protection fault exception.
extern "x86-interrupt" fn general_protection_fault_handler(
    stack_frame: InterruptStackFrame,
    error_code: u64,
) {
    error!(
        "general protection fault, selector {:#x}\n{:#?}",
        error_code, stack_frame
    );
    fatal("EXCEPTION: GENERAL PROTECTION FAULT");
}

/// Handler for the divide error exception.
extern "x86-interrupt" fn divide_error_handler(stack_frame: InterruptStackFrame) {
    error!("divide error\n{:#?}", stack_frame);
    fatal("EXCEPTION: DIVIDE ERROR");
}
