//! kronox Kernel
//!
//! A minimal interactive console for bare-metal x86_64: keyboard interrupts
//! are decoded into a ring buffer, and a console loop echoes the buffered
//! characters onto the VGA text grid.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `keyboard`: scancode decoding and modifier state
//! - `input`: the interrupt-to-console ring buffer
//! - `display`: cursor tracking and scrolling over a text grid
//! - `console`: the loop joining input and display, and the fatal-halt screen
//! - `arch`: Platform-specific code (VGA, serial, interrupts)
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with safety
//! invariants explaining why the usage is correct.

#![cfg_attr(not(test), no_std)]
#![feature(abi_x86_interrupt)]
#![warn(missing_docs)]

pub mod arch;
#[cfg(target_arch = "x86_64")]
pub mod boot;
pub mod config;
pub mod console;
pub mod display;
pub mod input;
pub mod keyboard;
#[cfg(target_arch = "x86_64")]
pub mod logger;
pub mod testutil;

/// Initializes core kernel subsystems.
///
/// Called early in the boot process to set up essential services.
pub fn init() {
    #[cfg(target_arch = "x86_64")]
    {
        arch::x86_64::serial::init();
        arch::x86_64::vga::init();
    }
}
