//! Types shared between the kronox kernel and its hardware abstraction layer.

#![no_std]
#![warn(missing_docs)]

pub mod error;
pub mod ps2;

pub use error::{InputError, KernelError};
pub use ps2::StatusFlags;
