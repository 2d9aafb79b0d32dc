//! Keyboard input ring buffer.
//!
//! A fixed-capacity single-producer single-consumer queue of decoded bytes.
//! The keyboard interrupt handler is the only producer and owns `head`; the
//! console loop is the only consumer and owns `tail`. One slot is always left
//! free so that `head == tail` unambiguously means empty, which gives a usable
//! capacity of `N - 1`.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};
use kronox_common::InputError;

use crate::config::INPUT_BUFFER_CAPACITY;

/// The buffer shared by the keyboard interrupt handler and the console loop.
pub static KEYBOARD_BUFFER: InputBuffer<INPUT_BUFFER_CAPACITY> = InputBuffer::new();

/// Fixed-capacity circular queue of input bytes.
pub struct InputBuffer<const N: usize> {
    slots: UnsafeCell<[u8; N]>,
    /// Next slot to write. Only advanced by the producer.
    head: AtomicUsize,
    /// Next slot to read. Only advanced by the consumer.
    tail: AtomicUsize,
}

// SAFETY: `head` is written only by the single producer and `tail` only by the
// single consumer. A slot is written before `head` is published with Release
// and read after `head` is observed with Acquire, and the producer never
// writes the slot at `tail - 1`, so the two sides never touch the same slot
// at the same time. The keyboard interrupt line cannot re-enter itself, so
// there is never more than one producer running.
unsafe impl<const N: usize> Sync for InputBuffer<N> {}

impl<const N: usize> InputBuffer<N> {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        assert!(N >= 2, "input buffer needs at least two slots");
        Self {
            slots: UnsafeCell::new([0; N]),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Appends a byte, or hands it back if the buffer is full.
    ///
    /// Producer side only.
    pub fn try_push(&self, byte: u8) -> Result<(), InputError> {
        let head = self.head.load(Ordering::Relaxed);
        let next = (head + 1) % N;

        if next == self.tail.load(Ordering::Acquire) {
            return Err(InputError::BufferFull(byte));
        }

        // SAFETY: `head` is owned by this producer and the consumer never
        // reads the slot at `head` until it has been published below.
        unsafe {
            (*self.slots.get())[head] = byte;
        }
        self.head.store(next, Ordering::Release);
        Ok(())
    }

    /// Appends a byte. Returns false, leaving the buffer unchanged, when full.
    pub fn push(&self, byte: u8) -> bool {
        self.try_push(byte).is_ok()
    }

    /// Removes and returns the oldest byte.
    ///
    /// Consumer side only.
    pub fn pop(&self) -> Option<u8> {
        let tail = self.tail.load(Ordering::Relaxed);
        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: `tail != head`, so the slot was published by the producer
        // and will not be rewritten until `tail` moves past it.
        let byte = unsafe { (*self.slots.get())[tail] };
        self.tail.store((tail + 1) % N, Ordering::Release);
        Some(byte)
    }

    /// Returns true if at least one byte is waiting.
    pub fn has_data(&self) -> bool {
        self.tail.load(Ordering::Acquire) != self.head.load(Ordering::Acquire)
    }

    /// Number of bytes waiting.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        (head + N - tail) % N
    }

    /// Returns true if nothing is waiting.
    pub fn is_empty(&self) -> bool {
        !self.has_data()
    }

    /// Maximum number of bytes the buffer holds at once.
    pub const fn capacity(&self) -> usize {
        N - 1
    }
}

impl<const N: usize> Default for InputBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer: InputBuffer<8> = InputBuffer::new();
        assert!(!buffer.has_data());
        assert!(buffer.is_empty());
        assert_eq!(buffer.pop(), None);
        assert_eq!(buffer.capacity(), 7);
    }

    #[test]
    fn test_capacity_is_one_less_than_slots() {
        let buffer: InputBuffer<256> = InputBuffer::new();
        for i in 0..255 {
            assert!(buffer.push(i as u8), "push {} should succeed", i);
        }
        assert_eq!(buffer.len(), 255);

        assert!(!buffer.push(b'x'));
        assert_eq!(buffer.try_push(b'y'), Err(InputError::BufferFull(b'y')));
        assert_eq!(buffer.len(), 255);

        // The rejected pushes left the contents untouched.
        for i in 0..255 {
            assert_eq!(buffer.pop(), Some(i as u8));
        }
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_fifo_order() {
        let buffer: InputBuffer<16> = InputBuffer::new();
        for &b in b"hello" {
            assert!(buffer.push(b));
        }
        let mut out = std::vec::Vec::new();
        while let Some(b) = buffer.pop() {
            out.push(b);
        }
        assert_eq!(out, b"hello");
    }

    #[test]
    fn test_wraps_around() {
        let buffer: InputBuffer<4> = InputBuffer::new();
        for round in 0..10u8 {
            assert!(buffer.push(round));
            assert!(buffer.push(round.wrapping_add(100)));
            assert!(buffer.has_data());
            assert_eq!(buffer.pop(), Some(round));
            assert_eq!(buffer.pop(), Some(round.wrapping_add(100)));
            assert!(!buffer.has_data());
        }
    }

    #[test]
    fn test_space_frees_after_pop() {
        let buffer: InputBuffer<3> = InputBuffer::new();
        assert!(buffer.push(1));
        assert!(buffer.push(2));
        assert!(!buffer.push(3));

        assert_eq!(buffer.pop(), Some(1));
        assert!(buffer.push(3));
        assert_eq!(buffer.pop(), Some(2));
        assert_eq!(buffer.pop(), Some(3));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_has_data_does_not_consume() {
        let buffer: InputBuffer<4> = InputBuffer::new();
        assert!(buffer.push(b'a'));
        assert!(buffer.has_data());
        assert!(buffer.has_data());
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.pop(), Some(b'a'));
    }
}
