//! Console loop: the only place keyboard input meets the display.

use kronox_hal::TextMemory;
use log::error;
use spin::{Mutex, MutexGuard};

use crate::config::{FATAL_BACKGROUND, FATAL_FOREGROUND, HALT_KEY, HALT_MESSAGE};
use crate::display::Display;
use crate::input::InputBuffer;

/// Outcome of one [`Console::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Nothing was waiting.
    Idle,
    /// A byte was echoed to the display.
    Echoed(u8),
    /// A zero byte was consumed and ignored.
    Skipped,
    /// The halt key was read. Reported exactly once, with the message for the
    /// fatal-halt screen.
    Fatal(&'static str),
    /// The console already stopped; nothing was consumed.
    Halted,
}

/// Drains an input buffer onto a display until the halt key arrives.
pub struct Console<'a, const N: usize> {
    input: &'a InputBuffer<N>,
    halted: bool,
}

impl<'a, const N: usize> Console<'a, N> {
    /// Creates a running console reading from `input`.
    pub fn new(input: &'a InputBuffer<N>) -> Self {
        Console {
            input,
            halted: false,
        }
    }

    /// Returns true once the halt key has been read.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Consumes at most one byte from the input buffer.
    pub fn poll<M: TextMemory>(&mut self, display: &mut Display<M>) -> Poll {
        if self.halted {
            return Poll::Halted;
        }
        if !self.input.has_data() {
            return Poll::Idle;
        }

        match self.input.pop() {
            None => Poll::Idle,
            Some(HALT_KEY) => {
                self.halted = true;
                error!("halt key read from keyboard");
                Poll::Fatal(HALT_MESSAGE)
            }
            Some(0) => Poll::Skipped,
            Some(byte) => {
                display.put_char(byte);
                Poll::Echoed(byte)
            }
        }
    }

    /// Runs the console for the rest of the machine's life.
    ///
    /// `idle` is called whenever the buffer is empty and should wait for the
    /// next interrupt. `fatal` receives the halt message and never returns.
    pub fn run<M, I, F>(mut self, display: &Mutex<Display<M>>, mut idle: I, fatal: F) -> !
    where
        M: TextMemory,
        I: FnMut(),
        F: FnOnce(&'static str) -> !,
    {
        loop {
            let poll = self.poll(&mut *display.lock());
            match poll {
                Poll::Fatal(message) => fatal(message),
                Poll::Idle => idle(),
                Poll::Echoed(_) | Poll::Skipped | Poll::Halted => {}
            }
        }
    }
}

/// Paints the fatal-halt banner in the fatal colors.
pub fn halt_screen<M: TextMemory>(display: &mut Display<M>, message: &str) {
    display.set_color(FATAL_FOREGROUND, FATAL_BACKGROUND);
    display.print("\n[ PANIC ] ");
    display.print(message);
    display.print("\nSystem halted.\n");
}

/// Locks `mutex` for the halt path, breaking a lock the halted code still holds.
///
/// # Safety
///
/// Whoever held the lock must never run again: interrupts are disabled and
/// the caller does not return.
pub unsafe fn seize<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    if let Some(guard) = mutex.try_lock() {
        return guard;
    }
    // SAFETY: the previous holder is frozen per the contract above.
    unsafe { mutex.force_unlock() };
    mutex.lock()
}
