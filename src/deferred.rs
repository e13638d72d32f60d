//! A single cancelable action scheduled for a point in time.
//!
//! The owner polls [`Deferred::take_due`] from its event loop; nothing runs on
//! another thread, and dropping the owner drops anything still pending.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Deferred<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Deferred<T> {
    /// Replaces whatever was pending.
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: T) {
        self.pending = Some((now + delay, action));
    }

    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let due = self.deadline()?;
        if now < due {
            return None;
        }
        self.pending.take().map(|(_, action)| action)
    }
}
