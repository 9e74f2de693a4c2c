//! Cancellable single-shot timer that coalesces rapid calls.

use std::time::{Duration, Instant};

/// Debounced trigger carrying the value of the most recent call.
///
/// Every `call` re-arms the timer: the pending value is replaced and the
/// deadline moves to `now + delay`. The value is handed out by `poll` once
/// the deadline has passed without another call.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create an idle debouncer.
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Re-arm with a new value. Returns the superseded value, if any.
    pub fn call(&mut self, value: T, now: Instant) -> Option<T> {
        self.pending.replace((value, now + self.delay)).map(|(old, _)| old)
    }

    /// Drop the pending call.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Deadline of the pending call.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Value of the pending call, if any.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if deadline <= now => self.cancel(),
            _ => None,
        }
    }
}
