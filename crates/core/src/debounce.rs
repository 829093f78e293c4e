//! Restart-on-change timer.
//!
//! [`Debouncer`] holds at most one pending value. Every [`Debouncer::schedule`]
//! replaces the pending value and pushes the deadline out to `now + delay`; the
//! value fires once its deadline has passed without a newer schedule. The clock is
//! passed in by the caller so the primitive itself never sleeps, and the async
//! controller drives it with `tokio::time::sleep_until(deadline)`.
//!
//! [`Debounced`] layers a current output on top, which is the "derived value"
//! shape UIs want: feed it the raw value, read back the settled one.

use std::time::Duration;

use tokio::time::Instant;

struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// A single cancellable timer carrying the value that was current when it started.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel whatever is pending and start a new timer for `value`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending { value, deadline: now + self.delay });
    }

    /// When the pending timer fires, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire the pending timer if its deadline has been reached.
    ///
    /// Returns the carried value exactly once; later polls return `None` until the
    /// next [`schedule`](Self::schedule).
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.deadline <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drop the pending timer without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// A value that only follows its input once the input has been quiet for `delay`.
pub struct Debounced<T> {
    output: T,
    timer: Debouncer<T>,
}

impl<T: Clone + PartialEq> Debounced<T> {
    /// Start with `initial` as the settled output.
    pub fn new(initial: T, delay: Duration) -> Self {
        Self { output: initial, timer: Debouncer::new(delay) }
    }

    /// Feed a new input value. Restarts the timer.
    pub fn set(&mut self, value: T, now: Instant) {
        self.timer.schedule(value, now);
    }

    /// Advance to `now`. Returns true if the output changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.timer.poll(now) {
            Some(value) if value != self.output => {
                self.output = value;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self) -> &T {
        &self.output
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }
}
