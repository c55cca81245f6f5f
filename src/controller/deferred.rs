//! One-shot deferred work.
//!
//! The controller never runs timers itself. A deferred task only records its
//! deadline and is fired by the host's regular `poll` once the deadline has
//! passed.

use std::time::{Duration, Instant};

/// Default delay before the auto-collapse check runs.
pub const DEFAULT_COLLAPSE_DELAY: Duration = Duration::from_millis(500);

/// A task due at a fixed instant, fired at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    due: Instant,
    fired: bool,
}

impl Deferred {
    /// Schedule a task `delay` after `now`.
    pub fn after(now: Instant, delay: Duration) -> Self {
        Self {
            due: now + delay,
            fired: false,
        }
    }

    /// The instant the task becomes due.
    pub fn due(&self) -> Instant {
        self.due
    }

    /// Returns true while the task has not fired yet.
    pub fn is_pending(&self) -> bool {
        !self.fired
    }

    /// Returns true if the task has not fired and its deadline has passed.
    pub fn is_due(&self, now: Instant) -> bool {
        !self.fired && now >= self.due
    }

    /// Returns true exactly once, on the first call at or after the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.fired = true;
        true
    }
}
