//! Trailing-edge input debouncing as a clock-driven state machine.
//!
//! Each keystroke replaces the pending text and pushes the deadline out by
//! the configured quiet period; the pending text fires only once polling
//! observes the deadline has passed. Keeping this pure against an explicit
//! `now` keeps the list controller deterministic under a fixture clock.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Trailing-edge debouncer for free-text search input.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: TimeDelta,
    pending: Option<Pending>,
}

#[derive(Debug, Clone)]
struct Pending {
    text: String,
    deadline: DateTime<Utc>,
}

impl Debouncer {
    /// Build a debouncer with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay: TimeDelta::from_std(delay).unwrap_or_else(|_| TimeDelta::milliseconds(350)),
            pending: None,
        }
    }

    /// Record a keystroke, restarting the quiet period.
    pub fn input(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.pending = Some(Pending {
            text: text.into(),
            deadline: now + self.delay,
        });
    }

    /// Fire the pending text if its quiet period has elapsed.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            return self.pending.take().map(|p| p.text);
        }
        None
    }

    /// Fire the pending text immediately, elapsed or not.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|p| p.text)
    }

    /// Whether a keystroke is waiting out its quiet period.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
