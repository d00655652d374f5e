//! Debounce timer driving autosave.
//!
//! Time is passed in explicitly, so the timer can be driven from a real
//! clock or from simulated instants in tests.

use std::time::{Duration, Instant};
use tracing::trace;

/// A single cancellable deadline.
///
/// Starting the timer always replaces any pending deadline, so at most one
/// save is ever outstanding.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Quiet period used when none is configured
    pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

    pub fn new(quiet_period: Duration) -> Self {
        DebounceTimer {
            quiet_period,
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Restart the quiet period from `now`
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet_period);
        trace!(quiet_ms = self.quiet_period.as_millis() as u64, "autosave timer restarted");
    }

    /// Drop the pending deadline, returning whether one existed
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire if the deadline has been reached. A fired timer is no longer pending.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Fire immediately if anything is pending
    pub fn flush_now(&mut self) -> bool {
        self.cancel()
    }
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUIET_PERIOD)
    }
}
