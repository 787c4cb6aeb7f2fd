#![forbid(unsafe_code)]

//! Host-controlled time for [`StepHost`](crate::StepHost).
//!
//! The debounce deadlines a session arms are plain offsets on this clock, so
//! tests and headless hosts decide exactly when a resize burst goes quiet.

use core::time::Duration;

use viewstate_core::Clock;

/// Monotonic time that only moves when the host moves it.
///
/// Starts at zero, the instant the session was initialized. Going backwards
/// with [`set`](Self::set) is allowed; the debouncer treats any deadline at
/// or before the new time as due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Jump to `now`, typically a deadline from
    /// [`ResizeChannel::next_deadline`](viewstate_runtime::ResizeChannel::next_deadline).
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Move forward by `dt`, e.g. one animation frame. Saturates.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl Clock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}
