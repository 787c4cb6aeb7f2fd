#![forbid(unsafe_code)]

//! Wall-clock time source.

use core::time::Duration;

use viewstate_core::Clock;
use web_time::Instant;

/// Monotonic clock measured from its creation.
///
/// Backed by `web_time::Instant`, so it also works on `wasm32-unknown-unknown`
/// where `std::time::Instant` panics.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Start a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_mono(&self) -> Duration {
        self.origin.elapsed()
    }
}
