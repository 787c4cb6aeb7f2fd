#![forbid(unsafe_code)]

//! Logging shim.
//!
//! Core only emits `debug!` events. With the `tracing` feature the macro is
//! `tracing::debug`; without it the call expands to nothing, so call sites
//! carry no `cfg` guards.

#[cfg(feature = "tracing")]
pub use tracing::debug;

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Discarded when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }
}
