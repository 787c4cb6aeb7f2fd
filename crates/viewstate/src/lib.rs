#![forbid(unsafe_code)]

//! viewstate public facade crate.
//!
//! Re-exports the types most hosts need and offers a prelude. Hosts build a
//! [`StateReconciler`] over their document, initialize it against a
//! [`ResizeChannel`], and forward resize notifications and timer callbacks.
//!
//! ```
//! use std::time::Duration;
//! use viewstate::prelude::*;
//!
//! # fn main() -> viewstate::Result<()> {
//! let mut channel = ResizeChannel::new();
//! let doc = SimulatedDocument::new(Viewport::new(1400, 900));
//! let session = StateReconciler::with_defaults(doc).initialize(&mut channel)?;
//!
//! session.reconciler_mut().document_mut().resize(900, 900);
//! channel.notify(Duration::ZERO);
//! channel.tick(Duration::from_millis(50));
//! assert_eq!(session.last_report().breakpoint.active(), Breakpoint::Tablet);
//! # Ok(())
//! # }
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use viewstate_core::{
    AspectClass, AspectThresholds, Breakpoint, BreakpointRange, Breakpoints, Clock, Document,
    ElementQuery, FrameSize, Marker, MarkerGroup, MarkerSet, PANEL_SELECTOR, RenderSurface,
    ScrollOffset, Selector, ViewstateError, Viewport, classify,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use viewstate_runtime::{
    BreakpointOutcome, DebounceConfig, Debounced, Debouncer, MonotonicClock, PanelOutcome,
    ReconcileLog, ReconcileReport, ResizeChannel, ResizeHandler, ResponsiveSession,
    SimulatedDocument, StateReconciler, ViewstateConfig, debounce,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use viewstate_web::{DeterministicClock, StepHost, StepResult};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for viewstate hosts.
#[derive(Debug)]
pub enum Error {
    /// Invalid input or missing rendering surface.
    Viewstate(ViewstateError),
    /// Report or log serialisation failed.
    Json(serde_json::Error),
    /// Logging could not be installed.
    Logging(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewstate(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "json: {err}"),
            Self::Logging(msg) => write!(f, "logging: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Viewstate(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<ViewstateError> for Error {
    fn from(err: ViewstateError) -> Self {
        Self::Viewstate(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Standard result type for viewstate APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Logging ----------------------------------------------------------------

/// Formatter installation for hosts that do not bring their own subscriber.
#[cfg(feature = "logging")]
pub mod logging {
    use tracing_subscriber::EnvFilter;

    use crate::{Error, Result};

    /// Environment variable holding the `EnvFilter` directive.
    pub const ENV_FILTER: &str = "VIEWSTATE_TRACE";

    /// Install a global formatter filtered by [`ENV_FILTER`] (default
    /// `warn`), emitting JSON lines when `json` is set.
    pub fn init(json: bool) -> Result<()> {
        let filter = EnvFilter::try_from_env(ENV_FILTER).unwrap_or_else(|_| EnvFilter::new("warn"));
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let installed = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        installed.map_err(|err| Error::Logging(err.to_string()))
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AspectClass, Breakpoint, Breakpoints, Document, Error, FrameSize, MarkerSet,
        RenderSurface, Result, Viewport,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{
        DebounceConfig, ResizeChannel, SimulatedDocument, StateReconciler, ViewstateConfig,
    };

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use viewstate_core as core;
#[cfg(feature = "runtime")]
pub use viewstate_runtime as runtime;
#[cfg(feature = "web")]
pub use viewstate_web as web;
