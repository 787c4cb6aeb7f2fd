#![forbid(unsafe_code)]

//! Core: viewport geometry, breakpoint and aspect classification, marker
//! labels, and the host traits the runtime reconciles against.

pub mod aspect;
pub mod breakpoint;
pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod marker;
pub mod selector;

pub use aspect::{AspectClass, AspectThresholds};
pub use breakpoint::{Breakpoint, BreakpointRange, Breakpoints, classify};
pub use error::{Result, ViewstateError};
pub use geometry::{FrameSize, ScrollOffset, Viewport};
pub use host::{Clock, Document, ElementQuery, MarkerSet, RenderSurface};
pub use marker::{Marker, MarkerGroup};
pub use selector::{PANEL_SELECTOR, Selector};

// `crate::debug!` resolves here with or without the `tracing` feature.
#[cfg(feature = "tracing")]
pub use logging::debug;
