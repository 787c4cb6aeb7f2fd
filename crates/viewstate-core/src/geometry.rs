#![forbid(unsafe_code)]

//! Geometric primitives for the rendering surface.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewstateError};

/// Client-box size of the rendering surface, in device-independent pixels.
///
/// A snapshot: hosts produce a fresh one on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport from already-validated dimensions.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build a viewport from raw host numbers.
    ///
    /// Fractional values are truncated. Negative, NaN, infinite, or
    /// out-of-range values fail with [`ViewstateError::InvalidInput`].
    pub fn from_raw(width: f64, height: f64) -> Result<Self> {
        Ok(Self {
            width: checked_dimension("width", width)?,
            height: checked_dimension("height", height)?,
        })
    }

    /// Build a viewport from DOM `clientWidth` / `clientHeight` values.
    pub fn from_client(width: i32, height: i32) -> Result<Self> {
        let width = u32::try_from(width)
            .map_err(|_| ViewstateError::invalid_input(format!("negative width {width}")))?;
        let height = u32::try_from(height)
            .map_err(|_| ViewstateError::invalid_input(format!("negative height {height}")))?;
        Ok(Self { width, height })
    }
}

fn checked_dimension(axis: &str, value: f64) -> Result<u32> {
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        crate::debug!(axis, value, "rejecting viewport dimension");
        return Err(ViewstateError::invalid_input(format!(
            "viewport {axis} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(value as u32)
}

/// Outer window frame or document content size.
///
/// Floating point because hosts report zoomed and fractional sizes here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl FrameSize {
    /// Create a frame size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Height divided by width.
    ///
    /// Returns `None` when the ratio is undefined (`0 / 0` or NaN inputs).
    /// A zero width with positive height yields `+inf`.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        let ratio = self.height / self.width;
        (!ratio.is_nan()).then_some(ratio)
    }

    /// True when this frame is strictly taller than `other`.
    #[inline]
    #[must_use]
    pub fn taller_than(&self, other: &FrameSize) -> bool {
        self.height > other.height
    }
}

/// Page scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    /// Horizontal offset (`pageXOffset`).
    pub x: f64,
    /// Vertical offset (`pageYOffset`).
    pub y: f64,
}

impl ScrollOffset {
    /// Create a scroll offset.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
