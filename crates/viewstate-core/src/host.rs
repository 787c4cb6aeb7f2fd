#![forbid(unsafe_code)]

//! Host interfaces.
//!
//! The reconciler never owns the page. It reads sizes through
//! [`RenderSurface`], writes class markers through [`MarkerSet`], and
//! resizes panels through [`ElementQuery`]. A browser binding and a
//! headless in-memory document both implement all three; anything that
//! does gets [`Document`] for free.

use core::time::Duration;

use crate::geometry::{FrameSize, ScrollOffset, Viewport};
use crate::selector::Selector;

/// Read-only size queries against the rendering surface.
pub trait RenderSurface {
    /// Current client-box size. Resampled on every call.
    fn viewport(&self) -> Viewport;

    /// Outer window frame size.
    fn outer_frame_size(&self) -> FrameSize;

    /// Size of the document content box.
    fn document_content_size(&self) -> FrameSize;

    /// Page scroll offsets.
    fn scroll_offset(&self) -> ScrollOffset;

    /// Whether a renderable document root exists.
    fn is_available(&self) -> bool {
        true
    }
}

/// The document's class-marker set. Labels are opaque strings.
pub trait MarkerSet {
    /// Add a marker. Adding a present marker is a no-op.
    fn add_marker(&mut self, name: &str);

    /// Remove a marker. Removing an absent marker is a no-op.
    fn remove_marker(&mut self, name: &str);

    /// Whether the marker is present.
    fn has_marker(&self, name: &str) -> bool;
}

/// Element lookup and per-element style writes.
pub trait ElementQuery {
    /// Handle to one matched element.
    type Element;

    /// All elements matching `selector`, in document order. An empty result
    /// is not an error.
    fn query_all(&self, selector: &Selector) -> Vec<Self::Element>;

    /// Set the rendered height of `element` in pixels.
    fn set_height(&mut self, element: &Self::Element, px: f64);
}

/// Everything the reconciler needs from a host.
pub trait Document: RenderSurface + MarkerSet + ElementQuery {}

impl<T: RenderSurface + MarkerSet + ElementQuery> Document for T {}

/// Monotonic time source supplied by the host.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now_mono(&self) -> Duration;
}
