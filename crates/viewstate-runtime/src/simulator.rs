#![forbid(unsafe_code)]

//! Headless document for deterministic testing.
//!
//! [`SimulatedDocument`] implements every host trait in memory. Sizes are set
//! directly, markers live in an ordered set, and each marker write is
//! recorded as a [`MarkerOp`] so tests can assert on exactly what the
//! reconciler touched.
//!
//! # Example
//!
//! ```
//! use viewstate_core::{MarkerSet, Viewport};
//! use viewstate_runtime::reconciler::StateReconciler;
//! use viewstate_runtime::simulator::SimulatedDocument;
//!
//! let doc = SimulatedDocument::new(Viewport::new(1400, 900)).with_element(&["panel-hero"]);
//! let mut reconciler = StateReconciler::with_defaults(doc);
//! reconciler.recompute();
//! assert!(reconciler.document().has_marker("large-desktop"));
//! assert_eq!(reconciler.document().element(0).and_then(|e| e.height), Some(900.0));
//! ```

use std::collections::BTreeSet;

use viewstate_core::{
    AspectClass, Breakpoint, ElementQuery, FrameSize, MarkerSet, RenderSurface, ScrollOffset,
    Selector, Viewport,
};

/// One recorded marker write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerOp {
    /// `add_marker` was called.
    Add(String),
    /// `remove_marker` was called.
    Remove(String),
}

/// An element in the simulated document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulatedElement {
    /// Class list.
    pub classes: Vec<String>,
    /// Height written by the reconciler, if any.
    pub height: Option<f64>,
}

/// In-memory [`Document`](viewstate_core::Document).
///
/// Until overridden, the outer frame and the content box both track the
/// viewport.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDocument {
    viewport: Viewport,
    outer_frame: Option<FrameSize>,
    content: Option<FrameSize>,
    scroll: ScrollOffset,
    available: bool,
    markers: BTreeSet<String>,
    marker_ops: Vec<MarkerOp>,
    elements: Vec<SimulatedElement>,
}

impl SimulatedDocument {
    /// Create a document with the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            available: true,
            ..Self::default()
        }
    }

    /// Pin the outer frame size.
    #[must_use]
    pub fn with_outer_frame(mut self, frame: FrameSize) -> Self {
        self.outer_frame = Some(frame);
        self
    }

    /// Pin the document content size.
    #[must_use]
    pub fn with_content_size(mut self, content: FrameSize) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the scroll offsets.
    #[must_use]
    pub fn with_scroll(mut self, x: f64, y: f64) -> Self {
        self.scroll = ScrollOffset::new(x, y);
        self
    }

    /// Append an element with the given classes.
    #[must_use]
    pub fn with_element(mut self, classes: &[&str]) -> Self {
        self.elements.push(SimulatedElement {
            classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            height: None,
        });
        self
    }

    /// Mark the document as having no renderable root.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    // --- Mutation -----------------------------------------------------------

    /// Change the viewport only.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Change the viewport and let the outer frame follow it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.outer_frame = None;
    }

    /// Pin the outer frame size.
    pub fn set_outer_frame(&mut self, frame: FrameSize) {
        self.outer_frame = Some(frame);
    }

    /// Pin the document content size.
    pub fn set_content_size(&mut self, content: FrameSize) {
        self.content = Some(content);
    }

    // --- Inspection ---------------------------------------------------------

    /// Markers currently present, sorted.
    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    /// Marker writes since creation or the last [`clear_marker_ops`](Self::clear_marker_ops).
    pub fn marker_ops(&self) -> &[MarkerOp] {
        &self.marker_ops
    }

    /// Forget recorded marker writes.
    pub fn clear_marker_ops(&mut self) {
        self.marker_ops.clear();
    }

    /// All elements in document order.
    pub fn elements(&self) -> &[SimulatedElement] {
        &self.elements
    }

    /// Element at `index`.
    pub fn element(&self, index: usize) -> Option<&SimulatedElement> {
        self.elements.get(index)
    }

    /// Breakpoint markers present, in priority order.
    pub fn breakpoint_markers(&self) -> Vec<Breakpoint> {
        Breakpoint::ALL
            .into_iter()
            .filter(|bp| self.markers.contains(bp.label()))
            .collect()
    }

    /// Aspect markers present.
    pub fn aspect_markers(&self) -> Vec<AspectClass> {
        AspectClass::ALL
            .into_iter()
            .filter(|class| self.markers.contains(class.label()))
            .collect()
    }

    fn viewport_frame(&self) -> FrameSize {
        FrameSize::new(
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        )
    }
}

impl RenderSurface for SimulatedDocument {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn outer_frame_size(&self) -> FrameSize {
        self.outer_frame.unwrap_or_else(|| self.viewport_frame())
    }

    fn document_content_size(&self) -> FrameSize {
        self.content.unwrap_or_else(|| self.viewport_frame())
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

impl MarkerSet for SimulatedDocument {
    fn add_marker(&mut self, name: &str) {
        self.marker_ops.push(MarkerOp::Add(name.to_owned()));
        self.markers.insert(name.to_owned());
    }

    fn remove_marker(&mut self, name: &str) {
        self.marker_ops.push(MarkerOp::Remove(name.to_owned()));
        self.markers.remove(name);
    }

    fn has_marker(&self, name: &str) -> bool {
        self.markers.contains(name)
    }
}

impl ElementQuery for SimulatedDocument {
    type Element = usize;

    fn query_all(&self, selector: &Selector) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| selector.matches(el.classes.as_slice()))
            .map(|(idx, _)| idx)
            .collect()
    }

    fn set_height(&mut self, element: &usize, px: f64) {
        if let Some(el) = self.elements.get_mut(*element) {
            el.height = Some(px);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_tracks_viewport_until_pinned() {
        let mut doc = SimulatedDocument::new(Viewport::new(800, 600));
        assert_eq!(doc.outer_frame_size(), FrameSize::new(800.0, 600.0));
        doc.set_outer_frame(FrameSize::new(820.0, 700.0));
        doc.set_viewport(Viewport::new(400, 300));
        assert_eq!(doc.outer_frame_size(), FrameSize::new(820.0, 700.0));
        doc.resize(1000, 500);
        assert_eq!(doc.outer_frame_size(), FrameSize::new(1000.0, 500.0));
    }

    #[test]
    fn marker_writes_are_recorded() {
        let mut doc = SimulatedDocument::new(Viewport::new(1, 1));
        doc.add_marker("tablet");
        doc.add_marker("tablet");
        doc.remove_marker("mobile");
        assert_eq!(doc.markers().collect::<Vec<_>>(), vec!["tablet"]);
        assert_eq!(doc.marker_ops().len(), 3);
        assert_eq!(doc.breakpoint_markers(), vec![Breakpoint::Tablet]);
    }

    #[test]
    fn query_uses_selector() {
        let doc = SimulatedDocument::new(Viewport::new(1, 1))
            .with_element(&["panel-a"])
            .with_element(&["card"])
            .with_element(&["card", "hero"]);
        assert_eq!(doc.query_all(&Selector::panel()), vec![0]);
        let hero = Selector::parse(".hero").expect("class selector");
        assert_eq!(doc.query_all(&hero), vec![2]);
    }

    #[test]
    fn unavailable_flag() {
        assert!(SimulatedDocument::new(Viewport::new(1, 1)).is_available());
        assert!(!SimulatedDocument::default().is_available());
        assert!(!SimulatedDocument::new(Viewport::new(1, 1)).unavailable().is_available());
    }
}
