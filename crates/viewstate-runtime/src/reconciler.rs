#![forbid(unsafe_code)]

//! Responsive state reconciliation.
//!
//! [`StateReconciler`] keeps three independent marker groups on a
//! [`Document`] in line with the current surface:
//!
//! - **Breakpoint**: change-minimal. Markers are only touched when the
//!   active category's marker is missing.
//! - **Sticky footer**: written on every pass.
//! - **Panel aspect**: written on every pass, together with the height of
//!   every panel element.
//!
//! # Invariants
//!
//! - After any reconcile, at most one breakpoint marker and at most one
//!   aspect marker are present.
//! - A second [`reconcile_breakpoint`](StateReconciler::reconcile_breakpoint)
//!   with no width change performs no marker writes.
//! - The groups are disjoint, so the final state of
//!   [`recompute`](StateReconciler::recompute) does not depend on the order
//!   of its steps.

use serde::Serialize;
use tracing::debug;

use viewstate_core::{AspectClass, Breakpoint, Document, FrameSize, Viewport};
use viewstate_core::marker::STICKY_FOOTER;

use crate::config::ViewstateConfig;
use crate::decision_log::ReconcileLog;

/// Result of one breakpoint reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakpointOutcome {
    /// The document already carried the active category's marker.
    Unchanged {
        /// Active category.
        active: Breakpoint,
    },
    /// Markers were cleared and the active category's marker added.
    Transitioned {
        /// Marker present before the transition, if any.
        from: Option<Breakpoint>,
        /// Newly applied category.
        to: Breakpoint,
    },
}

impl BreakpointOutcome {
    /// The category active after this reconcile.
    #[must_use]
    pub const fn active(self) -> Breakpoint {
        match self {
            Self::Unchanged { active } => active,
            Self::Transitioned { to, .. } => to,
        }
    }

    /// Whether markers were rewritten.
    #[must_use]
    pub const fn is_transition(self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// Result of one panel/aspect reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelOutcome {
    /// Outer frame height / width; `None` for a `0 × 0` frame.
    pub aspect_ratio: Option<f64>,
    /// Applied aspect class; `None` leaves the aspect markers untouched.
    pub class: Option<AspectClass>,
    /// Height written to every panel, in pixels.
    pub panel_height: f64,
    /// Number of panel elements resized.
    pub panels_resized: usize,
}

/// Everything one [`StateReconciler::recompute`] pass decided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReconcileReport {
    /// Viewport sampled at the start of the pass.
    pub viewport: Viewport,
    /// Whether the sticky-footer marker is now present.
    pub sticky_footer: bool,
    /// Panel/aspect outcome.
    pub panels: PanelOutcome,
    /// Breakpoint outcome.
    pub breakpoint: BreakpointOutcome,
}

/// Keeps a document's responsive markers consistent with its surface.
///
/// Owns its document; share it with a resize handler through
/// [`ResponsiveSession`](crate::session::ResponsiveSession).
#[derive(Debug)]
pub struct StateReconciler<D: Document> {
    document: D,
    config: ViewstateConfig,
    initial_viewport: Viewport,
    recompute_count: u64,
    last_report: Option<ReconcileReport>,
    logs: Vec<ReconcileLog>,
}

impl<D: Document> StateReconciler<D> {
    /// Create a reconciler. The viewport at this moment is kept as
    /// [`initial_viewport`](Self::initial_viewport).
    pub fn new(document: D, config: ViewstateConfig) -> Self {
        let initial_viewport = document.viewport();
        Self {
            document,
            config,
            initial_viewport,
            recompute_count: 0,
            last_report: None,
            logs: Vec::new(),
        }
    }

    /// Create a reconciler with default configuration.
    pub fn with_defaults(document: D) -> Self {
        Self::new(document, ViewstateConfig::default())
    }

    /// The document being reconciled.
    #[inline]
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the document, for hosts that update it in place.
    #[inline]
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Give the document back.
    pub fn into_document(self) -> D {
        self.document
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &ViewstateConfig {
        &self.config
    }

    // --- Surface queries --------------------------------------------------

    /// Current viewport, freshly sampled.
    pub fn viewport(&self) -> Viewport {
        self.document.viewport()
    }

    /// Current viewport width.
    pub fn viewport_width(&self) -> u32 {
        self.document.viewport().width
    }

    /// Current viewport height.
    pub fn viewport_height(&self) -> u32 {
        self.document.viewport().height
    }

    /// Viewport observed when this reconciler was created.
    #[inline]
    pub fn initial_viewport(&self) -> Viewport {
        self.initial_viewport
    }

    /// Horizontal page scroll offset.
    pub fn scroll_x(&self) -> f64 {
        self.document.scroll_offset().x
    }

    /// Vertical page scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.document.scroll_offset().y
    }

    // --- Predicates ---------------------------------------------------------

    /// Category the current width classifies as.
    pub fn classify_current(&self) -> Breakpoint {
        self.config.breakpoints.classify_width(self.viewport_width())
    }

    /// Whether the current width classifies as `bp`.
    pub fn is(&self, bp: Breakpoint) -> bool {
        self.config.breakpoints.is(bp, self.viewport_width())
    }

    /// Whether the document carries `bp`'s marker.
    pub fn has_marker(&self, bp: Breakpoint) -> bool {
        self.document.has_marker(bp.label())
    }

    /// First breakpoint marker present, in priority order.
    pub fn marked_breakpoint(&self) -> Option<Breakpoint> {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| self.has_marker(*bp))
    }

    // --- Reconcile steps ----------------------------------------------------

    /// Remove all five breakpoint markers.
    pub fn clear_breakpoint_markers(&mut self) {
        for bp in Breakpoint::ALL {
            self.document.remove_marker(bp.label());
        }
    }

    /// Apply the active breakpoint's marker if it is missing.
    ///
    /// Categories are checked in [`Breakpoint::ALL`] order and the first one
    /// that is active but unmarked wins; ranges partition the width axis so
    /// at most one can be active. If the active marker is already present
    /// nothing is written.
    pub fn reconcile_breakpoint(&mut self) -> BreakpointOutcome {
        let width = self.viewport_width();
        let breakpoints = self.config.breakpoints;

        for bp in Breakpoint::ALL {
            if breakpoints.is(bp, width) && !self.has_marker(bp) {
                let from = self.marked_breakpoint();
                self.clear_breakpoint_markers();
                self.document.add_marker(bp.label());
                debug!(
                    width,
                    from = from.map(Breakpoint::label),
                    to = bp.label(),
                    "breakpoint transition"
                );
                return BreakpointOutcome::Transitioned { from, to: bp };
            }
        }

        BreakpointOutcome::Unchanged {
            active: breakpoints.classify_width(width),
        }
    }

    /// Set or clear the sticky-footer marker. Always writes.
    ///
    /// The footer sticks when the outer frame is taller than the document
    /// content.
    pub fn reconcile_sticky_footer(&mut self) -> bool {
        let frame = self.document.outer_frame_size();
        let content = self.document.document_content_size();
        let sticky = frame.taller_than(&content);
        if sticky {
            self.document.add_marker(STICKY_FOOTER);
        } else {
            self.document.remove_marker(STICKY_FOOTER);
        }
        sticky
    }

    /// Apply the aspect marker and resize every panel.
    ///
    /// Both writes happen inside this call. An undefined ratio (a `0 × 0`
    /// frame) leaves the aspect markers as they were and sizes panels to
    /// the outer height.
    pub fn reconcile_panel_aspect(&mut self) -> PanelOutcome {
        let frame: FrameSize = self.document.outer_frame_size();
        let aspect_ratio = frame.aspect_ratio();
        let class = aspect_ratio.and_then(|ratio| self.config.aspect.classify(ratio));

        if let Some(class) = class {
            for other in AspectClass::ALL {
                if other != class {
                    self.document.remove_marker(other.label());
                }
            }
            self.document.add_marker(class.label());
        }

        let panel_height = match aspect_ratio {
            Some(ratio) => self.config.aspect.panel_height(frame.height, ratio),
            None => frame.height,
        };
        let panels = self.document.query_all(&self.config.panel_selector);
        for panel in &panels {
            self.document.set_height(panel, panel_height);
        }

        PanelOutcome {
            aspect_ratio,
            class,
            panel_height,
            panels_resized: panels.len(),
        }
    }

    /// Run sticky footer, panel aspect, then breakpoint.
    pub fn recompute(&mut self) -> ReconcileReport {
        let span = tracing::debug_span!("viewstate.recompute", idx = self.recompute_count);
        let _guard = span.enter();

        let viewport = self.viewport();
        let sticky_footer = self.reconcile_sticky_footer();
        let panels = self.reconcile_panel_aspect();
        let breakpoint = self.reconcile_breakpoint();

        let report = ReconcileReport {
            viewport,
            sticky_footer,
            panels,
            breakpoint,
        };
        if self.config.enable_logging {
            self.logs
                .push(ReconcileLog::from_report(self.recompute_count, &report));
        }
        self.recompute_count += 1;
        self.last_report = Some(report);
        report
    }

    // --- Bookkeeping ---------------------------------------------------------

    /// Number of completed [`recompute`](Self::recompute) passes.
    #[inline]
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Report of the most recent pass.
    #[inline]
    pub fn last_report(&self) -> Option<ReconcileReport> {
        self.last_report
    }

    /// Decision logs recorded so far (empty unless logging is enabled).
    #[inline]
    pub fn logs(&self) -> &[ReconcileLog] {
        &self.logs
    }

    /// Drain the decision logs.
    pub fn take_logs(&mut self) -> Vec<ReconcileLog> {
        std::mem::take(&mut self.logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{MarkerOp, SimulatedDocument};
    use viewstate_core::{MarkerSet, Viewport};

    fn reconciler(width: u32, height: u32) -> StateReconciler<SimulatedDocument> {
        StateReconciler::with_defaults(SimulatedDocument::new(Viewport::new(width, height)))
    }

    fn breakpoint_markers(r: &StateReconciler<SimulatedDocument>) -> Vec<Breakpoint> {
        Breakpoint::ALL
            .into_iter()
            .filter(|bp| r.document().has_marker(bp.label()))
            .collect()
    }

    #[test]
    fn first_reconcile_applies_marker() {
        let mut r = reconciler(900, 700);
        let outcome = r.reconcile_breakpoint();
        assert_eq!(
            outcome,
            BreakpointOutcome::Transitioned {
                from: None,
                to: Breakpoint::Tablet
            }
        );
        assert_eq!(breakpoint_markers(&r), vec![Breakpoint::Tablet]);
    }

    #[test]
    fn second_reconcile_writes_nothing() {
        let mut r = reconciler(1200, 800);
        r.reconcile_breakpoint();
        r.document_mut().clear_marker_ops();

        let outcome = r.reconcile_breakpoint();
        assert_eq!(
            outcome,
            BreakpointOutcome::Unchanged {
                active: Breakpoint::Desktop
            }
        );
        assert!(r.document().marker_ops().is_empty());
    }

    #[test]
    fn transition_clears_all_five_then_adds_one() {
        let mut r = reconciler(1400, 900);
        r.reconcile_breakpoint();
        r.document_mut().set_viewport(Viewport::new(900, 900));
        r.document_mut().clear_marker_ops();

        let outcome = r.reconcile_breakpoint();
        assert_eq!(
            outcome,
            BreakpointOutcome::Transitioned {
                from: Some(Breakpoint::LargeDesktop),
                to: Breakpoint::Tablet
            }
        );
        let ops = r.document().marker_ops();
        assert_eq!(ops.len(), 6);
        assert!(ops[..5].iter().all(|op| matches!(op, MarkerOp::Remove(_))));
        assert_eq!(ops[5], MarkerOp::Add("tablet".to_owned()));
        assert_eq!(breakpoint_markers(&r), vec![Breakpoint::Tablet]);
    }

    #[test]
    fn stray_markers_are_cleared_on_transition() {
        let mut r = reconciler(300, 600);
        r.document_mut().add_marker("desktop");
        r.document_mut().add_marker("large-desktop");
        let outcome = r.reconcile_breakpoint();
        assert_eq!(outcome.active(), Breakpoint::Mobile);
        assert_eq!(breakpoint_markers(&r), vec![Breakpoint::Mobile]);
    }

    #[test]
    fn sticky_footer_follows_content_height() {
        let doc = SimulatedDocument::new(Viewport::new(1024, 768))
            .with_outer_frame(FrameSize::new(1024.0, 900.0))
            .with_content_size(FrameSize::new(1024.0, 600.0));
        let mut r = StateReconciler::with_defaults(doc);
        assert!(r.reconcile_sticky_footer());
        assert!(r.document().has_marker(STICKY_FOOTER));

        r.document_mut()
            .set_content_size(FrameSize::new(1024.0, 2400.0));
        assert!(!r.reconcile_sticky_footer());
        assert!(!r.document().has_marker(STICKY_FOOTER));
    }

    #[test]
    fn sticky_footer_writes_every_call() {
        let mut r = reconciler(800, 600);
        r.reconcile_sticky_footer();
        r.reconcile_sticky_footer();
        assert_eq!(r.document().marker_ops().len(), 2);
    }

    #[test]
    fn panel_aspect_classes_and_heights() {
        let cases = [
            (FrameSize::new(1600.0, 800.0), AspectClass::Landscape, 800.0),
            (FrameSize::new(900.0, 900.0), AspectClass::Portrait, 900.0),
            (FrameSize::new(400.0, 800.0), AspectClass::SuperPortrait, 400.0),
        ];
        for (frame, class, height) in cases {
            let doc = SimulatedDocument::new(Viewport::new(800, 600))
                .with_outer_frame(frame)
                .with_element(&["panel-hero"])
                .with_element(&["sidebar"])
                .with_element(&["x", "panel-footer"]);
            let mut r = StateReconciler::with_defaults(doc);
            let outcome = r.reconcile_panel_aspect();
            assert_eq!(outcome.class, Some(class));
            assert_eq!(outcome.panel_height, height);
            assert_eq!(outcome.panels_resized, 2);
            assert_eq!(r.document().element(0).and_then(|e| e.height), Some(height));
            assert_eq!(r.document().element(1).and_then(|e| e.height), None);
            assert_eq!(r.document().aspect_markers(), vec![class]);
        }
    }

    #[test]
    fn panel_aspect_switches_marker() {
        let mut r = StateReconciler::with_defaults(
            SimulatedDocument::new(Viewport::new(800, 600))
                .with_outer_frame(FrameSize::new(1600.0, 800.0)),
        );
        r.reconcile_panel_aspect();
        r.document_mut()
            .set_outer_frame(FrameSize::new(400.0, 900.0));
        r.reconcile_panel_aspect();
        assert_eq!(r.document().aspect_markers(), vec![AspectClass::SuperPortrait]);
    }

    #[test]
    fn zero_frame_leaves_aspect_markers() {
        let mut r = StateReconciler::with_defaults(
            SimulatedDocument::new(Viewport::new(0, 0))
                .with_outer_frame(FrameSize::new(0.0, 0.0))
                .with_element(&["panel-a"]),
        );
        let outcome = r.reconcile_panel_aspect();
        assert_eq!(outcome.class, None);
        assert_eq!(outcome.panel_height, 0.0);
        assert!(r.document().aspect_markers().is_empty());
    }

    #[test]
    fn empty_selector_match_is_not_an_error() {
        let mut r = reconciler(800, 600);
        assert_eq!(r.reconcile_panel_aspect().panels_resized, 0);
    }

    #[test]
    fn recompute_reports_all_groups() {
        let mut r = StateReconciler::new(
            SimulatedDocument::new(Viewport::new(1400, 800))
                .with_content_size(FrameSize::new(1400.0, 300.0)),
            ViewstateConfig::default().with_logging(true),
        );
        let report = r.recompute();
        assert_eq!(report.viewport, Viewport::new(1400, 800));
        assert!(report.sticky_footer);
        assert_eq!(report.panels.class, Some(AspectClass::Landscape));
        assert_eq!(report.breakpoint.active(), Breakpoint::LargeDesktop);
        assert_eq!(r.recompute_count(), 1);
        assert_eq!(r.last_report(), Some(report));
        assert_eq!(r.logs().len(), 1);
        assert_eq!(r.take_logs().len(), 1);
        assert!(r.logs().is_empty());
    }

    #[test]
    fn logging_disabled_records_nothing() {
        let mut r = reconciler(800, 600);
        r.recompute();
        assert!(r.logs().is_empty());
    }

    #[test]
    fn surface_queries_pass_through() {
        let mut r = StateReconciler::with_defaults(
            SimulatedDocument::new(Viewport::new(640, 480)).with_scroll(12.0, 340.5),
        );
        assert_eq!(r.initial_viewport(), Viewport::new(640, 480));
        assert_eq!(r.viewport_width(), 640);
        assert_eq!(r.viewport_height(), 480);
        assert_eq!(r.scroll_x(), 12.0);
        assert_eq!(r.scroll_y(), 340.5);

        r.document_mut().set_viewport(Viewport::new(1280, 720));
        assert_eq!(r.viewport(), Viewport::new(1280, 720));
        assert_eq!(r.initial_viewport(), Viewport::new(640, 480));
        assert!(r.is(Breakpoint::Desktop));
        assert_eq!(r.classify_current(), Breakpoint::Desktop);
    }

    #[test]
    fn custom_breakpoints_are_honoured() {
        let mut r = StateReconciler::new(
            SimulatedDocument::new(Viewport::new(700, 500)),
            ViewstateConfig::default().with_breakpoints(viewstate_core::Breakpoints::new(
                320, 640, 960, 1280,
            )),
        );
        assert_eq!(r.reconcile_breakpoint().active(), Breakpoint::Tablet);
    }
}
