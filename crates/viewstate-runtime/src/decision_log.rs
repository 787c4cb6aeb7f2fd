#![forbid(unsafe_code)]

//! JSONL decision log for reconcile passes.
//!
//! One [`ReconcileLog`] per [`recompute`](crate::reconciler::StateReconciler::recompute)
//! when [`ViewstateConfig::enable_logging`](crate::config::ViewstateConfig::enable_logging)
//! is set. Each entry serialises to a single JSON line tagged
//! `"event":"reconcile"`.

use serde::Serialize;

use viewstate_core::{AspectClass, Breakpoint};

use crate::reconciler::ReconcileReport;

/// Flattened record of one reconcile pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileLog {
    /// Always `"reconcile"`.
    pub event: &'static str,
    /// Zero-based pass index.
    pub idx: u64,
    /// Viewport width.
    pub width: u32,
    /// Viewport height.
    pub height: u32,
    /// Active breakpoint after the pass.
    pub breakpoint: Breakpoint,
    /// Whether breakpoint markers were rewritten.
    pub transitioned: bool,
    /// Breakpoint marker present before the pass, when it transitioned.
    pub previous: Option<Breakpoint>,
    /// Sticky-footer marker state.
    pub sticky_footer: bool,
    /// Outer frame height / width.
    pub aspect_ratio: Option<f64>,
    /// Applied aspect class.
    pub aspect: Option<AspectClass>,
    /// Height written to panels.
    pub panel_height: f64,
    /// Panels resized.
    pub panels: usize,
}

impl ReconcileLog {
    /// Build a log entry from a pass report.
    #[must_use]
    pub fn from_report(idx: u64, report: &ReconcileReport) -> Self {
        let (transitioned, previous) = match report.breakpoint {
            crate::reconciler::BreakpointOutcome::Transitioned { from, .. } => (true, from),
            crate::reconciler::BreakpointOutcome::Unchanged { .. } => (false, None),
        };
        Self {
            event: "reconcile",
            idx,
            width: report.viewport.width,
            height: report.viewport.height,
            breakpoint: report.breakpoint.active(),
            transitioned,
            previous,
            sticky_footer: report.sticky_footer,
            aspect_ratio: report.panels.aspect_ratio.filter(|r| r.is_finite()),
            aspect: report.panels.class,
            panel_height: report.panels.panel_height,
            panels: report.panels.panels_resized,
        }
    }

    /// Serialise as one JSON line (no trailing newline).
    pub fn to_jsonl(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Serialise a batch of entries, one per line.
pub fn to_jsonl_lines(logs: &[ReconcileLog]) -> serde_json::Result<String> {
    let mut out = String::new();
    for log in logs {
        out.push_str(&log.to_jsonl()?);
        out.push('\n');
    }
    Ok(out)
}
