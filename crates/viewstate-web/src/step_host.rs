#![forbid(unsafe_code)]

//! Step-based host loop.
//!
//! [`StepHost`] owns an initialized session, its [`ResizeChannel`], and a
//! [`DeterministicClock`]. The host controls the loop:
//!
//! 1. Update the document and call [`StepHost::notify_resize`].
//! 2. Advance time via [`StepHost::advance_time`].
//! 3. Call [`StepHost::step`] to deliver queued notifications and fire any
//!    due debounce deadline.
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use viewstate_core::Viewport;
//! use viewstate_runtime::{SimulatedDocument, StateReconciler};
//! use viewstate_web::StepHost;
//!
//! let doc = SimulatedDocument::new(Viewport::new(1400, 900));
//! let mut host = StepHost::new(StateReconciler::with_defaults(doc)).unwrap();
//!
//! host.update_document(|doc| doc.resize(900, 900));
//! host.notify_resize();
//! assert!(!host.step().recomputed);
//!
//! host.advance_time(Duration::from_millis(50));
//! assert!(host.step().recomputed);
//! ```

use core::time::Duration;

use serde::Serialize;
use tracing::trace;

use viewstate_core::{Clock, Document, Result};
use viewstate_runtime::{ReconcileReport, ResizeChannel, ResponsiveSession, StateReconciler};

use crate::clock::DeterministicClock;

/// Result of a single [`StepHost::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepResult {
    /// Step index, monotonically increasing.
    pub step_idx: u64,
    /// Resize notifications delivered during this step.
    pub notifications: u32,
    /// Whether at least one recompute ran during this step.
    pub recomputed: bool,
    /// Total recomputes since initialization.
    pub recompute_count: u64,
    /// Next debounce deadline after this step.
    pub next_deadline: Option<Duration>,
}

/// Host-driven runner for a [`ResponsiveSession`].
#[derive(Debug)]
pub struct StepHost<D: Document> {
    session: ResponsiveSession<D>,
    channel: ResizeChannel,
    clock: DeterministicClock,
    queued: u32,
    step_idx: u64,
}

impl<D: Document + 'static> StepHost<D> {
    /// Initialize `reconciler` against a fresh channel at time zero.
    pub fn new(reconciler: StateReconciler<D>) -> Result<Self> {
        let mut channel = ResizeChannel::new();
        let session = reconciler.initialize(&mut channel)?;
        Ok(Self {
            session,
            channel,
            clock: DeterministicClock::new(),
            queued: 0,
            step_idx: 0,
        })
    }
}

impl<D: Document> StepHost<D> {
    /// Queue a resize notification for the next [`step`](Self::step).
    pub fn notify_resize(&mut self) {
        self.queued = self.queued.saturating_add(1);
    }

    /// Mutate the document in place, typically before
    /// [`notify_resize`](Self::notify_resize).
    pub fn update_document<R>(&mut self, f: impl FnOnce(&mut D) -> R) -> R {
        f(self.session.reconciler_mut().document_mut())
    }

    /// Advance monotonic time by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set monotonic time.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Current monotonic time.
    pub fn now(&self) -> Duration {
        self.clock.now_mono()
    }

    /// Fire a deadline that is already due, deliver queued notifications at
    /// the current time, then fire the deadline again if it is due.
    pub fn step(&mut self) -> StepResult {
        let now = self.clock.now_mono();
        let before = self.session.reconciler().recompute_count();

        self.channel.tick(now);
        let notifications = std::mem::take(&mut self.queued);
        for _ in 0..notifications {
            self.channel.notify(now);
        }
        self.channel.tick(now);

        let recompute_count = self.session.reconciler().recompute_count();
        let result = StepResult {
            step_idx: self.step_idx,
            notifications,
            recomputed: recompute_count > before,
            recompute_count,
            next_deadline: self.channel.next_deadline(),
        };
        trace!(
            step = self.step_idx,
            notifications,
            recomputed = result.recomputed,
            "host step"
        );
        self.step_idx += 1;
        result
    }

    /// Jump the clock to the pending deadline, if any, and step.
    pub fn run_until_idle(&mut self) -> StepResult {
        if let Some(deadline) = self.channel.next_deadline() {
            if deadline > self.clock.now_mono() {
                self.clock.set(deadline);
            }
        }
        self.step()
    }

    /// The running session.
    pub fn session(&self) -> &ResponsiveSession<D> {
        &self.session
    }

    /// The resize channel.
    pub fn channel(&self) -> &ResizeChannel {
        &self.channel
    }

    /// Most recent reconcile report.
    pub fn last_report(&self) -> ReconcileReport {
        self.session.last_report()
    }

    /// Most recent reconcile report as a JSON object.
    pub fn last_report_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.last_report())
    }
}
