#![forbid(unsafe_code)]

//! Wiring a reconciler to a resize channel.
//!
//! [`ResponsiveSession::initialize`] runs one full recompute, then installs
//! a debounced handler on the [`ResizeChannel`] that recomputes after each
//! burst of resize notifications. The handler only holds a weak reference:
//! dropping the session leaves a handler that does nothing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use viewstate_core::{Document, Result, ViewstateError};

use crate::debounce::Debounced;
use crate::reconciler::{ReconcileReport, StateReconciler};
use crate::resize_channel::ResizeChannel;

/// A reconciler shared between its session and the resize handler.
pub type SharedReconciler<D> = Rc<RefCell<StateReconciler<D>>>;

/// An initialized reconciler with its resize handler installed.
#[derive(Debug)]
pub struct ResponsiveSession<D: Document> {
    shared: SharedReconciler<D>,
    initial_report: ReconcileReport,
}

impl<D: Document + 'static> ResponsiveSession<D> {
    /// Recompute once and subscribe to `channel`.
    ///
    /// Fails with [`ViewstateError::SurfaceUnavailable`] if the document has
    /// no renderable root; nothing is written and no handler is installed.
    /// A handler already on `channel` is replaced.
    pub fn initialize(
        mut reconciler: StateReconciler<D>,
        channel: &mut ResizeChannel,
    ) -> Result<Self> {
        if !reconciler.document().is_available() {
            warn!("initialize skipped: no renderable document");
            return Err(ViewstateError::SurfaceUnavailable);
        }

        let initial_report = reconciler.recompute();
        let debounce = reconciler.config().debounce;
        let shared = Rc::new(RefCell::new(reconciler));

        let weak: Weak<RefCell<StateReconciler<D>>> = Rc::downgrade(&shared);
        let handler = Debounced::new(debounce, move |()| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            match shared.try_borrow_mut() {
                Ok(mut reconciler) => {
                    reconciler.recompute();
                }
                Err(_) => warn!("resize recompute skipped: reconciler busy"),
            }
        });
        channel.set_resize_handler(Box::new(handler));
        debug!(
            delay_ms = debounce.delay.as_millis() as u64,
            leading = debounce.leading,
            "resize handler installed"
        );

        Ok(Self {
            shared,
            initial_report,
        })
    }
}

impl<D: Document> ResponsiveSession<D> {
    /// Borrow the reconciler.
    ///
    /// # Panics
    ///
    /// Panics if the reconciler is mutably borrowed, which only happens
    /// while the resize handler is running.
    pub fn reconciler(&self) -> std::cell::Ref<'_, StateReconciler<D>> {
        self.shared.borrow()
    }

    /// Mutably borrow the reconciler.
    ///
    /// # Panics
    ///
    /// Panics if the reconciler is already borrowed.
    pub fn reconciler_mut(&self) -> std::cell::RefMut<'_, StateReconciler<D>> {
        self.shared.borrow_mut()
    }

    /// The shared handle the resize handler points at.
    pub fn shared(&self) -> SharedReconciler<D> {
        Rc::clone(&self.shared)
    }

    /// Recompute outside of the resize path.
    pub fn recompute(&self) -> ReconcileReport {
        self.shared.borrow_mut().recompute()
    }

    /// Report of the recompute performed by [`initialize`](Self::initialize).
    #[inline]
    pub fn initial_report(&self) -> ReconcileReport {
        self.initial_report
    }

    /// Report of the most recent recompute.
    pub fn last_report(&self) -> ReconcileReport {
        self.shared
            .borrow()
            .last_report()
            .unwrap_or(self.initial_report)
    }
}

impl<D: Document + 'static> StateReconciler<D> {
    /// Shorthand for [`ResponsiveSession::initialize`].
    pub fn initialize(self, channel: &mut ResizeChannel) -> Result<ResponsiveSession<D>> {
        ResponsiveSession::initialize(self, channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewstateConfig;
    use crate::simulator::SimulatedDocument;
    use core::time::Duration;
    use viewstate_core::{Breakpoint, MarkerSet, Viewport};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn session(width: u32, height: u32) -> (ResponsiveSession<SimulatedDocument>, ResizeChannel) {
        let mut channel = ResizeChannel::new();
        let reconciler =
            StateReconciler::with_defaults(SimulatedDocument::new(Viewport::new(width, height)));
        let session = reconciler.initialize(&mut channel).expect("available");
        (session, channel)
    }

    #[test]
    fn initialize_recomputes_and_subscribes() {
        let (session, channel) = session(1400, 900);
        assert!(channel.has_handler());
        assert_eq!(session.reconciler().recompute_count(), 1);
        assert!(session.reconciler().document().has_marker("large-desktop"));
        assert_eq!(session.initial_report().breakpoint.active(), Breakpoint::LargeDesktop);
    }

    #[test]
    fn unavailable_document_is_rejected() {
        let mut channel = ResizeChannel::new();
        let reconciler = StateReconciler::with_defaults(
            SimulatedDocument::new(Viewport::new(800, 600)).unavailable(),
        );
        let err = reconciler.initialize(&mut channel).expect_err("no root");
        assert_eq!(err, ViewstateError::SurfaceUnavailable);
        assert!(!channel.has_handler());
    }

    #[test]
    fn resize_burst_recomputes_once() {
        let (session, mut channel) = session(1400, 900);
        for (i, width) in [1300, 1100, 950, 900].into_iter().enumerate() {
            session.reconciler_mut().document_mut().resize(width, 900);
            channel.notify(ms(i as u64 * 10));
        }
        assert!(!channel.tick(ms(79)));
        assert!(channel.tick(ms(80)));
        assert_eq!(session.reconciler().recompute_count(), 2);
        assert_eq!(
            session.reconciler().document().breakpoint_markers(),
            vec![Breakpoint::Tablet]
        );
        assert_eq!(session.last_report().breakpoint.active(), Breakpoint::Tablet);
    }

    #[test]
    fn leading_config_recomputes_immediately() {
        let mut channel = ResizeChannel::new();
        let config = ViewstateConfig::default().with_debounce(
            crate::debounce::DebounceConfig::default().with_leading(true),
        );
        let session = StateReconciler::new(
            SimulatedDocument::new(Viewport::new(400, 800)),
            config,
        )
        .initialize(&mut channel)
        .expect("available");
        channel.notify(ms(0));
        assert_eq!(session.reconciler().recompute_count(), 2);
        assert!(channel.tick(ms(50)));
        assert_eq!(session.reconciler().recompute_count(), 3);
    }

    #[test]
    fn second_initialize_replaces_handler() {
        let mut channel = ResizeChannel::new();
        let first = StateReconciler::with_defaults(SimulatedDocument::new(Viewport::new(300, 500)))
            .initialize(&mut channel)
            .expect("available");
        let second =
            StateReconciler::with_defaults(SimulatedDocument::new(Viewport::new(1200, 800)))
                .initialize(&mut channel)
                .expect("available");
        assert_eq!(channel.replacement_count(), 1);

        channel.notify(ms(0));
        channel.tick(ms(50));
        assert_eq!(first.reconciler().recompute_count(), 1);
        assert_eq!(second.reconciler().recompute_count(), 2);
    }

    #[test]
    fn dropped_session_leaves_inert_handler() {
        let (session, mut channel) = session(800, 600);
        drop(session);
        channel.notify(ms(0));
        assert!(channel.tick(ms(50)));
    }

    #[test]
    fn busy_reconciler_skips_recompute() {
        let (session, mut channel) = session(800, 600);
        channel.notify(ms(0));
        let guard = session.reconciler_mut();
        assert!(channel.tick(ms(50)));
        drop(guard);
        assert_eq!(session.reconciler().recompute_count(), 1);
    }
}
