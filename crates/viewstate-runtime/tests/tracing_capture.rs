#![forbid(unsafe_code)]

//! Tracing instrumentation tests.
//!
//! A capture layer records span names and event messages emitted while a
//! reconciler runs, so the instrumentation contract is checked without a
//! formatter.

use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use viewstate_core::Viewport;
use viewstate_runtime::{ResizeChannel, SimulatedDocument, StateReconciler};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone, Default)]
struct Captured {
    spans: Vec<String>,
    events: Vec<(String, Option<String>)>,
}

struct CaptureLayer {
    captured: Arc<Mutex<Captured>>,
}

struct MessageVisitor(Option<String>);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for CaptureLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.captured
            .lock()
            .unwrap()
            .spans
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        let parent = ctx
            .event_span(event)
            .map(|span| span.name().to_string());
        self.captured
            .lock()
            .unwrap()
            .events
            .push((visitor.0.unwrap_or_default(), parent));
    }
}

fn with_capture<F: FnOnce()>(f: F) -> Captured {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let layer = CaptureLayer {
        captured: Arc::clone(&captured),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let out = captured.lock().unwrap().clone();
    out
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn recompute_opens_a_span() {
    let captured = with_capture(|| {
        let mut r =
            StateReconciler::with_defaults(SimulatedDocument::new(Viewport::new(1024, 768)));
        r.recompute();
        r.recompute();
    });
    let recomputes = captured
        .spans
        .iter()
        .filter(|name| *name == "viewstate.recompute")
        .count();
    assert_eq!(recomputes, 2);
}

#[test]
fn transition_is_logged_inside_recompute_span() {
    let captured = with_capture(|| {
        let mut r =
            StateReconciler::with_defaults(SimulatedDocument::new(Viewport::new(1400, 900)));
        r.recompute();
        r.document_mut().resize(900, 900);
        r.recompute();
        r.recompute();
    });
    let transitions: Vec<_> = captured
        .events
        .iter()
        .filter(|(msg, _)| msg.contains("breakpoint transition"))
        .collect();
    assert_eq!(transitions.len(), 2, "events: {:?}", captured.events);
    assert!(
        transitions
            .iter()
            .all(|(_, parent)| parent.as_deref() == Some("viewstate.recompute"))
    );
}

#[test]
fn handler_replacement_is_logged() {
    let captured = with_capture(|| {
        let mut channel = ResizeChannel::new();
        let _a = StateReconciler::with_defaults(SimulatedDocument::new(Viewport::new(300, 500)))
            .initialize(&mut channel)
            .unwrap();
        let _b = StateReconciler::with_defaults(SimulatedDocument::new(Viewport::new(300, 500)))
            .initialize(&mut channel)
            .unwrap();
    });
    assert!(
        captured
            .events
            .iter()
            .any(|(msg, _)| msg.contains("resize handler replaced"))
    );
}

#[test]
fn unavailable_surface_warns() {
    let captured = with_capture(|| {
        let mut channel = ResizeChannel::new();
        let result = StateReconciler::with_defaults(
            SimulatedDocument::new(Viewport::new(300, 500)).unavailable(),
        )
        .initialize(&mut channel);
        assert!(result.is_err());
    });
    assert!(
        captured
            .events
            .iter()
            .any(|(msg, _)| msg.contains("no renderable document"))
    );
}
