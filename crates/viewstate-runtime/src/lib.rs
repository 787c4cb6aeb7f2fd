#![forbid(unsafe_code)]

//! Runtime: the responsive state reconciler, the debounce scheduler, and the
//! resize channel that connects them.
//!
//! Hosts construct a [`StateReconciler`] over something implementing
//! [`Document`](viewstate_core::Document), call
//! [`initialize`](StateReconciler::initialize) with a [`ResizeChannel`], then
//! forward resize notifications and timer callbacks to that channel using
//! monotonic time from a [`Clock`](viewstate_core::Clock).

pub mod clock;
pub mod config;
pub mod debounce;
pub mod decision_log;
pub mod reconciler;
pub mod resize_channel;
pub mod session;
pub mod simulator;

pub use clock::MonotonicClock;
pub use config::ViewstateConfig;
pub use debounce::{
    CallFires, DEFAULT_DELAY, DebounceConfig, DebounceState, DebounceStats, Debounced, Debouncer,
    debounce,
};
pub use decision_log::ReconcileLog;
pub use reconciler::{BreakpointOutcome, PanelOutcome, ReconcileReport, StateReconciler};
pub use resize_channel::{ResizeChannel, ResizeHandler};
pub use session::{ResponsiveSession, SharedReconciler};
pub use simulator::{MarkerOp, SimulatedDocument, SimulatedElement};
