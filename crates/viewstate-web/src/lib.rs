#![forbid(unsafe_code)]

//! Web host for viewstate.
//!
//! Time and resize notifications are host-driven: nothing here spawns
//! threads, blocks, or reads `std::time::Instant`. [`StepHost`] runs a
//! session against any [`Document`](viewstate_core::Document) with a
//! [`DeterministicClock`]; on `wasm32` the `ViewstateWeb` export wires the
//! same loop to `window.onresize` and `setTimeout` over the live DOM.

pub mod clock;
pub mod step_host;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use clock::DeterministicClock;
pub use step_host::{StepHost, StepResult};

#[cfg(target_arch = "wasm32")]
pub use wasm::{DomDocument, ViewstateWeb};
