//! Simulation driver.
//!
//! Wraps a [`Pipeline`](crate::core::pipeline::Pipeline) in a run loop with an
//! optional cycle budget and an optional per-cycle state dump.

/// Run loop and run outcome.
pub mod simulator;

pub use simulator::{RunOutcome, Simulator};
