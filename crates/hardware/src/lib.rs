//! Trace-driven in-order superscalar pipeline simulator library.
//!
//! This crate implements a cycle-accurate model of a W-wide, five-stage
//! (FE, ID, EX, MEM, WB) in-order pipeline fed by a trace of decoded
//! instruction records:
//! 1. **Core:** Pipeline latches, stage functions, hazard detection, and the per-cycle controller.
//! 2. **Trace:** Fixed-size binary trace records and trace sources.
//! 3. **Branch prediction:** Predictors behind a narrow oracle contract that gates fetch.
//! 4. **Simulation:** Run loop, configuration, and statistics collection.

/// Common types and constants (errors, trace record layout, sentinels).
pub mod common;
/// Simulator configuration (defaults, branch policy, pipeline width, forwarding).
pub mod config;
/// Pipeline core (latches, stages, hazards, controller) and branch prediction units.
pub mod core;
/// Run loop over a pipeline with an optional cycle budget.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Instruction trace records and trace sources.
pub mod trace;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Per-cycle pipeline controller.
pub use crate::core::pipeline::Pipeline;
/// Top-level run loop; construct with `Simulator::new`.
pub use crate::sim::Simulator;
