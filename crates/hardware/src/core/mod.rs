//! Core pipeline model.
//!
//! This module contains the instruction pipeline (latches, hazard logic,
//! stages, and the per-cycle controller) and the units it consults.

/// Instruction pipeline implementation (stages, latches, hazards, controller).
pub mod pipeline;

/// Functional units (branch prediction).
pub mod units;

pub use self::pipeline::Pipeline;
