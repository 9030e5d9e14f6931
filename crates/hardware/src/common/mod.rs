//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the error types and the constants shared by the
//! trace reader, the pipeline controller, and the statistics code.

/// Common constants (trace record layout, pipeline depth, sentinels).
pub mod constants;

/// Error types for configuration, trace input, and simulation.
pub mod error;

pub use error::{ConfigError, SimError, TraceError};
