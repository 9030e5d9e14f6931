//! Error definitions.
//!
//! This module defines the error taxonomy of the simulator. It provides:
//! 1. **Configuration errors:** Contract violations detected once, at construction.
//! 2. **Trace errors:** I/O failures while reading the instruction trace.
//! 3. **Simulation errors:** The top-level error returned by the controller and run loop.
//!
//! A short read at the end of a trace is not an error; trace sources report
//! it as the end of the stream.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Pipeline width must be at least one lane.
    #[error("pipeline width must be at least 1")]
    ZeroWidth,

    /// Numeric branch policy selector outside the known set.
    #[error("unknown branch predictor policy {0} (expected 0 = none, 1 = always-taken, 2 = gshare)")]
    UnknownBranchPolicy(u8),

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Configuration text is not valid JSON for [`Config`](crate::config::Config).
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure while reading the instruction trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Trace file could not be opened.
    #[error("failed to open trace {path}: {source}")]
    Open {
        /// Trace file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Read failed for a reason other than reaching the end of the trace.
    #[error("trace read failed: {0}")]
    Io(#[from] io::Error),
}

/// Top-level simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trace input failure.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
