//! # Unit Components
//!
//! Tests for each building block of the simulator, organized to mirror the
//! crate's module tree.

/// Configuration defaults, JSON parsing, and validation.
pub mod config;
