//! Functional units consulted by the pipeline.

/// Branch prediction unit: direction predictors and the fetch-stage oracle.
pub mod bru;
