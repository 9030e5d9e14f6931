//! Static Branch Predictor.
//!
//! Implements an "Always Taken" prediction policy for conditional branches.
//! It keeps no state, so every not-taken branch is a misprediction.

use super::BranchPredictor;

/// Always-taken predictor.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    fn predict_branch(&self, _pc: u64) -> bool {
        true
    }

    /// Does not maintain any direction history.
    fn update_branch(&mut self, _pc: u64, _taken: bool) {}
}
