//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that direction predictors
//! implement. Targets are not modelled: the trace already carries the resolved
//! direction, and the pipeline only needs to know whether the guess was wrong.

/// Trait for branch direction prediction algorithms.
pub trait BranchPredictor {
    /// Predicts whether a conditional branch will be taken.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    ///
    /// # Returns
    ///
    /// `true` if the branch is predicted taken.
    fn predict_branch(&self, pc: u64) -> bool;

    /// Trains the predictor with the actual branch outcome.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    /// * `taken` - Whether the branch was actually taken
    fn update_branch(&mut self, pc: u64, taken: bool);
}
