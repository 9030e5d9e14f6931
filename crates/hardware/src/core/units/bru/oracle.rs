//! Branch oracle consulted at fetch.
//!
//! The fetch stage does not model branch targets or wrong-path fetch. It only
//! asks, for each fetched conditional branch, whether the front end would have
//! guessed wrong; a wrong guess stalls fetch until the branch resolves in EX.

use super::{BranchPredictor, BranchPredictorWrapper};
use crate::config::BranchPolicy;
use crate::trace::TraceRecord;

/// Stall decision for fetched conditional branches.
pub trait BranchOracle {
    /// Evaluates one fetched conditional branch and updates internal state.
    ///
    /// # Returns
    ///
    /// `true` if the branch is mispredicted and fetch must stall until it resolves.
    fn evaluate(&mut self, record: &TraceRecord) -> bool;
}

/// Oracle backed by a direction predictor.
///
/// Predicts with the predictor, compares against the resolved direction
/// carried by the trace, then trains the predictor with that direction.
#[derive(Debug, Clone)]
pub struct PredictorOracle {
    predictor: BranchPredictorWrapper,
}

impl PredictorOracle {
    /// Wraps an existing predictor.
    pub const fn new(predictor: BranchPredictorWrapper) -> Self {
        Self { predictor }
    }

    /// Builds the oracle for `policy`, or `None` when the policy has no predictor.
    pub fn from_policy(policy: BranchPolicy) -> Option<Self> {
        BranchPredictorWrapper::new(policy).map(Self::new)
    }

    /// The wrapped predictor.
    pub const fn predictor(&self) -> &BranchPredictorWrapper {
        &self.predictor
    }
}

impl BranchOracle for PredictorOracle {
    fn evaluate(&mut self, record: &TraceRecord) -> bool {
        let predicted = self.predictor.predict_branch(record.inst_addr);
        self.predictor.update_branch(record.inst_addr, record.br_taken);
        predicted != record.br_taken
    }
}
