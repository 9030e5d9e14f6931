//! Branch prediction unit (BRU).
//!
//! This module contains the direction predictors (static always-taken and
//! gshare) and the [`BranchOracle`] seam the fetch stage consults for every
//! fetched conditional branch.

pub use self::branch_predictor::BranchPredictor;
pub use self::oracle::{BranchOracle, PredictorOracle};

/// Branch predictor trait.
pub mod branch_predictor;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Fetch-stage oracle wrapping a predictor.
pub mod oracle;

/// Static branch predictor (always taken).
pub mod static_bp;

use self::{gshare::GSharePredictor, static_bp::StaticPredictor};
use crate::config::BranchPolicy;

/// Enum wrapper for static dispatch of Branch Predictors.
/// This avoids vtable lookups in the fetch loop.
#[derive(Debug, Clone)]
pub enum BranchPredictorWrapper {
    /// Always-taken predictor.
    Static(StaticPredictor),
    /// Global-history predictor.
    GShare(GSharePredictor),
}

impl BranchPredictorWrapper {
    /// Creates the predictor selected by `policy`.
    ///
    /// # Returns
    ///
    /// `None` for [`BranchPolicy::None`]: no predictor exists and fetch never stalls on branches.
    pub fn new(policy: BranchPolicy) -> Option<Self> {
        match policy {
            BranchPolicy::None => None,
            BranchPolicy::AlwaysTaken => Some(Self::Static(StaticPredictor::new())),
            BranchPolicy::GShare => Some(Self::GShare(GSharePredictor::new())),
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict_branch(&self, pc: u64) -> bool {
        match self {
            Self::Static(bp) => bp.predict_branch(pc),
            Self::GShare(bp) => bp.predict_branch(pc),
        }
    }

    #[inline(always)]
    fn update_branch(&mut self, pc: u64, taken: bool) {
        match self {
            Self::Static(bp) => bp.update_branch(pc, taken),
            Self::GShare(bp) => bp.update_branch(pc, taken),
        }
    }
}
