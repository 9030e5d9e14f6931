//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `update()`: O(1)
//! - **Space Complexity:** O(2^N) where N is the history length (12 bits = 4K 2-bit counters)
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches aliasing into the same counters

use super::BranchPredictor;

/// Number of history bits and of PHT index bits.
const TABLE_BITS: usize = 12;
/// Total number of entries in the PHT.
const TABLE_SIZE: usize = 1 << TABLE_BITS;
/// Mask selecting one PHT index.
const INDEX_MASK: u64 = (TABLE_SIZE as u64) - 1;
/// Initial counter value (weakly not taken).
const COUNTER_INIT: u8 = 1;
/// Saturation limit of the 2-bit counters.
const COUNTER_MAX: u8 = 3;
/// Counter values at or above this predict taken.
const TAKEN_THRESHOLD: u8 = 2;

/// GShare Predictor structure.
#[derive(Debug, Clone)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: u64,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: Vec<u8>,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor with cleared history.
    pub fn new() -> Self {
        Self {
            ghr: 0,
            pht: vec![COUNTER_INIT; TABLE_SIZE],
        }
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// Computes the XOR of the PC (shifted) and the Global History Register.
    const fn index(&self, pc: u64) -> usize {
        let pc_part = (pc >> 2) & INDEX_MASK;
        let ghr_part = self.ghr & INDEX_MASK;
        (pc_part ^ ghr_part) as usize
    }

    /// Current global history, newest outcome in bit 0.
    pub const fn history(&self) -> u64 {
        self.ghr
    }
}

impl Default for GSharePredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchPredictor for GSharePredictor {
    /// Returns true if the 2-bit counter at the hashed index is 2 or 3 (Taken).
    fn predict_branch(&self, pc: u64) -> bool {
        self.pht[self.index(pc)] >= TAKEN_THRESHOLD
    }

    /// Updates the 2-bit saturating counter in the PHT and shifts the new
    /// outcome into the Global History Register.
    fn update_branch(&mut self, pc: u64, taken: bool) {
        let idx = self.index(pc);
        let counter = &mut self.pht[idx];

        if taken && *counter < COUNTER_MAX {
            *counter += 1;
        } else if !taken && *counter > 0 {
            *counter -= 1;
        }

        self.ghr = ((self.ghr << 1) | u64::from(taken)) & INDEX_MASK;
    }
}
