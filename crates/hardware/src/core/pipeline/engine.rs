//! Pipeline controller.
//!
//! [`Pipeline`] owns the four latches, the sequencing counters, the trace
//! source, and the optional branch oracle. One call to
//! [`Pipeline::advance_cycle`] runs the five stages tail-to-head:
//! 1. **WB:** Retires MEM/WB.
//! 2. **MEM:** EX/MEM to MEM/WB.
//! 3. **EX:** ID/EX to EX/MEM, resolving stalled branches.
//! 4. **ID:** Hazard checks, in-order dispatch into ID/EX, packing of IF/ID.
//! 5. **FE:** Refills IF/ID from the trace.

use std::fmt;

use crate::common::constants::{HALT_OP_ID_UNKNOWN, NUM_LATCH_TYPES};
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, Latch, LatchEntry, MemWb};
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::bru::{BranchOracle, PredictorOracle};
use crate::stats::{PipelineStats, SimStats};
use crate::trace::TraceSource;

/// Separator printed before each cycle of the state dump.
const DUMP_RULE: &str = "--------------------------------------------";

/// In-order superscalar pipeline driven by a trace.
pub struct Pipeline<T: TraceSource> {
    pub(crate) if_id: IfId,
    pub(crate) id_ex: IdEx,
    pub(crate) ex_mem: ExMem,
    pub(crate) mem_wb: MemWb,

    /// Full forwarding (both EX and MEM paths).
    pub(crate) forwarding: bool,

    /// Last op id handed out by fetch.
    pub(crate) op_id_tracker: u64,
    /// Op id of the last instruction in the trace, once known.
    pub(crate) halt_op_id: u64,
    pub(crate) halted: bool,

    /// Raised by fetch on a mispredicted branch, cleared by EX when it resolves.
    pub(crate) fetch_cbr_stall: bool,
    /// Reserved slot for one fetched-but-unplaced instruction. No stage fills it;
    /// fetch drains it before reading the trace.
    pub(crate) pending_fetch: Option<LatchEntry>,

    pub(crate) oracle: Option<Box<dyn BranchOracle>>,
    pub(crate) trace: T,
    pub(crate) stats: SimStats,
}

impl<T: TraceSource> Pipeline<T> {
    /// Creates a pipeline reading from `trace`.
    ///
    /// # Arguments
    ///
    /// * `trace` - Source of instruction records.
    /// * `config` - Pipeline shape; validated here and never re-read.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the configuration is invalid.
    pub fn new(trace: T, config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let pipeline = &config.pipeline;
        let width = pipeline.width;

        let oracle = PredictorOracle::from_policy(pipeline.branch_predictor)
            .map(|o| Box::new(o) as Box<dyn BranchOracle>);

        tracing::info!(
            width,
            exe_forwarding = pipeline.exe_forwarding,
            mem_forwarding = pipeline.mem_forwarding,
            branch_predictor = ?pipeline.branch_predictor,
            "pipeline configured"
        );

        Ok(Self {
            if_id: Latch::new(width),
            id_ex: Latch::new(width),
            ex_mem: Latch::new(width),
            mem_wb: Latch::new(width),
            forwarding: pipeline.forwarding_enabled(),
            op_id_tracker: 0,
            halt_op_id: HALT_OP_ID_UNKNOWN,
            halted: false,
            fetch_cbr_stall: false,
            pending_fetch: None,
            oracle,
            trace,
            stats: SimStats::default(),
        })
    }

    /// Replaces the branch oracle, regardless of the configured policy.
    ///
    /// Passing a custom oracle lets callers model predictors that are not
    /// built in, or script the stall decisions directly.
    #[must_use]
    pub fn with_branch_oracle(mut self, oracle: Box<dyn BranchOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Simulates one clock cycle.
    ///
    /// # Errors
    ///
    /// [`SimError::Trace`] if reading the trace fails for a reason other than
    /// reaching its end. The cycle is left partially applied.
    pub fn advance_cycle(&mut self) -> Result<(), SimError> {
        self.stats.cycles += 1;

        wb_stage(self);
        mem_stage(self);
        execute_stage(self);
        decode_stage(self);
        fetch_stage(self)?;

        self.check_invariants();
        Ok(())
    }

    /// Whether the last instruction of the trace has retired.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Cycle and retirement counters.
    pub const fn stats(&self) -> PipelineStats {
        PipelineStats {
            cycle_count: self.stats.cycles,
            retired_count: self.stats.instructions_retired,
        }
    }

    /// Full statistics.
    pub const fn sim_stats(&self) -> &SimStats {
        &self.stats
    }

    /// Lanes per stage.
    pub fn width(&self) -> usize {
        self.if_id.width()
    }

    /// Whether dependent instructions may be dispatched through the bypass network.
    pub const fn forwarding_enabled(&self) -> bool {
        self.forwarding
    }

    /// Number of instructions read from the trace so far.
    pub const fn fetched_count(&self) -> u64 {
        self.op_id_tracker
    }

    /// Op id of the last trace instruction, or `None` before the end of the trace was seen.
    pub const fn halt_op_id(&self) -> Option<u64> {
        if self.halt_op_id == HALT_OP_ID_UNKNOWN {
            None
        } else {
            Some(self.halt_op_id)
        }
    }

    /// Whether fetch is waiting for a mispredicted branch to resolve.
    pub const fn is_fetch_stalled(&self) -> bool {
        self.fetch_cbr_stall
    }

    /// IF/ID latch.
    pub const fn if_id(&self) -> &IfId {
        &self.if_id
    }

    /// ID/EX latch.
    pub const fn id_ex(&self) -> &IdEx {
        &self.id_ex
    }

    /// EX/MEM latch.
    pub const fn ex_mem(&self) -> &ExMem {
        &self.ex_mem
    }

    /// MEM/WB latch.
    pub const fn mem_wb(&self) -> &MemWb {
        &self.mem_wb
    }

    /// Latches in pipeline order: IF/ID, ID/EX, EX/MEM, MEM/WB.
    pub const fn latches(&self) -> [&Latch; NUM_LATCH_TYPES] {
        [&self.if_id, &self.id_ex, &self.ex_mem, &self.mem_wb]
    }

    /// Renders the per-cycle state dump.
    ///
    /// One header line with the cycle and retirement counters, then one row
    /// per lane with the op id held by each latch, or `------` for a bubble.
    pub fn render_state(&self) -> String {
        self.to_string()
    }

    /// Asserts the structural invariants that every cycle must preserve.
    fn check_invariants(&self) {
        assert!(
            self.stats.instructions_retired <= self.op_id_tracker,
            "retired {} instructions but only fetched {}",
            self.stats.instructions_retired,
            self.op_id_tracker
        );
        debug_assert!(self.if_id.is_packed(), "IF/ID lanes not packed: {}", self.if_id);

        let mut prev_max = None;
        for latch in self.latches().into_iter().rev() {
            debug_assert!(latch.occupancy() <= self.width());
            debug_assert!(latch.is_program_ordered(), "lanes out of order: {latch}");
            let min = latch.valid_entries().map(|e| e.op_id).min();
            // Upstream latches only hold younger instructions.
            if let (Some(min), Some(older)) = (min, prev_max) {
                debug_assert!(older < min, "latch order inverted: {min} after {older}");
            }
            let max = latch.valid_entries().map(|e| e.op_id).max();
            prev_max = max.or(prev_max);
        }
    }
}

impl<T: TraceSource> fmt::Display for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{DUMP_RULE}")?;
        writeln!(
            f,
            "cycle count : {} retired_instruction : {}",
            self.stats.cycles, self.stats.instructions_retired
        )?;
        writeln!(f, "{:>8}{:>8}{:>8}{:>8}", "FE:", "ID:", "EX:", "MEM:")?;
        for lane in 0..self.width() {
            for latch in self.latches() {
                let e = &latch.slots()[lane];
                if e.valid {
                    write!(f, "{:>8}", e.op_id)?;
                } else {
                    write!(f, "{:>8}", "------")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: TraceSource + fmt::Debug> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("width", &self.width())
            .field("forwarding", &self.forwarding)
            .field("op_id_tracker", &self.op_id_tracker)
            .field("halt_op_id", &self.halt_op_id())
            .field("halted", &self.halted)
            .field("fetch_cbr_stall", &self.fetch_cbr_stall)
            .field("has_oracle", &self.oracle.is_some())
            .field("trace", &self.trace)
            .finish_non_exhaustive()
    }
}
