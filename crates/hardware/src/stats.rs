//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, fetched and retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Retired counts by operation class (ALU, load, store, branch, other).
//! 3. **Branch prediction:** Correct and mispredicted conditional branches at fetch.
//! 4. **Stalls:** Cycles in which dispatch or fetch was held back by a hazard.

use std::time::Instant;

use serde::Serialize;

use crate::trace::OpType;

/// Narrow per-run result: the two counters every caller needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Cycles simulated so far.
    pub cycle_count: u64,
    /// Instructions retired so far.
    pub retired_count: u64,
}

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulated cycles elapsed.
    pub cycles: u64,
    /// Number of instructions read from the trace.
    pub instructions_fetched: u64,
    /// Number of instructions that reached writeback.
    pub instructions_retired: u64,

    /// Count of ALU instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of all other instructions retired.
    pub inst_other: u64,

    /// Number of branch predictions that were correct.
    pub branch_predictions: u64,
    /// Number of branch predictions that were wrong (mispredictions).
    pub branch_mispredictions: u64,

    /// Cycles in which at least one dispatch candidate waited on a data hazard.
    pub stalls_data: u64,
    /// Cycles in which fetch had a free lane but was held by an unresolved branch.
    pub stalls_control: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_fetched: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_other: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            stalls_data: 0,
            stalls_control: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"stalls"`, `"instruction_mix"`, `"branch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "stalls", "instruction_mix", "branch"];

impl SimStats {
    /// Counts one retired instruction of class `op`.
    pub const fn record_retired(&mut self, op: OpType) {
        self.instructions_retired += 1;
        match op {
            OpType::Alu => self.inst_alu += 1,
            OpType::Load => self.inst_load += 1,
            OpType::Store => self.inst_store += 1,
            OpType::Cbr => self.inst_branch += 1,
            OpType::Other => self.inst_other += 1,
        }
    }

    /// Counts one oracle consultation.
    pub const fn record_branch(&mut self, mispredicted: bool) {
        if mispredicted {
            self.branch_mispredictions += 1;
        } else {
            self.branch_predictions += 1;
        }
    }

    /// Retired instructions per cycle (0 before the first cycle).
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Cycles per retired instruction (0 before the first retirement).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Percentage of consulted branches that were predicted correctly.
    ///
    /// # Returns
    ///
    /// `None` if the oracle was never consulted.
    pub fn branch_accuracy(&self) -> Option<f64> {
        let total = self.branch_predictions + self.branch_mispredictions;
        (total > 0).then(|| 100.0 * self.branch_predictions as f64 / total as f64)
    }

    /// Serializable snapshot of every counter and derived metric.
    pub fn report(&self) -> StatsReport {
        StatsReport {
            host_seconds: self.start_time.elapsed().as_secs_f64(),
            cycles: self.cycles,
            instructions_fetched: self.instructions_fetched,
            instructions_retired: self.instructions_retired,
            ipc: self.ipc(),
            cpi: self.cpi(),
            stalls_data: self.stalls_data,
            stalls_control: self.stalls_control,
            mix: InstructionMix {
                alu: self.inst_alu,
                load: self.inst_load,
                store: self.inst_store,
                branch: self.inst_branch,
                other: self.inst_other,
            },
            branch_predictions: self.branch_predictions,
            branch_mispredictions: self.branch_mispredictions,
            branch_accuracy: self.branch_accuracy(),
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;

        if want("summary") {
            println!("\n==========================================================");
            println!("PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts_fetched        {}", self.instructions_fetched);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("stalls") {
            println!("STALLS");
            println!(
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                (self.stalls_data as f64 / cyc) * 100.0
            );
            println!(
                "  stalls.control         {} ({:.2}%)",
                self.stalls_control,
                (self.stalls_control as f64 / cyc) * 100.0
            );
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.other", self.inst_other),
            ] {
                println!(
                    "  {name:<22} {count} ({:.2}%)",
                    (count as f64 / instr) * 100.0
                );
            }
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            println!("BRANCH PREDICTION");
            println!(
                "  bp.lookups             {}",
                self.branch_predictions + self.branch_mispredictions
            );
            println!("  bp.mispredicts         {}", self.branch_mispredictions);
            println!(
                "  bp.accuracy            {:.2}%",
                self.branch_accuracy().unwrap_or(0.0)
            );
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

/// Retired instruction counts by class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstructionMix {
    /// ALU instructions.
    pub alu: u64,
    /// Loads.
    pub load: u64,
    /// Stores.
    pub store: u64,
    /// Conditional branches.
    pub branch: u64,
    /// Everything else.
    pub other: u64,
}

/// Final statistics in serializable form, emitted by `pipesim run --json`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Host wall-clock seconds since the statistics were created.
    pub host_seconds: f64,
    /// Simulated cycles.
    pub cycles: u64,
    /// Instructions read from the trace.
    pub instructions_fetched: u64,
    /// Instructions retired.
    pub instructions_retired: u64,
    /// Retired instructions per cycle.
    pub ipc: f64,
    /// Cycles per retired instruction.
    pub cpi: f64,
    /// Data-hazard stall cycles.
    pub stalls_data: u64,
    /// Branch stall cycles.
    pub stalls_control: u64,
    /// Retired instruction mix.
    pub mix: InstructionMix,
    /// Correctly predicted branches.
    pub branch_predictions: u64,
    /// Mispredicted branches.
    pub branch_mispredictions: u64,
    /// Prediction accuracy in percent, absent when no branch was predicted.
    pub branch_accuracy: Option<f64>,
}
