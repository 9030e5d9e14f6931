//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It
//! fills the free IF/ID lanes with records read from the trace, assigns
//! sequence numbers, and consults the branch oracle for conditional branches.
//! A mispredicted branch stops fetch until EX resolves it.

use crate::common::error::TraceError;
use crate::core::pipeline::Pipeline;
use crate::core::pipeline::latches::LatchEntry;
use crate::trace::TraceSource;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `p` - The pipeline controller
///
/// # Behavior
///
/// - Fills bubble lanes from the lowest lane upward; IF/ID stays packed
/// - Drains the reserved pending slot, if set, before reading the trace
/// - Records the halting op id when the trace runs out
/// - Stops at the first free lane while the branch stall is raised
///
/// # Errors
///
/// Propagates trace read failures other than reaching the end of the trace.
pub fn fetch_stage<T: TraceSource>(p: &mut Pipeline<T>) -> Result<(), TraceError> {
    let width = p.if_id.width();
    let mut held_by_branch = false;

    for lane in 0..width {
        if p.if_id.slots()[lane].valid {
            continue;
        }
        if p.fetch_cbr_stall {
            held_by_branch = true;
            break;
        }

        let mut slot = match p.pending_fetch.take() {
            Some(slot) => slot,
            None => fetch_op(p)?,
        };
        if !slot.valid {
            break;
        }

        if slot.record.is_cond_branch()
            && let Some(oracle) = p.oracle.as_mut()
        {
            let mispredicted = oracle.evaluate(&slot.record);
            p.stats.record_branch(mispredicted);
            if mispredicted {
                tracing::debug!(
                    op_id = slot.op_id,
                    pc = slot.record.inst_addr,
                    cycle = p.stats.cycles,
                    "mispredicted branch, fetch stalled"
                );
                slot.is_mispred_cbr = true;
                p.fetch_cbr_stall = true;
            }
        }

        tracing::trace!(op_id = slot.op_id, lane, op = slot.record.op_type.name(), "IF fetch");
        p.if_id.slots_mut()[lane] = slot;
    }

    if held_by_branch {
        p.stats.stalls_control += 1;
    }
    Ok(())
}

/// Reads the next record from the trace and wraps it in a slot.
///
/// At the end of the trace this returns a bubble and fixes the halting op id
/// to the last id handed out. Only WB raises the halt flag, so a trace with
/// no instructions never halts and the run is bounded by the caller.
fn fetch_op<T: TraceSource>(p: &mut Pipeline<T>) -> Result<LatchEntry, TraceError> {
    match p.trace.next_record()? {
        Some(record) => {
            p.op_id_tracker += 1;
            p.stats.instructions_fetched += 1;
            Ok(LatchEntry::fetched(p.op_id_tracker, record))
        }
        None => {
            if p.halt_op_id != p.op_id_tracker {
                tracing::debug!(halt_op_id = p.op_id_tracker, "end of trace reached");
            }
            p.halt_op_id = p.op_id_tracker;
            Ok(LatchEntry::bubble())
        }
    }
}
