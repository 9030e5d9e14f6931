//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It counts every instruction in the MEM/WB latch as retired, updates the
//! instruction mix, and raises the halt flag once the last instruction of the
//! trace retires.

use crate::core::pipeline::Pipeline;
use crate::trace::TraceSource;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `p` - The pipeline controller
///
/// # Behavior
///
/// - Counts each valid MEM/WB lane as retired
/// - Sets the halt flag when a lane's op id reaches the halting op id
/// - Leaves the latch untouched; MEM overwrites it next
pub fn wb_stage<T: TraceSource>(p: &mut Pipeline<T>) {
    for entry in p.mem_wb.valid_entries() {
        p.stats.record_retired(entry.record.op_type);
        tracing::trace!(op_id = entry.op_id, op = entry.record.op_type.name(), "WB retire");

        if entry.op_id >= p.halt_op_id {
            tracing::debug!(op_id = entry.op_id, cycle = p.stats.cycles, "halting instruction retired");
            p.halted = true;
        }
    }
}
