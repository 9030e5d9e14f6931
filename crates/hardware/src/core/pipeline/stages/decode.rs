//! Instruction Decode (ID) Stage.
//!
//! This is the dispatch decision point of the pipeline. Each cycle it:
//! 1. **Resets:** Empties ID/EX and clears the transient stall flag of every IF/ID lane.
//! 2. **Checks Downstream Producers:** Stalls a candidate that depends on an
//!    instruction in EX/MEM or MEM/WB whose result cannot be forwarded.
//! 3. **Checks Its Own Group:** Stalls a candidate that depends on an older
//!    instruction waiting in IF/ID alongside it.
//! 4. **Dispatches In Order:** Promotes lanes from the oldest up to, not
//!    including, the first stalled lane.
//! 5. **Packs:** Shifts the lanes left behind down to lane 0.

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::hazards::{downstream_hazard, intra_group_hazard};
use crate::core::pipeline::traits::PipelineLatch;
use crate::trace::TraceSource;

/// Executes the instruction decode stage of the pipeline.
///
/// # Arguments
///
/// * `p` - The pipeline controller
///
/// # Behavior
///
/// - Runs after EX and MEM have advanced, so EX/MEM and MEM/WB already hold
///   this cycle's downstream producers
/// - Counts the cycle as a data stall if any valid candidate was held back
pub fn decode_stage<T: TraceSource>(p: &mut Pipeline<T>) {
    p.id_ex.flush();
    for slot in p.if_id.slots_mut() {
        slot.stall = false;
    }

    let width = p.if_id.width();
    let mut any_stall = false;

    for lane in 0..width {
        let candidate = p.if_id.slots()[lane];
        if !candidate.valid {
            continue;
        }

        let blocker = downstream_hazard(&candidate.record, &p.ex_mem, &p.mem_wb, p.forwarding)
            .or_else(|| intra_group_hazard(&p.if_id, lane));

        if let Some(producer) = blocker {
            tracing::trace!(op_id = candidate.op_id, producer, lane, "ID stall");
            p.if_id.slots_mut()[lane].stall = true;
            any_stall = true;
        }
    }

    let mut promoted = 0;
    for lane in 0..width {
        let slot = p.if_id.slots()[lane];
        if slot.stall {
            break;
        }
        p.id_ex.slots_mut()[lane] = slot;
        promoted += 1;
    }
    p.if_id.shift_down(promoted);

    if any_stall {
        p.stats.stalls_data += 1;
    }
}
