//! Execute (EX) Stage.
//!
//! Moves every lane of ID/EX to the same lane of EX/MEM. A conditional branch
//! that the oracle flagged at fetch is resolved here: once it has executed,
//! fetch may continue.

use crate::core::pipeline::Pipeline;
use crate::trace::TraceSource;

/// Executes the execute stage of the pipeline.
///
/// # Arguments
///
/// * `p` - The pipeline controller
///
/// # Behavior
///
/// - Copies ID/EX into EX/MEM lane for lane
/// - Clears the fetch branch stall if a mispredicted branch just executed,
///   so that FE resumes in this same cycle
pub fn execute_stage<T: TraceSource>(p: &mut Pipeline<T>) {
    p.ex_mem.copy_from(&p.id_ex);

    if let Some(branch) = p.ex_mem.valid_entries().find(|e| e.is_mispred_cbr) {
        tracing::debug!(
            op_id = branch.op_id,
            cycle = p.stats.cycles,
            "mispredicted branch resolved, fetch resumes"
        );
        p.fetch_cbr_stall = false;
    }
}
