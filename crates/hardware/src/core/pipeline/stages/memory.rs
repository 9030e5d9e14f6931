//! Memory (MEM) Stage.
//!
//! Cache timing is not modelled, so memory access is a pure pass-through:
//! every lane of EX/MEM moves to the same lane of MEM/WB.

use crate::core::pipeline::Pipeline;
use crate::trace::TraceSource;

/// Executes the memory stage of the pipeline.
pub fn mem_stage<T: TraceSource>(p: &mut Pipeline<T>) {
    p.mem_wb.copy_from(&p.ex_mem);
}
