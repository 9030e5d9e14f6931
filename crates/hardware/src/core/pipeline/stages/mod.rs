//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Fills free IF/ID lanes from the trace, gated by the branch stall.
//! 2. **Decode:** Checks hazards and dispatches candidates in order, packing the rest.
//! 3. **Execute:** Moves ID/EX into EX/MEM and resolves stalled branches.
//! 4. **Memory:** Moves EX/MEM into MEM/WB.
//! 5. **Writeback:** Retires instructions and detects the halting instruction.
//!
//! The controller calls them tail-to-head (WB, MEM, EX, ID, FE) so that each
//! latch is read before the stage upstream of it overwrites it.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
