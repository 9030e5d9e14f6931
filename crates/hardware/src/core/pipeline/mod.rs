//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Engine:** The [`Pipeline`] controller that owns all state and runs one cycle at a time.
//! 2. **Hazards:** Detection of data dependencies and the forwarding filter.
//! 3. **Latches:** Inter-stage buffers for communication between pipeline stages.
//! 4. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.
//! 5. **Traits:** Common interface for pipeline latches.

/// Pipeline controller and per-cycle orchestration.
pub mod engine;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline latches.
pub mod traits;

pub use self::engine::Pipeline;
