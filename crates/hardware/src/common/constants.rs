//! Simulator-wide constants.
//!
//! Groups the values that more than one module depends on:
//! 1. **Trace layout:** Size and field offsets of one on-disk trace record.
//! 2. **Pipeline shape:** Number of inter-stage latches and fill latency.
//! 3. **Sentinels:** The "not yet known" halting sequence id.

/// Size in bytes of one trace record on disk.
pub const TRACE_RECORD_SIZE: usize = 24;

/// Byte offset of the operation class.
pub const OFF_OP_TYPE: usize = 0;
/// Byte offset of the destination register id.
pub const OFF_DEST: usize = 1;
/// Byte offset of the "destination written" flag.
pub const OFF_DEST_NEEDED: usize = 2;
/// Byte offset of the first source register id.
pub const OFF_SRC1: usize = 3;
/// Byte offset of the "source 1 used" flag.
pub const OFF_SRC1_NEEDED: usize = 4;
/// Byte offset of the second source register id.
pub const OFF_SRC2: usize = 5;
/// Byte offset of the "source 2 used" flag.
pub const OFF_SRC2_NEEDED: usize = 6;
/// Byte offset of the condition-code write flag.
pub const OFF_CC_WRITE: usize = 7;
/// Byte offset of the condition-code read flag.
pub const OFF_CC_READ: usize = 8;
/// Byte offset of the resolved branch direction.
pub const OFF_BR_TAKEN: usize = 9;
/// Byte offset of the little-endian 64-bit instruction address.
pub const OFF_INST_ADDR: usize = 16;

/// Number of inter-stage latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub const NUM_LATCH_TYPES: usize = 4;

/// Cycles between an instruction being fetched and it retiring in WB.
pub const PIPELINE_DEPTH: u64 = 4;

/// Halting sequence id used until the end of the trace has been seen.
pub const HALT_OP_ID_UNKNOWN: u64 = u64::MAX;
