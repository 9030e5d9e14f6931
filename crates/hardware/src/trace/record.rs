//! Trace record definition and byte layout.
//!
//! One record describes one dynamic instruction with just the fields the
//! pipeline model needs: its operation class, the registers it reads and
//! writes, its condition-code behaviour, and (for branches) its address and
//! resolved direction. Records are fixed-size and positionally encoded; see
//! [`constants`](crate::common::constants) for the offsets.

use crate::common::constants::{
    OFF_BR_TAKEN, OFF_CC_READ, OFF_CC_WRITE, OFF_DEST, OFF_DEST_NEEDED, OFF_INST_ADDR,
    OFF_OP_TYPE, OFF_SRC1, OFF_SRC1_NEEDED, OFF_SRC2, OFF_SRC2_NEEDED, TRACE_RECORD_SIZE,
};

/// Operation class of a traced instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpType {
    /// Integer/logic operation.
    #[default]
    Alu,
    /// Memory load; its result is not ready until the MEM stage.
    Load,
    /// Memory store.
    Store,
    /// Conditional branch.
    Cbr,
    /// Anything else (nops, system operations, unconditional jumps).
    Other,
}

impl OpType {
    /// Decodes the on-disk operation class code.
    ///
    /// Unknown codes decode as [`OpType::Other`].
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Alu,
            1 => Self::Load,
            2 => Self::Store,
            3 => Self::Cbr,
            _ => Self::Other,
        }
    }

    /// On-disk operation class code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Alu => 0,
            Self::Load => 1,
            Self::Store => 2,
            Self::Cbr => 3,
            Self::Other => 4,
        }
    }

    /// Short mnemonic used in dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alu => "OP_ALU",
            Self::Load => "OP_LD",
            Self::Store => "OP_ST",
            Self::Cbr => "OP_CBR",
            Self::Other => "OP_OTHER",
        }
    }
}

/// One decoded instruction from the trace.
///
/// Immutable once fetched; copied by value as it moves through the latches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceRecord {
    /// Operation class.
    pub op_type: OpType,
    /// Destination register id.
    pub dest: u8,
    /// Whether the instruction writes `dest`.
    pub dest_needed: bool,
    /// First source register id.
    pub src1_reg: u8,
    /// Whether `src1_reg` is read.
    pub src1_needed: bool,
    /// Second source register id.
    pub src2_reg: u8,
    /// Whether `src2_reg` is read.
    pub src2_needed: bool,
    /// Whether the instruction writes the condition code.
    pub cc_write: bool,
    /// Whether the instruction reads the condition code.
    pub cc_read: bool,
    /// Resolved direction for conditional branches.
    pub br_taken: bool,
    /// Instruction address.
    pub inst_addr: u64,
}

impl TraceRecord {
    /// Decodes one record from its fixed-size byte form.
    ///
    /// Flag bytes are true when non-zero.
    pub fn from_bytes(bytes: &[u8; TRACE_RECORD_SIZE]) -> Self {
        let flag = |off: usize| bytes[off] != 0;
        let mut addr = [0u8; 8];
        addr.copy_from_slice(&bytes[OFF_INST_ADDR..OFF_INST_ADDR + 8]);

        Self {
            op_type: OpType::from_code(bytes[OFF_OP_TYPE]),
            dest: bytes[OFF_DEST],
            dest_needed: flag(OFF_DEST_NEEDED),
            src1_reg: bytes[OFF_SRC1],
            src1_needed: flag(OFF_SRC1_NEEDED),
            src2_reg: bytes[OFF_SRC2],
            src2_needed: flag(OFF_SRC2_NEEDED),
            cc_write: flag(OFF_CC_WRITE),
            cc_read: flag(OFF_CC_READ),
            br_taken: flag(OFF_BR_TAKEN),
            inst_addr: u64::from_le_bytes(addr),
        }
    }

    /// Encodes the record in the on-disk layout. Reserved bytes are zero.
    pub fn to_bytes(&self) -> [u8; TRACE_RECORD_SIZE] {
        let mut bytes = [0u8; TRACE_RECORD_SIZE];
        bytes[OFF_OP_TYPE] = self.op_type.code();
        bytes[OFF_DEST] = self.dest;
        bytes[OFF_DEST_NEEDED] = u8::from(self.dest_needed);
        bytes[OFF_SRC1] = self.src1_reg;
        bytes[OFF_SRC1_NEEDED] = u8::from(self.src1_needed);
        bytes[OFF_SRC2] = self.src2_reg;
        bytes[OFF_SRC2_NEEDED] = u8::from(self.src2_needed);
        bytes[OFF_CC_WRITE] = u8::from(self.cc_write);
        bytes[OFF_CC_READ] = u8::from(self.cc_read);
        bytes[OFF_BR_TAKEN] = u8::from(self.br_taken);
        bytes[OFF_INST_ADDR..OFF_INST_ADDR + 8].copy_from_slice(&self.inst_addr.to_le_bytes());
        bytes
    }

    /// Whether this is a conditional branch.
    pub const fn is_cond_branch(&self) -> bool {
        matches!(self.op_type, OpType::Cbr)
    }

    /// Whether this is a load.
    pub const fn is_load(&self) -> bool {
        matches!(self.op_type, OpType::Load)
    }
}
