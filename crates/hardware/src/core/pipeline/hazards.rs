//! Data Hazard Detection and Forwarding.
//!
//! This module decides whether a dispatch candidate in the IF/ID latch must
//! wait. It provides:
//! 1. **Hazard Test:** Condition-code and register read-after-write dependencies between two instructions.
//! 2. **Forwarding Filter:** Which downstream producers are covered by the bypass network.
//! 3. **Superscalar Support:** Dependencies between instructions fetched in the same group.

use crate::core::pipeline::latches::{ExMem, IfId, MemWb};
use crate::trace::TraceRecord;

/// Latch a downstream producer is sitting in when the ID stage checks it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProducerStage {
    /// EX/MEM latch: result computed this cycle, or a load still accessing memory.
    ExMem,
    /// MEM/WB latch: result available to every consumer.
    MemWb,
}

/// Checks whether `consumer` depends on `producer`.
///
/// A dependency exists if the consumer reads the condition code and the
/// producer writes it, or if the producer writes a destination register that
/// one of the consumer's used sources names.
///
/// # Arguments
///
/// * `consumer` - The younger instruction, waiting in IF/ID.
/// * `producer` - The older instruction.
///
/// # Returns
///
/// `true` if the consumer must not dispatch while the producer's result is unavailable.
pub const fn has_hazard(consumer: &TraceRecord, producer: &TraceRecord) -> bool {
    if consumer.cc_read && producer.cc_write {
        return true;
    }
    if !producer.dest_needed {
        return false;
    }
    (consumer.src1_needed && consumer.src1_reg == producer.dest)
        || (consumer.src2_needed && consumer.src2_reg == producer.dest)
}

/// Checks whether forwarding hides a producer from the hazard scan.
///
/// With forwarding enabled, every MEM/WB producer is bypassed, and so is every
/// EX/MEM producer except a load, whose data only exists after MEM.
pub const fn forwarded(stage: ProducerStage, producer: &TraceRecord, forwarding: bool) -> bool {
    if !forwarding {
        return false;
    }
    match stage {
        ProducerStage::MemWb => true,
        ProducerStage::ExMem => !producer.is_load(),
    }
}

/// Finds the first downstream producer that blocks `candidate`.
///
/// Scans the EX/MEM latch, then MEM/WB, skipping bubbles and forwarded
/// producers, and stops at the first dependency.
///
/// # Arguments
///
/// * `candidate` - Instruction waiting in IF/ID.
/// * `ex_mem` - EX/MEM latch as written earlier this cycle.
/// * `mem_wb` - MEM/WB latch as written earlier this cycle.
/// * `forwarding` - Whether full forwarding is enabled.
///
/// # Returns
///
/// The op id of the blocking producer, or `None` if the candidate may dispatch.
pub fn downstream_hazard(
    candidate: &TraceRecord,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
    forwarding: bool,
) -> Option<u64> {
    let producers = ex_mem
        .valid_entries()
        .map(|e| (ProducerStage::ExMem, e))
        .chain(mem_wb.valid_entries().map(|e| (ProducerStage::MemWb, e)));

    for (stage, producer) in producers {
        if forwarded(stage, &producer.record, forwarding) {
            continue;
        }
        if has_hazard(candidate, &producer.record) {
            return Some(producer.op_id);
        }
    }
    None
}

/// Finds the first older instruction in the same fetch group that blocks lane `lane`.
///
/// Lanes below `lane` hold older instructions. Forwarding never applies
/// between members of one group.
pub fn intra_group_hazard(if_id: &IfId, lane: usize) -> Option<u64> {
    let slots = if_id.slots();
    let candidate = &slots[lane].record;
    slots[..lane]
        .iter()
        .filter(|older| older.valid)
        .find(|older| has_hazard(candidate, &older.record))
        .map(|older| older.op_id)
}
