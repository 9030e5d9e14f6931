//! Pipeline latch structures for inter-stage communication.
//!
//! The pipeline has four latches (IF/ID, ID/EX, EX/MEM, MEM/WB), each a fixed
//! row of `width` lanes. This module provides:
//! 1. **Slots:** [`LatchEntry`], one in-flight instruction or a bubble.
//! 2. **Latches:** [`Latch`], the fixed-width row with occupancy and packing helpers.
//!
//! Lane order encodes program order: among valid lanes, a lower index always
//! holds an older instruction. Entries are copied by value between latches.

use std::fmt;

use crate::core::pipeline::traits::PipelineLatch;
use crate::trace::TraceRecord;

/// One lane of a pipeline latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatchEntry {
    /// Fetch sequence number, 1-based and strictly increasing.
    pub op_id: u64,
    /// Instruction carried by this slot.
    pub record: TraceRecord,
    /// Whether the lane holds an instruction (`false` = bubble).
    pub valid: bool,
    /// Set by the ID stage when this candidate must wait another cycle.
    pub stall: bool,
    /// Conditional branch the oracle flagged as mispredicted.
    pub is_mispred_cbr: bool,
}

impl LatchEntry {
    /// An empty lane.
    pub fn bubble() -> Self {
        Self::default()
    }

    /// A freshly fetched instruction.
    ///
    /// # Arguments
    ///
    /// * `op_id` - Sequence number assigned by fetch.
    /// * `record` - The instruction read from the trace.
    pub const fn fetched(op_id: u64, record: TraceRecord) -> Self {
        Self {
            op_id,
            record,
            valid: true,
            stall: false,
            is_mispred_cbr: false,
        }
    }
}

/// A fixed-width pipeline latch.
///
/// The number of lanes is set at construction and never changes; stages
/// only overwrite lanes in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Latch {
    entries: Vec<LatchEntry>,
}

/// IF/ID latch: fetched instructions waiting to be dispatched.
pub type IfId = Latch;
/// ID/EX latch: instructions dispatched this cycle.
pub type IdEx = Latch;
/// EX/MEM latch.
pub type ExMem = Latch;
/// MEM/WB latch: instructions retiring next cycle.
pub type MemWb = Latch;

impl Latch {
    /// Creates a latch of `width` bubble lanes.
    pub fn new(width: usize) -> Self {
        Self {
            entries: vec![LatchEntry::bubble(); width],
        }
    }

    /// Number of lanes.
    pub fn width(&self) -> usize {
        self.entries.len()
    }

    /// All lanes, bubbles included, in lane order.
    pub fn slots(&self) -> &[LatchEntry] {
        &self.entries
    }

    /// Mutable view of the lanes. The lane count cannot change through it.
    pub fn slots_mut(&mut self) -> &mut [LatchEntry] {
        &mut self.entries
    }

    /// Valid lanes in lane order.
    pub fn valid_entries(&self) -> impl Iterator<Item = &LatchEntry> + '_ {
        self.entries.iter().filter(|e| e.valid)
    }

    /// Copies every lane from `src`, lane for lane.
    ///
    /// # Panics
    ///
    /// If the two latches differ in width.
    pub fn copy_from(&mut self, src: &Self) {
        self.entries.copy_from_slice(&src.entries);
    }

    /// Shifts lanes `n..` down to `0..`, refilling the vacated top lanes with bubbles.
    ///
    /// Used by the ID stage to pack the instructions it could not dispatch
    /// into the oldest lanes.
    pub fn shift_down(&mut self, n: usize) {
        let n = n.min(self.entries.len());
        if n == 0 {
            return;
        }
        self.entries.rotate_left(n);
        let width = self.entries.len();
        for e in &mut self.entries[width - n..] {
            *e = LatchEntry::bubble();
        }
    }

    /// Whether valid lanes hold strictly increasing sequence numbers.
    pub fn is_program_ordered(&self) -> bool {
        let mut prev: Option<u64> = None;
        for e in self.valid_entries() {
            if prev.is_some_and(|p| p >= e.op_id) {
                return false;
            }
            prev = Some(e.op_id);
        }
        true
    }

    /// Whether the valid lanes form a prefix `0..k` with only bubbles after.
    pub fn is_packed(&self) -> bool {
        let k = self.occupancy();
        self.entries[..k].iter().all(|e| e.valid)
    }
}

impl PipelineLatch for Latch {
    fn flush(&mut self) {
        self.entries.fill(LatchEntry::bubble());
    }

    fn is_empty(&self) -> bool {
        !self.entries.iter().any(|e| e.valid)
    }

    fn occupancy(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }
}

impl fmt::Display for Latch {
    /// One line of lanes, each an op id in six columns or `------` for a bubble.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if e.valid {
                write!(f, "{:>6}", e.op_id)?;
            } else {
                f.write_str("------")?;
            }
        }
        Ok(())
    }
}
