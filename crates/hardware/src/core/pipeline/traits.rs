//! Pipeline latch interface.
//!
//! Common status and reset operations shared by every inter-stage latch.

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold the instructions moving between stages. They support
/// flushing and occupancy checks.
pub trait PipelineLatch {
    /// Turns every lane into a bubble.
    fn flush(&mut self);

    /// Checks if the latch is empty.
    ///
    /// # Returns
    ///
    /// `true` if there are no valid instructions in the latch, `false` otherwise.
    fn is_empty(&self) -> bool;

    /// Number of valid lanes.
    fn occupancy(&self) -> usize;
}
