//! Instruction trace records and trace sources.
//!
//! The pipeline is driven by a stream of already-decoded instruction records.
//! This module provides:
//! 1. **Records:** [`TraceRecord`] and its operation class [`OpType`], with the fixed on-disk layout.
//! 2. **Sources:** The [`TraceSource`] contract, a binary [`TraceReader`], and an in-memory [`VecTrace`].

/// Trace record type and its byte layout.
pub mod record;

/// Trace source contract and implementations.
pub mod reader;

pub use reader::{TraceReader, TraceSource, VecTrace};
pub use record::{OpType, TraceRecord};
