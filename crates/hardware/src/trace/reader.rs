//! Trace sources.
//!
//! Defines the contract the fetch stage pulls instructions through, and the
//! two sources shipped with the simulator: a reader over the binary trace
//! format and an in-memory sequence.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use crate::common::constants::TRACE_RECORD_SIZE;
use crate::common::error::TraceError;
use crate::trace::record::TraceRecord;

/// Supplies instruction records to the fetch stage on demand.
pub trait TraceSource {
    /// Returns the next record, or `Ok(None)` once the stream is exhausted.
    ///
    /// After returning `Ok(None)` a source keeps returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`TraceError::Io`] for any read failure other than reaching the end.
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError>;
}

impl<S: TraceSource + ?Sized> TraceSource for Box<S> {
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        (**self).next_record()
    }
}

/// Reads fixed-size records from a binary trace.
///
/// A trailing partial record is treated as the end of the trace.
#[derive(Debug)]
pub struct TraceReader<R: Read> {
    inner: R,
    records_read: u64,
    exhausted: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the binary trace.
    ///
    /// # Returns
    ///
    /// A buffered reader positioned at the first record, or [`TraceError::Open`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> TraceReader<R> {
    /// Wraps any byte stream holding records in the binary layout.
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            records_read: 0,
            exhausted: false,
        }
    }

    /// Number of complete records returned so far.
    pub const fn records_read(&self) -> u64 {
        self.records_read
    }
}

impl<R: Read> TraceSource for TraceReader<R> {
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        if self.exhausted {
            return Ok(None);
        }

        let mut buf = [0u8; TRACE_RECORD_SIZE];
        match read_record(&mut self.inner, &mut buf) {
            Ok(true) => {
                self.records_read += 1;
                Ok(Some(TraceRecord::from_bytes(&buf)))
            }
            Ok(false) => {
                tracing::debug!(records = self.records_read, "end of trace");
                self.exhausted = true;
                Ok(None)
            }
            Err(e) => Err(TraceError::Io(e)),
        }
    }
}

/// Fills `buf` with one record.
///
/// Returns `Ok(false)` if the stream ended before a full record was read.
fn read_record(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Ok(false),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}

/// In-memory trace, consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct VecTrace {
    records: Vec<TraceRecord>,
    pos: usize,
}

impl VecTrace {
    /// Creates a trace over the given records.
    pub const fn new(records: Vec<TraceRecord>) -> Self {
        Self { records, pos: 0 }
    }

    /// Records not yet handed out.
    pub fn remaining(&self) -> usize {
        self.records.len() - self.pos
    }
}

impl From<Vec<TraceRecord>> for VecTrace {
    fn from(records: Vec<TraceRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<TraceRecord> for VecTrace {
    fn from_iter<I: IntoIterator<Item = TraceRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl TraceSource for VecTrace {
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        let rec = self.records.get(self.pos).copied();
        if rec.is_some() {
            self.pos += 1;
        }
        Ok(rec)
    }
}
