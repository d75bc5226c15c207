//! Record index accumulation and the reusable payload buffer

use crate::types::{RecordDescriptor, ScanResult, StopReason};

/// Records reserved up front; the index grows geometrically past this
const INITIAL_RECORD_CAPACITY: usize = 1024;

/// Bytes reserved up front for payloads
const INITIAL_PAYLOAD_CAPACITY: usize = 10_000;

/// Append-only, ordered collection of discovered records plus integrity counters
#[derive(Debug)]
pub struct RecordIndex {
    records: Vec<RecordDescriptor>,
    leading_garbage: u64,
    frames_seen: u64,
    checksum_mismatches: u64,
    header_checksum_mismatches: u64,
    unknown_ids: u64,
    foreign_family: u64,
    truncated: bool,
}

impl RecordIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(INITIAL_RECORD_CAPACITY),
            leading_garbage: 0,
            frames_seen: 0,
            checksum_mismatches: 0,
            header_checksum_mismatches: 0,
            unknown_ids: 0,
            foreign_family: 0,
            truncated: false,
        }
    }

    /// Append a record; amortized O(1)
    pub fn push(&mut self, record: RecordDescriptor) {
        if !record.checksum_ok {
            self.checksum_mismatches += 1;
        }
        self.records.push(record);
    }

    /// Record how many bytes were skipped before the first sync byte
    pub fn set_leading_garbage(&mut self, skipped: u64) {
        self.leading_garbage = skipped;
    }

    /// Count a decoded header, selected or not
    pub fn note_frame(&mut self) {
        self.frames_seen += 1;
    }

    /// Count a header whose own checksum did not match
    pub fn note_header_checksum_mismatch(&mut self) {
        self.header_checksum_mismatches += 1;
    }

    /// Count a record id outside the documented set
    pub fn note_unknown_id(&mut self) {
        self.unknown_ids += 1;
    }

    /// Count a header with a non-AD2CP family byte
    pub fn note_foreign_family(&mut self) {
        self.foreign_family += 1;
    }

    /// Mark that the stream ended inside a payload
    pub fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    /// Number of records so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been indexed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records indexed so far
    pub fn records(&self) -> &[RecordDescriptor] {
        &self.records
    }

    /// Freeze the index into a scan result
    pub fn finish(self, bytes_consumed: u64, stop: StopReason) -> ScanResult {
        ScanResult {
            records: self.records,
            leading_garbage: self.leading_garbage,
            bytes_consumed,
            frames_seen: self.frames_seen,
            checksum_mismatches: self.checksum_mismatches,
            header_checksum_mismatches: self.header_checksum_mismatches,
            unknown_ids: self.unknown_ids,
            foreign_family: self.foreign_family,
            truncated: self.truncated,
            stop,
        }
    }
}

impl Default for RecordIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Working buffer for payload reads
///
/// Grows to the largest payload seen and never shrinks, so streams of similar-sized
/// records reuse one allocation.
#[derive(Debug)]
pub struct PayloadBuffer {
    buf: Vec<u8>,
}

impl PayloadBuffer {
    /// Create a buffer with the default initial capacity
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; INITIAL_PAYLOAD_CAPACITY],
        }
    }

    /// Mutable view of exactly `len` bytes, growing the buffer if needed
    pub fn slice_mut(&mut self, len: usize) -> &mut [u8] {
        if self.buf.len() < len {
            self.buf.resize(len, 0);
        }
        &mut self.buf[..len]
    }

    /// Current size of the backing storage
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}

impl Default for PayloadBuffer {
    fn default() -> Self {
        Self::new()
    }
}
