//! Scan configuration: record selection bounds and limits

use crate::constants::DEFAULT_MAX_PAYLOAD_LEN;
use crate::error::FrameError;
use serde::{Deserialize, Serialize};

/// Which frames a scan decodes and how far it goes
///
/// Frames are numbered from 1 in stream order. A frame is selected when its ordinal
/// is at least `from` and a whole number of strides past it. Unselected frames still
/// have their header decoded (to keep framing) but their payload is skipped without
/// being read or checksummed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// First ordinal to select (1-based)
    pub from: u64,

    /// Last ordinal to process; 0 means the whole stream
    pub to: u64,

    /// Keep every `by`-th frame starting at `from`
    pub by: u64,

    /// Largest payload held in the working buffer; longer payloads are
    /// checksummed in place as they stream past
    pub max_payload_len: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            from: 1,
            to: 0,
            by: 1,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }
}

impl ScanConfig {
    /// Configuration that scans the whole stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from signed bounds as supplied by a host environment
    ///
    /// Negative values are rejected, `from == 0` is read as 1 and `by == 0` is
    /// rejected.
    pub fn from_bounds(from: i64, to: i64, by: i64) -> Result<Self, FrameError> {
        let from = non_negative("from", from)?;
        let to = non_negative("to", to)?;
        let by = non_negative("by", by)?;
        if by == 0 {
            return Err(FrameError::ZeroStride);
        }
        Ok(Self::default().first(from).last(to).stride(by))
    }

    /// Set the first selected ordinal
    pub fn first(mut self, from: u64) -> Self {
        self.from = from.max(1);
        self
    }

    /// Set the last processed ordinal (0 = no limit)
    pub fn last(mut self, to: u64) -> Self {
        self.to = to;
        self
    }

    /// Set the stride
    pub fn stride(mut self, by: u64) -> Self {
        self.by = by;
        self
    }

    /// Set the working buffer cap
    pub fn max_payload_len(mut self, max: u32) -> Self {
        self.max_payload_len = max;
        self
    }

    /// Reject settings the scanner cannot run with
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.by == 0 {
            return Err(FrameError::ZeroStride);
        }
        Ok(())
    }

    /// Whether the frame with this ordinal is decoded and emitted
    pub fn selects(&self, ordinal: u64) -> bool {
        let from = self.from.max(1);
        ordinal >= from && (ordinal - from) % self.by.max(1) == 0
    }

    /// Whether processing should stop after this ordinal
    pub fn is_last(&self, ordinal: u64) -> bool {
        self.to != 0 && ordinal >= self.to
    }
}

fn non_negative(name: &'static str, value: i64) -> Result<u64, FrameError> {
    u64::try_from(value).map_err(|_| FrameError::NegativeBound { name, value })
}
