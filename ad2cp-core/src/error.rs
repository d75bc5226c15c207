//! Error types for AD2CP scanning

/// Errors that abort a scan or a frame encode
///
/// Every variant here is fatal for the scan that raised it: no partial result is
/// returned. Recoverable conditions (checksum mismatches, a truncated final payload)
/// are reported through [`crate::types::ScanResult`] instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// The byte source could not be opened
    #[error("Cannot open {path}: {reason}")]
    Open {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },

    /// A scan bound was negative
    #[error("Scan bound '{name}' must not be negative, got {value}")]
    NegativeBound {
        /// Which bound (`from`, `to` or `by`).
        name: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// Stride of zero would never advance
    #[error("Stride 'by' must be at least 1")]
    ZeroStride,

    /// No sync byte anywhere in the stream
    #[error("No sync byte 0xa5 found in {scanned} bytes")]
    NoSyncFound {
        /// Bytes examined before the stream ended.
        scanned: u64,
    },

    /// A frame boundary after the first frame did not start with a sync byte
    #[error("Lost sync at offset {offset}: expected 0xa5, got 0x{found:02x}")]
    LostSync {
        /// Stream offset of the expected header.
        offset: u64,
        /// The byte found there.
        found: u8,
    },

    /// Header decoding was asked to start on something other than a sync byte
    #[error("Bad sync byte at offset {offset}: expected 0xa5, got 0x{found:02x}")]
    BadSync {
        /// Stream offset of the header.
        offset: u64,
        /// The byte found there.
        found: u8,
    },

    /// Header size byte is neither 10 nor 12
    #[error("Invalid header size {size} at offset {offset} (expected 10 or 12)")]
    InvalidHeaderSize {
        /// Stream offset of the header.
        offset: u64,
        /// The header size byte.
        size: u8,
    },

    /// The stream ended inside a header
    #[error("Truncated header at offset {offset}: expected {expected} bytes, got {actual}")]
    TruncatedHeader {
        /// Stream offset of the header.
        offset: u64,
        /// Bytes the header needed.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// IO error during read/write
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid frame structure (encoder side)
    #[error("Invalid frame structure: {0}")]
    InvalidStructure(String),
}

impl From<std::io::Error> for FrameError {
    fn from(err: std::io::Error) -> Self {
        FrameError::Io(err.to_string())
    }
}
