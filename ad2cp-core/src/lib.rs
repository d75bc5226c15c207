//! # AD2CP Core
//!
//! Frame scanning and validation for Nortek AD2CP binary data files.
//!
//! An AD2CP file is a run of back-to-back frames, each a 10- or 12-byte header
//! followed by a payload. The scanner finds the first sync byte, walks the frames,
//! checks every payload checksum and returns an ordered index of
//! `(offset, length, id)` records together with integrity signals.
//!
//! ## Modules
//!
//! - `constants`: Frame format constants and the record id table
//! - `types`: Core types (FrameHeader, RecordDescriptor, ScanResult)
//! - `checksum`: The 16-bit running checksum
//! - `decoder`: Header decoding
//! - `encoder`: Frame encoding
//! - `config`: Scan bounds and limits
//! - `index`: Record index and payload buffer management
//! - `scanner`: Sync recovery and the framing loop

#![warn(missing_docs)]

pub mod checksum;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod index;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::FrameError;
pub use scanner::{scan_bytes, scan_file, scan_reader};
pub use types::{FrameHeader, RecordDescriptor, ScanResult, StopReason};

/// Result type alias for AD2CP operations
pub type Result<T> = core::result::Result<T, FrameError>;
