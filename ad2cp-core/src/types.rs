//! Core types for AD2CP frames and scan results

use crate::checksum::checksum;
use crate::constants::{
    RecordKind, SizeField, FAMILY, MAX_HEADER_SIZE, MAX_SHORT_PAYLOAD, SYNC,
};
use crate::error::FrameError;
use serde::{Deserialize, Serialize};

/// Decoded frame header
///
/// Headers are parsed per frame and not retained by the scanner; only the
/// [`RecordDescriptor`] derived from them is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHeader {
    /// Width of the data size field (10- or 12-byte header)
    pub size_field: SizeField,

    /// Record-type id
    pub id: u8,

    /// Instrument family byte
    pub family: u8,

    /// Length of the payload in bytes
    pub data_size: u32,

    /// Declared checksum of the payload
    pub data_checksum: u16,

    /// Declared checksum of the preceding header bytes
    pub header_checksum: u16,
}

impl FrameHeader {
    /// Create a header for a payload, choosing the short form when it fits
    pub fn new(id: u8, data_size: u32, data_checksum: u16) -> Self {
        let size_field = if data_size > MAX_SHORT_PAYLOAD {
            SizeField::U32
        } else {
            SizeField::U16
        };
        let mut header = Self {
            size_field,
            id,
            family: FAMILY,
            data_size,
            data_checksum,
            header_checksum: 0,
        };
        if let Ok(sum) = header.compute_header_checksum() {
            header.header_checksum = sum;
        }
        header
    }

    /// Total header size in bytes (10 or 12)
    pub fn header_size(&self) -> u8 {
        self.size_field.header_size()
    }

    /// Classify the record id
    pub fn kind(&self) -> Option<RecordKind> {
        RecordKind::from_id(self.id)
    }

    /// Check the header's internal consistency
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.size_field == SizeField::U16 && self.data_size > MAX_SHORT_PAYLOAD {
            return Err(FrameError::InvalidStructure(format!(
                "Data size {} does not fit a {}-byte header",
                self.data_size,
                self.header_size()
            )));
        }
        Ok(())
    }

    /// Serialize the header to its wire form
    ///
    /// Returns the buffer and the number of meaningful bytes in it. Fails when the
    /// data size does not fit the size field.
    pub fn to_bytes(&self) -> Result<([u8; MAX_HEADER_SIZE], usize), FrameError> {
        let mut buf = [0u8; MAX_HEADER_SIZE];
        let len = self.write_prefix(&mut buf)?;
        buf[len..len + 2].copy_from_slice(&self.header_checksum.to_le_bytes());
        Ok((buf, len + 2))
    }

    /// Checksum over every header byte that precedes the header checksum field
    pub fn compute_header_checksum(&self) -> Result<u16, FrameError> {
        let mut buf = [0u8; MAX_HEADER_SIZE];
        let len = self.write_prefix(&mut buf)?;
        Ok(checksum(&buf[..len]))
    }

    /// Whether the declared header checksum matches the header contents
    ///
    /// A header whose data size does not fit its size field never matches.
    pub fn header_checksum_ok(&self) -> bool {
        matches!(self.compute_header_checksum(), Ok(sum) if sum == self.header_checksum)
    }

    /// Whether the family byte is the AD2CP family
    pub fn is_ad2cp_family(&self) -> bool {
        self.family == FAMILY
    }

    // Writes everything up to (not including) the header checksum.
    fn write_prefix(&self, buf: &mut [u8; MAX_HEADER_SIZE]) -> Result<usize, FrameError> {
        buf[0] = SYNC;
        buf[1] = self.header_size();
        buf[2] = self.id;
        buf[3] = self.family;
        let mut pos = 4;
        match self.size_field {
            SizeField::U16 => {
                let size = u16::try_from(self.data_size).map_err(|_| {
                    FrameError::InvalidStructure(format!(
                        "Data size {} does not fit a {}-byte header",
                        self.data_size,
                        self.header_size()
                    ))
                })?;
                buf[pos..pos + 2].copy_from_slice(&size.to_le_bytes());
                pos += 2;
            }
            SizeField::U32 => {
                buf[pos..pos + 4].copy_from_slice(&self.data_size.to_le_bytes());
                pos += 4;
            }
        }
        buf[pos..pos + 2].copy_from_slice(&self.data_checksum.to_le_bytes());
        Ok(pos + 2)
    }
}

/// One discovered data record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    /// Byte offset of the payload (immediately after the header)
    pub offset: u64,

    /// Payload length in bytes
    pub length: u32,

    /// Record-type id
    pub id: u8,

    /// Size of the header that preceded this payload
    pub header_size: u8,

    /// 1-based position of the frame in the stream
    pub ordinal: u64,

    /// Whether the payload checksum matched the header
    pub checksum_ok: bool,
}

impl RecordDescriptor {
    /// Offset of the frame's sync byte
    pub fn frame_offset(&self) -> u64 {
        self.offset - u64::from(self.header_size)
    }

    /// Offset just past the payload
    pub fn end(&self) -> u64 {
        self.offset + u64::from(self.length)
    }

    /// Classify the record id
    pub fn kind(&self) -> Option<RecordKind> {
        RecordKind::from_id(self.id)
    }
}

/// Why a scan stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The configured last record was reached
    RecordLimit,
    /// The stream ended cleanly at a frame boundary
    EndOfStream,
    /// The stream ended inside a payload
    TruncatedPayload,
}

/// Outcome of a successful (possibly partial) scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Selected records, in stream order
    pub records: Vec<RecordDescriptor>,

    /// Bytes skipped before the first sync byte
    pub leading_garbage: u64,

    /// Stream position when the scan stopped
    pub bytes_consumed: u64,

    /// Headers decoded, including frames skipped by the stride
    pub frames_seen: u64,

    /// Payloads whose checksum did not match
    pub checksum_mismatches: u64,

    /// Headers whose own checksum did not match
    pub header_checksum_mismatches: u64,

    /// Headers with an id outside the documented set
    pub unknown_ids: u64,

    /// Headers with a family byte other than 0x10
    pub foreign_family: u64,

    /// Whether the stream ended inside a payload
    pub truncated: bool,

    /// Why the scan stopped
    pub stop: StopReason,
}

impl ScanResult {
    /// Any payload checksum mismatch or truncation occurred
    pub fn is_broken(&self) -> bool {
        self.checksum_mismatches > 0 || self.truncated
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records were selected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Payload offsets in stream order
    pub fn offsets(&self) -> impl Iterator<Item = u64> + '_ {
        self.records.iter().map(|r| r.offset)
    }

    /// Bytes covered by indexed frames (headers + payloads)
    pub fn bytes_indexed(&self) -> u64 {
        self.records
            .iter()
            .map(|r| u64::from(r.header_size) + u64::from(r.length))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LONG_HEADER_SIZE, SHORT_HEADER_SIZE};

    #[test]
    fn test_header_picks_width() {
        let short = FrameHeader::new(0x15, 100, 0);
        assert_eq!(short.header_size(), SHORT_HEADER_SIZE);

        let long = FrameHeader::new(0x15, 70_000, 0);
        assert_eq!(long.header_size(), LONG_HEADER_SIZE);
    }

    #[test]
    fn test_header_to_bytes_layout() {
        let header = FrameHeader::new(0x16, 0x0102, 0xBEEF);
        let (buf, len) = header.to_bytes().unwrap();

        assert_eq!(len, 10);
        assert_eq!(buf[0], SYNC);
        assert_eq!(buf[1], 10);
        assert_eq!(buf[2], 0x16);
        assert_eq!(buf[3], FAMILY);
        assert_eq!(&buf[4..6], &[0x02, 0x01]);
        assert_eq!(&buf[6..8], &[0xEF, 0xBE]);
        assert_eq!(&buf[8..10], &header.header_checksum.to_le_bytes());
        assert!(header.header_checksum_ok());
    }

    #[test]
    fn test_header_checksum_detects_edit() {
        let mut header = FrameHeader::new(0x15, 4, 0xBB90);
        assert!(header.header_checksum_ok());
        header.id = 0x16;
        assert!(!header.header_checksum_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_short_header() {
        let mut header = FrameHeader::new(0x15, 10, 0);
        header.data_size = 70_000;
        assert!(matches!(
            header.validate(),
            Err(FrameError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_oversized_short_header_does_not_serialize() {
        let mut header = FrameHeader::new(0x15, 10, 0);
        header.data_size = 70_000;

        assert!(matches!(
            header.to_bytes(),
            Err(FrameError::InvalidStructure(_))
        ));
        assert!(matches!(
            header.compute_header_checksum(),
            Err(FrameError::InvalidStructure(_))
        ));
        assert!(!header.header_checksum_ok());

        // 70_000 would wrap to 4_464 in a 16-bit field
        let wrapped = FrameHeader::new(0x15, 70_000 - 65_536, 0);
        header.header_checksum = wrapped.header_checksum;
        assert!(!header.header_checksum_ok());
    }

    #[test]
    fn test_descriptor_geometry() {
        let rec = RecordDescriptor {
            offset: 22,
            length: 8,
            id: 0x15,
            header_size: 12,
            ordinal: 1,
            checksum_ok: true,
        };
        assert_eq!(rec.frame_offset(), 10);
        assert_eq!(rec.end(), 30);
        assert_eq!(rec.kind(), Some(RecordKind::Burst));
    }
}
