//! Frame encoding

use crate::checksum::checksum;
use crate::constants::{SizeField, FAMILY, MAX_SHORT_PAYLOAD};
use crate::error::FrameError;
use crate::types::FrameHeader;
use bytes::{BufMut, Bytes, BytesMut};

/// Encode a frame into bytes
///
/// The frame is encoded with the following layout:
/// 1. Sync (1 byte): 0xA5
/// 2. Header:
///    - Header size (1 byte): 10 or 12
///    - ID (1 byte)
///    - Family (1 byte)
///    - Data size (2 or 4 bytes, little-endian)
///    - Data checksum (2 bytes, little-endian)
///    - Header checksum (2 bytes, little-endian)
/// 3. Payload (variable length)
///
/// Checksums are written as they appear in `header`; use [`FrameBuilder`] to have
/// them computed.
pub fn encode_frame(header: &FrameHeader, payload: &[u8]) -> Result<Bytes, FrameError> {
    header.validate()?;

    if payload.len() as u64 != u64::from(header.data_size) {
        return Err(FrameError::InvalidStructure(format!(
            "Payload length mismatch: header says {}, actual {}",
            header.data_size,
            payload.len()
        )));
    }

    let (header_bytes, header_len) = header.to_bytes()?;
    let mut buf = BytesMut::with_capacity(header_len + payload.len());
    buf.put_slice(&header_bytes[..header_len]);
    buf.put_slice(payload);

    Ok(buf.freeze())
}

/// Builder for constructing frames with correct checksums
pub struct FrameBuilder {
    id: u8,
    family: u8,
    payload: Bytes,
    size_field: Option<SizeField>,
    data_checksum: Option<u16>,
    header_checksum: Option<u16>,
}

impl FrameBuilder {
    /// Create a new frame builder for a record id
    pub fn new(id: u8) -> Self {
        Self {
            id,
            family: FAMILY,
            payload: Bytes::new(),
            size_field: None,
            data_checksum: None,
            header_checksum: None,
        }
    }

    /// Set the payload
    pub fn payload(mut self, payload: Bytes) -> Self {
        self.payload = payload;
        self
    }

    /// Set the family byte
    pub fn family(mut self, family: u8) -> Self {
        self.family = family;
        self
    }

    /// Force a 12-byte header with a 32-bit data size
    pub fn long_header(mut self) -> Self {
        self.size_field = Some(SizeField::U32);
        self
    }

    /// Force a 10-byte header with a 16-bit data size
    pub fn short_header(mut self) -> Self {
        self.size_field = Some(SizeField::U16);
        self
    }

    /// Declare a specific data checksum instead of the computed one
    pub fn data_checksum(mut self, value: u16) -> Self {
        self.data_checksum = Some(value);
        self
    }

    /// Declare a specific header checksum instead of the computed one
    pub fn header_checksum(mut self, value: u16) -> Self {
        self.header_checksum = Some(value);
        self
    }

    /// Build the header without encoding
    pub fn build_header(&self) -> Result<FrameHeader, FrameError> {
        let data_size = u32::try_from(self.payload.len()).map_err(|_| {
            FrameError::InvalidStructure(format!(
                "Payload of {} bytes exceeds the 32-bit data size field",
                self.payload.len()
            ))
        })?;

        let size_field = match self.size_field {
            Some(field) => field,
            None if data_size > MAX_SHORT_PAYLOAD => SizeField::U32,
            None => SizeField::U16,
        };

        let mut header = FrameHeader {
            size_field,
            id: self.id,
            family: self.family,
            data_size,
            data_checksum: self
                .data_checksum
                .unwrap_or_else(|| checksum(&self.payload)),
            header_checksum: 0,
        };
        header.validate()?;
        let computed = header.compute_header_checksum()?;
        header.header_checksum = self.header_checksum.unwrap_or(computed);

        Ok(header)
    }

    /// Build and encode the frame
    pub fn build(self) -> Result<Bytes, FrameError> {
        let header = self.build_header()?;
        encode_frame(&header, &self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SYNC;
    use crate::decoder::decode_header_from_bytes;

    #[test]
    fn test_encode_simple_frame() {
        let encoded = FrameBuilder::new(0x15)
            .payload(Bytes::from_static(&[1, 2, 3, 4]))
            .build()
            .unwrap();

        assert_eq!(encoded.len(), 14);
        assert_eq!(encoded[0], SYNC);
        assert_eq!(encoded[1], 10);
        assert_eq!(encoded[2], 0x15);
        assert_eq!(encoded[3], FAMILY);
        assert_eq!(&encoded[4..6], &[4, 0]);
        assert_eq!(&encoded[10..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_builder_checksums_verify() {
        let payload = Bytes::from("average record");
        let encoded = FrameBuilder::new(0x16).payload(payload.clone()).build().unwrap();

        let header = decode_header_from_bytes(&encoded).unwrap();
        assert_eq!(header.data_checksum, checksum(&payload));
        assert!(header.header_checksum_ok());
    }

    #[test]
    fn test_large_payload_selects_long_header() {
        let payload = Bytes::from(vec![0x5Au8; 70_000]);
        let encoded = FrameBuilder::new(0x15).payload(payload).build().unwrap();

        assert_eq!(encoded[1], 12);
        assert_eq!(&encoded[4..8], &70_000u32.to_le_bytes());
        assert_eq!(encoded.len(), 12 + 70_000);
    }

    #[test]
    fn test_forced_short_header_rejects_large_payload() {
        let result = FrameBuilder::new(0x15)
            .payload(Bytes::from(vec![0u8; 70_000]))
            .short_header()
            .build();
        assert!(matches!(result, Err(FrameError::InvalidStructure(_))));
    }

    #[test]
    fn test_forced_long_header_small_payload() {
        let encoded = FrameBuilder::new(0x17)
            .payload(Bytes::from_static(b"ab"))
            .long_header()
            .build()
            .unwrap();
        assert_eq!(encoded.len(), 14);
        let header = decode_header_from_bytes(&encoded).unwrap();
        assert_eq!(header.data_size, 2);
        assert!(header.header_checksum_ok());
    }

    #[test]
    fn test_encode_frame_length_mismatch() {
        let header = FrameHeader::new(0x15, 5, 0);
        let result = encode_frame(&header, b"abc");
        assert!(matches!(result, Err(FrameError::InvalidStructure(_))));
    }
}
