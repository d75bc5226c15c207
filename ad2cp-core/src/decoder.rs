//! Frame header decoding

use crate::constants::{SizeField, HEADER_PREFIX_SIZE, MAX_HEADER_SIZE, SYNC};
use crate::error::FrameError;
use crate::types::FrameHeader;
use std::io::{ErrorKind, Read};

/// Decode one header from a reader positioned on a sync byte
///
/// Reads exactly `header_size` bytes (10 or 12). The fixed fields come first and
/// the header size byte selects whether the data size is 16 or 32 bits wide; both
/// widths and both trailing checksums are little-endian.
///
/// `offset` is the stream position of the sync byte and is only used in errors.
///
/// Fails with:
/// - `BadSync` if the first byte is not 0xA5
/// - `InvalidHeaderSize` if the size byte is not 10 or 12
/// - `TruncatedHeader` if the reader runs out before the header is complete
pub fn decode_header<R: Read>(reader: &mut R, offset: u64) -> Result<FrameHeader, FrameError> {
    let mut buf = [0u8; MAX_HEADER_SIZE];

    let got = read_full(reader, &mut buf[..HEADER_PREFIX_SIZE])?;
    let size_field = check_prefix(&buf[..got], offset)?;
    let header_len = size_field.header_size() as usize;

    let rest = read_full(reader, &mut buf[HEADER_PREFIX_SIZE..header_len])?;
    if HEADER_PREFIX_SIZE + rest < header_len {
        return Err(FrameError::TruncatedHeader {
            offset,
            expected: header_len,
            actual: HEADER_PREFIX_SIZE + rest,
        });
    }

    Ok(parse_fields(&buf[..header_len], size_field))
}

/// Decode a header from the start of a byte slice
pub fn decode_header_from_bytes(data: &[u8]) -> Result<FrameHeader, FrameError> {
    let mut cursor = data;
    decode_header(&mut cursor, 0)
}

// Validates sync and header size on whatever prefix bytes are available.
fn check_prefix(prefix: &[u8], offset: u64) -> Result<SizeField, FrameError> {
    if let Some(&found) = prefix.first() {
        if found != SYNC {
            return Err(FrameError::BadSync { offset, found });
        }
    }

    let size_field = match prefix.get(1) {
        Some(&size) => SizeField::for_header_size(size)
            .ok_or(FrameError::InvalidHeaderSize { offset, size })?,
        None => {
            return Err(FrameError::TruncatedHeader {
                offset,
                expected: HEADER_PREFIX_SIZE,
                actual: prefix.len(),
            })
        }
    };

    if prefix.len() < HEADER_PREFIX_SIZE {
        return Err(FrameError::TruncatedHeader {
            offset,
            expected: size_field.header_size() as usize,
            actual: prefix.len(),
        });
    }

    Ok(size_field)
}

fn parse_fields(buf: &[u8], size_field: SizeField) -> FrameHeader {
    let mut pos = HEADER_PREFIX_SIZE;
    let data_size = match size_field {
        SizeField::U16 => u32::from(u16::from_le_bytes([buf[pos], buf[pos + 1]])),
        SizeField::U32 => u32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]]),
    };
    pos += size_field.width();

    let data_checksum = u16::from_le_bytes([buf[pos], buf[pos + 1]]);
    let header_checksum = u16::from_le_bytes([buf[pos + 2], buf[pos + 3]]);

    FrameHeader {
        size_field,
        id: buf[2],
        family: buf[3],
        data_size,
        data_checksum,
        header_checksum,
    }
}

/// Read until `buf` is full or the reader is exhausted, returning the bytes read
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
