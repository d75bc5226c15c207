//! Stream scanner: sync recovery, framing loop and payload validation

use crate::checksum::{checksum, Checksum};
use crate::config::ScanConfig;
use crate::constants::SYNC;
use crate::decoder::{decode_header, read_full};
use crate::error::FrameError;
use crate::index::{PayloadBuffer, RecordIndex};
use crate::types::{FrameHeader, RecordDescriptor, ScanResult, StopReason};
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

#[cfg(feature = "logging")]
use tracing::{debug, info, trace, warn};

/// Open a file and scan it
///
/// The file handle is owned by the scan and closed on every exit path.
pub fn scan_file<P: AsRef<Path>>(path: P, config: &ScanConfig) -> Result<ScanResult, FrameError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FrameError::Open {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    #[cfg(feature = "logging")]
    debug!("Opened {} for scanning", path.display());

    scan_reader(BufReader::new(file), config)
}

/// Scan an in-memory stream
pub fn scan_bytes(data: &[u8], config: &ScanConfig) -> Result<ScanResult, FrameError> {
    scan_reader(data, config)
}

/// Scan a buffered byte stream for AD2CP frames
///
/// This function:
/// 1. Skips any bytes before the first sync byte
/// 2. Decodes each header in turn, back to back
/// 3. Reads and checksums each selected payload, skipping unselected ones; payloads
///    longer than `max_payload_len` are checksummed in place instead of buffered
/// 4. Collects a descriptor for every selected frame, mismatched checksums included
///
/// The scan stops at the configured last ordinal, at a clean end of stream, or when
/// the stream ends inside a payload; in the last case the partial frame is dropped and
/// the result is marked truncated. Header-level problems (no sync at all, lost sync
/// between frames, an invalid header size, a truncated header) abort the scan.
pub fn scan_reader<R: BufRead>(mut reader: R, config: &ScanConfig) -> Result<ScanResult, FrameError> {
    config.validate()?;

    let mut index = RecordIndex::new();
    let mut payload = PayloadBuffer::new();

    let skipped = locate_sync(&mut reader)?;
    index.set_leading_garbage(skipped);
    let mut position = skipped;

    #[cfg(feature = "logging")]
    {
        if skipped > 0 {
            debug!("Skipped {} bytes before first sync byte", skipped);
        }
    }

    let mut ordinal = 0u64;
    let stop = loop {
        if ordinal > 0 && config.is_last(ordinal) {
            break StopReason::RecordLimit;
        }

        match peek_byte(&mut reader)? {
            None => break StopReason::EndOfStream,
            Some(SYNC) => {}
            Some(found) => {
                return Err(FrameError::LostSync {
                    offset: position,
                    found,
                })
            }
        }

        let header_offset = position;
        let header = decode_header(&mut reader, header_offset)?;
        position += u64::from(header.header_size());
        ordinal += 1;
        index.note_frame();
        inspect_header(&header, header_offset, &mut index);

        let payload_offset = position;
        let data_size = u64::from(header.data_size);

        if !config.selects(ordinal) {
            let skipped = io::copy(&mut (&mut reader).take(data_size), &mut io::sink())?;
            position += skipped;
            if skipped < data_size {
                note_truncation(&mut index, payload_offset, data_size, skipped);
                break StopReason::TruncatedPayload;
            }
            continue;
        }

        let actual = if header.data_size <= config.max_payload_len {
            let buf = payload.slice_mut(header.data_size as usize);
            let got = read_full(&mut reader, buf)? as u64;
            position += got;
            if got < data_size {
                note_truncation(&mut index, payload_offset, data_size, got);
                break StopReason::TruncatedPayload;
            }
            checksum(buf)
        } else {
            #[cfg(feature = "logging")]
            debug!(
                "Payload of {} bytes at offset {} is over the {} byte buffer cap, checksumming in place",
                data_size, payload_offset, config.max_payload_len
            );

            let (got, sum) = checksum_in_place(&mut reader, data_size)?;
            position += got;
            if got < data_size {
                note_truncation(&mut index, payload_offset, data_size, got);
                break StopReason::TruncatedPayload;
            }
            sum
        };
        let checksum_ok = actual == header.data_checksum;

        #[cfg(feature = "logging")]
        {
            if !checksum_ok {
                warn!(
                    "Data checksum mismatch at offset {}: computed {:#06x}, header says {:#06x}",
                    payload_offset, actual, header.data_checksum
                );
            }
        }

        let record = RecordDescriptor {
            offset: payload_offset,
            length: header.data_size,
            id: header.id,
            header_size: header.header_size(),
            ordinal,
            checksum_ok,
        };

        #[cfg(feature = "logging")]
        trace!(
            "Record {} @ offset {}: id={:#04x} family={:#04x} length={} checksum_ok={}",
            ordinal,
            record.offset,
            record.id,
            header.family,
            record.length,
            checksum_ok
        );

        index.push(record);
    };

    let result = index.finish(position, stop);

    #[cfg(feature = "logging")]
    info!(
        "Scan complete: {} records from {} frames in {} bytes ({} checksum mismatches, truncated: {}, stop: {:?})",
        result.records.len(),
        result.frames_seen,
        result.bytes_consumed,
        result.checksum_mismatches,
        result.truncated,
        result.stop
    );

    Ok(result)
}

/// Advance the reader to the next sync byte
///
/// On success the sync byte is left unconsumed, so the reader is positioned on it,
/// and the number of bytes skipped to get there is returned. Fails with
/// `NoSyncFound` if the stream ends first.
pub fn locate_sync<R: BufRead + ?Sized>(reader: &mut R) -> Result<u64, FrameError> {
    let mut skipped = 0u64;
    loop {
        let (found, step) = {
            let available = match reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if available.is_empty() {
                return Err(FrameError::NoSyncFound { scanned: skipped });
            }
            match memchr::memchr(SYNC, available) {
                Some(pos) => (true, pos),
                None => (false, available.len()),
            }
        };

        reader.consume(step);
        skipped += step as u64;
        if found {
            return Ok(skipped);
        }
    }
}

// Checksums up to `len` bytes straight out of the reader's buffer without copying them.
// Returns the bytes actually consumed, which is short of `len` only at end of stream.
fn checksum_in_place<R: BufRead + ?Sized>(reader: &mut R, len: u64) -> io::Result<(u64, u16)> {
    let mut limited = reader.take(len);
    let mut sum = Checksum::new();
    let mut got = 0u64;
    loop {
        let step = {
            let chunk = match limited.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if chunk.is_empty() {
                break;
            }
            sum.update(chunk);
            chunk.len()
        };
        limited.consume(step);
        got += step as u64;
    }
    Ok((got, sum.finish()))
}

fn peek_byte<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

// Recoverable header observations: counted, never fatal.
fn inspect_header(header: &FrameHeader, offset: u64, index: &mut RecordIndex) {
    if !header.header_checksum_ok() {
        index.note_header_checksum_mismatch();
        #[cfg(feature = "logging")]
        warn!(
            "Header checksum mismatch at offset {}: header says {:#06x}",
            offset, header.header_checksum
        );
    }

    if header.kind().is_none() {
        index.note_unknown_id();
        #[cfg(feature = "logging")]
        debug!("Unknown record id {:#04x} at offset {}", header.id, offset);
    }

    if !header.is_ad2cp_family() {
        index.note_foreign_family();
        #[cfg(feature = "logging")]
        debug!("Unexpected family {:#04x} at offset {}", header.family, offset);
    }

    #[cfg(not(feature = "logging"))]
    let _ = offset;
}

fn note_truncation(index: &mut RecordIndex, offset: u64, wanted: u64, got: u64) {
    index.mark_truncated();

    #[cfg(feature = "logging")]
    warn!(
        "Stream ended inside payload at offset {}: wanted {} bytes, got {}",
        offset, wanted, got
    );

    #[cfg(not(feature = "logging"))]
    let _ = (offset, wanted, got);
}
