//! Known-answer vectors for the AD2CP frame format
//!
//! Each vector is a literal byte dump with hand-computed checksums, so these tests
//! pin the wire layout independently of the encoder.

use ad2cp_core::{
    checksum::checksum,
    decoder::decode_header_from_bytes,
    encoder::FrameBuilder,
    scanner::scan_bytes,
    FrameError, ScanConfig, StopReason,
};
use bytes::Bytes;

/// Burst record, 10-byte header, payload 01 02 03 04
/// data checksum 0xB58C + 0x0201 + 0x0403 = 0xBB90
/// header checksum over a5 0a 15 10 04 00 90 bb = 0x8BDA
const BURST_SHORT: &str = "a50a1510040090bbda8b01020304";

/// Average record, forced 12-byte header, payload "hello AD2CP!"
const AVERAGE_LONG: &str = "a50c16100c0000009250e52268656c6c6f20414432435021";

/// String record (0xA0) carrying "$GPGGA"
const TEXT_SHORT: &str = "a50aa010060047851e56244750474741";

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

#[test]
fn vector_checksum_values() {
    assert_eq!(checksum(&[]), 0xB58C);
    assert_eq!(checksum(&[0x01, 0x02, 0x03, 0x04]), 0xBB90);
    assert_eq!(checksum(&[0x01, 0x02, 0x03]), 0xB790);
    assert_eq!(checksum(&[0xFF, 0xFF]), 0xB58B);
}

#[test]
fn vector_burst_short_header() {
    let bytes = unhex(BURST_SHORT);
    let header = decode_header_from_bytes(&bytes).unwrap();

    assert_eq!(header.header_size(), 10);
    assert_eq!(header.id, 0x15);
    assert_eq!(header.family, 0x10);
    assert_eq!(header.data_size, 4);
    assert_eq!(header.data_checksum, 0xBB90);
    assert_eq!(header.header_checksum, 0x8BDA);
    assert!(header.header_checksum_ok());
}

#[test]
fn vector_average_long_header() {
    let bytes = unhex(AVERAGE_LONG);
    let header = decode_header_from_bytes(&bytes).unwrap();

    assert_eq!(header.header_size(), 12);
    assert_eq!(header.data_size, 12);
    assert_eq!(header.data_checksum, checksum(b"hello AD2CP!"));
    assert!(header.header_checksum_ok());
}

#[test]
fn vector_encoder_matches_literal_bytes() {
    let burst = FrameBuilder::new(0x15)
        .payload(Bytes::from_static(&[1, 2, 3, 4]))
        .build()
        .unwrap();
    assert_eq!(hex::encode(&burst), BURST_SHORT);

    let average = FrameBuilder::new(0x16)
        .payload(Bytes::from_static(b"hello AD2CP!"))
        .long_header()
        .build()
        .unwrap();
    assert_eq!(hex::encode(&average), AVERAGE_LONG);

    let text = FrameBuilder::new(0xA0)
        .payload(Bytes::from_static(b"$GPGGA"))
        .build()
        .unwrap();
    assert_eq!(hex::encode(&text), TEXT_SHORT);
}

#[test]
fn vector_mixed_stream_with_garbage() {
    let mut stream = unhex("00ff13");
    stream.extend(unhex(BURST_SHORT));
    stream.extend(unhex(AVERAGE_LONG));
    stream.extend(unhex(TEXT_SHORT));

    let result = scan_bytes(&stream, &ScanConfig::default()).unwrap();

    let triples: Vec<(u64, u32, u8)> = result
        .records
        .iter()
        .map(|r| (r.offset, r.length, r.id))
        .collect();
    assert_eq!(triples, vec![(13, 4, 0x15), (29, 12, 0x16), (51, 6, 0xA0)]);
    assert_eq!(result.leading_garbage, 3);
    assert!(!result.is_broken());
}

#[test]
fn vector_wrong_data_checksum() {
    // BURST_SHORT with the data checksum bytes changed to 00 00
    let mut bytes = unhex(BURST_SHORT);
    bytes[6] = 0;
    bytes[7] = 0;

    let result = scan_bytes(&bytes, &ScanConfig::default()).unwrap();
    assert_eq!(result.len(), 1);
    assert!(!result.records[0].checksum_ok);
    assert_eq!(result.checksum_mismatches, 1);
    // the header checksum covers the edited field too
    assert_eq!(result.header_checksum_mismatches, 1);
    assert!(result.is_broken());
}

#[test]
fn vector_truncated_payload() {
    let bytes = unhex(BURST_SHORT);
    let result = scan_bytes(&bytes[..12], &ScanConfig::default()).unwrap();

    assert!(result.is_empty());
    assert!(result.truncated);
    assert_eq!(result.stop, StopReason::TruncatedPayload);
    assert_eq!(result.bytes_consumed, 12);
}

#[test]
fn vector_header_size_eleven() {
    let bytes = unhex("a50b1510040090bbda8b0001020304");
    assert_eq!(
        scan_bytes(&bytes, &ScanConfig::default()),
        Err(FrameError::InvalidHeaderSize { offset: 0, size: 11 })
    );
}
