//! Fuzzing entry points for ad2cp-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_scan

use ad2cp_core::ScanConfig;

pub fn fuzz_decode_header(data: &[u8]) {
    use ad2cp_core::decoder::decode_header_from_bytes;

    // Try to decode - should never panic
    let _ = decode_header_from_bytes(data);
}

pub fn fuzz_scan(data: &[u8]) {
    use ad2cp_core::scanner::scan_bytes;

    // Keep allocations bounded on garbage length fields
    let config = ScanConfig::new().max_payload_len(1 << 20);
    let _ = scan_bytes(data, &config);
}

/// First byte picks a stride, the rest is the stream
pub fn fuzz_scan_strided(data: &[u8]) {
    use ad2cp_core::scanner::scan_bytes;

    if let Some((&knob, rest)) = data.split_first() {
        let config = ScanConfig::new()
            .first(u64::from(knob >> 4))
            .stride(u64::from(knob & 0x0F).max(1))
            .max_payload_len(1 << 20);
        let _ = scan_bytes(rest, &config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_decode_empty() {
        fuzz_decode_header(&[]);
    }

    #[test]
    fn test_fuzz_decode_random() {
        fuzz_decode_header(&[0xA5, 0x0C, 0x56, 0x78]);
    }

    #[test]
    fn test_fuzz_scan_empty() {
        fuzz_scan(&[]);
    }

    #[test]
    fn test_fuzz_scan_random() {
        fuzz_scan(&[0xA5; 1024]);
    }

    #[test]
    fn test_fuzz_scan_strided() {
        fuzz_scan_strided(&[0x23, 0xA5, 0x0A, 0x15, 0x10, 0x02, 0x00, 0, 0, 0, 0, 1]);
    }
}
