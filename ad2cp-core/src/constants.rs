//! Constants and limits for the AD2CP frame format

use serde::{Deserialize, Serialize};

/// Sync marker - first byte of every frame header
pub const SYNC: u8 = 0xA5;

/// Instrument family byte for the AD2CP family
pub const FAMILY: u8 = 0x10;

/// Header size when the data size field is 16 bits wide
pub const SHORT_HEADER_SIZE: u8 = 10;

/// Header size when the data size field is 32 bits wide
pub const LONG_HEADER_SIZE: u8 = 12;

/// Largest header the format allows
pub const MAX_HEADER_SIZE: usize = LONG_HEADER_SIZE as usize;

/// Fixed leading header fields: sync + header size + id + family
pub const HEADER_PREFIX_SIZE: usize = 4;

/// Seed of the 16-bit running checksum
pub const CHECKSUM_SEED: u16 = 0xB58C;

/// Largest payload a short (10-byte) header can describe
pub const MAX_SHORT_PAYLOAD: u32 = u16::MAX as u32;

/// Default size cap of the scanner's payload working buffer (64 MB)
pub const DEFAULT_MAX_PAYLOAD_LEN: u32 = 64 * 1024 * 1024;

/// Record ids documented for AD2CP data records
pub const KNOWN_RECORD_IDS: [u8; 11] = [21, 22, 23, 24, 26, 27, 28, 29, 30, 31, 160];

/// Width of the data size field, selected by the header size byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeField {
    /// 16-bit little-endian data size (10-byte header)
    U16,
    /// 32-bit little-endian data size (12-byte header)
    U32,
}

impl SizeField {
    /// Select the field width for a header size byte
    pub const fn for_header_size(header_size: u8) -> Option<Self> {
        match header_size {
            SHORT_HEADER_SIZE => Some(SizeField::U16),
            LONG_HEADER_SIZE => Some(SizeField::U32),
            _ => None,
        }
    }

    /// Returns the width of the field in bytes
    pub const fn width(&self) -> usize {
        match self {
            SizeField::U16 => 2,
            SizeField::U32 => 4,
        }
    }

    /// Header size that carries this field width
    pub const fn header_size(&self) -> u8 {
        match self {
            SizeField::U16 => SHORT_HEADER_SIZE,
            SizeField::U32 => LONG_HEADER_SIZE,
        }
    }
}

/// Semantic type of a data record, as named by its id byte
///
/// The scanner never interprets payloads; this is only used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// 0x15 - Burst data record
    Burst,
    /// 0x16 - Average data record
    Average,
    /// 0x17 - Bottom track data record
    BottomTrack,
    /// 0x18 - Interleaved burst data record (beam 5)
    InterleavedBurst,
    /// 0x1A - Burst altimeter raw record
    BurstAltimeterRaw,
    /// 0x1B - DVL bottom track record
    DvlBottomTrack,
    /// 0x1C - Echo sounder record
    EchoSounder,
    /// 0x1D - DVL water track record
    DvlWaterTrack,
    /// 0x1E - Altimeter record
    Altimeter,
    /// 0x1F - Average altimeter raw record
    AverageAltimeterRaw,
    /// 0xA0 - String data record (GPS NMEA, FWRITE comments)
    Text,
}

impl RecordKind {
    /// Classify a record id, or `None` if it is outside the documented set
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0x15 => Some(RecordKind::Burst),
            0x16 => Some(RecordKind::Average),
            0x17 => Some(RecordKind::BottomTrack),
            0x18 => Some(RecordKind::InterleavedBurst),
            0x1A => Some(RecordKind::BurstAltimeterRaw),
            0x1B => Some(RecordKind::DvlBottomTrack),
            0x1C => Some(RecordKind::EchoSounder),
            0x1D => Some(RecordKind::DvlWaterTrack),
            0x1E => Some(RecordKind::Altimeter),
            0x1F => Some(RecordKind::AverageAltimeterRaw),
            0xA0 => Some(RecordKind::Text),
            _ => None,
        }
    }

    /// The id byte for this kind
    pub const fn id(&self) -> u8 {
        match self {
            RecordKind::Burst => 0x15,
            RecordKind::Average => 0x16,
            RecordKind::BottomTrack => 0x17,
            RecordKind::InterleavedBurst => 0x18,
            RecordKind::BurstAltimeterRaw => 0x1A,
            RecordKind::DvlBottomTrack => 0x1B,
            RecordKind::EchoSounder => 0x1C,
            RecordKind::DvlWaterTrack => 0x1D,
            RecordKind::Altimeter => 0x1E,
            RecordKind::AverageAltimeterRaw => 0x1F,
            RecordKind::Text => 0xA0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_field_selection() {
        assert_eq!(SizeField::for_header_size(10), Some(SizeField::U16));
        assert_eq!(SizeField::for_header_size(12), Some(SizeField::U32));
        assert_eq!(SizeField::for_header_size(11), None);
        assert_eq!(SizeField::U32.width(), 4);
        assert_eq!(SizeField::U16.header_size(), SHORT_HEADER_SIZE);
    }

    #[test]
    fn test_known_ids_round_trip_through_kind() {
        for id in KNOWN_RECORD_IDS {
            let kind = RecordKind::from_id(id).unwrap();
            assert_eq!(kind.id(), id);
        }
        assert_eq!(RecordKind::from_id(0x19), None);
        assert_eq!(RecordKind::from_id(0x00), None);
    }
}
