//! 16-bit running checksum used for AD2CP payloads and headers
//!
//! The sum starts at [`CHECKSUM_SEED`] and adds each little-endian 16-bit word of the
//! input, wrapping modulo 2^16. An odd trailing byte is added as the low byte of a
//! zero-padded word.

use crate::constants::CHECKSUM_SEED;

/// Streaming checksum accumulator
///
/// Input may be fed in chunks of any length, including odd ones: a byte left over at
/// the end of one chunk is paired with the first byte of the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
    sum: u16,
    pending: Option<u8>,
}

impl Checksum {
    /// Create an accumulator holding the seed value
    pub const fn new() -> Self {
        Self {
            sum: CHECKSUM_SEED,
            pending: None,
        }
    }

    /// Feed more bytes
    pub fn update(&mut self, data: &[u8]) {
        let mut rest = data;

        if let Some(lo) = self.pending.take() {
            match rest.split_first() {
                Some((&hi, tail)) => {
                    self.add_word(lo, hi);
                    rest = tail;
                }
                None => {
                    self.pending = Some(lo);
                    return;
                }
            }
        }

        let mut words = rest.chunks_exact(2);
        for word in &mut words {
            self.add_word(word[0], word[1]);
        }
        if let [lo] = words.remainder() {
            self.pending = Some(*lo);
        }
    }

    /// Final checksum value, padding a dangling byte with a zero high byte
    pub fn finish(&self) -> u16 {
        match self.pending {
            Some(lo) => self.sum.wrapping_add(u16::from(lo)),
            None => self.sum,
        }
    }

    fn add_word(&mut self, lo: u8, hi: u8) {
        self.sum = self.sum.wrapping_add(u16::from_le_bytes([lo, hi]));
    }
}

impl Default for Checksum {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the checksum of a complete buffer
pub fn checksum(data: &[u8]) -> u16 {
    let mut cs = Checksum::new();
    cs.update(data);
    cs.finish()
}
