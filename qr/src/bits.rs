//! Byte-mode data encoding (ISO/IEC 18004, Section 7).
//!
//! ```text
//! [Mode 0100][Count (8 or 16 bits)][Payload][Terminator <=4][Pad to byte][0xEC 0x11 ...]
//! ```

use log::trace;

use crate::version::Version;

/// Byte mode indicator.
pub const MODE_BYTE: u32 = 0b0100;

/// Pad codewords, alternated until the data capacity is filled.
const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Bit buffer for accumulating bits, most significant bit first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Append the low `count` bits of `value`, MSB first.
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32);
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn append_byte(&mut self, byte: u8) {
        self.append_bits(byte as u32, 8);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Pack into bytes. A trailing partial byte is zero-filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Encode `payload` into exactly `version.data_capacity()` data codewords.
///
/// The caller guarantees the payload fits, i.e. that `version` came from
/// [`crate::version::select_version`].
pub fn encode_data(payload: &[u8], version: Version) -> Vec<u8> {
    let capacity_bits = version.data_capacity() * 8;
    let mut bits = BitBuffer::with_capacity(capacity_bits);

    bits.append_bits(MODE_BYTE, 4);
    bits.append_bits(payload.len() as u32, version.count_bits());
    for &byte in payload {
        bits.append_byte(byte);
    }
    debug_assert!(bits.len() <= capacity_bits, "payload exceeds capacity");

    // Terminator, truncated when capacity is nearly exhausted
    let terminator = capacity_bits.saturating_sub(bits.len()).min(4);
    bits.append_bits(0, terminator);

    // Zero-fill to the next byte boundary
    let fill = (8 - bits.len() % 8) % 8;
    bits.append_bits(0, fill);

    let mut codewords = bits.to_bytes();
    let used = codewords.len();
    codewords.extend(
        PAD_CODEWORDS
            .iter()
            .cycle()
            .take(version.data_capacity().saturating_sub(used)),
    );

    trace!(
        "version {}: {} payload bytes -> {} codewords ({} pad)",
        version,
        payload.len(),
        codewords.len(),
        codewords.len() - used
    );
    codewords
}
