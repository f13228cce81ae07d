//! Format and version information (ISO/IEC 18004, Sections 7.9 and 7.10).
//!
//! Format info: 15 bits = [EC level (2)][mask (3)][BCH(15,5) remainder (10)],
//! XOR'd with 0b101010000010010. Version info (v7+): 18 bits =
//! [version (6)][BCH(18,6) remainder (12)], unmasked.

use crate::matrix::Matrix;

/// Format word for EC level L (indicator 01) with mask pattern 0,
/// BCH remainder and XOR mask already applied.
pub const FORMAT_L_MASK0: u16 = 0x77C4;

/// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1.
const VERSION_GENERATOR: u32 = 0x1F25;

/// 18-bit version information word.
pub fn version_bits(version: u8) -> u32 {
    let data = version as u32;
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    (data << 12) | (rem & 0xFFF)
}

/// Write both copies of the format word.
///
/// Bit 0 is the least significant bit of `FORMAT_L_MASK0`.
pub fn write_format_info(matrix: &mut Matrix) {
    let side = matrix.side();
    let bit = |i: usize| (FORMAT_L_MASK0 >> i) & 1 == 1;

    // Around the top-left finder
    for i in 0..=5 {
        matrix.set_function(i, 8, bit(i));
    }
    matrix.set_function(7, 8, bit(6));
    matrix.set_function(8, 8, bit(7));
    matrix.set_function(8, 7, bit(8));
    for i in 9..15 {
        matrix.set_function(8, 14 - i, bit(i));
    }

    // Split between the top-right and bottom-left finders
    for i in 0..8 {
        matrix.set_function(8, side - 1 - i, bit(i));
    }
    for i in 8..15 {
        matrix.set_function(side - 15 + i, 8, bit(i));
    }
}

/// Write both 6x3 version information blocks. No-op below version 7.
pub fn write_version_info(matrix: &mut Matrix) {
    let version = matrix.version().number();
    if version < 7 {
        return;
    }

    let side = matrix.side();
    let bits = version_bits(version);
    for i in 0..18 {
        let bit = (bits >> i) & 1 == 1;
        let a = side - 11 + i % 3;
        let b = i / 3;
        // Top-right
        matrix.set_function(b, a, bit);
        // Bottom-left
        matrix.set_function(a, b, bit);
    }
}


#[cfg(test)]
mod tests {
    use super::bch::{decode_format, format_bits};
    use super::*;
    use crate::version::Version;

    #[test]
    fn format_constant_is_l_mask_0() {
        assert_eq!(format_bits(0b01, 0), FORMAT_L_MASK0);
        assert_eq!(decode_format(FORMAT_L_MASK0), (0b01, 0, 0));
    }

    /// Known values from ISO 18004 Table C.1.
    #[test]
    fn format_bits_known_values() {
        assert_eq!(format_bits(0b00, 0), 0b101010000010010);
        assert_eq!(format_bits(0b01, 1), 0b111001011110011);
        assert_eq!(format_bits(0b10, 0), 0b001011010001001);
        assert_eq!(format_bits(0b11, 0), 0b011010101011111);
    }

    #[test]
    fn decode_corrects_up_to_three_errors() {
        let damaged = FORMAT_L_MASK0 ^ 0b100_0000_0100_0001;
        assert_eq!(decode_format(damaged), (0b01, 0, 3));
    }

    /// Known values from ISO 18004 Table D.1.
    #[test]
    fn version_bits_known_values() {
        assert_eq!(version_bits(7), 0x07C94);
        assert_eq!(version_bits(8), 0x085BC);
        assert_eq!(version_bits(10), 0x0A4D3);
        assert_eq!(version_bits(20), 0x149A6);
    }

    #[test]
    fn both_format_copies_agree() {
        let mut matrix = Matrix::new(Version::new(3).unwrap());
        write_format_info(&mut matrix);
        let side = matrix.side();

        let mut first = 0u16;
        let mut second = 0u16;
        let first_cells: Vec<(usize, usize)> = (0..=5)
            .map(|i| (i, 8))
            .chain([(7, 8), (8, 8), (8, 7)])
            .chain((9..15).map(|i| (8, 14 - i)))
            .collect();
        let second_cells: Vec<(usize, usize)> = (0..8)
            .map(|i| (8, side - 1 - i))
            .chain((8..15).map(|i| (side - 15 + i, 8)))
            .collect();
        for (i, (&(r1, c1), &(r2, c2))) in first_cells.iter().zip(&second_cells).enumerate() {
            first |= (matrix.get(r1, c1) as u16) << i;
            second |= (matrix.get(r2, c2) as u16) << i;
        }
        assert_eq!(first, FORMAT_L_MASK0);
        assert_eq!(second, FORMAT_L_MASK0);
    }

    #[test]
    fn version_blocks_are_transposes() {
        let mut matrix = Matrix::new(Version::new(7).unwrap());
        write_version_info(&mut matrix);
        let side = matrix.side();

        let mut word = 0u32;
        for i in 0..18 {
            let (a, b) = (side - 11 + i % 3, i / 3);
            assert_eq!(matrix.get(b, a), matrix.get(a, b));
            word |= (matrix.get(b, a) as u32) << i;
        }
        assert_eq!(word, 0x07C94);
    }
}
