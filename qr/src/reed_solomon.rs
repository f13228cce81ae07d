//! Reed-Solomon error correction codewords (ISO/IEC 18004, Section 8).
//!
//! For `n` EC codewords the generator polynomial is
//! `g(x) = (x - a^0)(x - a^1)...(x - a^(n-1))`, and the EC codewords are the
//! coefficients of `data(x) * x^n mod g(x)`.

use crate::gf256::GF256;

/// Build the generator polynomial of the given degree.
///
/// Coefficients are stored in decreasing degree order, so `result[0]` is the
/// (always 1) leading coefficient.
pub fn generator(degree: usize) -> Vec<u8> {
    let mut result = vec![1u8];

    for i in 0..degree {
        let root = GF256::exp(i);
        let mut next = vec![0u8; result.len() + 1];

        // Multiply by (x - root). Subtraction is XOR in GF(2^8).
        for (j, &coef) in result.iter().enumerate() {
            next[j] ^= coef;
            next[j + 1] ^= GF256::mul(coef, root);
        }

        result = next;
    }

    result
}

/// Compute `ec_len` error correction codewords for one data block.
///
/// Simulates long division of the zero-extended block by the generator,
/// keeping only the running remainder.
pub fn encode(data: &[u8], ec_len: usize) -> Vec<u8> {
    let generator = generator(ec_len);
    encode_with(data, &generator)
}

/// Same as [`encode`], reusing a generator built by [`generator`].
pub fn encode_with(data: &[u8], generator: &[u8]) -> Vec<u8> {
    let ec_len = generator.len() - 1;
    let mut remainder = vec![0u8; ec_len];
    if ec_len == 0 {
        return remainder;
    }

    for &byte in data {
        let factor = byte ^ remainder[0];
        remainder.rotate_left(1);
        remainder[ec_len - 1] = 0;

        for (rem, &coef) in remainder.iter_mut().zip(&generator[1..]) {
            *rem ^= GF256::mul(coef, factor);
        }
    }

    remainder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_degree_7() {
        // Exponents 0, 87, 229, 146, 149, 238, 102, 21 in ISO 18004 Annex A
        assert_eq!(generator(7), vec![1, 127, 122, 154, 164, 11, 68, 117]);
    }

    #[test]
    fn generator_roots_are_consecutive_powers_of_alpha() {
        let poly = generator(10);
        for i in 0..10 {
            let root = GF256::exp(i);
            // Horner evaluation
            let value = poly.iter().fold(0u8, |acc, &c| GF256::mul(acc, root) ^ c);
            assert_eq!(value, 0, "a^{i} is not a root");
        }
    }

    /// "HELLO WORLD" at version 1-M, the worked example from the
    /// Thonky QR Code Tutorial.
    #[test]
    fn hello_world_1m() {
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        assert_eq!(
            encode(&data, 10),
            vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]
        );
    }

    #[test]
    fn single_a_version_1l() {
        let mut data = vec![0x40, 0x14, 0x10];
        while data.len() < 19 {
            data.push(if data.len() % 2 == 1 { 0xEC } else { 0x11 });
        }
        assert_eq!(encode(&data, 7), vec![82, 75, 181, 59, 175, 141, 241]);
    }

    #[test]
    fn output_length_is_ec_len() {
        for ec_len in [1, 7, 18, 30] {
            assert_eq!(encode(&[], ec_len).len(), ec_len);
            assert_eq!(encode(&[0xFF; 100], ec_len).len(), ec_len);
        }
    }

    #[test]
    fn codeword_is_divisible_by_generator() {
        let data: Vec<u8> = (0u8..40).map(|b| b.wrapping_mul(37)).collect();
        let ec = encode(&data, 18);
        let mut full = data.clone();
        full.extend_from_slice(&ec);
        // A valid codeword has zero remainder
        assert!(encode(&full, 18).iter().all(|&b| b == 0));
    }
}
