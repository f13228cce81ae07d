//! GF(2^8) arithmetic for Reed-Solomon encoding.
//!
//! ## Galois Field GF(2^8)
//!
//! A finite field with 256 elements. Elements are polynomials over GF(2)
//! reduced modulo the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D).
//!
//! - Addition: XOR
//! - Multiplication: via log/antilog tables, `a * b = exp(log(a) + log(b))`
//!
//! Both tables are `const`, so they are built once at compile time and are
//! shared read-only by every encode call.

/// Primitive polynomial used by QR codes (ISO/IEC 18004, Section 8).
pub const PRIMITIVE_POLY: u16 = 0x11D;

/// Log/antilog tables for GF(2^8).
pub struct GF256;

impl GF256 {
    /// Antilogarithm table. Doubled to 512 entries so that
    /// `EXP[LOG[a] + LOG[b]]` never needs a modulo.
    pub const EXP: [u8; 512] = Self::generate_exp_table();

    /// Logarithm table (index 1-255 -> exponent). `LOG[0]` is unused.
    pub const LOG: [u8; 256] = Self::generate_log_table();

    const fn generate_exp_table() -> [u8; 512] {
        let mut table = [0u8; 512];
        let mut x = 1u16;

        let mut i = 0;
        while i < 255 {
            table[i] = x as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE_POLY;
            }
            i += 1;
        }

        // alpha^255 = 1, so the second half repeats the first.
        while i < 512 {
            table[i] = table[i - 255];
            i += 1;
        }
        table
    }

    const fn generate_log_table() -> [u8; 256] {
        let exp = Self::generate_exp_table();
        let mut table = [0u8; 256];

        let mut i = 0;
        while i < 255 {
            table[exp[i] as usize] = i as u8;
            i += 1;
        }

        table
    }

    /// Multiply two elements in GF(2^8).
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_sum = Self::LOG[a as usize] as usize + Self::LOG[b as usize] as usize;
        Self::EXP[log_sum]
    }

    /// alpha^n.
    pub fn exp(n: usize) -> u8 {
        Self::EXP[n % 255]
    }
}
