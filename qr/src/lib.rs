//! # QR Code Encoder
//!
//! A small, in-process QR code encoder implementing the subset of
//! **ISO/IEC 18004:2015** needed for two-factor-authentication enrollment:
//! TOTP provisioning URIs are turned into a module matrix locally, so the
//! shared secret never leaves the process.
//!
//! Scope: Byte mode, error correction level L, versions 1-20 (up to 858
//! payload bytes), mask pattern 0.
//!
//! ## Library Organization
//!
//! ```text
//! lib.rs
//! +-- QrCode::encode()            Entry point: text -> module matrix
//! |
//! +-- version     Version, select_version()     smallest version that fits
//! +-- bits        BitBuffer, encode_data()      mode + count + payload + padding
//! +-- blocks      split(), interleave()         block groups, EC, interleaving
//! |   +-- reed_solomon                          polynomial division in GF(2^8)
//! |   +-- gf256                                 log/exp tables, 0x11D
//! |   +-- tables                                per-version capacities
//! +-- matrix      Matrix                        function patterns, zigzag, mask
//! +-- format      write_format_info()           BCH(15,5) format, BCH(18,6) version
//! +-- render      to_svg(), to_png(), ...       quiet zone + output formats
//! ```
//!
//! ## Encoding Pipeline
//!
//! ```text
//! text -> bytes -> select_version -> encode_data -> split/interleave
//!      -> Matrix::new -> place_data -> apply_mask -> format/version info
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use otpqr::{QrCode, RenderOptions};
//!
//! let qr = QrCode::encode("otpauth://totp/Example:alice?secret=JBSWY3DPEHPK3PXP").unwrap();
//! assert_eq!(qr.size(), qr.version().side());
//! let svg = qr.to_svg(256, &RenderOptions::default());
//! ```

pub mod bits;
pub mod blocks;
pub mod error;
pub mod format;
pub mod gf256;
pub mod matrix;
pub mod reed_solomon;
pub mod render;
pub mod tables;
pub mod version;

use log::debug;

pub use error::QrError;
pub use render::{Raster, RenderOptions};
pub use version::Version;

use matrix::Matrix;

/// A finished QR symbol: a square grid of dark/light modules without a
/// quiet zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    size: usize,
    /// Row-major, true = dark.
    modules: Vec<bool>,
}

impl QrCode {
    /// Encode UTF-8 text in Byte mode.
    pub fn encode(text: &str) -> Result<Self, QrError> {
        Self::encode_bytes(text.as_bytes())
    }

    /// Encode arbitrary bytes in Byte mode.
    ///
    /// Selects the smallest version that fits, or returns
    /// [`QrError::DataTooLong`] when even version 20 is too small.
    pub fn encode_bytes(data: &[u8]) -> Result<Self, QrError> {
        // Step 1: Determine the minimum version needed
        let version = version::select_version(data.len())?;

        // Step 2: Mode, count, payload, terminator and padding
        let data_codewords = bits::encode_data(data, version);

        // Step 3: Reed-Solomon per block, then interleave
        let stream = blocks::build_stream(&data_codewords, version);

        // Step 4: Function patterns
        let mut matrix = Matrix::new(version);

        // Step 5: Zigzag placement and mask 0
        matrix.place_data(stream.as_slice());
        matrix.apply_mask();

        // Step 6: Format and version information
        format::write_format_info(&mut matrix);
        format::write_version_info(&mut matrix);

        debug!(
            "encoded {} bytes as version {} ({} bits placed)",
            data.len(),
            version,
            stream.len()
        );

        let size = matrix.side();
        Ok(Self {
            version,
            size,
            modules: matrix.into_modules(),
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Modules per side, `4 * version + 17`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at (row, col). true = dark.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.modules[row * self.size + col]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks(self.size)
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

/// Encode `text` into a QR symbol. See [`QrCode::encode`].
pub fn encode(text: &str) -> Result<QrCode, QrError> {
    QrCode::encode(text)
}
