//! Symbol versions and minimal-version selection (ISO/IEC 18004, Section 7).

use std::fmt;

use log::debug;

use crate::error::QrError;
use crate::tables::{CAPACITIES, Capacity};

/// Mode indicator (4 bits) plus the 8-bit count field of versions 1-9.
const SHORT_OVERHEAD_BYTES: usize = 2;
/// Mode indicator (4 bits) plus the 16-bit count field of versions 10+.
/// The 20 bits round up to 3 whole codewords.
const LONG_OVERHEAD_BYTES: usize = 3;

/// A QR symbol version, 1 through 20.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(20);

    /// Largest payload, in bytes, the biggest supported symbol accepts.
    pub const MAX_BYTES: usize = 858;

    /// `None` outside 1..=20.
    pub fn new(version: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&version)
            .then_some(Self(version))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Modules per side: `4 * version + 17`.
    pub fn side(self) -> usize {
        self.0 as usize * 4 + 17
    }

    pub fn capacity(self) -> &'static Capacity {
        &CAPACITIES[self.0 as usize - 1]
    }

    /// Data codewords in the symbol (total minus EC codewords).
    pub fn data_capacity(self) -> usize {
        self.capacity().data_codewords()
    }

    /// Width of the Byte-mode character count indicator.
    pub fn count_bits(self) -> usize {
        if self.0 < 10 { 8 } else { 16 }
    }

    fn overhead_bytes(self) -> usize {
        if self.0 < 10 {
            SHORT_OVERHEAD_BYTES
        } else {
            LONG_OVERHEAD_BYTES
        }
    }

    /// Payload bytes this version holds in Byte mode.
    pub fn byte_capacity(self) -> usize {
        self.data_capacity() - self.overhead_bytes()
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.0..=Self::MAX.0).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Smallest version whose Byte-mode capacity fits `payload_len` bytes.
pub fn select_version(payload_len: usize) -> Result<Version, QrError> {
    let version = Version::all()
        .find(|v| payload_len <= v.byte_capacity())
        .ok_or(QrError::DataTooLong {
            len: payload_len,
            max: Version::MAX_BYTES,
        })?;

    debug!(
        "selected version {} ({}x{}) for {} payload bytes",
        version,
        version.side(),
        version.side(),
        payload_len
    );
    Ok(version)
}
