//! Error type for QR encoding and rendering.

use thiserror::Error;

/// Errors returned by the encoder.
#[derive(Debug, Error)]
pub enum QrError {
    /// No version 1-20 at EC level L can hold the payload.
    #[error("data too long for a QR code: {len} bytes (maximum {max})")]
    DataTooLong { len: usize, max: usize },

    /// PNG encoding failed.
    #[cfg(feature = "png")]
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}
