//! Error types used by the crate.

use thiserror::Error;

#[cfg(feature = "image")]
use image::ImageError;

/// Rendering error type.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Image decoding error.
    #[cfg(feature = "image")]
    #[error("image decode error: {0:?}")]
    ImageDecode(#[from] ImageError),
    /// Raw pixel buffer does not match the declared image size.
    #[error("invalid image data: expected {expected} bytes, got {actual}")]
    InvalidImageData {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
    /// Canvas or image of zero or too large size.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Destination rectangle of a draw call is empty or not finite.
    #[error("invalid draw area")]
    InvalidDrawArea,
    /// Symbol definition cannot be parsed.
    #[error("invalid symbol: {0}")]
    Symbol(#[from] serde_json::Error),
}
