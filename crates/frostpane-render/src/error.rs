//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur during pixel surface operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Surface dimensions overflow the addressable pixel buffer.
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Raw pixel data does not match the declared dimensions.
    #[error("invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Failed to encode a surface into an image format.
    #[error("failed to encode image: {0}")]
    ImageEncode(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
