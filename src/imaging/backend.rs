//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two unit operations the pipeline
//! dispatches: resizing a still image and rebuilding an animation at a new
//! size. Each call works on its own buffers and returns encoded bytes, so a
//! backend can be driven from many rayon workers at once.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use
//! [`tests::MockBackend`] to check pipeline ordering and failure handling
//! without touching pixels.

use super::params::UnitParams;
use crate::types::SourceImage;
use image::ImageFormat;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImagingError {
    /// Pixel buffer does not match its declared dimensions, or the bytes
    /// cannot be decoded in the declared still-image format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Malformed animation: {0}")]
    MalformedAnimation(String),
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Result of a unit operation: one complete encoded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub frames: usize,
}

/// Trait for image processing backends.
///
/// Implementations must be `Sync`: the pipeline calls them from a rayon pool.
pub trait ImageBackend: Sync {
    /// Resize a single-frame image to `size`×`size` and re-encode it in `format`.
    fn resize_still(
        &self,
        source: &SourceImage,
        format: ImageFormat,
        size: u32,
        params: &UnitParams,
    ) -> Result<Encoded, ImagingError>;

    /// Decode an animation, resize every frame to `size`×`size` and encode a
    /// new animation with the same frame count and timing.
    fn resize_animation(
        &self,
        source: &SourceImage,
        size: u32,
        params: &UnitParams,
    ) -> Result<Encoded, ImagingError>;
}
