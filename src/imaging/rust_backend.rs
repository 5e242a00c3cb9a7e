//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode still (PNG, JPEG, WebP, BMP, GIF) | `image::load_from_memory_with_format` |
//! | Resample | [`resample`] over `fast_image_resize` (Lanczos3) |
//! | Sharpening | `image::imageops::unsharpen` |
//! | Encode still | `image::DynamicImage::write_to` in the source format |
//! | Decode animation | [`gif_decode::decode`] (`gif` crate) |
//! | Per-frame resize | [`frame::process`] on the rayon pool |
//! | Encode animation | [`gif_encode::encode`] (`gif` + `color_quant`) |

use super::backend::{Encoded, ImageBackend, ImagingError};
use super::frame::{self, Disposal, Frame};
use super::gif_decode;
use super::gif_encode::{self, EncodeFrame};
use super::params::UnitParams;
use super::resample::resample;
use crate::types::{ANIMATED_MIME, SourceImage};
use image::{DynamicImage, ImageFormat, RgbaImage};
use rayon::prelude::*;
use std::io::Cursor;
use tracing::debug;

/// Pure Rust backend using the `image`, `gif` and `fast_image_resize` crates.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a still image of a known format into RGBA.
fn load_still(bytes: &[u8], format: ImageFormat) -> Result<RgbaImage, ImagingError> {
    image::load_from_memory_with_format(bytes, format)
        .map(|img| img.to_rgba8())
        .map_err(|e| ImagingError::UnsupportedFormat(format!("cannot decode as {format:?}: {e}")))
}

/// Encode an RGBA image in `format`. JPEG has no alpha channel, so it is
/// flattened to RGB first.
fn encode_still(img: RgbaImage, format: ImageFormat) -> Result<Vec<u8>, ImagingError> {
    let dynamic = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
        _ => DynamicImage::ImageRgba8(img),
    };
    let mut out = Vec::new();
    dynamic
        .write_to(&mut Cursor::new(&mut out), format)
        .map_err(|e| ImagingError::EncodingFailed(format!("{format:?} encode failed: {e}")))?;
    Ok(out)
}

/// Resize one decoded frame. A frame whose geometry does not match its pixel
/// buffer came out of a broken stream, so it is reported as such.
fn process_frame(f: &Frame, size: u32, params: &UnitParams) -> Result<Vec<u8>, ImagingError> {
    frame::process(f, size, &params.outline).map_err(|e| match e {
        ImagingError::UnsupportedFormat(detail) => {
            ImagingError::MalformedAnimation(format!("bad frame geometry: {detail}"))
        }
        other => other,
    })
}

impl ImageBackend for RustBackend {
    fn resize_still(
        &self,
        source: &SourceImage,
        format: ImageFormat,
        size: u32,
        params: &UnitParams,
    ) -> Result<Encoded, ImagingError> {
        let img = load_still(&source.bytes, format)?;
        let (width, height) = img.dimensions();
        let pixels = resample(img.as_raw(), width, height, size, size, &params.still)?;
        let resized = RgbaImage::from_raw(size, size, pixels).ok_or_else(|| {
            ImagingError::UnsupportedFormat("resampled buffer has wrong length".into())
        })?;

        Ok(Encoded {
            bytes: encode_still(resized, format)?,
            mime_type: format.to_mime_type().to_string(),
            frames: 1,
        })
    }

    fn resize_animation(
        &self,
        source: &SourceImage,
        size: u32,
        params: &UnitParams,
    ) -> Result<Encoded, ImagingError> {
        let animation = gif_decode::decode(&source.bytes)?;

        // Every output frame is a full square canvas, so clearing to the
        // background between frames keeps earlier frames from showing
        // through transparent areas.
        let frames: Vec<EncodeFrame> = animation
            .frames
            .par_iter()
            .map(|f| {
                Ok(EncodeFrame {
                    pixels: process_frame(f, size, params)?,
                    delay_centiseconds: f.delay_centiseconds,
                    disposal: Disposal::Background,
                })
            })
            .collect::<Result<_, ImagingError>>()?;
        drop(animation);

        debug!(file = %source.name, size, frames = frames.len(), "resized animation frames");
        let bytes = gif_encode::encode(&frames, size, size, &params.gif)?;
        Ok(Encoded {
            bytes,
            mime_type: ANIMATED_MIME.to_string(),
            frames: frames.len(),
        })
    }
}
