//! High-quality resampling of raw RGBA buffers.
//!
//! Built on `fast_image_resize` (SIMD Lanczos3 convolution). Width and height
//! scale independently, so any source aspect ratio can be squeezed into a
//! square target.
//!
//! With [`ResizeOptions::alpha`] set, pixels are premultiplied before the
//! convolution and divided back afterwards. Fully transparent pixels then
//! carry no color into their opaque neighbours, which keeps dark fringes from
//! appearing around transparent emote edges.

use super::backend::ImagingError;
use super::params::ResizeOptions;
use fast_image_resize as fr;
use image::RgbaImage;

const CHANNELS: usize = 4;

/// Check that `pixels` holds exactly `width`×`height` RGBA pixels.
pub fn check_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), ImagingError> {
    if width == 0 || height == 0 {
        return Err(ImagingError::UnsupportedFormat(format!(
            "zero-sized buffer {width}x{height}"
        )));
    }
    let expected = width as usize * height as usize * CHANNELS;
    if pixels.len() != expected {
        return Err(ImagingError::UnsupportedFormat(format!(
            "buffer of {} bytes does not match {width}x{height} RGBA ({expected} bytes)",
            pixels.len()
        )));
    }
    Ok(())
}

/// Resize an RGBA buffer to `dst_width`×`dst_height`.
pub fn resample(
    pixels: &[u8],
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
    options: &ResizeOptions,
) -> Result<Vec<u8>, ImagingError> {
    check_buffer(pixels, src_width, src_height)?;
    if dst_width == 0 || dst_height == 0 {
        return Err(ImagingError::UnsupportedFormat(format!(
            "zero-sized target {dst_width}x{dst_height}"
        )));
    }

    let src_image =
        fr::images::Image::from_vec_u8(src_width, src_height, pixels.to_vec(), fr::PixelType::U8x4)
            .map_err(|e| ImagingError::UnsupportedFormat(format!("source buffer: {e}")))?;
    let mut dst_image = fr::images::Image::new(dst_width, dst_height, fr::PixelType::U8x4);

    let resize_options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3))
        .use_alpha(options.alpha);

    fr::Resizer::new()
        .resize(&src_image, &mut dst_image, Some(&resize_options))
        .map_err(|e| ImagingError::UnsupportedFormat(format!("resample failed: {e}")))?;

    let resized = dst_image.into_vec();
    match options.sharpening {
        Some(sharpening) if sharpening.is_enabled() => {
            let buffer = RgbaImage::from_raw(dst_width, dst_height, resized).ok_or_else(|| {
                ImagingError::UnsupportedFormat("resampled buffer has wrong length".into())
            })?;
            let sharpened =
                image::imageops::unsharpen(&buffer, sharpening.sigma, sharpening.threshold);
            Ok(sharpened.into_raw())
        }
        _ => Ok(resized),
    }
}
