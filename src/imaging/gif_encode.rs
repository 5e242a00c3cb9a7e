//! Animated GIF encoding with a single global palette.
//!
//! All frames share one 256-entry palette: 255 colors trained with NeuQuant
//! (`color_quant`) on the opaque pixels of every frame, plus one reserved slot
//! marked as the transparent index. Per-frame palettes are never written, so
//! colors cannot flash between frames and file size stays bounded.
//!
//! Palette training and per-frame index mapping run on the rayon pool; the
//! caller only ever sees the finished byte stream or an
//! [`ImagingError::EncodingFailed`].

use super::backend::ImagingError;
use super::frame::Disposal;
use super::params::{GifParams, LoopCount};
use super::resample::check_buffer;
use color_quant::NeuQuant;
use rayon::prelude::*;
use std::borrow::Cow;
use tracing::debug;

/// Number of palette entries trained from image content.
const TRAINED_COLORS: usize = 255;

/// Palette slot reserved for transparency.
pub const TRANSPARENT_INDEX: u8 = 255;

/// One output frame: `width * height` RGBA pixels plus timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeFrame {
    pub pixels: Vec<u8>,
    pub delay_centiseconds: u16,
    pub disposal: Disposal,
}

fn failed(context: &str, e: impl std::fmt::Display) -> ImagingError {
    ImagingError::EncodingFailed(format!("{context}: {e}"))
}

/// Encode frames of identical `width`×`height` into an animated GIF.
#[tracing::instrument(level = "debug", skip(frames, params), fields(frames = frames.len()))]
pub fn encode(
    frames: &[EncodeFrame],
    width: u32,
    height: u32,
    params: &GifParams,
) -> Result<Vec<u8>, ImagingError> {
    if frames.is_empty() {
        return Err(ImagingError::EncodingFailed("no frames to encode".into()));
    }
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(ImagingError::EncodingFailed(format!(
                "{width}x{height} exceeds GIF maximum (65535x65535)"
            )));
        }
    };
    for frame in frames {
        check_buffer(&frame.pixels, width, height)
            .map_err(|e| ImagingError::EncodingFailed(e.to_string()))?;
    }

    let quantizer = train_palette(frames, params);
    let palette = global_palette(&quantizer);

    let indexed: Vec<Vec<u8>> = frames
        .par_iter()
        .map(|f| map_to_palette(&f.pixels, &quantizer, params.alpha_cutoff))
        .collect();

    let mut encoder =
        gif::Encoder::new(Vec::new(), w, h, &palette).map_err(|e| failed("header", e))?;
    let repeat = match params.repeat {
        LoopCount::Infinite => gif::Repeat::Infinite,
        LoopCount::Finite(n) => gif::Repeat::Finite(n),
    };
    encoder
        .set_repeat(repeat)
        .map_err(|e| failed("loop extension", e))?;

    for (frame, indices) in frames.iter().zip(&indexed) {
        let out = gif::Frame {
            width: w,
            height: h,
            delay: frame.delay_centiseconds,
            dispose: frame.disposal.into(),
            transparent: Some(TRANSPARENT_INDEX),
            buffer: Cow::Borrowed(indices.as_slice()),
            ..Default::default()
        };
        encoder.write_frame(&out).map_err(|e| failed("frame", e))?;
    }

    let bytes = encoder.into_inner().map_err(|e| failed("trailer", e))?;
    debug!(bytes = bytes.len(), "encoded animation");
    Ok(bytes)
}

/// Train NeuQuant on the opaque pixels of every frame.
fn train_palette(frames: &[EncodeFrame], params: &GifParams) -> NeuQuant {
    let mut samples: Vec<u8> = frames
        .par_iter()
        .flat_map_iter(|f| {
            f.pixels
                .chunks_exact(4)
                .filter(|px| px[3] >= params.alpha_cutoff)
                .flat_map(|px| [px[0], px[1], px[2], 255])
        })
        .collect();
    if samples.is_empty() {
        // Fully transparent animation: any palette will do.
        samples.extend_from_slice(&[0, 0, 0, 255]);
    }
    NeuQuant::new(params.sample_factor, TRAINED_COLORS, &samples)
}

/// Trained colors followed by the transparent slot, 256 × RGB.
fn global_palette(quantizer: &NeuQuant) -> Vec<u8> {
    let mut palette = quantizer.color_map_rgb();
    palette.resize(TRAINED_COLORS * 3, 0);
    palette.extend_from_slice(&[0, 0, 0]);
    palette
}

fn map_to_palette(pixels: &[u8], quantizer: &NeuQuant, alpha_cutoff: u8) -> Vec<u8> {
    pixels
        .chunks_exact(4)
        .map(|px| {
            if px[3] < alpha_cutoff {
                TRANSPARENT_INDEX
            } else {
                quantizer.index_of(&[px[0], px[1], px[2], 255]) as u8
            }
        })
        .collect()
}
