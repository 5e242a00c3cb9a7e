//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are built from
//! [`ResizerConfig`](crate::config::ResizerConfig) by the pipeline and handed to
//! the [`backend`](super::backend), which does the pixel work.
//!
//! ## Types
//!
//! - [`Sharpening`]: Unsharp-mask parameters (sigma + threshold). Zero sigma disables it.
//! - [`ResizeOptions`]: Alpha handling and optional sharpening for one resample.
//! - [`OutlineParams`]: Darkness threshold and replacement value for the outline pass.
//! - [`GifParams`]: Palette sampling, transparency cutoff and loop count for GIF output.
//! - [`UnitParams`]: Everything one (image, size) unit needs.

/// Sharpening parameters for unsharp mask.
///
/// - `sigma`: Standard deviation of the Gaussian blur (higher = more sharpening)
/// - `threshold`: Minimum brightness difference to sharpen (0 = sharpen all pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sharpening {
    pub sigma: f32,
    pub threshold: i32,
}

impl Sharpening {
    /// Whether applying this mask would change any pixel.
    pub fn is_enabled(self) -> bool {
        self.sigma > 0.0
    }
}

/// Options for one call to [`resample`](super::resample::resample).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeOptions {
    /// Resample in premultiplied alpha so fully transparent pixels contribute
    /// no color to their neighbours.
    pub alpha: bool,
    pub sharpening: Option<Sharpening>,
}

impl ResizeOptions {
    /// Settings used for every animation frame: alpha-aware, no sharpening.
    /// Sharpening halos around dark outlines are very visible at emote sizes.
    pub fn frame_accurate() -> Self {
        Self {
            alpha: true,
            sharpening: None,
        }
    }
}

/// Outline preservation: pixels whose R, G and B are all below
/// `darkness_threshold` are repainted with `replacement` on all three channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineParams {
    pub darkness_threshold: u16,
    pub replacement: u8,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            darkness_threshold: 10,
            replacement: 5,
        }
    }
}

/// How many times an encoded animation plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    Infinite,
    Finite(u16),
}

/// GIF output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GifParams {
    /// NeuQuant sampling factor: 1 examines every pixel, 30 is fastest.
    pub sample_factor: i32,
    /// Output alpha below this value maps to the transparent palette index.
    pub alpha_cutoff: u8,
    pub repeat: LoopCount,
}

impl Default for GifParams {
    fn default() -> Self {
        Self {
            sample_factor: 10,
            alpha_cutoff: 128,
            repeat: LoopCount::Infinite,
        }
    }
}

/// Everything one (image, size) unit needs besides the source and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UnitParams {
    /// Resampling options for the static path. The animated path always uses
    /// [`ResizeOptions::frame_accurate`].
    pub still: ResizeOptions,
    pub outline: OutlineParams,
    pub gif: GifParams,
}
