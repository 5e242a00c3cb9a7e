//! # Emote Sizer
//!
//! Resizes uploaded images into the square emote and badge sizes that
//! streaming and chat platforms require. Static images are resampled and
//! re-encoded in their own format. Animated GIFs are decoded frame by frame,
//! resized with an outline-preservation pass, and re-encoded with a single
//! global palette, keeping each frame's timing.
//!
//! # Architecture: Batch Pipeline
//!
//! ```text
//! files ──▶ SourceImage ──▶ units (image × size) ──▶ rayon pool ──▶ ResultGroup[]
//!                                  │                                   │
//!                           PlatformProfile                     folder / zip
//! ```
//!
//! A batch is all or nothing: one failing unit discards every result.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`profiles`] | Static per-platform size tables (twitch, discord, youtube) |
//! | [`types`] | Source images, produced files, result groups |
//! | [`imaging`] | Resampler, GIF decoder, frame processor, GIF encoder, backend trait |
//! | [`process`] | The batch pipeline: fan-out, failure propagation, grouping |
//! | [`naming`] | Output and archive-entry file names |
//! | [`archive`] | Bulk export of a batch as one zip |
//! | [`config`] | `config.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Imaging
//!
//! Resampling uses `fast_image_resize` (Lanczos3, optional premultiplied
//! alpha). GIF decode and encode use the `gif` crate directly so that frame
//! offsets, delays, disposal methods and the global palette stay under our
//! control; palettes are trained with NeuQuant from `color_quant`. No system
//! libraries are required.
//!
//! ## Outline Preservation
//!
//! Emote art is usually drawn with a black outline. Downscaling blends that
//! outline into near-black values that palette quantization can collapse into
//! the transparent color. After each animation frame is resized, pixels whose
//! channels are all below a small threshold are pinned to a fixed near-black
//! value, which quantizes to an opaque entry.

pub mod archive;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod profiles;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
