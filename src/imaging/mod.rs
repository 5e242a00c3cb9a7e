//! Image processing: pure Rust, no system libraries.
//!
//! | Operation | Module |
//! |---|---|
//! | **Resample** RGBA buffers | [`resample`] (`fast_image_resize`, Lanczos3) |
//! | **Decode** animated GIF into frames | [`gif_decode`] |
//! | **Process** one frame (resize + outline pass) | [`frame`] |
//! | **Encode** frames with a global palette | [`gif_encode`] |
//! | **Backend** dispatch for still and animated units | [`backend`], [`rust_backend`] |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Primitives**: resampler, frame processor, GIF codec
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod frame;
pub mod gif_decode;
pub mod gif_encode;
mod params;
pub mod resample;
pub mod rust_backend;

pub use backend::{Encoded, ImageBackend, ImagingError};
pub use frame::{Disposal, Frame};
pub use params::{GifParams, LoopCount, OutlineParams, ResizeOptions, Sharpening, UnitParams};
pub use rust_backend::RustBackend;
