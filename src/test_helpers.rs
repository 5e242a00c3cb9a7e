//! Shared test utilities: synthetic images built in memory.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let png = png_bytes(64, 64, [200, 40, 40, 255]);
//! let gif = gif_bytes(8, 8, &[
//!     TestFrame::solid(8, 8, 1).delay(5),
//!     TestFrame::solid(8, 8, 2).delay(5).dispose(gif::DisposalMethod::Background),
//! ]);
//! ```

use image::{ImageFormat, RgbaImage};
use std::borrow::Cow;
use std::io::Cursor;

/// Palette shared by every test GIF: 0 = black (used as the transparent slot),
/// 1 = white, 2 = red, 3 = black.
pub const TEST_PALETTE: [u8; 12] = [0, 0, 0, 255, 255, 255, 255, 0, 0, 0, 0, 0];

/// Builder for one indexed GIF frame.
#[derive(Debug, Clone)]
pub struct TestFrame {
    pub width: u16,
    pub height: u16,
    pub left: u16,
    pub top: u16,
    pub indices: Vec<u8>,
    pub delay: u16,
    pub dispose: gif::DisposalMethod,
    pub transparent: Option<u8>,
}

impl TestFrame {
    /// A frame filled with a single palette index.
    pub fn solid(width: u16, height: u16, index: u8) -> Self {
        Self {
            width,
            height,
            left: 0,
            top: 0,
            indices: vec![index; width as usize * height as usize],
            delay: 10,
            dispose: gif::DisposalMethod::Keep,
            transparent: None,
        }
    }

    pub fn delay(mut self, centiseconds: u16) -> Self {
        self.delay = centiseconds;
        self
    }

    pub fn at(mut self, left: u16, top: u16) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn dispose(mut self, method: gif::DisposalMethod) -> Self {
        self.dispose = method;
        self
    }

    pub fn transparent(mut self, index: u8) -> Self {
        self.transparent = Some(index);
        self
    }
}

/// Encode frames into a looping GIF with [`TEST_PALETTE`] as global palette.
pub fn gif_bytes(width: u16, height: u16, frames: &[TestFrame]) -> Vec<u8> {
    let mut encoder = gif::Encoder::new(Vec::new(), width, height, &TEST_PALETTE).unwrap();
    encoder.set_repeat(gif::Repeat::Infinite).unwrap();
    for f in frames {
        let frame = gif::Frame {
            width: f.width,
            height: f.height,
            left: f.left,
            top: f.top,
            delay: f.delay,
            dispose: f.dispose,
            transparent: f.transparent,
            buffer: Cow::Borrowed(&f.indices),
            ..Default::default()
        };
        encoder.write_frame(&frame).unwrap();
    }
    encoder.into_inner().unwrap()
}

/// A solid-color RGBA image encoded in `format`.
pub fn encoded_bytes(width: u32, height: u32, rgba: [u8; 4], format: ImageFormat) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let dynamic = match format {
        ImageFormat::Jpeg => image::DynamicImage::ImageRgb8(image::DynamicImage::from(img).to_rgb8()),
        _ => image::DynamicImage::from(img),
    };
    let mut out = Vec::new();
    dynamic.write_to(&mut Cursor::new(&mut out), format).unwrap();
    out
}

/// A solid-color PNG.
pub fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encoded_bytes(width, height, rgba, ImageFormat::Png)
}

/// Decode any still image produced by the pipeline back to RGBA.
pub fn decode_rgba(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}
