//! Animated GIF decoding into independent RGBA frames.
//!
//! Every frame is fully decompressed up front, palette-expanded to RGBA by the
//! `gif` crate, and returned with its sub-rectangle placement, delay and
//! disposal method exactly as stored in the stream.

use super::backend::ImagingError;
use super::frame::Frame;
use tracing::debug;

/// Logical screen size plus the decoded frames, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<Frame>,
}

fn malformed(e: gif::DecodingError) -> ImagingError {
    ImagingError::MalformedAnimation(e.to_string())
}

/// Decode every frame of a GIF byte stream.
#[tracing::instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> Result<Animation, ImagingError> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(bytes).map_err(malformed)?;

    let width = decoder.width() as u32;
    let height = decoder.height() as u32;
    let mut frames = Vec::new();

    while let Some(frame) = decoder.read_next_frame().map_err(malformed)? {
        frames.push(Frame {
            pixels: frame.buffer.to_vec(),
            width: frame.width as u32,
            height: frame.height as u32,
            x_offset: frame.left as u32,
            y_offset: frame.top as u32,
            delay_centiseconds: frame.delay,
            disposal: frame.dispose.into(),
        });
    }

    if frames.is_empty() {
        return Err(ImagingError::MalformedAnimation(
            "stream contains no frames".into(),
        ));
    }

    debug!(width, height, frames = frames.len(), "decoded animation");
    Ok(Animation {
        width,
        height,
        frames,
    })
}
