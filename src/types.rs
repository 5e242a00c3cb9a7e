//! Shared types flowing through the batch pipeline.
//!
//! A [`SourceImage`] is classified once, at ingest, into a [`SourceKind`].
//! The pipeline never looks at the MIME string again after that.

use crate::profiles::Role;
use image::ImageFormat;
use serde::Serialize;

/// MIME type of the only animated format the pipeline understands.
pub const ANIMATED_MIME: &str = "image/gif";

/// Which code path an input takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Single-frame image, re-encoded in its own format.
    Static(ImageFormat),
    /// Animated GIF, decoded frame by frame and re-encoded as GIF.
    Animated,
}

impl SourceKind {
    /// Classify a declared MIME type, sniffing `bytes` when the MIME type is
    /// not one `image` knows (`image/jpg`, `application/octet-stream`).
    ///
    /// Only when sniffing also fails does the static path fall back to PNG;
    /// the decoder then reports `UnsupportedFormat` if the bytes disagree.
    pub fn classify(mime: &str, bytes: &[u8]) -> Self {
        if mime.eq_ignore_ascii_case(ANIMATED_MIME) {
            return SourceKind::Animated;
        }
        let format = ImageFormat::from_mime_type(mime)
            .or_else(|| image::guess_format(bytes).ok())
            .unwrap_or(ImageFormat::Png);
        match format {
            ImageFormat::Gif => SourceKind::Animated,
            other => SourceKind::Static(other),
        }
    }

    pub fn is_animated(self) -> bool {
        matches!(self, SourceKind::Animated)
    }

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Static(_) => "static",
            SourceKind::Animated => "animated",
        }
    }
}

/// An input file as handed over by the caller.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub kind: SourceKind,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime_type = mime_type.into();
        let kind = SourceKind::classify(&mime_type, &bytes);
        Self {
            name: name.into(),
            mime_type,
            bytes,
            kind,
        }
    }
}

/// A resized image or re-encoded animation, ready to save or preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedFile {
    pub name: String,
    pub mime_type: String,
    /// Square edge length in pixels.
    pub size: u32,
    /// Number of frames encoded (1 for static images).
    pub frames: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Accumulated outputs for one role across a whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultGroup {
    pub role: Role,
    pub files: Vec<ProcessedFile>,
}

/// The most recent file of a role, used for the chat-line preview.
pub fn last_of(groups: &[ResultGroup], role: Role) -> Option<&ProcessedFile> {
    groups
        .iter()
        .filter(|g| g.role == role)
        .flat_map(|g| g.files.iter())
        .last()
}
