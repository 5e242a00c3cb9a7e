//! Batch resizing pipeline.
//!
//! Takes a set of uploaded images and a platform identifier and produces every
//! size the platform needs, grouped by role.
//!
//! ## Units of work
//!
//! One unit is one `(image, role, size)` triple. A batch of `N` images on a
//! platform with `E` emote sizes and `B` badge sizes is `N × (E + B)` units.
//! Units are independent: each one decodes its own source, owns its own
//! buffers, and produces exactly one [`ProcessedFile`].
//!
//! ## Output
//!
//! ```text
//! Emotes
//!     pog_28x28.png    pog_56x56.png    pog_112x112.png    kek_28x28.gif ...
//! Badges
//!     pog_18x18.png    pog_36x36.png    pog_72x72.png      kek_18x18.gif ...
//! ```
//!
//! Groups are ordered emotes then badges. Inside a group files follow input
//! order, then ascending size. A role with no files gets no group.
//!
//! ## Failure
//!
//! The batch is all or nothing. If any unit fails, [`run`] returns the error
//! and no groups at all; partial results are discarded.
//!
//! ## Parallel Processing
//!
//! Units run on the global rayon pool (see `config::effective_threads`).
//! Progress is reported through an optional channel as units finish, so
//! events for different images interleave.

use crate::config::ResizerConfig;
use crate::imaging::{ImageBackend, ImagingError, RustBackend, UnitParams};
use crate::naming::output_file_name;
use crate::profiles::{self, Role, SizeSpec, UnknownPlatform};
use crate::types::{ProcessedFile, ResultGroup, SourceImage, SourceKind};
use rayon::prelude::*;
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    UnknownPlatform(#[from] UnknownPlatform),
    #[error("{file}: {source}")]
    Unit { file: String, source: ImagingError },
}

/// Coarse classification of a batch failure, for callers that only need to
/// pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownPlatform,
    UnsupportedFormat,
    MalformedAnimation,
    EncodingFailed,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::UnknownPlatform(_) => ErrorKind::UnknownPlatform,
            PipelineError::Unit { source, .. } => match source {
                ImagingError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
                ImagingError::MalformedAnimation(_) => ErrorKind::MalformedAnimation,
                ImagingError::EncodingFailed(_) => ErrorKind::EncodingFailed,
            },
        }
    }
}

/// Progress events emitted while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    /// Emitted once per input before any unit starts.
    ImageStarted {
        /// 1-based position in the batch.
        index: usize,
        file: String,
        kind: &'static str,
        unit_count: usize,
    },
    /// Emitted when one unit has been encoded.
    UnitProcessed {
        file: String,
        role: Role,
        size: u32,
        name: String,
        bytes: usize,
        frames: usize,
    },
}

/// Configuration for a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessConfig {
    pub params: UnitParams,
}

impl ProcessConfig {
    /// Build a ProcessConfig from ResizerConfig values.
    pub fn from_resizer_config(config: &ResizerConfig) -> Self {
        Self {
            params: config.unit_params(),
        }
    }
}

/// Resize every source for `platform_id` using the pure Rust backend.
pub fn run(
    sources: &[SourceImage],
    platform_id: &str,
    config: &ProcessConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<Vec<ResultGroup>, PipelineError> {
    run_with_backend(&RustBackend::new(), sources, platform_id, config, progress)
}

/// Resize every source using a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    sources: &[SourceImage],
    platform_id: &str,
    config: &ProcessConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<Vec<ResultGroup>, PipelineError> {
    let profile = profiles::resolve(platform_id)?;
    info!(
        platform = platform_id,
        images = sources.len(),
        units = sources.len() * profile.unit_count(),
        "starting batch"
    );

    if let Some(tx) = &progress {
        for (i, source) in sources.iter().enumerate() {
            tx.send(ProcessEvent::ImageStarted {
                index: i + 1,
                file: source.name.clone(),
                kind: source.kind.label(),
                unit_count: profile.unit_count(),
            })
            .ok();
        }
    }

    let units: Vec<(&SourceImage, Role, SizeSpec)> = sources
        .iter()
        .flat_map(|source| profile.entries().map(move |(role, spec)| (source, role, spec)))
        .collect();

    // Collecting into a Result keeps unit order and stops at the first error.
    let processed: Vec<(Role, ProcessedFile)> = units
        .par_iter()
        .map(|&(source, role, spec)| {
            let file = process_unit(backend, source, spec, &config.params).map_err(|e| {
                PipelineError::Unit {
                    file: source.name.clone(),
                    source: e,
                }
            })?;
            if let Some(tx) = &progress {
                tx.send(ProcessEvent::UnitProcessed {
                    file: source.name.clone(),
                    role,
                    size: file.size,
                    name: file.name.clone(),
                    bytes: file.bytes.len(),
                    frames: file.frames,
                })
                .ok();
            }
            Ok((role, file))
        })
        .collect::<Result<_, PipelineError>>()?;

    Ok(group_by_role(processed))
}

fn process_unit(
    backend: &impl ImageBackend,
    source: &SourceImage,
    spec: SizeSpec,
    params: &UnitParams,
) -> Result<ProcessedFile, ImagingError> {
    let size = spec.target_size;
    let encoded = match source.kind {
        SourceKind::Static(format) => backend.resize_still(source, format, size, params)?,
        SourceKind::Animated => backend.resize_animation(source, size, params)?,
    };
    let name = output_file_name(&source.name, size, &encoded.mime_type);
    debug!(file = %source.name, %name, bytes = encoded.bytes.len(), "unit done");
    Ok(ProcessedFile {
        name,
        mime_type: encoded.mime_type,
        size,
        frames: encoded.frames,
        bytes: encoded.bytes,
    })
}

fn group_by_role(processed: Vec<(Role, ProcessedFile)>) -> Vec<ResultGroup> {
    let mut groups: Vec<ResultGroup> = Role::ALL
        .into_iter()
        .map(|role| ResultGroup {
            role,
            files: Vec::new(),
        })
        .collect();
    for (role, file) in processed {
        if let Some(group) = groups.iter_mut().find(|g| g.role == role) {
            group.files.push(file);
        }
    }
    groups.retain(|g| !g.files.is_empty());
    groups
}
