//! Resizer configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user file, which only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! `config.toml` in the working directory, or any file passed with `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! platform = "twitch"             # Platform used when --platform is omitted
//! archive_name = "resized_img.zip"
//!
//! [outline]
//! darkness_threshold = 10         # R, G and B all below this count as outline
//! replacement = 5                 # Value written to R, G and B of outline pixels
//!
//! [gif]
//! sample_factor = 10              # NeuQuant sampling (1 = best, 30 = fastest)
//! alpha_cutoff = 128              # Alpha below this becomes the transparent color
//! loop_count = 0                  # 0 = loop forever
//!
//! [static_images]
//! alpha = false                   # Alpha-aware resampling for still images
//! sharpen_sigma = 0.0             # Unsharp mask strength (0 = off)
//! sharpen_threshold = 0
//!
//! [processing]
//! max_processes = 4               # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::archive::DEFAULT_ARCHIVE_NAME;
use crate::imaging::{GifParams, LoopCount, OutlineParams, ResizeOptions, Sharpening, UnitParams};
use crate::profiles::Platform;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resizer configuration loaded from `config.toml`.
///
/// All fields have defaults; a missing file means stock behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizerConfig {
    /// Platform used when none is given on the command line.
    pub platform: String,
    /// File name of the bulk-export archive.
    pub archive_name: String,
    pub outline: OutlineConfig,
    pub gif: GifConfig,
    pub static_images: StaticImagesConfig,
    pub processing: ProcessingConfig,
}

impl Default for ResizerConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Twitch.id().to_string(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            outline: OutlineConfig::default(),
            gif: GifConfig::default(),
            static_images: StaticImagesConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl ResizerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.platform.parse::<Platform>().is_err() {
            return Err(ConfigError::Validation(format!(
                "platform must be one of twitch, discord, youtube (got {:?})",
                self.platform
            )));
        }
        if self.archive_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "archive_name must not be empty".into(),
            ));
        }
        if self.outline.darkness_threshold > 256 {
            return Err(ConfigError::Validation(
                "outline.darkness_threshold must be 0-256".into(),
            ));
        }
        if self.outline.replacement > 255 {
            return Err(ConfigError::Validation(
                "outline.replacement must be 0-255".into(),
            ));
        }
        if !(1..=30).contains(&self.gif.sample_factor) {
            return Err(ConfigError::Validation(
                "gif.sample_factor must be 1-30".into(),
            ));
        }
        if self.gif.alpha_cutoff > 255 {
            return Err(ConfigError::Validation(
                "gif.alpha_cutoff must be 0-255".into(),
            ));
        }
        if self.static_images.sharpen_sigma < 0.0 {
            return Err(ConfigError::Validation(
                "static_images.sharpen_sigma must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Per-unit image parameters. Call on a validated config.
    pub fn unit_params(&self) -> UnitParams {
        let sharpening = Sharpening {
            sigma: self.static_images.sharpen_sigma,
            threshold: self.static_images.sharpen_threshold,
        };
        UnitParams {
            still: ResizeOptions {
                alpha: self.static_images.alpha,
                sharpening: sharpening.is_enabled().then_some(sharpening),
            },
            outline: OutlineParams {
                darkness_threshold: self.outline.darkness_threshold,
                replacement: self.outline.replacement.min(255) as u8,
            },
            gif: GifParams {
                sample_factor: self.gif.sample_factor,
                alpha_cutoff: self.gif.alpha_cutoff.min(255) as u8,
                repeat: match self.gif.loop_count {
                    0 => LoopCount::Infinite,
                    n => LoopCount::Finite(n),
                },
            },
        }
    }
}

/// Outline preservation settings for animation frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlineConfig {
    /// Pixels with R, G and B all below this value are treated as outline.
    pub darkness_threshold: u16,
    /// Value written to R, G and B of outline pixels.
    pub replacement: u16,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        let params = OutlineParams::default();
        Self {
            darkness_threshold: params.darkness_threshold,
            replacement: params.replacement as u16,
        }
    }
}

/// Animated GIF output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GifConfig {
    /// NeuQuant sampling factor (1 = every pixel, 30 = fastest).
    pub sample_factor: i32,
    /// Output alpha below this value becomes the transparent color.
    pub alpha_cutoff: u16,
    /// Number of loops; 0 loops forever.
    pub loop_count: u16,
}

impl Default for GifConfig {
    fn default() -> Self {
        let params = GifParams::default();
        Self {
            sample_factor: params.sample_factor,
            alpha_cutoff: params.alpha_cutoff as u16,
            loop_count: 0,
        }
    }
}

/// Still-image resampling settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticImagesConfig {
    /// Premultiply alpha while resampling.
    pub alpha: bool,
    /// Unsharp mask sigma; 0 disables sharpening.
    pub sharpen_sigma: f32,
    /// Minimum brightness difference to sharpen.
    pub sharpen_threshold: i32,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ResizerConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ResizerConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ResizerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `config.toml` from the given directory, falling back to defaults.
pub fn load_config(root: &Path) -> Result<ResizerConfig, ConfigError> {
    load_config_file(&root.join("config.toml"))
}

/// Load a specific config file, falling back to defaults if it is absent.
pub fn load_config_file(path: &Path) -> Result<ResizerConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Emote Sizer Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Platform used when --platform is not given: twitch, discord or youtube.
platform = "twitch"

# File name of the archive written by `resize --zip`.
archive_name = "resized_img.zip"

# ---------------------------------------------------------------------------
# Outline preservation (animated images)
# ---------------------------------------------------------------------------
[outline]
# After resizing, pixels whose red, green and blue are all below this value
# are treated as part of a dark outline.
darkness_threshold = 10

# Outline pixels get this value on red, green and blue. Near-black rather
# than black so it is never mistaken for a transparency key.
replacement = 5

# ---------------------------------------------------------------------------
# Animated GIF output
# ---------------------------------------------------------------------------
[gif]
# Palette quality: 1 samples every pixel, 30 is fastest.
sample_factor = 10

# Pixels with alpha below this value become the transparent color.
alpha_cutoff = 128

# How many times the animation plays. 0 loops forever.
loop_count = 0

# ---------------------------------------------------------------------------
# Still images
# ---------------------------------------------------------------------------
[static_images]
# Premultiply alpha while resampling (avoids dark fringes on transparent edges).
alpha = false

# Unsharp mask applied after resizing. 0 disables it.
sharpen_sigma = 0.0
sharpen_threshold = 0

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-processing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
