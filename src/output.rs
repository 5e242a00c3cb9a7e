//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Progress
//!
//! ```text
//! 001 pog.png (static, 6 sizes)
//! 002 kek.gif (animated, 6 sizes)
//!     emote 28px → pog_28x28.png (1.2 KB)
//!     emote 28px → kek_28x28.gif (14.8 KB, 12 frames)
//! ```
//!
//! ## Results
//!
//! ```text
//! Emotes
//!     pog_28x28.png      28x28  1.2 KB
//!     pog_56x56.png      56x56  3.9 KB
//! Badges
//!     pog_18x18.png      18x18  0.7 KB
//!
//! Preview: emote pog_56x56.png, badge pog_18x18.png
//! ```
//!
//! ## Platforms
//!
//! ```text
//! twitch
//!     Emotes: 28, 56, 112 (ceiling 100px)
//!     Badges: 18, 36, 72 (ceiling 25px)
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::process::ProcessEvent;
use crate::profiles::{Platform, Role, SizeSpec};
use crate::types::{ResultGroup, last_of};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Human-readable byte count in KB with one decimal.
fn format_kb(bytes: usize) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

// ============================================================================
// Progress
// ============================================================================

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::ImageStarted {
            index,
            file,
            kind,
            unit_count,
        } => vec![format!(
            "{} {} ({}, {} sizes)",
            format_index(*index),
            file,
            kind,
            unit_count
        )],
        ProcessEvent::UnitProcessed {
            role,
            size,
            name,
            bytes,
            frames,
            ..
        } => {
            let detail = if *frames > 1 {
                format!("{}, {} frames", format_kb(*bytes), frames)
            } else {
                format_kb(*bytes)
            };
            vec![format!("    {} {}px → {} ({})", role, size, name, detail)]
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Format the finished batch: one section per group, then the preview line.
pub fn format_results(groups: &[ResultGroup]) -> Vec<String> {
    let mut lines = Vec::new();
    if groups.is_empty() {
        lines.push("No images produced".to_string());
        return lines;
    }

    for group in groups {
        lines.push(group.role.heading().to_string());
        for file in &group.files {
            lines.push(format!(
                "    {:<18} {:>7}  {}",
                file.name,
                format!("{}x{}", file.size, file.size),
                format_kb(file.bytes.len())
            ));
        }
    }

    let preview: Vec<String> = Role::ALL
        .into_iter()
        .filter_map(|role| last_of(groups, role).map(|f| format!("{} {}", role, f.name)))
        .collect();
    lines.push(String::new());
    lines.push(format!("Preview: {}", preview.join(", ")));
    lines
}

pub fn print_results(groups: &[ResultGroup]) {
    for line in format_results(groups) {
        println!("{}", line);
    }
}

// ============================================================================
// Platforms
// ============================================================================

fn size_line(heading: &str, specs: &[SizeSpec]) -> String {
    let sizes: Vec<String> = specs.iter().map(|s| s.target_size.to_string()).collect();
    let max = specs.iter().map(|s| s.max_allowed_size).max().unwrap_or(0);
    format!("    {}: {} (ceiling {}px)", heading, sizes.join(", "), max)
}

/// Format every supported platform with its size table.
pub fn format_platforms() -> Vec<String> {
    let mut lines = Vec::new();
    for platform in Platform::ALL {
        let profile = platform.profile();
        lines.push(platform.id().to_string());
        for role in Role::ALL {
            lines.push(size_line(role.heading(), profile.sizes(role)));
        }
    }
    lines
}

pub fn print_platforms() {
    for line in format_platforms() {
        println!("{}", line);
    }
}
