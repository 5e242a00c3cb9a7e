//! Platform size profiles.
//!
//! Every destination platform defines an ordered list of square target sizes
//! for each [`Role`]. The table is static and cannot be changed at runtime:
//!
//! | Platform | Role  | Target sizes (px) | Upload ceiling (px) |
//! |----------|-------|-------------------|---------------------|
//! | twitch   | emote | 28, 56, 112       | 100                 |
//! | twitch   | badge | 18, 36, 72        | 25                  |
//! | discord  | emote | 128               | 256                 |
//! | discord  | badge | 64                | 256                 |
//! | youtube  | emote | 32                | 1000                |
//! | youtube  | badge | 32                | 1000                |
//!
//! The upload ceiling ([`SizeSpec::max_allowed_size`]) is informational only;
//! nothing in the resize step enforces it.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown platform: {0:?} (expected one of: twitch, discord, youtube)")]
pub struct UnknownPlatform(pub String);

/// A destination platform with a known size profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitch,
    Discord,
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Twitch, Platform::Discord, Platform::Youtube];

    pub fn id(self) -> &'static str {
        match self {
            Platform::Twitch => "twitch",
            Platform::Discord => "discord",
            Platform::Youtube => "youtube",
        }
    }

    pub fn profile(self) -> &'static PlatformProfile {
        match self {
            Platform::Twitch => &TWITCH,
            Platform::Discord => &DISCORD,
            Platform::Youtube => &YOUTUBE,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// What an output image is used for on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Emote,
    Badge,
}

impl Role {
    /// Roles in the order result groups are reported.
    pub const ALL: [Role; 2] = [Role::Emote, Role::Badge];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Emote => "emote",
            Role::Badge => "badge",
        }
    }

    /// Plural heading used when listing a group.
    pub fn heading(self) -> &'static str {
        match self {
            Role::Emote => "Emotes",
            Role::Badge => "Badges",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One square target size plus the platform's upload ceiling for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeSpec {
    pub target_size: u32,
    pub max_allowed_size: u32,
}

impl SizeSpec {
    pub const fn new(target_size: u32, max_allowed_size: u32) -> Self {
        Self {
            target_size,
            max_allowed_size,
        }
    }
}

/// Every size a platform needs, grouped by role and ordered smallest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformProfile {
    pub emotes: &'static [SizeSpec],
    pub badges: &'static [SizeSpec],
}

impl PlatformProfile {
    pub fn sizes(&self, role: Role) -> &'static [SizeSpec] {
        match role {
            Role::Emote => self.emotes,
            Role::Badge => self.badges,
        }
    }

    /// All `(role, size)` pairs in reporting order: emotes, then badges.
    pub fn entries(&self) -> impl Iterator<Item = (Role, SizeSpec)> + '_ {
        Role::ALL
            .into_iter()
            .flat_map(move |role| self.sizes(role).iter().map(move |s| (role, *s)))
    }

    pub fn unit_count(&self) -> usize {
        self.emotes.len() + self.badges.len()
    }
}

static TWITCH: PlatformProfile = PlatformProfile {
    emotes: &[
        SizeSpec::new(28, 100),
        SizeSpec::new(56, 100),
        SizeSpec::new(112, 100),
    ],
    badges: &[
        SizeSpec::new(18, 25),
        SizeSpec::new(36, 25),
        SizeSpec::new(72, 25),
    ],
};

static DISCORD: PlatformProfile = PlatformProfile {
    emotes: &[SizeSpec::new(128, 256)],
    badges: &[SizeSpec::new(64, 256)],
};

static YOUTUBE: PlatformProfile = PlatformProfile {
    emotes: &[SizeSpec::new(32, 1000)],
    badges: &[SizeSpec::new(32, 1000)],
};

/// Look up the size profile for a platform identifier.
///
/// Only `twitch`, `discord` and `youtube` are recognised. Any other identifier
/// is a caller bug, since every front end offers just those three.
pub fn resolve(platform_id: &str) -> Result<&'static PlatformProfile, UnknownPlatform> {
    platform_id.parse::<Platform>().map(Platform::profile)
}
