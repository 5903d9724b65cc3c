// autolink-common/src/platform.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AutolinkError;

/// Platforms a module config may declare support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedPlatform {
    Apple,
    Ios,
    Macos,
    Tvos,
    Android,
    Web,
    Devtools,
}

/// The descriptor family a platform resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Apple,
    Android,
    DevTools,
    /// Platforms that are searched but never produce native descriptors.
    None,
}

impl SupportedPlatform {
    pub const ALL: [SupportedPlatform; 7] = [
        Self::Apple,
        Self::Ios,
        Self::Macos,
        Self::Tvos,
        Self::Android,
        Self::Web,
        Self::Devtools,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Ios => "ios",
            Self::Macos => "macos",
            Self::Tvos => "tvos",
            Self::Android => "android",
            Self::Web => "web",
            Self::Devtools => "devtools",
        }
    }

    pub fn family(&self) -> PlatformFamily {
        match self {
            Self::Apple | Self::Ios | Self::Macos | Self::Tvos => PlatformFamily::Apple,
            Self::Android => PlatformFamily::Android,
            Self::Devtools => PlatformFamily::DevTools,
            Self::Web => PlatformFamily::None,
        }
    }

    pub fn is_apple(&self) -> bool {
        self.family() == PlatformFamily::Apple
    }

    /// Whether a package declaring `declared` can be linked when resolving for `self`.
    ///
    /// `apple` accepts any Apple OS, and each Apple OS accepts the generic `apple` entry.
    pub fn is_supported_by(&self, declared: &[SupportedPlatform]) -> bool {
        match self {
            Self::Apple => declared.iter().any(SupportedPlatform::is_apple),
            Self::Ios | Self::Macos | Self::Tvos => declared
                .iter()
                .any(|p| p == self || *p == SupportedPlatform::Apple),
            _ => declared.contains(self),
        }
    }
}

impl fmt::Display for SupportedPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportedPlatform {
    type Err = AutolinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AutolinkError::UnsupportedPlatform(s.to_string()))
    }
}
