// autolink-common/src/model/options.rs
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AutolinkError;
use crate::platform::SupportedPlatform;

/// Options from the `expo.autolinking` key of the project manifest. Each
/// platform may nest its own block which is layered over the root one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutolinkingOptions {
    #[serde(default)]
    pub search_paths: Option<Vec<String>>,
    #[serde(default)]
    pub ignore_paths: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub flags: Option<Map<String, Value>>,
    #[serde(default)]
    pub native_modules_dir: Option<String>,
    #[serde(default)]
    pub apple: Option<Box<AutolinkingOptions>>,
    #[serde(default)]
    pub ios: Option<Box<AutolinkingOptions>>,
    #[serde(default)]
    pub macos: Option<Box<AutolinkingOptions>>,
    #[serde(default)]
    pub tvos: Option<Box<AutolinkingOptions>>,
    #[serde(default)]
    pub android: Option<Box<AutolinkingOptions>>,
    #[serde(default)]
    pub web: Option<Box<AutolinkingOptions>>,
    #[serde(default)]
    pub devtools: Option<Box<AutolinkingOptions>>,
}

impl AutolinkingOptions {
    /// The nested block for `platform`. `apple` falls back to the legacy `ios` block.
    pub fn platform_block(&self, platform: SupportedPlatform) -> Option<&AutolinkingOptions> {
        let block = match platform {
            SupportedPlatform::Apple => self.apple.as_ref().or(self.ios.as_ref()),
            SupportedPlatform::Ios => self.ios.as_ref(),
            SupportedPlatform::Macos => self.macos.as_ref(),
            SupportedPlatform::Tvos => self.tvos.as_ref(),
            SupportedPlatform::Android => self.android.as_ref(),
            SupportedPlatform::Web => self.web.as_ref(),
            SupportedPlatform::Devtools => self.devtools.as_ref(),
        };
        block.map(|b| b.as_ref())
    }

    /// Root options with the platform block's fields laid on top, key by key.
    pub fn layered_for(&self, platform: SupportedPlatform) -> AutolinkingOptions {
        let mut merged = AutolinkingOptions {
            search_paths: self.search_paths.clone(),
            ignore_paths: self.ignore_paths.clone(),
            exclude: self.exclude.clone(),
            flags: self.flags.clone(),
            native_modules_dir: self.native_modules_dir.clone(),
            ..Default::default()
        };
        if let Some(block) = self.platform_block(platform) {
            if block.search_paths.is_some() {
                merged.search_paths = block.search_paths.clone();
            }
            if block.ignore_paths.is_some() {
                merged.ignore_paths = block.ignore_paths.clone();
            }
            if block.exclude.is_some() {
                merged.exclude = block.exclude.clone();
            }
            if block.flags.is_some() {
                merged.flags = block.flags.clone();
            }
            if block.native_modules_dir.is_some() {
                merged.native_modules_dir = block.native_modules_dir.clone();
            }
        }
        merged
    }
}

/// How the canonical revision is chosen when several packages claim one module name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fewest nested `node_modules` levels, then lexicographic path.
    #[default]
    Shallowest,
    /// First occurrence in search-path order.
    FirstFound,
    /// Versions satisfying the project's declared range first, then `Shallowest`.
    ProjectRange,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shallowest => "shallowest",
            Self::FirstFound => "first-found",
            Self::ProjectRange => "project-range",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = AutolinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shallowest" => Ok(Self::Shallowest),
            "first-found" => Ok(Self::FirstFound),
            "project-range" => Ok(Self::ProjectRange),
            other => Err(AutolinkError::Config(format!(
                "unknown duplicate policy '{other}' (expected shallowest, first-found or project-range)"
            ))),
        }
    }
}

/// A fully merged resolution request. Paths are absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub search_paths: Vec<PathBuf>,
    pub ignore_paths: Vec<String>,
    pub exclude: Vec<String>,
    pub platform: SupportedPlatform,
    pub silent: bool,
    pub native_modules_dir: Option<PathBuf>,
    pub project_root: PathBuf,
    pub only_project_deps: bool,
    pub flags: Map<String, Value>,
    pub policy: DuplicatePolicy,
}

impl SearchOptions {
    pub fn new(project_root: impl Into<PathBuf>, platform: SupportedPlatform) -> Self {
        Self {
            search_paths: Vec::new(),
            ignore_paths: Vec::new(),
            exclude: Vec::new(),
            platform,
            silent: false,
            native_modules_dir: None,
            project_root: project_root.into(),
            only_project_deps: true,
            flags: Map::new(),
            policy: DuplicatePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOptions {
    pub search: SearchOptions,
    /// Answer with the serialized resolve document instead of descriptors.
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub resolve: ResolveOptions,
    pub target: PathBuf,
    pub namespace: Option<String>,
    /// Write a valid provider with no entries, without scanning.
    pub empty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateModulesProviderOptions {
    pub resolve: ResolveOptions,
    pub target: PathBuf,
    pub entitlement: Option<PathBuf>,
    /// Only these packages are written to the provider.
    pub packages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_block_overrides_root_keys() {
        let options: AutolinkingOptions = serde_json::from_str(
            r#"{
                "searchPaths": ["../../node_modules"],
                "exclude": ["expo-root-excluded"],
                "android": { "exclude": ["expo-android-excluded"] }
            }"#,
        )
        .unwrap();
        let android = options.layered_for(SupportedPlatform::Android);
        assert_eq!(android.exclude.unwrap(), vec!["expo-android-excluded"]);
        assert_eq!(android.search_paths.unwrap(), vec!["../../node_modules"]);

        let web = options.layered_for(SupportedPlatform::Web);
        assert_eq!(web.exclude.unwrap(), vec!["expo-root-excluded"]);
    }

    #[test]
    fn apple_block_falls_back_to_ios() {
        let options: AutolinkingOptions =
            serde_json::from_str(r#"{ "ios": { "flags": { "inhibit_warnings": true } } }"#)
                .unwrap();
        let apple = options.layered_for(SupportedPlatform::Apple);
        assert_eq!(apple.flags.unwrap()["inhibit_warnings"], Value::Bool(true));
    }

    #[test]
    fn policy_names_parse() {
        assert_eq!(
            "project-range".parse::<DuplicatePolicy>().unwrap(),
            DuplicatePolicy::ProjectRange
        );
        assert!("newest".parse::<DuplicatePolicy>().is_err());
    }
}
