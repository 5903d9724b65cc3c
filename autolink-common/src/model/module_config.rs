// autolink-common/src/model/module_config.rs
//! The as-declared shape of `expo-module.config.json`.
//!
//! Every field name here is part of the published file format, including the
//! deprecated ones. Unknown fields are ignored so newer declaration files keep
//! loading with older resolvers.
use serde::{Deserialize, Serialize};

use crate::platform::SupportedPlatform;

/// File names recognized as module declarations, in priority order.
pub const MODULE_CONFIG_FILENAMES: [&str; 2] = ["expo-module.config.json", "unimodule.json"];

/// A field accepting either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrVec {
    One(String),
    Many(Vec<String>),
}

impl StringOrVec {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value.clone()],
            Self::Many(values) => values.clone(),
        }
    }
}

impl From<&str> for StringOrVec {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<String>> for StringOrVec {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// Config shared by every Apple platform (also the shape of the legacy `ios` block).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModuleConfigApple {
    /// Swift module classes to register in the generated provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<String>>,
    /// Deprecated alias of `modules`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules_class_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_delegate_subscribers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub react_delegate_handlers: Option<Vec<String>>,
    /// Podspec path(s) relative to the package root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub podspec_path: Option<StringOrVec>,
    /// Swift product module name(s). Defaults to the pod names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swift_module_name: Option<StringOrVec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidGradlePluginDescriptor {
    /// Gradle plugin ID
    pub id: String,
    /// Artifact group
    pub group: String,
    /// Relative path to the gradle plugin directory
    pub source_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidGradleAarProjectDescriptor {
    /// Gradle project name
    pub name: String,
    /// Path to the AAR file
    pub aar_file_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModuleConfigAndroid {
    /// Fully qualified Kotlin module classes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<String>>,
    /// Deprecated alias of `modules`; a bare string is accepted for old files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules_class_names: Option<StringOrVec>,
    /// `build.gradle` path(s) relative to the package root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradle_path: Option<StringOrVec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradle_plugins: Option<Vec<AndroidGradlePluginDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradle_aar_projects: Option<Vec<AndroidGradleAarProjectDescriptor>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModuleConfigDevTools {
    /// Required when the block is present; checked when descriptors are built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webpage_root: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExpoModuleConfig {
    /// Kept as strings so an unknown platform name does not reject the whole file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apple: Option<RawModuleConfigApple>,
    /// Legacy iOS block, the fallback for `apple`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<RawModuleConfigApple>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<RawModuleConfigAndroid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtools: Option<RawModuleConfigDevTools>,
}

impl RawExpoModuleConfig {
    pub fn supported_platforms(&self) -> Vec<SupportedPlatform> {
        self.platforms
            .iter()
            .flatten()
            .filter_map(|name| name.parse().ok())
            .collect()
    }

    pub fn supports_platform(&self, platform: SupportedPlatform) -> bool {
        platform.is_supported_by(&self.supported_platforms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_and_platforms_are_tolerated() {
        let raw: RawExpoModuleConfig = serde_json::from_str(
            r#"{
                "platforms": ["ios", "visionos"],
                "ios": { "modules": ["FooModule"], "someFutureField": 1 },
                "futureBlock": {}
            }"#,
        )
        .unwrap();
        assert_eq!(raw.supported_platforms(), vec![SupportedPlatform::Ios]);
        assert!(raw.supports_platform(SupportedPlatform::Apple));
        assert!(!raw.supports_platform(SupportedPlatform::Android));
    }

    #[test]
    fn string_or_array_fields_accept_both_shapes() {
        let raw: RawModuleConfigAndroid =
            serde_json::from_str(r#"{ "gradlePath": "android/build.gradle" }"#).unwrap();
        assert_eq!(
            raw.gradle_path.unwrap().to_vec(),
            vec!["android/build.gradle".to_string()]
        );

        let raw: RawModuleConfigApple =
            serde_json::from_str(r#"{ "podspecPath": ["a.podspec", "b.podspec"] }"#).unwrap();
        assert_eq!(raw.podspec_path.unwrap().to_vec().len(), 2);
    }
}
