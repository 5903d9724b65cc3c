// autolink-core/src/merge/android.rs
use std::collections::HashSet;

use autolink_common::model::module_config::{
    AndroidGradleAarProjectDescriptor, AndroidGradlePluginDescriptor, RawExpoModuleConfig,
    RawModuleConfigAndroid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AndroidModulesField {
    Modules,
    /// Deprecated, string or list.
    ModulesClassNames,
}

/// Kotlin module classes are gathered from every field below, in this order,
/// and concatenated. Repeated class names are kept once.
///
/// | order | field               |
/// |-------|---------------------|
/// | 1     | `modules`           |
/// | 2     | `modulesClassNames` |
pub const ANDROID_MODULES_SOURCES: [AndroidModulesField; 2] = [
    AndroidModulesField::Modules,
    AndroidModulesField::ModulesClassNames,
];

/// Normalized Android view of one package. A package without an `android`
/// block still gets an empty view: its Gradle project may be discovered on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AndroidConfig {
    pub modules: Vec<String>,
    pub gradle_paths: Vec<String>,
    pub gradle_plugins: Vec<AndroidGradlePluginDescriptor>,
    pub gradle_aar_projects: Vec<AndroidGradleAarProjectDescriptor>,
}

fn modules_field(block: &RawModuleConfigAndroid, field: AndroidModulesField) -> Vec<String> {
    match field {
        AndroidModulesField::Modules => block.modules.clone().unwrap_or_default(),
        AndroidModulesField::ModulesClassNames => block
            .modules_class_names
            .as_ref()
            .map(|names| names.to_vec())
            .unwrap_or_default(),
    }
}

pub fn merge_android(raw: &RawExpoModuleConfig) -> AndroidConfig {
    let Some(block) = raw.android.as_ref() else {
        return AndroidConfig::default();
    };

    let mut seen = HashSet::new();
    let modules = ANDROID_MODULES_SOURCES
        .iter()
        .flat_map(|field| modules_field(block, *field))
        .filter(|name| seen.insert(name.clone()))
        .collect();

    AndroidConfig {
        modules,
        gradle_paths: block
            .gradle_path
            .as_ref()
            .map(|p| p.to_vec())
            .unwrap_or_default(),
        gradle_plugins: block.gradle_plugins.clone().unwrap_or_default(),
        gradle_aar_projects: block.gradle_aar_projects.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modules_come_before_deprecated_class_names() {
        let raw: RawExpoModuleConfig = serde_json::from_str(
            r#"{ "android": {
                "modules": ["a.AModule", "b.BModule"],
                "modulesClassNames": ["c.CModule", "a.AModule"],
                "gradlePath": "android/build.gradle"
            } }"#,
        )
        .unwrap();
        let android = merge_android(&raw);
        assert_eq!(android.modules, vec!["a.AModule", "b.BModule", "c.CModule"]);
        assert_eq!(android.gradle_paths, vec!["android/build.gradle"]);
    }

    #[test]
    fn single_string_class_names_are_flattened() {
        let raw: RawExpoModuleConfig =
            serde_json::from_str(r#"{ "android": { "modulesClassNames": "x.XModule" } }"#)
                .unwrap();
        assert_eq!(merge_android(&raw).modules, vec!["x.XModule"]);
    }

    #[test]
    fn missing_block_is_empty() {
        assert_eq!(
            merge_android(&RawExpoModuleConfig::default()),
            AndroidConfig::default()
        );
    }
}
