// autolink-core/src/descriptor/android.rs
use std::path::{Component, Path};

use autolink_common::model::descriptor::{
    ModuleAndroidAarProjectInfo, ModuleAndroidPluginInfo, ModuleAndroidProjectInfo,
    ModuleDescriptorAndroid,
};
use autolink_common::model::PackageRevision;
use tracing::debug;

use super::glob_in;
use crate::merge::AndroidConfig;

const GRADLE_FILE_PATTERNS: [&str; 2] = ["*/build.gradle", "*/build.gradle.kts"];

/// Gradle project name for a package: no leading `@`, runs of non-word
/// characters collapsed to `-`.
pub fn package_to_project_name(package_name: &str) -> String {
    let trimmed = package_name.strip_prefix('@').unwrap_or(package_name);
    let mut out = String::with_capacity(trimmed.len());
    let mut in_run = false;
    for c in trimmed.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('-');
            in_run = true;
        }
    }
    out
}

/// Projects living outside the conventional `android` directory get the
/// directory appended after `$`, e.g. `expo-foo$android-lib`.
pub fn project_name_for_gradle_file(package_name: &str, relative_gradle_file: &Path) -> String {
    let name = package_to_project_name(package_name);
    let base_dir = relative_gradle_file
        .parent()
        .map(|dir| {
            dir.components()
                .filter(|c| !matches!(c, Component::CurDir))
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("-")
        })
        .filter(|dir| !dir.is_empty())
        .unwrap_or_else(|| ".".to_string());
    if base_dir == "android" {
        name
    } else {
        format!("{name}${base_dir}")
    }
}

/// Gradle files relative to the package: the declared ones, else the first
/// `*/build.gradle(.kts)` found on disk.
fn gradle_files(package_dir: &Path, config: &AndroidConfig) -> Vec<String> {
    if !config.gradle_paths.is_empty() {
        return config.gradle_paths.clone();
    }
    let mut found: Vec<_> = GRADLE_FILE_PATTERNS
        .iter()
        .flat_map(|pattern| glob_in(package_dir, pattern))
        .filter_map(|path| {
            path.strip_prefix(package_dir)
                .ok()
                .map(|p| p.to_string_lossy().to_string())
        })
        .collect();
    found.sort();
    found.truncate(1);
    found
}

/// `None` when no Gradle project can be found for the package.
pub fn build_android_descriptor(
    name: &str,
    revision: &PackageRevision,
    config: &AndroidConfig,
) -> Option<ModuleDescriptorAndroid> {
    let package_dir = revision.path.as_path();
    let projects: Vec<ModuleAndroidProjectInfo> = gradle_files(package_dir, config)
        .iter()
        .map(|gradle_file| {
            let relative = Path::new(gradle_file);
            let absolute = package_dir.join(relative);
            ModuleAndroidProjectInfo {
                name: project_name_for_gradle_file(name, relative),
                source_dir: absolute
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| package_dir.to_path_buf()),
            }
        })
        .collect();
    if projects.is_empty() {
        debug!("No Gradle project in {}", package_dir.display());
        return None;
    }

    let plugins = config
        .gradle_plugins
        .iter()
        .map(|plugin| ModuleAndroidPluginInfo {
            id: plugin.id.clone(),
            source_dir: package_dir.join(&plugin.source_dir),
        })
        .collect();
    let aar_projects = config
        .gradle_aar_projects
        .iter()
        .map(|aar| ModuleAndroidAarProjectInfo {
            name: aar.name.clone(),
            aar_file_path: package_dir.join(&aar.aar_file_path),
            project_dir: package_dir.join("android").join(&aar.name),
        })
        .collect();

    Some(ModuleDescriptorAndroid {
        package_name: name.to_string(),
        projects,
        plugins,
        modules: config.modules.clone(),
        aar_projects,
    })
}
