// autolink-core/src/descriptor/apple.rs
use std::path::{Path, PathBuf};

use autolink_common::model::descriptor::{ModuleDescriptorIos, ModuleIosPodspecInfo};
use autolink_common::model::PackageRevision;
use serde_json::{Map, Value};
use tracing::debug;

use super::glob_in;
use crate::merge::AppleConfig;

/// Podspecs of a package: the declared ones, else every `*/*.podspec` outside
/// of nested `node_modules`.
fn podspec_files(package_dir: &Path, config: &AppleConfig) -> Vec<PathBuf> {
    if !config.podspec_paths.is_empty() {
        return config
            .podspec_paths
            .iter()
            .map(|p| package_dir.join(p))
            .collect();
    }
    glob_in(package_dir, "*/*.podspec")
        .into_iter()
        .filter(|path| {
            path.strip_prefix(package_dir)
                .map(|rel| !rel.starts_with("node_modules"))
                .unwrap_or(false)
        })
        .collect()
}

/// Default Swift module name for a pod: non-alphanumerics become `_`.
pub fn swift_module_name_for_pod(pod_name: &str) -> String {
    pod_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `None` when the package ships no podspec.
pub fn build_apple_descriptor(
    name: &str,
    revision: &PackageRevision,
    config: &AppleConfig,
    flags: &Map<String, Value>,
) -> Option<ModuleDescriptorIos> {
    let package_dir = revision.path.as_path();
    let pods: Vec<ModuleIosPodspecInfo> = podspec_files(package_dir, config)
        .iter()
        .filter_map(|podspec| {
            Some(ModuleIosPodspecInfo {
                pod_name: podspec.file_stem()?.to_string_lossy().to_string(),
                podspec_dir: podspec.parent()?.to_path_buf(),
            })
        })
        .collect();
    if pods.is_empty() {
        debug!("No podspec in {}", package_dir.display());
        return None;
    }

    let swift_module_names = if config.swift_module_names.is_empty() {
        pods.iter()
            .map(|pod| swift_module_name_for_pod(&pod.pod_name))
            .collect()
    } else {
        config.swift_module_names.clone()
    };

    Some(ModuleDescriptorIos {
        package_name: name.to_string(),
        pods,
        flags: (!flags.is_empty()).then(|| flags.clone()),
        swift_module_names,
        modules: config.modules.clone(),
        app_delegate_subscribers: config.app_delegate_subscribers.clone(),
        react_delegate_handlers: config.react_delegate_handlers.clone(),
        debug_only: config.debug_only,
    })
}
