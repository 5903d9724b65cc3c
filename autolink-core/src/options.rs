// autolink-core/src/options.rs
//! Builds the effective `SearchOptions` from the project manifest and caller overrides.
use std::path::{Path, PathBuf};

use autolink_aio::{find_up, read_json_sync};
use autolink_common::error::{AutolinkError, Result};
use autolink_common::model::{DuplicatePolicy, PackageJson, SearchOptions};
use autolink_common::platform::SupportedPlatform;
use serde_json::{Map, Value};
use tracing::debug;

const DEFAULT_NATIVE_MODULES_DIR: &str = "modules";

/// Values supplied by the caller; each one that is set beats the manifest.
#[derive(Debug, Clone, Default)]
pub struct LinkingOverrides {
    pub search_paths: Option<Vec<String>>,
    pub ignore_paths: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub native_modules_dir: Option<String>,
    pub only_project_deps: Option<bool>,
    pub flags: Option<Map<String, Value>>,
    pub policy: Option<DuplicatePolicy>,
    pub silent: bool,
}

/// Layers root `expo.autolinking` options, then the platform block, then `overrides`.
pub fn merge_linking_options(
    project_root: &Path,
    platform: SupportedPlatform,
    overrides: LinkingOverrides,
) -> Result<SearchOptions> {
    let project_root = absolutize(project_root)?;
    let manifest_path = find_up(&project_root, "package.json");
    let manifest: PackageJson = match &manifest_path {
        Some(path) => read_json_sync(path).map_err(|e| {
            AutolinkError::Config(format!(
                "Could not read project manifest {}: {e}",
                path.display()
            ))
        })?,
        None => {
            debug!("No package.json found above {}", project_root.display());
            PackageJson::default()
        }
    };
    let base = manifest
        .autolinking()
        .map(|options| options.layered_for(platform))
        .unwrap_or_default();
    let manifest_dir = manifest_path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project_root.clone());

    let search_paths = match overrides
        .search_paths
        .or(base.search_paths)
        .filter(|paths| !paths.is_empty())
    {
        Some(paths) => paths.iter().map(|p| project_root.join(p)).collect(),
        None => default_search_paths(&project_root),
    };

    let native_modules_dir = {
        let raw = overrides
            .native_modules_dir
            .or(base.native_modules_dir)
            .unwrap_or_else(|| DEFAULT_NATIVE_MODULES_DIR.to_string());
        let resolved = manifest_dir.join(raw);
        resolved.is_dir().then_some(resolved)
    };

    let options = SearchOptions {
        search_paths,
        ignore_paths: overrides.ignore_paths.or(base.ignore_paths).unwrap_or_default(),
        exclude: overrides.exclude.or(base.exclude).unwrap_or_default(),
        platform,
        silent: overrides.silent,
        native_modules_dir,
        project_root,
        only_project_deps: overrides.only_project_deps.unwrap_or(true),
        flags: overrides.flags.or(base.flags).unwrap_or_default(),
        policy: overrides.policy.unwrap_or_default(),
    };
    debug!("Effective search options: {:?}", options);
    Ok(options)
}

/// Every existing `node_modules` next to a `package.json`, walking up from `start`.
pub fn default_search_paths(start: &Path) -> Vec<PathBuf> {
    start
        .ancestors()
        .filter(|dir| dir.join("package.json").is_file())
        .map(|dir| dir.join("node_modules"))
        .filter(|dir| dir.is_dir())
        .collect()
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}
