// autolink-core/src/loader.rs
//! Reads one candidate's declaration file and manifest.
use autolink_aio::{read_json_sync, read_to_string};
use autolink_common::diagnostic::Diagnostic;
use autolink_common::model::module_config::RawExpoModuleConfig;
use autolink_common::model::{PackageJson, PackageRevision};
use tracing::debug;

use crate::search::Candidate;

/// A candidate whose declaration parsed, ready for duplicate resolution.
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    pub candidate: Candidate,
    pub name: String,
    pub revision: PackageRevision,
}

/// Loads a candidate. Malformed declaration files and unreadable manifests come
/// back as diagnostics; they exclude this package only.
pub fn load_candidate(candidate: &Candidate) -> Result<LoadedPackage, Diagnostic> {
    let text = read_to_string(&candidate.config_path).map_err(|e| Diagnostic::MalformedConfig {
        path: candidate.config_path.clone(),
        message: e.to_string(),
    })?;
    let config: RawExpoModuleConfig =
        serde_json::from_str(&text).map_err(|e| Diagnostic::MalformedConfig {
            path: candidate.config_path.clone(),
            message: e.to_string(),
        })?;

    let manifest_path = candidate.package_dir.join("package.json");
    let manifest: PackageJson = match read_json_sync(&manifest_path) {
        Ok(manifest) => manifest,
        // Local modules do not need a manifest of their own.
        Err(_) if candidate.from_native_modules_dir && !manifest_path.exists() => {
            PackageJson::default()
        }
        Err(e) => {
            return Err(Diagnostic::MalformedManifest {
                path: manifest_path,
                message: e.to_string(),
            })
        }
    };

    let name = manifest.name.unwrap_or_else(|| candidate.dir_name());
    let version = manifest.version.unwrap_or_default();
    debug!(
        "Loaded {}@{} from {}",
        name,
        version,
        candidate.package_dir.display()
    );

    Ok(LoadedPackage {
        candidate: candidate.clone(),
        revision: PackageRevision::new(candidate.package_dir.clone(), version, config),
        name,
    })
}
