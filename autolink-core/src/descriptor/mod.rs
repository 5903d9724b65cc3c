// autolink-core/src/descriptor/mod.rs
//! Turns a canonical revision into the descriptor for one platform family.
pub mod android;
pub mod apple;
pub mod devtools;

use std::path::{Path, PathBuf};

use autolink_common::diagnostic::Diagnostic;
use autolink_common::model::{ModuleDescriptor, PackageRevision, SearchOptions};
use glob::Pattern;
use tracing::debug;

use crate::merge::{merge_for_platform, MergedConfig};

pub use android::build_android_descriptor;
pub use apple::build_apple_descriptor;
pub use devtools::build_devtools_descriptor;

/// `Ok(None)` when the package has nothing to link for the requested platform.
/// A structurally invalid package comes back as a diagnostic and is excluded.
pub fn build_descriptor(
    name: &str,
    revision: &PackageRevision,
    options: &SearchOptions,
) -> Result<Option<ModuleDescriptor>, Diagnostic> {
    let Some(raw) = revision.config.as_ref() else {
        return Ok(None);
    };
    let descriptor = match merge_for_platform(raw, options.platform) {
        Some(MergedConfig::Android(config)) => {
            build_android_descriptor(name, revision, &config).map(ModuleDescriptor::Android)
        }
        Some(MergedConfig::Apple(config)) => {
            build_apple_descriptor(name, revision, &config, &options.flags)
                .map(ModuleDescriptor::Apple)
        }
        Some(MergedConfig::DevTools(config)) => {
            Some(ModuleDescriptor::DevTools(build_devtools_descriptor(
                name, revision, &config,
            )?))
        }
        None => None,
    };
    if descriptor.is_none() {
        debug!("{} has nothing to link for {}", name, options.platform);
    }
    Ok(descriptor)
}

/// Files matching `pattern` below `dir`, sorted. The directory part is escaped
/// so package paths containing glob metacharacters still match literally.
pub(crate) fn glob_in(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let full = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), pattern);
    let mut found: Vec<PathBuf> = match glob::glob(&full) {
        Ok(paths) => paths.filter_map(|entry| entry.ok()).collect(),
        Err(e) => {
            debug!("Invalid glob '{}': {}", full, e);
            Vec::new()
        }
    };
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use std::fs;

    use autolink_common::model::module_config::RawExpoModuleConfig;
    use autolink_common::platform::SupportedPlatform;

    use super::*;

    #[test]
    fn web_yields_no_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let raw: RawExpoModuleConfig = serde_json::from_str(r#"{ "platforms": ["web"] }"#).unwrap();
        let revision = PackageRevision::new(dir.path().to_path_buf(), "1.0.0", raw);
        let options = SearchOptions::new(dir.path(), SupportedPlatform::Web);
        assert_eq!(build_descriptor("web-only", &revision, &options), Ok(None));
    }

    #[test]
    fn glob_in_escapes_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir.path().join("odd[name]");
        fs::create_dir_all(pkg.join("ios")).unwrap();
        fs::write(pkg.join("ios/Odd.podspec"), "").unwrap();
        assert_eq!(glob_in(&pkg, "*/*.podspec"), vec![pkg.join("ios/Odd.podspec")]);
    }
}
