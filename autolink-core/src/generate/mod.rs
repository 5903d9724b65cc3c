// autolink-core/src/generate/mod.rs
//! Provider file rendering and writing. Rendering is a pure function of the
//! descriptor list; writing is atomic and skipped when nothing changed.
pub mod android;
pub mod apple;
pub mod devtools;

use std::path::Path;

use autolink_aio::write_if_changed_async;
use autolink_common::error::{AutolinkError, Result};
use autolink_common::model::ModuleDescriptor;
use autolink_common::platform::{PlatformFamily, SupportedPlatform};
use tracing::{debug, info};

use crate::entitlements::AppCodeSignEntitlements;

/// The target may not be a directory and its parent directory must exist.
pub fn validate_target(target: &Path) -> Result<()> {
    if target.as_os_str().is_empty() {
        return Err(AutolinkError::InvalidTarget {
            path: target.to_path_buf(),
            message: "no target path given".to_string(),
        });
    }
    if target.is_dir() {
        return Err(AutolinkError::InvalidTarget {
            path: target.to_path_buf(),
            message: "target is a directory".to_string(),
        });
    }
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !parent.is_dir() {
        return Err(AutolinkError::InvalidTarget {
            path: target.to_path_buf(),
            message: format!("parent directory {} does not exist", parent.display()),
        });
    }
    Ok(())
}

/// Renders the provider file for `platform` from descriptors of that platform family.
pub fn render_provider(
    platform: SupportedPlatform,
    modules: &[ModuleDescriptor],
    namespace: Option<&str>,
    entitlements: &AppCodeSignEntitlements,
) -> Result<Vec<u8>> {
    match platform.family() {
        PlatformFamily::Android => {
            let android: Vec<_> = modules.iter().filter_map(ModuleDescriptor::as_android).collect();
            Ok(android::render_package_list(namespace, &android).into_bytes())
        }
        PlatformFamily::Apple => {
            let apple: Vec<_> = modules.iter().filter_map(ModuleDescriptor::as_apple).collect();
            Ok(apple::render_modules_provider(&apple, entitlements)?.into_bytes())
        }
        PlatformFamily::DevTools => {
            let plugins: Vec<_> = modules.iter().filter_map(ModuleDescriptor::as_devtools).collect();
            devtools::render_manifest(&plugins)
        }
        PlatformFamily::None => Err(AutolinkError::UnsupportedPlatform(format!(
            "no provider can be generated for {platform}"
        ))),
    }
}

/// Writes a rendered provider. Returns whether the file changed.
pub async fn write_provider(target: &Path, content: Vec<u8>) -> Result<bool> {
    validate_target(target)?;
    let changed = write_if_changed_async(target, content).await?;
    if changed {
        info!("Wrote {}", target.display());
    } else {
        debug!("{} is up to date", target.display());
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn directories_and_orphan_paths_are_invalid_targets() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            validate_target(dir.path()),
            Err(AutolinkError::InvalidTarget { .. })
        ));
        assert!(matches!(
            validate_target(&dir.path().join("missing/Provider.swift")),
            Err(AutolinkError::InvalidTarget { .. })
        ));
        assert!(validate_target(&dir.path().join("Provider.swift")).is_ok());
    }

    #[test]
    fn web_has_no_provider() {
        assert!(matches!(
            render_provider(SupportedPlatform::Web, &[], None, &Default::default()),
            Err(AutolinkError::UnsupportedPlatform(_))
        ));
    }

    #[tokio::test]
    async fn unchanged_provider_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("ExpoModulesPackageList.java");
        let content = render_provider(SupportedPlatform::Android, &[], None, &Default::default())
            .unwrap();
        assert!(write_provider(&target, content.clone()).await.unwrap());
        assert!(!write_provider(&target, content.clone()).await.unwrap());
        assert_eq!(fs::read(&target).unwrap(), content);
    }
}
