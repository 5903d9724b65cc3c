// autolink-core/src/descriptor/devtools.rs
use autolink_common::diagnostic::Diagnostic;
use autolink_common::model::descriptor::ModuleDescriptorDevTools;
use autolink_common::model::PackageRevision;

use crate::merge::DevToolsConfig;

/// A `devtools` block must name its `webpageRoot`; without one the package is excluded.
pub fn build_devtools_descriptor(
    name: &str,
    revision: &PackageRevision,
    config: &DevToolsConfig,
) -> Result<ModuleDescriptorDevTools, Diagnostic> {
    let webpage_root = config
        .webpage_root
        .as_deref()
        .filter(|root| !root.is_empty())
        .ok_or_else(|| Diagnostic::MissingField {
            package: name.to_string(),
            path: revision.path.clone(),
            field: "webpageRoot",
        })?;
    Ok(ModuleDescriptorDevTools {
        package_name: name.to_string(),
        package_root: revision.path.clone(),
        webpage_root: revision.path.join(webpage_root),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use autolink_common::model::module_config::RawExpoModuleConfig;

    use super::*;

    fn revision() -> PackageRevision {
        PackageRevision::new(
            PathBuf::from("/p/node_modules/devtools-plugin"),
            "0.1.0",
            RawExpoModuleConfig::default(),
        )
    }

    #[test]
    fn webpage_root_is_joined_onto_the_package() {
        let config = DevToolsConfig {
            webpage_root: Some("dist".into()),
        };
        let descriptor = build_devtools_descriptor("devtools-plugin", &revision(), &config).unwrap();
        assert_eq!(
            descriptor.webpage_root,
            PathBuf::from("/p/node_modules/devtools-plugin/dist")
        );
    }

    #[test]
    fn missing_webpage_root_is_a_package_error() {
        let err =
            build_devtools_descriptor("devtools-plugin", &revision(), &DevToolsConfig::default())
                .unwrap_err();
        assert!(matches!(err, Diagnostic::MissingField { field: "webpageRoot", .. }));
        assert!(err.excludes_package());
    }
}
