// autolink-core/src/entitlements.rs
use std::path::Path;

use plist::Value as PlistValue;
use serde::Serialize;
use tracing::{debug, warn};

const APP_GROUPS_KEY: &str = "com.apple.security.application-groups";

/// Code-sign entitlements the generated Apple provider exposes at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppCodeSignEntitlements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_groups: Option<Vec<String>>,
}

/// Reads the entitlements plist. A missing or unreadable file yields no entitlements.
pub fn read_app_code_sign_entitlements(path: &Path) -> AppCodeSignEntitlements {
    if !path.is_file() {
        debug!("Entitlements file not found at {}", path.display());
        return AppCodeSignEntitlements::default();
    }
    match PlistValue::from_file(path) {
        Ok(PlistValue::Dictionary(dict)) => AppCodeSignEntitlements {
            app_groups: dict
                .get(APP_GROUPS_KEY)
                .and_then(PlistValue::as_array)
                .map(|groups| {
                    groups
                        .iter()
                        .filter_map(PlistValue::as_string)
                        .map(String::from)
                        .collect()
                }),
        },
        Ok(val) => {
            warn!(
                "Entitlements at {} are not a dictionary. Value: {:?}",
                path.display(),
                val
            );
            AppCodeSignEntitlements::default()
        }
        Err(e) => {
            warn!("Failed to parse entitlements at {}: {}", path.display(), e);
            AppCodeSignEntitlements::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn reads_app_groups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("App.entitlements");
        fs::write(
            &path,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>com.apple.security.application-groups</key>
  <array>
    <string>group.dev.example</string>
  </array>
</dict>
</plist>
"#,
        )
        .unwrap();

        let entitlements = read_app_code_sign_entitlements(&path);
        assert_eq!(
            entitlements.app_groups,
            Some(vec!["group.dev.example".to_string()])
        );
        assert_eq!(
            serde_json::to_string(&entitlements).unwrap(),
            r#"{"appGroups":["group.dev.example"]}"#
        );
    }

    #[test]
    fn missing_file_has_no_entitlements() {
        let dir = tempfile::tempdir().unwrap();
        let entitlements = read_app_code_sign_entitlements(&dir.path().join("none.plist"));
        assert_eq!(entitlements, AppCodeSignEntitlements::default());
        assert_eq!(serde_json::to_string(&entitlements).unwrap(), "{}");
    }
}
