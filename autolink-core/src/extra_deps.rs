// autolink-core/src/extra_deps.rs
//! Extra Maven repositories and Pods requested through the native project's
//! property files.
use std::path::Path;

use autolink_aio::{read_json_sync, read_properties};
use autolink_common::error::{AutolinkError, Result};
use autolink_common::model::extra_deps::RawMavenRepository;
use autolink_common::model::{AndroidMavenRepository, ApplePod, ExtraDependencies};
use autolink_common::platform::{PlatformFamily, SupportedPlatform};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

const ANDROID_PROPERTIES_FILE: &str = "android/gradle.properties";
const ANDROID_EXTRA_MAVEN_REPOS_KEY: &str = "android.extraMavenRepos";
const APPLE_PROPERTIES_FILE: &str = "ios/Podfile.properties.json";
const APPLE_EXTRA_PODS_KEY: &str = "ios.extraPods";

/// `None` for platforms without build-time dependency injection. Missing or
/// malformed property files yield an empty list.
pub fn resolve_extra_build_dependencies(
    project_root: &Path,
    platform: SupportedPlatform,
) -> Option<ExtraDependencies> {
    match platform.family() {
        PlatformFamily::Android => Some(ExtraDependencies::Android(
            android_extra_repositories(project_root).unwrap_or_else(|e| {
                warn!("Ignoring {}: {}", ANDROID_EXTRA_MAVEN_REPOS_KEY, e);
                Vec::new()
            }),
        )),
        PlatformFamily::Apple => Some(ExtraDependencies::Apple(
            apple_extra_pods(project_root).unwrap_or_else(|e| {
                warn!("Ignoring {}: {}", APPLE_EXTRA_PODS_KEY, e);
                Vec::new()
            }),
        )),
        PlatformFamily::DevTools | PlatformFamily::None => None,
    }
}

fn android_extra_repositories(project_root: &Path) -> Result<Vec<AndroidMavenRepository>> {
    let path = project_root.join(ANDROID_PROPERTIES_FILE);
    if !path.is_file() {
        debug!("No {} found", path.display());
        return Ok(Vec::new());
    }
    let properties = read_properties(&path)?;
    let Some(raw) = properties.get(ANDROID_EXTRA_MAVEN_REPOS_KEY) else {
        return Ok(Vec::new());
    };
    let repos: Vec<RawMavenRepository> = serde_json::from_str(raw)?;
    Ok(repos.into_iter().map(AndroidMavenRepository::from).collect())
}

fn apple_extra_pods(project_root: &Path) -> Result<Vec<ApplePod>> {
    let path = project_root.join(APPLE_PROPERTIES_FILE);
    if !path.is_file() {
        debug!("No {} found", path.display());
        return Ok(Vec::new());
    }
    let properties: serde_json::Map<String, Value> = read_json_sync(&path)?;
    match properties.get(APPLE_EXTRA_PODS_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => parse_embedded_json(value),
    }
}

/// Property values are usually JSON encoded into a string; inline JSON is accepted too.
fn parse_embedded_json<T: DeserializeOwned>(value: &Value) -> Result<T> {
    match value {
        Value::String(encoded) => Ok(serde_json::from_str(encoded)?),
        Value::Array(_) | Value::Object(_) => Ok(serde_json::from_value(value.clone())?),
        other => Err(AutolinkError::ParseError(
            "extra pods",
            format!("expected a JSON string or array, got {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use autolink_common::model::extra_deps::AndroidMavenRepositoryCredentials;

    use super::*;

    #[test]
    fn reads_maven_repositories_from_gradle_properties() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("android")).unwrap();
        fs::write(
            dir.path().join(ANDROID_PROPERTIES_FILE),
            r#"# comment
org.gradle.jvmargs=-Xmx2048m
android.extraMavenRepos=["https://a.example/maven", {"url": "https://b.example/maven", "credentials": {"username": "u", "password": "p"}}]
"#,
        )
        .unwrap();

        let Some(ExtraDependencies::Android(repos)) =
            resolve_extra_build_dependencies(dir.path(), SupportedPlatform::Android)
        else {
            panic!("expected android dependencies");
        };
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].url, "https://a.example/maven");
        assert!(matches!(
            repos[1].credentials,
            Some(AndroidMavenRepositoryCredentials::Password { .. })
        ));
    }

    #[test]
    fn reads_string_encoded_pods() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("ios")).unwrap();
        fs::write(
            dir.path().join(APPLE_PROPERTIES_FILE),
            r#"{ "ios.extraPods": "[{\"name\": \"Extra\", \"version\": \"~> 1.0\"}]" }"#,
        )
        .unwrap();

        let Some(ExtraDependencies::Apple(pods)) =
            resolve_extra_build_dependencies(dir.path(), SupportedPlatform::Ios)
        else {
            panic!("expected apple dependencies");
        };
        assert_eq!(pods[0].name, "Extra");
        assert_eq!(pods[0].version.as_deref(), Some("~> 1.0"));
    }

    #[test]
    fn missing_or_malformed_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_extra_build_dependencies(dir.path(), SupportedPlatform::Android),
            Some(ExtraDependencies::Android(Vec::new()))
        );
        fs::create_dir_all(dir.path().join("ios")).unwrap();
        fs::write(dir.path().join(APPLE_PROPERTIES_FILE), "{ not json").unwrap();
        assert_eq!(
            resolve_extra_build_dependencies(dir.path(), SupportedPlatform::Apple),
            Some(ExtraDependencies::Apple(Vec::new()))
        );
        assert!(resolve_extra_build_dependencies(dir.path(), SupportedPlatform::Devtools).is_none());
    }
}
