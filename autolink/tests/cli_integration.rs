// CLI integration tests driving the binary against temporary projects.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;

fn cmd(project: &Path) -> Command {
    let exe = env!("CARGO_BIN_EXE_autolink");
    let mut command = Command::new(exe);
    command
        .env("AUTOLINK_PROJECT_ROOT", project)
        .env("AUTOLINK_NO_COLOR", "1")
        .env_remove("AUTOLINK_LOG");
    command
}

fn parse_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("valid json")
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("dirs");
    fs::write(path, contents).expect("write");
}

/// A project depending on `expo-camera`, with a stray second copy nested below `some-lib`.
fn project() -> (tempfile::TempDir, PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = fs::canonicalize(temp.path()).expect("canonical root");
    write(
        &root.join("package.json"),
        r#"{ "name": "app", "dependencies": { "expo-camera": "^15.0.0", "some-lib": "1.0.0" } }"#,
    );
    let camera = r#"{
        "platforms": ["apple", "android"],
        "apple": { "modules": ["CameraModule"] },
        "android": { "modules": ["expo.modules.camera.CameraModule"] }
    }"#;
    for (dir, version) in [
        ("node_modules/expo-camera", "15.0.1"),
        ("node_modules/some-lib/node_modules/expo-camera", "14.0.0"),
    ] {
        write(
            &root.join(dir).join("package.json"),
            &format!(r#"{{ "name": "expo-camera", "version": "{version}" }}"#),
        );
        write(&root.join(dir).join("expo-module.config.json"), camera);
        write(&root.join(dir).join("ios/ExpoCamera.podspec"), "");
        write(&root.join(dir).join("android/build.gradle"), "");
    }
    write(
        &root.join("node_modules/some-lib/package.json"),
        r#"{ "name": "some-lib", "version": "1.0.0", "dependencies": { "expo-camera": "^14.0.0" } }"#,
    );
    (temp, root)
}

#[test]
fn search_prints_results_with_duplicates() {
    let (_temp, root) = project();
    let output = cmd(&root)
        .args(["search", "--platform", "ios"])
        .output()
        .expect("search");
    assert!(output.status.success());

    let json = parse_json(&output.stdout);
    let camera = &json["expo-camera"];
    assert_eq!(camera["version"], "15.0.1");
    assert_eq!(camera["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(camera["duplicates"][0]["version"], "14.0.0");
}

#[test]
fn resolve_json_lists_android_modules() {
    let (_temp, root) = project();
    let output = cmd(&root)
        .args(["resolve", "--platform", "android", "--json"])
        .output()
        .expect("resolve");
    assert!(output.status.success());

    let json = parse_json(&output.stdout);
    assert_eq!(json["extraDependencies"], serde_json::json!([]));
    let module = &json["modules"][0];
    assert_eq!(module["packageName"], "expo-camera");
    assert_eq!(module["projects"][0]["name"], "expo-camera");
    assert_eq!(module["modules"][0], "expo.modules.camera.CameraModule");
}

#[test]
fn project_range_policy_prefers_the_declared_range() {
    let (_temp, root) = project();
    write(
        &root.join("package.json"),
        r#"{ "name": "app", "dependencies": { "expo-camera": "^14.0.0", "some-lib": "1.0.0" } }"#,
    );
    let output = cmd(&root)
        .args(["search", "--platform", "ios", "--policy", "project-range"])
        .output()
        .expect("search");
    assert!(output.status.success());
    assert_eq!(parse_json(&output.stdout)["expo-camera"]["version"], "14.0.0");
}

#[test]
fn strict_verify_fails_on_duplicates() {
    let (_temp, root) = project();
    let lenient = cmd(&root)
        .args(["verify", "--platform", "ios"])
        .output()
        .expect("verify");
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stdout).contains("Multiple revisions of expo-camera"));

    let strict = cmd(&root)
        .args(["verify", "--platform", "ios", "--strict"])
        .output()
        .expect("verify --strict");
    assert!(!strict.status.success());
}

#[test]
fn generate_writes_a_swift_provider() {
    let (_temp, root) = project();
    let target = root.join("ExpoModulesProvider.swift");
    let output = cmd(&root)
        .args(["generate-package-list", "--platform", "ios", "--target"])
        .arg(&target)
        .output()
        .expect("generate");
    assert!(output.status.success());

    let swift = fs::read_to_string(&target).unwrap();
    assert!(swift.contains("import ExpoCamera"));
    assert!(swift.contains("CameraModule.self"));
}

#[test]
fn generate_into_a_missing_directory_fails() {
    let (_temp, root) = project();
    let output = cmd(&root)
        .args(["generate-package-list", "--platform", "android", "--target"])
        .arg(root.join("missing/ExpoModulesPackageList.java"))
        .output()
        .expect("generate");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid generation target"));
}

#[test]
fn unknown_platform_is_rejected() {
    let (_temp, root) = project();
    let output = cmd(&root)
        .args(["search", "--platform", "windows"])
        .output()
        .expect("search");
    assert!(!output.status.success());
}
