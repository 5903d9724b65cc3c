// autolink-core/src/search/project_deps.rs
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use autolink_aio::read_json_sync;
use autolink_common::diagnostic::Diagnostic;
use autolink_common::model::{PackageJson, SearchResults};
use tracing::debug;

/// Restricts `results` to the transitive `dependencies` closure of the project
/// manifest. Names in `always_included` survive regardless and their own
/// dependencies are followed too. Discovery order of the surviving entries is
/// preserved.
pub fn filter_to_project_dependencies(
    mut results: SearchResults,
    project_root: &Path,
    always_included: &HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> SearchResults {
    let mut included: HashSet<String> = always_included
        .iter()
        .filter(|name| results.contains(name))
        .cloned()
        .collect();
    let mut seeded: Vec<&String> = included.iter().collect();
    seeded.sort();
    let mut visited_packages: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<PathBuf> = VecDeque::new();
    queue.push_back(project_root.join("package.json"));
    for name in seeded {
        if let Some(revision) = results.get(name) {
            queue.push_back(revision.path.join("package.json"));
        }
    }

    while let Some(manifest_path) = queue.pop_front() {
        let manifest: PackageJson = match read_json_sync(&manifest_path) {
            Ok(manifest) => manifest,
            Err(e) => {
                debug!("Cannot read {}: {}", manifest_path.display(), e);
                continue;
            }
        };
        // Unnamed manifests (usually the project itself) are keyed by path.
        let key = manifest
            .name
            .clone()
            .unwrap_or_else(|| manifest_path.display().to_string());
        if !visited_packages.insert(key) {
            continue;
        }
        let from_dir = manifest_path.parent().unwrap_or(project_root);

        for dependency in manifest.dependencies.keys() {
            if included.contains(dependency) {
                continue;
            }
            if let Some(revision) = results.get(dependency) {
                included.insert(dependency.clone());
                queue.push_back(revision.path.join("package.json"));
                continue;
            }
            match resolve_package_manifest(from_dir, dependency) {
                Some(path) => queue.push_back(path),
                None => {
                    debug!(
                        "Dependency '{}' of {} not found",
                        dependency,
                        manifest_path.display()
                    );
                    diagnostics.push(Diagnostic::UnresolvedDependency {
                        name: dependency.clone(),
                        from: manifest_path.clone(),
                    });
                }
            }
        }
    }

    let before = results.len();
    results.retain_names(|name| included.contains(name));
    debug!(
        "Project dependency filter kept {} of {} modules",
        results.len(),
        before
    );
    results
}

/// Node-style lookup of `<name>/package.json` from `from_dir` upwards.
pub fn resolve_package_manifest(from_dir: &Path, name: &str) -> Option<PathBuf> {
    from_dir
        .ancestors()
        .map(|dir| dir.join("node_modules").join(name).join("package.json"))
        .find(|candidate| candidate.is_file())
}
