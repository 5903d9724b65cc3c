// autolink-core/src/search/paths.rs
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use autolink_aio::real_path;
use autolink_common::diagnostic::Diagnostic;
use autolink_common::error::{AutolinkError, Result};
use autolink_common::model::SearchOptions;
use tracing::{debug, error, warn};

/// A directory packages are discovered under. Lower `index` is searched first
/// and sits closer to the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoot {
    pub path: PathBuf,
    pub index: usize,
    pub is_native_modules_dir: bool,
}

#[derive(Debug, Default)]
pub struct ExpandedRoots {
    pub roots: Vec<SearchRoot>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves the configured roots to readable, de-duplicated real directories.
///
/// The native modules dir comes first. A root that cannot be read is skipped with
/// a diagnostic; when none of the configured search paths can be read the whole
/// pass fails.
pub fn expand_search_paths(options: &SearchOptions) -> Result<ExpandedRoots> {
    let mut expanded = ExpandedRoots::default();
    let mut seen = HashSet::new();

    if let Some(dir) = &options.native_modules_dir {
        match readable_dir(&options.project_root.join(dir)) {
            Ok(real) => {
                seen.insert(real.clone());
                expanded.roots.push(SearchRoot {
                    path: real,
                    index: 0,
                    is_native_modules_dir: true,
                });
            }
            Err(e) => debug!("Native modules dir {} skipped: {}", dir.display(), e),
        }
    }

    let mut readable = 0;
    let mut first_failure = None;
    for configured in &options.search_paths {
        let absolute = options.project_root.join(configured);
        let real = match readable_dir(&absolute) {
            Ok(real) => real,
            Err(e) => {
                warn!("Skipping search root {}: {}", absolute.display(), e);
                if first_failure.is_none() {
                    first_failure = Some((absolute.clone(), e.to_string()));
                }
                expanded.diagnostics.push(Diagnostic::UnreadableSearchRoot {
                    path: absolute,
                    message: e.to_string(),
                });
                continue;
            }
        };
        readable += 1;
        if !seen.insert(real.clone()) {
            debug!("Search root {} already listed", real.display());
            continue;
        }
        let index = expanded.roots.len();
        expanded.roots.push(SearchRoot {
            path: real,
            index,
            is_native_modules_dir: false,
        });
    }

    if readable == 0 {
        if let Some((path, message)) = first_failure {
            error!("No configured search root is readable, first failure at {}", path.display());
            return Err(AutolinkError::SearchRoot { path, message });
        }
    }

    debug!(
        "Expanded search roots: {:?}",
        expanded
            .roots
            .iter()
            .map(|r| r.path.display().to_string())
            .collect::<Vec<_>>()
    );
    Ok(expanded)
}

fn readable_dir(path: &Path) -> Result<PathBuf> {
    let real = real_path(path)?;
    if !real.is_dir() {
        return Err(AutolinkError::NotFound(format!(
            "{} is not a directory",
            real.display()
        )));
    }
    std::fs::read_dir(&real)?;
    Ok(real)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use autolink_common::platform::SupportedPlatform;

    use super::*;

    fn options(root: &Path, paths: &[&str]) -> SearchOptions {
        let mut options = SearchOptions::new(root, SupportedPlatform::Android);
        options.search_paths = paths.iter().map(|p| root.join(p)).collect();
        options
    }

    #[test]
    fn missing_roots_are_skipped_when_others_exist() {
        let dir = tempfile::tempdir().unwrap();
        let root = real_path(dir.path()).unwrap();
        fs::create_dir(root.join("node_modules")).unwrap();

        let expanded =
            expand_search_paths(&options(&root, &["node_modules", "missing", "node_modules"]))
                .unwrap();
        assert_eq!(expanded.roots.len(), 1);
        assert_eq!(expanded.roots[0].path, root.join("node_modules"));
        assert!(matches!(
            expanded.diagnostics.as_slice(),
            [Diagnostic::UnreadableSearchRoot { .. }]
        ));
    }

    #[test]
    fn missing_single_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = expand_search_paths(&options(dir.path(), &["missing"])).unwrap_err();
        assert!(matches!(err, AutolinkError::SearchRoot { .. }));
    }

    #[test]
    fn all_roots_missing_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = expand_search_paths(&options(dir.path(), &["missing-a", "missing-b"]))
            .unwrap_err();
        match err {
            AutolinkError::SearchRoot { path, .. } => {
                assert_eq!(path, dir.path().join("missing-a"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn native_modules_dir_does_not_rescue_unreadable_roots() {
        let dir = tempfile::tempdir().unwrap();
        let root = real_path(dir.path()).unwrap();
        fs::create_dir(root.join("modules")).unwrap();
        let mut opts = options(&root, &["missing"]);
        opts.native_modules_dir = Some(root.join("modules"));

        assert!(matches!(
            expand_search_paths(&opts),
            Err(AutolinkError::SearchRoot { .. })
        ));
    }

    #[test]
    fn no_roots_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let expanded = expand_search_paths(&options(dir.path(), &[])).unwrap();
        assert!(expanded.roots.is_empty());
    }

    #[test]
    fn native_modules_dir_comes_first() {
        let dir = tempfile::tempdir().unwrap();
        let root = real_path(dir.path()).unwrap();
        fs::create_dir(root.join("node_modules")).unwrap();
        fs::create_dir(root.join("modules")).unwrap();
        let mut opts = options(&root, &["node_modules"]);
        opts.native_modules_dir = Some(root.join("modules"));

        let expanded = expand_search_paths(&opts).unwrap();
        assert!(expanded.roots[0].is_native_modules_dir);
        assert_eq!(expanded.roots[1].index, 1);
    }
}
