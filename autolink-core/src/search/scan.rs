// autolink-core/src/search/scan.rs
//! Candidate discovery inside the expanded search roots.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use autolink_aio::{list_directory_entries, real_path};
use autolink_common::error::{AutolinkError, Result};
use autolink_common::model::module_config::MODULE_CONFIG_FILENAMES;
use glob::Pattern;
use tracing::{debug, warn};

use super::paths::SearchRoot;

/// A package directory holding a module declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position in discovery order across all roots.
    pub order: usize,
    pub root_index: usize,
    pub from_native_modules_dir: bool,
    /// Real path of the package directory.
    pub package_dir: PathBuf,
    pub config_path: PathBuf,
    /// Path as discovered, relative to its search root.
    pub relative: PathBuf,
    /// Number of nested `node_modules` levels below the search root.
    pub nesting: usize,
}

impl Candidate {
    /// Name implied by the directory layout: `<name>` or `@scope/<name>`.
    pub fn dir_name(&self) -> String {
        let mut parts: Vec<String> = self
            .relative
            .components()
            .rev()
            .take(2)
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        parts.reverse();
        match parts.as_slice() {
            [scope, name] if scope.starts_with('@') => format!("{scope}/{name}"),
            [.., name] => name.clone(),
            [] => String::new(),
        }
    }
}

/// Compiles glob patterns from the `option` setting, naming the offending one on failure.
pub(crate) fn compile_patterns(option: &str, patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                AutolinkError::Config(format!("invalid {option} pattern '{p}': {e}"))
            })
        })
        .collect()
}

/// Compiled `ignorePaths` patterns.
#[derive(Debug, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<Pattern>,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: compile_patterns("ignorePaths", patterns)?,
        })
    }

    pub fn is_ignored(&self, relative: &Path, absolute: &Path) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_path(relative) || p.matches_path(absolute))
    }
}

/// Walks every root and returns candidates in deterministic discovery order.
/// Each real package directory is reported once, from the first root reaching it.
pub fn discover_candidates(roots: &[SearchRoot], ignore: &IgnoreMatcher) -> Vec<Candidate> {
    let mut scanner = Scanner {
        ignore,
        visited: HashSet::new(),
        found: Vec::new(),
    };
    for root in roots {
        debug!("Scanning search root {}", root.path.display());
        if let Err(e) = scanner.scan_dir(root, &root.path, Path::new(""), 0) {
            // Roots were probed for readability already; a failure now is a race.
            warn!("Failed to scan {}: {}", root.path.display(), e);
        }
    }
    debug!("Discovered {} candidate packages", scanner.found.len());
    scanner.found
}

struct Scanner<'a> {
    ignore: &'a IgnoreMatcher,
    visited: HashSet<PathBuf>,
    found: Vec<Candidate>,
}

impl Scanner<'_> {
    fn scan_dir(
        &mut self,
        root: &SearchRoot,
        dir: &Path,
        relative: &Path,
        nesting: usize,
    ) -> Result<()> {
        for (name, path, is_dir) in list_directory_entries(dir)? {
            if !is_dir || name.starts_with('.') {
                continue;
            }
            let rel = relative.join(&name);
            if name.starts_with('@') {
                match list_directory_entries(&path) {
                    Ok(scoped) => {
                        for (scoped_name, scoped_path, scoped_is_dir) in scoped {
                            if scoped_is_dir && !scoped_name.starts_with('.') {
                                self.visit_package(root, &scoped_path, &rel.join(&scoped_name), nesting);
                            }
                        }
                    }
                    Err(e) => warn!("Skipping scope {}: {}", path.display(), e),
                }
            } else {
                self.visit_package(root, &path, &rel, nesting);
            }
        }
        Ok(())
    }

    fn visit_package(&mut self, root: &SearchRoot, path: &Path, relative: &Path, nesting: usize) {
        let real = match real_path(path) {
            Ok(real) => real,
            Err(e) => {
                debug!("Cannot resolve {}: {}", path.display(), e);
                return;
            }
        };
        if !self.visited.insert(real.clone()) {
            return;
        }
        if self.ignore.is_ignored(relative, &real) {
            debug!("Ignoring {} (matches ignorePaths)", real.display());
            return;
        }

        if let Some(config_path) = find_config_file(&real) {
            self.found.push(Candidate {
                order: self.found.len(),
                root_index: root.index,
                from_native_modules_dir: root.is_native_modules_dir,
                package_dir: real.clone(),
                config_path,
                relative: relative.to_path_buf(),
                nesting,
            });
        }

        let nested = real.join("node_modules");
        if nested.is_dir() {
            let nested_rel = relative.join("node_modules");
            if let Err(e) = self.scan_dir(root, &nested, &nested_rel, nesting + 1) {
                warn!("Skipping nested packages in {}: {}", nested.display(), e);
            }
        }
    }
}

/// The declaration file of a package, preferring `expo-module.config.json`.
pub fn find_config_file(package_dir: &Path) -> Option<PathBuf> {
    MODULE_CONFIG_FILENAMES
        .iter()
        .map(|name| package_dir.join(name))
        .find(|path| path.is_file())
}
