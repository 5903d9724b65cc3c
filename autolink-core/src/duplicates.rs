// autolink-core/src/duplicates.rs
//! Picks one canonical revision per module name and records the rest.
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use autolink_aio::read_json_sync;
use autolink_common::diagnostic::Diagnostic;
use autolink_common::model::{DuplicatePolicy, PackageJson, PackageRevision, SearchResults};
use indexmap::IndexMap;
use semver::{Version, VersionReq};
use tracing::debug;

use crate::loader::LoadedPackage;

/// One claim on a module name together with where it was found.
#[derive(Debug, Clone)]
pub struct Occurrence {
    pub name: String,
    pub revision: PackageRevision,
    /// Discovery order across all search roots.
    pub order: usize,
    pub root_index: usize,
    /// Nested `node_modules` levels below the search root.
    pub nesting: usize,
}

impl From<LoadedPackage> for Occurrence {
    fn from(loaded: LoadedPackage) -> Self {
        Self {
            name: loaded.name,
            revision: loaded.revision,
            order: loaded.candidate.order,
            root_index: loaded.candidate.root_index,
            nesting: loaded.candidate.nesting,
        }
    }
}

/// Ranks occurrences of the same module. `Ordering::Less` means `a` is preferred.
pub trait CanonicalOrder: Send + Sync {
    fn compare(&self, a: &Occurrence, b: &Occurrence) -> Ordering;
}

/// Shallowest install wins: fewest nested `node_modules` levels, then the search
/// root nearest the project, then the lexicographically smallest path.
#[derive(Debug, Default, Clone, Copy)]
pub struct Shallowest;

impl CanonicalOrder for Shallowest {
    fn compare(&self, a: &Occurrence, b: &Occurrence) -> Ordering {
        a.nesting
            .cmp(&b.nesting)
            .then(a.root_index.cmp(&b.root_index))
            .then_with(|| a.revision.path.cmp(&b.revision.path))
    }
}

/// First occurrence in search-path order wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstFound;

impl CanonicalOrder for FirstFound {
    fn compare(&self, a: &Occurrence, b: &Occurrence) -> Ordering {
        a.order.cmp(&b.order)
    }
}

/// Occurrences whose version satisfies the range the project declares win,
/// then [`Shallowest`] decides.
#[derive(Debug, Default, Clone)]
pub struct ProjectRange {
    ranges: HashMap<String, VersionReq>,
}

impl ProjectRange {
    pub fn new(ranges: HashMap<String, VersionReq>) -> Self {
        Self { ranges }
    }

    /// Reads the declared ranges from the project manifest. Ranges that are not
    /// valid semver requirements (tags, git urls, workspace links) are ignored.
    pub fn from_project(project_root: &Path) -> Self {
        let manifest: PackageJson =
            read_json_sync(&project_root.join("package.json")).unwrap_or_default();
        let ranges = manifest
            .dependencies
            .iter()
            .filter_map(|(name, range)| match VersionReq::parse(range) {
                Ok(req) => Some((name.clone(), req)),
                Err(e) => {
                    debug!("Ignoring range '{}' for {}: {}", range, name, e);
                    None
                }
            })
            .collect();
        Self { ranges }
    }

    fn satisfies(&self, occurrence: &Occurrence) -> bool {
        let Some(req) = self.ranges.get(&occurrence.name) else {
            return false;
        };
        Version::parse(&occurrence.revision.version).is_ok_and(|v| req.matches(&v))
    }
}

impl CanonicalOrder for ProjectRange {
    fn compare(&self, a: &Occurrence, b: &Occurrence) -> Ordering {
        // `true` sorts after `false`, so compare b to a.
        self.satisfies(b)
            .cmp(&self.satisfies(a))
            .then_with(|| Shallowest.compare(a, b))
    }
}

pub struct DuplicateResolver {
    order: Box<dyn CanonicalOrder>,
}

impl DuplicateResolver {
    pub fn new(order: Box<dyn CanonicalOrder>) -> Self {
        Self { order }
    }

    pub fn for_policy(policy: DuplicatePolicy, project_root: &Path) -> Self {
        let order: Box<dyn CanonicalOrder> = match policy {
            DuplicatePolicy::Shallowest => Box::new(Shallowest),
            DuplicatePolicy::FirstFound => Box::new(FirstFound),
            DuplicatePolicy::ProjectRange => Box::new(ProjectRange::from_project(project_root)),
        };
        Self::new(order)
    }

    /// Groups occurrences by name in order of first discovery and keeps one per
    /// name. Losing occurrences are attached as `duplicates` and reported.
    pub fn resolve(
        &self,
        mut occurrences: Vec<Occurrence>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> SearchResults {
        occurrences.sort_by_key(|o| o.order);
        let mut groups: IndexMap<String, Vec<Occurrence>> = IndexMap::new();
        for occurrence in occurrences {
            groups
                .entry(occurrence.name.clone())
                .or_default()
                .push(occurrence);
        }

        let mut results = SearchResults::new();
        for (name, mut group) in groups {
            group.sort_by(|a, b| {
                self.order
                    .compare(a, b)
                    .then_with(|| a.revision.path.cmp(&b.revision.path))
            });
            let mut members = group.into_iter();
            let Some(first) = members.next() else {
                continue;
            };
            let mut canonical = first.revision;
            for other in members {
                let is_new_path = other.revision.path != canonical.path
                    && canonical
                        .duplicates
                        .iter()
                        .all(|d| d.path != other.revision.path);
                if is_new_path {
                    canonical.duplicates.push(other.revision.as_duplicate());
                }
            }
            if canonical.has_duplicates() {
                debug!(
                    "Module '{}' has {} duplicate(s); canonical {}",
                    name,
                    canonical.duplicates.len(),
                    canonical.path.display()
                );
                diagnostics.push(Diagnostic::Duplicate {
                    name: name.clone(),
                    canonical: canonical.path.clone(),
                    others: canonical.duplicates.iter().map(|d| d.path.clone()).collect(),
                });
            }
            results.insert(name, canonical);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use autolink_common::model::module_config::RawExpoModuleConfig;

    use super::*;

    fn occurrence(name: &str, path: &str, version: &str, order: usize, nesting: usize) -> Occurrence {
        Occurrence {
            name: name.to_string(),
            revision: PackageRevision::new(
                PathBuf::from(path),
                version,
                RawExpoModuleConfig::default(),
            ),
            order,
            root_index: 0,
            nesting,
        }
    }

    fn resolve(resolver: &DuplicateResolver, occurrences: Vec<Occurrence>) -> SearchResults {
        resolver.resolve(occurrences, &mut Vec::new())
    }

    #[test]
    fn shallower_occurrence_wins() {
        let resolver = DuplicateResolver::new(Box::new(Shallowest));
        let results = resolve(
            &resolver,
            vec![
                occurrence("foo", "/p/node_modules/a/node_modules/b/node_modules/foo", "3.0.0", 0, 2),
                occurrence("foo", "/p/node_modules/a/node_modules/foo", "2.0.0", 1, 1),
            ],
        );
        let foo = results.get("foo").unwrap();
        assert_eq!(foo.version, "2.0.0");
        assert_eq!(foo.duplicates.len(), 1);
        assert_eq!(foo.duplicates[0].version, "3.0.0");
        assert!(foo.duplicates[0].config.is_none());
    }

    #[test]
    fn equal_depth_breaks_ties_lexicographically() {
        let resolver = DuplicateResolver::new(Box::new(Shallowest));
        let results = resolve(
            &resolver,
            vec![
                occurrence("foo", "/p/node_modules/pkg-b", "1.0.0", 0, 0),
                occurrence("foo", "/p/node_modules/pkg-a", "1.0.0", 1, 0),
            ],
        );
        assert_eq!(
            results.get("foo").unwrap().path,
            PathBuf::from("/p/node_modules/pkg-a")
        );
    }

    #[test]
    fn first_found_keeps_search_order() {
        let resolver = DuplicateResolver::new(Box::new(FirstFound));
        let results = resolve(
            &resolver,
            vec![
                occurrence("foo", "/p/node_modules/x/node_modules/foo", "1.0.0", 0, 1),
                occurrence("foo", "/p/node_modules/foo", "2.0.0", 1, 0),
            ],
        );
        assert_eq!(results.get("foo").unwrap().version, "1.0.0");
    }

    #[test]
    fn project_range_prefers_satisfying_versions() {
        let ranges = [("foo".to_string(), VersionReq::parse("^3.0.0").unwrap())]
            .into_iter()
            .collect();
        let resolver = DuplicateResolver::new(Box::new(ProjectRange::new(ranges)));
        let results = resolve(
            &resolver,
            vec![
                occurrence("foo", "/p/node_modules/foo", "2.0.0", 0, 0),
                occurrence("foo", "/p/node_modules/x/node_modules/foo", "3.1.0", 1, 1),
            ],
        );
        assert_eq!(results.get("foo").unwrap().version, "3.1.0");
    }

    #[test]
    fn unique_modules_have_empty_duplicates_and_keep_discovery_order() {
        let resolver = DuplicateResolver::new(Box::new(Shallowest));
        let mut diagnostics = Vec::new();
        let results = resolver.resolve(
            vec![
                occurrence("zeta", "/p/node_modules/zeta", "1.0.0", 0, 0),
                occurrence("alpha", "/p/node_modules/alpha", "1.0.0", 1, 0),
            ],
            &mut diagnostics,
        );
        assert_eq!(results.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert!(results.iter().all(|(_, r)| r.duplicates.is_empty()));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn duplicates_are_reported() {
        let resolver = DuplicateResolver::new(Box::new(Shallowest));
        let mut diagnostics = Vec::new();
        resolver.resolve(
            vec![
                occurrence("foo", "/p/node_modules/foo", "1.0.0", 0, 0),
                occurrence("foo", "/q/node_modules/foo", "1.0.0", 1, 0),
            ],
            &mut diagnostics,
        );
        assert!(matches!(
            diagnostics.as_slice(),
            [Diagnostic::Duplicate { name, others, .. }] if name == "foo" && others.len() == 1
        ));
    }
}
