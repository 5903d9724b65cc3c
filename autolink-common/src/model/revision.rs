// autolink-common/src/model/revision.rs
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::module_config::RawExpoModuleConfig;

/// One physical occurrence of a package on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRevision {
    pub path: PathBuf,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<RawExpoModuleConfig>,
    /// Other occurrences claiming the same module name. Empty when unique.
    #[serde(default)]
    pub duplicates: Vec<PackageRevision>,
}

impl PackageRevision {
    pub fn new(path: PathBuf, version: impl Into<String>, config: RawExpoModuleConfig) -> Self {
        Self {
            path,
            version: version.into(),
            config: Some(config),
            duplicates: Vec::new(),
        }
    }

    /// The diagnostic view kept for a losing occurrence: path and version only.
    pub fn as_duplicate(&self) -> Self {
        Self {
            path: self.path.clone(),
            version: self.version.clone(),
            config: None,
            duplicates: Vec::new(),
        }
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Module name to canonical revision, in order of first discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResults(IndexMap<String, PackageRevision>);

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, revision: PackageRevision) {
        self.0.insert(name.into(), revision);
    }

    pub fn get(&self, name: &str) -> Option<&PackageRevision> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PackageRevision)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Keeps only the named modules, preserving discovery order.
    pub fn retain_names(&mut self, keep: impl Fn(&str) -> bool) {
        self.0.retain(|name, _| keep(name));
    }

    /// Modules with more than one occurrence on disk.
    pub fn with_duplicates(&self) -> impl Iterator<Item = (&String, &PackageRevision)> {
        self.0.iter().filter(|(_, revision)| revision.has_duplicates())
    }
}

impl IntoIterator for SearchResults {
    type Item = (String, PackageRevision);
    type IntoIter = indexmap::map::IntoIter<String, PackageRevision>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, PackageRevision)> for SearchResults {
    fn from_iter<I: IntoIterator<Item = (String, PackageRevision)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
