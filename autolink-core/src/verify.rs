// autolink-core/src/verify.rs
use std::path::PathBuf;

use autolink_common::model::{PackageRevision, SearchResults};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionSummary {
    pub path: PathBuf,
    pub version: String,
}

impl From<&PackageRevision> for RevisionSummary {
    fn from(revision: &PackageRevision) -> Self {
        Self {
            path: revision.path.clone(),
            version: revision.version.clone(),
        }
    }
}

/// A module claimed by more than one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatedModule {
    pub name: String,
    pub canonical: RevisionSummary,
    pub duplicates: Vec<RevisionSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub duplicated: Vec<DuplicatedModule>,
}

impl VerifyReport {
    pub fn count(&self) -> usize {
        self.duplicated.len()
    }

    pub fn is_clean(&self) -> bool {
        self.duplicated.is_empty()
    }
}

/// Lists every module with duplicates, in result order.
pub fn verify_search_results(results: &SearchResults) -> VerifyReport {
    let duplicated = results
        .iter()
        .filter(|(_, revision)| revision.has_duplicates())
        .map(|(name, revision)| DuplicatedModule {
            name: name.clone(),
            canonical: revision.into(),
            duplicates: revision.duplicates.iter().map(RevisionSummary::from).collect(),
        })
        .collect();
    VerifyReport { duplicated }
}

#[cfg(test)]
mod tests {
    use autolink_common::model::module_config::RawExpoModuleConfig;

    use super::*;

    #[test]
    fn reports_only_duplicated_modules() {
        let mut foo = PackageRevision::new(
            PathBuf::from("/p/node_modules/foo"),
            "2.0.0",
            RawExpoModuleConfig::default(),
        );
        foo.duplicates.push(
            PackageRevision::new(
                PathBuf::from("/p/node_modules/x/node_modules/foo"),
                "1.0.0",
                RawExpoModuleConfig::default(),
            )
            .as_duplicate(),
        );
        let bar = PackageRevision::new(
            PathBuf::from("/p/node_modules/bar"),
            "1.0.0",
            RawExpoModuleConfig::default(),
        );
        let results: SearchResults = [("foo".to_string(), foo), ("bar".to_string(), bar)]
            .into_iter()
            .collect();

        let report = verify_search_results(&results);
        assert_eq!(report.count(), 1);
        assert_eq!(report.duplicated[0].name, "foo");
        assert_eq!(report.duplicated[0].duplicates[0].version, "1.0.0");
        assert!(!report.is_clean());
    }
}
