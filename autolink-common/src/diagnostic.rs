// autolink-common/src/diagnostic.rs
//! Recoverable findings of a resolve pass. None of these fail the pass.
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Diagnostic {
    /// One of several search roots could not be read; the others were searched.
    UnreadableSearchRoot { path: PathBuf, message: String },
    /// A declaration file exists but is not valid JSON of the expected shape.
    MalformedConfig { path: PathBuf, message: String },
    /// The package manifest next to a declaration file is missing or invalid.
    MalformedManifest { path: PathBuf, message: String },
    /// A declared block lacks a field it cannot do without.
    MissingField {
        package: String,
        path: PathBuf,
        field: &'static str,
    },
    /// The worker loading this package stopped before reporting a result.
    LoadAborted { path: PathBuf },
    /// A project dependency could not be located while walking the dependency tree.
    UnresolvedDependency { name: String, from: PathBuf },
    /// Several packages claim the same module name; `canonical` was linked.
    Duplicate {
        name: String,
        canonical: PathBuf,
        others: Vec<PathBuf>,
    },
}

impl Diagnostic {
    /// Package-level problems, as opposed to informational findings.
    pub fn excludes_package(&self) -> bool {
        matches!(
            self,
            Self::MalformedConfig { .. }
                | Self::MalformedManifest { .. }
                | Self::MissingField { .. }
                | Self::LoadAborted { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreadableSearchRoot { path, message } => {
                write!(f, "skipped search root {}: {message}", path.display())
            }
            Self::MalformedConfig { path, message } => {
                write!(f, "ignored malformed module config {}: {message}", path.display())
            }
            Self::MalformedManifest { path, message } => {
                write!(f, "ignored package with unreadable manifest {}: {message}", path.display())
            }
            Self::MissingField {
                package,
                path,
                field,
            } => write!(
                f,
                "excluded {package} ({}): missing required field '{field}'",
                path.display()
            ),
            Self::LoadAborted { path } => {
                write!(f, "ignored {}: loading did not complete", path.display())
            }
            Self::UnresolvedDependency { name, from } => write!(
                f,
                "could not resolve dependency '{name}' from {}",
                from.display()
            ),
            Self::Duplicate {
                name,
                canonical,
                others,
            } => write!(
                f,
                "found {} revisions of {name}, linking {}",
                others.len() + 1,
                canonical.display()
            ),
        }
    }
}
