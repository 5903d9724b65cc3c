// autolink/src/cli/args.rs
//! Options shared by every resolving command.
use std::path::PathBuf;

use autolink_common::error::Result;
use autolink_common::model::{DuplicatePolicy, SearchOptions};
use autolink_common::{Config, SupportedPlatform};
use autolink_core::{merge_linking_options, LinkingOverrides};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Target platform: apple, ios, macos, tvos, android, web or devtools
    #[arg(short, long, default_value = "apple")]
    pub platform: String,

    /// Project root; defaults to AUTOLINK_PROJECT_ROOT or the current directory
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Directories to search for packages, relative to the project root
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub search_paths: Vec<String>,

    /// Glob patterns of package paths to skip
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub ignore_paths: Vec<String>,

    /// Glob patterns of package names to leave unlinked
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub exclude: Vec<String>,

    /// Directory holding local modules (default: modules)
    #[arg(long)]
    pub native_modules_dir: Option<String>,

    /// Link only packages the project depends on (default)
    #[arg(long, conflicts_with = "all_deps")]
    pub only_project_deps: bool,

    /// Link every package found under the search paths
    #[arg(long)]
    pub all_deps: bool,

    /// Duplicate policy: shallowest, first-found or project-range
    #[arg(long)]
    pub policy: Option<String>,

    /// Do not print warnings about skipped packages
    #[arg(long)]
    pub silent: bool,
}

impl SearchArgs {
    pub fn platform(&self) -> Result<SupportedPlatform> {
        self.platform.parse()
    }

    pub fn to_search_options(&self, config: &Config) -> Result<SearchOptions> {
        let project_root = self
            .project_root
            .clone()
            .unwrap_or_else(|| config.project_root().to_path_buf());
        let policy = self
            .policy
            .as_deref()
            .map(str::parse::<DuplicatePolicy>)
            .transpose()?;
        let only_project_deps = if self.all_deps {
            Some(false)
        } else if self.only_project_deps {
            Some(true)
        } else {
            None
        };

        let overrides = LinkingOverrides {
            search_paths: non_empty(&self.search_paths),
            ignore_paths: non_empty(&self.ignore_paths),
            exclude: non_empty(&self.exclude),
            native_modules_dir: self.native_modules_dir.clone(),
            only_project_deps,
            flags: None,
            policy,
            silent: self.silent,
        };
        merge_linking_options(&project_root, self.platform()?, overrides)
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}
