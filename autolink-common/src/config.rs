// autolink-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{AutolinkError, Result};

const MAX_DEFAULT_JOBS: usize = 16;

/// Tool-level settings taken from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_root: PathBuf,
    pub jobs: usize,
    pub color: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading autolink configuration");

        let project_root = match env::var("AUTOLINK_PROJECT_ROOT")
            .ok()
            .filter(|s| !s.is_empty())
        {
            Some(root) => PathBuf::from(root),
            None => env::current_dir().map_err(|e| {
                AutolinkError::Config(format!("Could not determine the current directory: {e}"))
            })?,
        };
        debug!("Effective project root: {}", project_root.display());

        let jobs = match env::var("AUTOLINK_JOBS").ok().filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                AutolinkError::Config(format!(
                    "AUTOLINK_JOBS must be a positive integer, got '{raw}'"
                ))
            })?,
            None => num_cpus::get().clamp(1, MAX_DEFAULT_JOBS),
        };
        debug!("Worker pool size: {}", jobs);

        let color = env::var("AUTOLINK_NO_COLOR").map_or(true, |v| v.is_empty() || v == "0");

        debug!("Configuration loaded successfully.");
        Ok(Self {
            project_root,
            jobs,
            color,
        })
    }

    /// A config for an explicit project root, bypassing the environment.
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            jobs: num_cpus::get().clamp(1, MAX_DEFAULT_JOBS),
            color: false,
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}
