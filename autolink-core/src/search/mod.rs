// autolink-core/src/search/mod.rs
//! Turns search options into the ordered list of candidate package directories.
pub mod paths;
pub mod project_deps;
pub mod scan;

pub use paths::{expand_search_paths, ExpandedRoots, SearchRoot};
pub use project_deps::{filter_to_project_dependencies, resolve_package_manifest};
pub use scan::{discover_candidates, find_config_file, Candidate, IgnoreMatcher};
