// autolink-core/src/lib.rs

// Resolver stages, in pipeline order
pub mod options;
pub mod search;
pub mod loader;
pub mod merge;
pub mod duplicates;
pub mod descriptor;
pub mod engine;

// Consumers of a resolve pass
pub mod entitlements;
pub mod extra_deps;
pub mod generate;
pub mod verify;

// Re-export key types for easier use by the CLI crate
pub use duplicates::{CanonicalOrder, DuplicateResolver};
pub use engine::{
    find_modules, find_modules_async, generate_modules_provider, generate_package_list, resolve,
    resolve_modules, resolve_modules_async, GenerateOutcome, ModulesOutcome, ResolveOutcome,
    ResolveReport, ResolveResponse,
};
pub use options::{merge_linking_options, LinkingOverrides};
pub use verify::{verify_search_results, VerifyReport};
