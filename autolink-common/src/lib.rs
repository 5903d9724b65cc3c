// autolink-common/src/lib.rs
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod model;
pub mod platform;

// Re-export key types
pub use config::Config;
pub use diagnostic::Diagnostic;
pub use error::{AutolinkError, Result};
pub use model::{ModuleDescriptor, PackageRevision, SearchResults};
pub use platform::SupportedPlatform;
