// autolink-common/src/model/mod.rs
pub mod descriptor;
pub mod extra_deps;
pub mod module_config;
pub mod options;
pub mod package_json;
pub mod revision;

// Re-export
pub use descriptor::{
    ModuleDescriptor, ModuleDescriptorAndroid, ModuleDescriptorDevTools, ModuleDescriptorIos,
};
pub use extra_deps::{AndroidMavenRepository, ApplePod, ExtraDependencies};
pub use module_config::{RawExpoModuleConfig, RawModuleConfigAndroid, RawModuleConfigApple};
pub use options::{
    AutolinkingOptions, DuplicatePolicy, GenerateModulesProviderOptions, GenerateOptions,
    ResolveOptions, SearchOptions,
};
pub use package_json::PackageJson;
pub use revision::{PackageRevision, SearchResults};
