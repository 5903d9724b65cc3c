// autolink-core/src/merge/apple.rs
use autolink_common::model::module_config::{RawExpoModuleConfig, RawModuleConfigApple};

/// Where an Apple field can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppleSource {
    /// The generic `apple` block.
    Apple,
    /// The deprecated `ios` block.
    LegacyIos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppleModulesField {
    Modules,
    /// Deprecated alias of `modules`.
    ModulesClassNames,
}

/// Block precedence for every Apple field except the module class list:
/// the first block that is present is used as a whole.
///
/// | rank | block   |
/// |------|---------|
/// | 1    | `apple` |
/// | 2    | `ios`   |
pub const APPLE_SECTION_PRECEDENCE: [AppleSource; 2] = [AppleSource::Apple, AppleSource::LegacyIos];

/// Precedence for the Swift module class list. The first declared entry wins
/// and the others are ignored, so the deprecated names act as an alias, never
/// as an addition.
///
/// | rank | source  | field               |
/// |------|---------|---------------------|
/// | 1    | `ios`   | `modulesClassNames` |
/// | 2    | `apple` | `modules`           |
/// | 3    | `apple` | `modulesClassNames` |
/// | 4    | `ios`   | `modules`           |
pub const APPLE_MODULES_PRECEDENCE: [(AppleSource, AppleModulesField); 4] = [
    (AppleSource::LegacyIos, AppleModulesField::ModulesClassNames),
    (AppleSource::Apple, AppleModulesField::Modules),
    (AppleSource::Apple, AppleModulesField::ModulesClassNames),
    (AppleSource::LegacyIos, AppleModulesField::Modules),
];

/// Normalized Apple view of one package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppleConfig {
    pub modules: Vec<String>,
    pub app_delegate_subscribers: Vec<String>,
    pub react_delegate_handlers: Vec<String>,
    pub podspec_paths: Vec<String>,
    pub swift_module_names: Vec<String>,
    pub debug_only: bool,
}

fn source_block(raw: &RawExpoModuleConfig, source: AppleSource) -> Option<&RawModuleConfigApple> {
    match source {
        AppleSource::Apple => raw.apple.as_ref(),
        AppleSource::LegacyIos => raw.ios.as_ref(),
    }
}

fn modules_field(block: &RawModuleConfigApple, field: AppleModulesField) -> Option<&Vec<String>> {
    match field {
        AppleModulesField::Modules => block.modules.as_ref(),
        AppleModulesField::ModulesClassNames => block.modules_class_names.as_ref(),
    }
}

/// The block general Apple fields are read from, if any.
pub fn apple_section(raw: &RawExpoModuleConfig) -> Option<&RawModuleConfigApple> {
    APPLE_SECTION_PRECEDENCE
        .iter()
        .find_map(|source| source_block(raw, *source))
}

pub fn apple_modules(raw: &RawExpoModuleConfig) -> Vec<String> {
    APPLE_MODULES_PRECEDENCE
        .iter()
        .find_map(|(source, field)| {
            source_block(raw, *source).and_then(|block| modules_field(block, *field))
        })
        .cloned()
        .unwrap_or_default()
}

/// `None` when the package declares neither `apple` nor `ios`.
pub fn merge_apple(raw: &RawExpoModuleConfig) -> Option<AppleConfig> {
    let section = apple_section(raw)?;
    Some(AppleConfig {
        modules: apple_modules(raw),
        app_delegate_subscribers: section.app_delegate_subscribers.clone().unwrap_or_default(),
        react_delegate_handlers: section.react_delegate_handlers.clone().unwrap_or_default(),
        podspec_paths: section
            .podspec_path
            .as_ref()
            .map(|p| p.to_vec())
            .unwrap_or_default(),
        swift_module_names: section
            .swift_module_name
            .as_ref()
            .map(|s| s.to_vec())
            .unwrap_or_default(),
        debug_only: section.debug_only.unwrap_or(false),
    })
}
