// autolink-core/src/merge/mod.rs
//! Pure per-platform normalization of a raw module config. No I/O happens here;
//! every string-or-list field leaves this module as an ordered list.
pub mod android;
pub mod apple;

use autolink_common::model::module_config::RawExpoModuleConfig;
use autolink_common::platform::{PlatformFamily, SupportedPlatform};

pub use android::{merge_android, AndroidConfig};
pub use apple::{merge_apple, AppleConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevToolsConfig {
    pub webpage_root: Option<String>,
}

/// One normalized per-platform view of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergedConfig {
    Android(AndroidConfig),
    Apple(AppleConfig),
    DevTools(DevToolsConfig),
}

/// `None` when the package has nothing to contribute for `platform`.
pub fn merge_for_platform(
    raw: &RawExpoModuleConfig,
    platform: SupportedPlatform,
) -> Option<MergedConfig> {
    match platform.family() {
        PlatformFamily::Android => Some(MergedConfig::Android(merge_android(raw))),
        PlatformFamily::Apple => merge_apple(raw).map(MergedConfig::Apple),
        PlatformFamily::DevTools => raw.devtools.as_ref().map(|devtools| {
            MergedConfig::DevTools(DevToolsConfig {
                webpage_root: devtools.webpage_root.clone(),
            })
        }),
        PlatformFamily::None => None,
    }
}
