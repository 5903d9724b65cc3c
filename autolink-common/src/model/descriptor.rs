// autolink-common/src/model/descriptor.rs
//! Platform descriptors handed to the provider generators.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::platform::PlatformFamily;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAndroidProjectInfo {
    pub name: String,
    pub source_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAndroidPluginInfo {
    pub id: String,
    pub source_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAndroidAarProjectInfo {
    pub name: String,
    pub aar_file_path: PathBuf,
    pub project_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptorAndroid {
    pub package_name: String,
    pub projects: Vec<ModuleAndroidProjectInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<ModuleAndroidPluginInfo>,
    pub modules: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aar_projects: Vec<ModuleAndroidAarProjectInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleIosPodspecInfo {
    pub pod_name: String,
    pub podspec_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptorIos {
    pub package_name: String,
    pub pods: Vec<ModuleIosPodspecInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Map<String, Value>>,
    pub swift_module_names: Vec<String>,
    pub modules: Vec<String>,
    pub app_delegate_subscribers: Vec<String>,
    pub react_delegate_handlers: Vec<String>,
    pub debug_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptorDevTools {
    pub package_name: String,
    pub package_root: PathBuf,
    pub webpage_root: PathBuf,
}

/// Exactly one platform family per descriptor. Serialized without a tag so the
/// JSON matches what the build tooling already reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleDescriptor {
    Android(ModuleDescriptorAndroid),
    Apple(ModuleDescriptorIos),
    DevTools(ModuleDescriptorDevTools),
}

impl ModuleDescriptor {
    pub fn package_name(&self) -> &str {
        match self {
            Self::Android(d) => &d.package_name,
            Self::Apple(d) => &d.package_name,
            Self::DevTools(d) => &d.package_name,
        }
    }

    pub fn family(&self) -> PlatformFamily {
        match self {
            Self::Android(_) => PlatformFamily::Android,
            Self::Apple(_) => PlatformFamily::Apple,
            Self::DevTools(_) => PlatformFamily::DevTools,
        }
    }

    pub fn as_android(&self) -> Option<&ModuleDescriptorAndroid> {
        match self {
            Self::Android(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_apple(&self) -> Option<&ModuleDescriptorIos> {
        match self {
            Self::Apple(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_devtools(&self) -> Option<&ModuleDescriptorDevTools> {
        match self {
            Self::DevTools(d) => Some(d),
            _ => None,
        }
    }
}
