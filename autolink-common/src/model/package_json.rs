// autolink-common/src/model/package_json.rs
use indexmap::IndexMap;
use serde::Deserialize;

use super::options::AutolinkingOptions;

/// The parts of a `package.json` the resolver reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    #[serde(default)]
    pub expo: Option<ExpoSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpoSection {
    #[serde(default)]
    pub autolinking: Option<AutolinkingOptions>,
}

impl PackageJson {
    pub fn autolinking(&self) -> Option<&AutolinkingOptions> {
        self.expo.as_ref().and_then(|e| e.autolinking.as_ref())
    }
}
