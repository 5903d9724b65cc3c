// autolink-core/src/generate/devtools.rs
use autolink_aio::json_io::to_json_bytes;
use autolink_common::error::Result;
use autolink_common::model::ModuleDescriptorDevTools;

/// The manifest the dev-tools server reads to mount each plugin's webpage root.
pub fn render_manifest(plugins: &[&ModuleDescriptorDevTools]) -> Result<Vec<u8>> {
    to_json_bytes(plugins)
}
