// autolink-aio/src/json_io.rs
use std::path::Path;

use autolink_common::error::{AutolinkError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Reads and deserializes data from a JSON file.
pub fn read_json_sync<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Sync Reading JSON from: {}", path.display());
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader).map_err(AutolinkError::from)
}

/// Serializes `data` as pretty JSON with a trailing newline.
pub fn to_json_bytes<T: Serialize + ?Sized>(data: &T) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(data)?;
    bytes.push(b'\n');
    Ok(bytes)
}
