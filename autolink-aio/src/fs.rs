/*
File: autolink-aio/src/fs.rs
Purpose: Primitive filesystem operations used by the resolver and the generators.
*/
use std::{
    fs::{self, Permissions},
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use autolink_common::error::{AutolinkError, Result};
use tempfile::NamedTempFile;
use tracing::{debug, error, warn};
use walkdir::WalkDir;

/// Resolves symlinks and relative components.
pub fn real_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(AutolinkError::from)
}

/// Reads the entire contents of a file into a string.
pub fn read_to_string(path: &Path) -> Result<String> {
    debug!("Reading file to string: {}", path.display());
    fs::read_to_string(path).map_err(AutolinkError::from)
}

/// Walks up from `start` (inclusive) and returns the first `file_name` found.
pub fn find_up(start: &Path, file_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}

/// Lists the direct children of a directory, following symlinks, sorted by name.
/// Entries that fail to read are skipped; failing to open the directory itself is an error.
pub fn list_directory_entries(
    dir_path: &Path,
) -> Result<Vec<(String, PathBuf, bool /* is_dir */)>> {
    debug!("Listing directory entries for: {}", dir_path.display());
    fs::read_dir(dir_path).map_err(|e| {
        debug!("Failed to read directory {}: {}", dir_path.display(), e);
        AutolinkError::from(e)
    })?;

    let mut entries = Vec::new();
    let walker = WalkDir::new(dir_path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry_res in walker {
        match entry_res {
            Ok(entry) => {
                let name = entry.file_name().to_string_lossy().to_string();
                let is_dir = entry.file_type().is_dir();
                entries.push((name, entry.into_path(), is_dir));
            }
            Err(e) => {
                warn!("Error reading entry in {}: {}", dir_path.display(), e);
            }
        }
    }
    Ok(entries)
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: u32) -> Result<()> {
    fs::set_permissions(path, Permissions::from_mode(mode)).map_err(AutolinkError::from)
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Atomically writes data to a file using a temporary file in the same directory.
/// Preserves original permissions if possible.
pub fn atomic_write_file(original_path: &Path, content: &[u8]) -> Result<()> {
    let dir = match original_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => {
            return Err(AutolinkError::InvalidTarget {
                path: original_path.to_path_buf(),
                message: "path has no parent directory".to_string(),
            })
        }
    };

    let original_perms = fs::metadata(original_path).map(|m| m.permissions()).ok();

    let mut temp_file = NamedTempFile::new_in(dir)?;
    let temp_path = temp_file.path().to_path_buf();

    debug!(
        "Atomically writing {} bytes to {} via temp file {}",
        content.len(),
        original_path.display(),
        temp_path.display()
    );

    temp_file.write_all(content)?;
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;

    temp_file.persist(original_path).map_err(|e| {
        error!(
            "Failed to persist temporary file {} over {}: {}",
            temp_path.display(),
            original_path.display(),
            e.error
        );
        AutolinkError::Io(Arc::new(e.error))
    })?;

    match original_perms {
        Some(perms) => {
            if let Err(e) = fs::set_permissions(original_path, perms) {
                warn!(
                    "Failed to restore original permissions on {}: {}",
                    original_path.display(),
                    e
                );
            }
        }
        None => {
            if let Err(e) = set_permissions(original_path, 0o644) {
                warn!(
                    "Failed to set default permissions on new file {}: {}",
                    original_path.display(),
                    e
                );
            }
        }
    }

    Ok(())
}

/// Writes `content` unless the file already holds exactly those bytes.
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, content: &[u8]) -> Result<bool> {
    if let Ok(existing) = fs::read(path) {
        if existing == content {
            debug!("{} is up to date, not rewriting", path.display());
            return Ok(false);
        }
    }
    atomic_write_file(path, content)?;
    Ok(true)
}

/// Async wrapper around [`write_if_changed`], run on the blocking pool.
pub async fn write_if_changed_async(path: &Path, content: Vec<u8>) -> Result<bool> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_if_changed(&path, &content))
        .await
        .map_err(|e| AutolinkError::Generic(format!("write task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_if_changed_skips_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Provider.swift");
        assert!(write_if_changed(&target, b"a").unwrap());
        assert!(!write_if_changed(&target, b"a").unwrap());
        assert!(write_if_changed(&target, b"b").unwrap());
        assert_eq!(fs::read_to_string(&target).unwrap(), "b");
    }

    #[test]
    fn list_directory_entries_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();
        let names: Vec<_> = list_directory_entries(dir.path())
            .unwrap()
            .into_iter()
            .map(|(name, _, is_dir)| (name, is_dir))
            .collect();
        assert_eq!(
            names,
            vec![
                ("a".to_string(), true),
                ("b".to_string(), true),
                ("c.txt".to_string(), false)
            ]
        );
    }

    #[test]
    fn find_up_walks_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(
            find_up(&nested, "package.json").unwrap(),
            dir.path().join("package.json")
        );
    }
}
