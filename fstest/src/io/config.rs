//! `Config.txt`: one relative folder path per line.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::fs::{file_exists, read_lines, write_lines};
use crate::core::folders::FolderSet;

/// Write `defaults` to `path` unless a config is already there.
///
/// Returns true when the file was created.
pub fn ensure_config(path: &Path, defaults: &FolderSet) -> Result<bool> {
    if file_exists(path) {
        debug!(path = %path.display(), "config already present");
        return Ok(false);
    }
    info!(path = %path.display(), "writing default config");
    write_config(path, defaults)?;
    Ok(true)
}

/// Read the folder set from `path`.
///
/// Fails with [`ConfigError::Malformed`](crate::error::ConfigError::Malformed)
/// unless there is exactly one line per folder kind.
pub fn load_config(path: &Path) -> Result<FolderSet> {
    let lines = read_lines(path)?;
    debug!(path = %path.display(), entries = lines.len(), "config read");
    let folders =
        FolderSet::from_entries(lines).with_context(|| format!("load config {}", path.display()))?;
    Ok(folders)
}

pub fn write_config(path: &Path, folders: &FolderSet) -> Result<()> {
    write_lines(path, folders.entries())
}
