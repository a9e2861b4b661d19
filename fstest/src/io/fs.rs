//! Thin filesystem access layer.
//!
//! Each helper wraps one OS primitive and attaches the path to any error.
//! Nothing here retries or recovers.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

/// Line separator used when writing line-based files.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Create `path` and any missing parents.
pub fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}

/// Recursively delete `path`.
pub fn delete_dir(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).with_context(|| format!("delete directory {}", path.display()))
}

/// Move a directory tree, copying across filesystems when a rename cannot.
pub fn move_dir(from: &Path, to: &Path) -> Result<()> {
    debug!(from = %from.display(), to = %to.display(), "moving directory");
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::CrossesDevices => {
            copy_tree(from, to)?;
            delete_dir(from)
        }
        Err(err) => Err(err).with_context(|| {
            format!("move directory {} to {}", from.display(), to.display())
        }),
    }
}

/// Read a text file as lines; `\n` and `\r\n` endings are both accepted.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(contents.lines().map(str::to_string).collect())
}

/// Write `lines`, each terminated by [`LINE_ENDING`].
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut buf = String::new();
    for line in lines {
        buf.push_str(line);
        buf.push_str(LINE_ENDING);
    }
    write_text(path, &buf)
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

/// Copy a file, overwriting `to`. Returns the number of bytes copied.
pub fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    fs::copy(from, to)
        .with_context(|| format!("copy {} to {}", from.display(), to.display()))
}

/// Move a file, replacing `to` if it exists.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    debug!(from = %from.display(), to = %to.display(), "moving file");
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::CrossesDevices => {
            copy_file(from, to)?;
            fs::remove_file(from).with_context(|| format!("delete {}", from.display()))
        }
        Err(err) => Err(err)
            .with_context(|| format!("move {} to {}", from.display(), to.display())),
    }
}

pub fn file_size(path: &Path) -> Result<u64> {
    let meta = fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    Ok(meta.len())
}

/// Last path component, ignoring a trailing separator.
pub fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

pub fn file_name_without_extension(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}

/// Extension including the leading dot (`.txt`), or empty when there is none.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

pub fn directory_name(path: &Path) -> Option<&Path> {
    path.parent()
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from) {
        let entry = entry.with_context(|| format!("walk {}", from.display()))?;
        let rel = entry
            .path()
            .strip_prefix(from)
            .with_context(|| format!("relativize {}", entry.path().display()))?;
        let target = to.join(rel);
        if entry.file_type().is_dir() {
            create_dir(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}
