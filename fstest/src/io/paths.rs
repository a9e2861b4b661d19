//! User-data root resolution and the fixed files beneath it.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tracing::{debug, info};

use super::fs::{create_dir, dir_exists};
use crate::core::folders::{FolderKind, FolderSet};

/// Directory created under the platform data dir.
pub const APP_DIR_NAME: &str = "FileSystemTest";
pub const CONFIG_FILE_NAME: &str = "Config.txt";
pub const SETTINGS_FILE_NAME: &str = "Settings.toml";
/// Overrides the user-data root when `--root` is not given.
pub const ROOT_ENV: &str = "FSTEST_ROOT";

/// Canonical paths within the user-data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub settings_path: PathBuf,
}

impl AppPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_path: root.join(CONFIG_FILE_NAME),
            settings_path: root.join(SETTINGS_FILE_NAME),
            root,
        }
    }

    /// Absolute path of `kind`'s folder.
    pub fn folder(&self, folders: &FolderSet, kind: FolderKind) -> PathBuf {
        self.root.join(folders.get(kind))
    }
}

/// Pick the user-data root: explicit path, then `FSTEST_ROOT`, then the
/// platform data dir joined with [`APP_DIR_NAME`].
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_root_with(explicit, env::var_os(ROOT_ENV))
}

/// [`resolve_root`] with the `FSTEST_ROOT` value supplied by the caller.
///
/// An empty value counts as unset.
pub fn resolve_root_with(explicit: Option<&Path>, env_root: Option<OsString>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(value) = env_root.filter(|value| !value.is_empty()) {
        debug!(env = ROOT_ENV, "using root from environment");
        return Ok(PathBuf::from(value));
    }
    let data_dir =
        dirs::data_dir().ok_or_else(|| anyhow!("no per-user data directory on this platform"))?;
    Ok(data_dir.join(APP_DIR_NAME))
}

/// Create the root if it is missing and return its paths.
pub fn ensure_root(root: &Path) -> Result<AppPaths> {
    if !dir_exists(root) {
        info!(root = %root.display(), "creating user-data root");
        create_dir(root)?;
    }
    Ok(AppPaths::new(root))
}
