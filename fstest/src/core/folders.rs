//! The ordered folder layout held in `Config.txt`.

use std::fmt;

use crate::error::ConfigError;

/// Folder roles, in the order their entries appear in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderKind {
    Workspace,
    Archive,
    Tmp,
    SaveData,
}

impl FolderKind {
    pub const ALL: [FolderKind; 4] = [
        FolderKind::Workspace,
        FolderKind::Archive,
        FolderKind::Tmp,
        FolderKind::SaveData,
    ];

    /// Position of this kind's entry in the config.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FolderKind::Workspace => "workspace",
            FolderKind::Archive => "archive",
            FolderKind::Tmp => "tmp",
            FolderKind::SaveData => "savedata",
        }
    }
}

impl fmt::Display for FolderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative folder paths, one per [`FolderKind`].
///
/// Construction checks the entry count, so lookups by kind never go out of
/// bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSet {
    entries: Vec<String>,
}

impl Default for FolderSet {
    fn default() -> Self {
        Self {
            entries: vec![
                "Workspace/".to_string(),
                "Workspace/Archive/".to_string(),
                "Workspace/Tmp/".to_string(),
                "Workspace/Tmp/SaveData/".to_string(),
            ],
        }
    }
}

impl FolderSet {
    /// Build a folder set from config lines, taken verbatim.
    pub fn from_entries(entries: Vec<String>) -> Result<Self, ConfigError> {
        if entries.len() != FolderKind::ALL.len() {
            return Err(ConfigError::Malformed {
                expected: FolderKind::ALL.len(),
                found: entries.len(),
            });
        }
        Ok(Self { entries })
    }

    pub fn get(&self, kind: FolderKind) -> &str {
        &self.entries[kind.index()]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries paired with their kind, in config order.
    pub fn iter(&self) -> impl Iterator<Item = (FolderKind, &str)> {
        FolderKind::ALL
            .into_iter()
            .zip(self.entries.iter().map(String::as_str))
    }
}
