//! Test-only helpers for temp-rooted runs.

use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::io::fs::write_lines;
use crate::io::paths::AppPaths;
use crate::io::settings::Settings;
use crate::session::Orchestrator;

/// A user-data root inside a temp directory, removed on drop.
pub struct TestRoot {
    temp: TempDir,
    paths: AppPaths,
}

impl TestRoot {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp root")?;
        let paths = AppPaths::new(temp.path());
        Ok(Self { temp, paths })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Orchestrator over this root with default settings.
    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(self.paths.clone(), Settings::default())
    }

    /// Write `Config.txt` with the given entries.
    pub fn write_config(&self, entries: &[&str]) -> Result<()> {
        let lines: Vec<String> = entries.iter().map(|entry| entry.to_string()).collect();
        write_lines(&self.paths.config_path, &lines)
    }
}
