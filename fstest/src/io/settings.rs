//! Optional `Settings.toml` in the user-data root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::debug;

use super::paths::CONFIG_FILE_NAME;

/// Largest side length a baseline JPEG can carry.
pub const MAX_IMAGE_SIZE: u32 = u16::MAX as u32;

/// Tunables for the sample artifacts a run produces.
///
/// Every field has a default, so a partial file (or none at all) is valid.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub sample: SampleSettings,
    pub image: ImageSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SampleSettings {
    /// File written into save-data by the setup phase.
    pub file_name: String,
    pub text: String,
}

impl Default for SampleSettings {
    fn default() -> Self {
        Self {
            file_name: "TestFile.txt".to_string(),
            text: "Hello World".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImageSettings {
    pub file_name: String,
    /// Width and height in pixels.
    pub size: u32,
    /// RGB fill color.
    pub color: [u8; 3],
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            file_name: "Image.jpg".to_string(),
            size: 128,
            color: [255, 0, 255],
            quality: 90,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        validate_file_name("sample.file_name", &self.sample.file_name)?;
        validate_file_name("image.file_name", &self.image.file_name)?;
        if self.sample.file_name == self.image.file_name {
            return Err(anyhow!("sample.file_name and image.file_name must differ"));
        }
        if self.image.size == 0 || self.image.size > MAX_IMAGE_SIZE {
            return Err(anyhow!("image.size must be within 1..={MAX_IMAGE_SIZE}"));
        }
        if !(1..=100).contains(&self.image.quality) {
            return Err(anyhow!("image.quality must be within 1..=100"));
        }
        Ok(())
    }
}

/// A bare file name that lands inside save-data without clobbering the
/// archived config.
fn validate_file_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("{field} must not be empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(anyhow!("{field} must be a bare file name, got {name:?}"));
    }
    if name.eq_ignore_ascii_case(CONFIG_FILE_NAME) {
        return Err(anyhow!("{field} must not be {CONFIG_FILE_NAME}"));
    }
    Ok(())
}

/// Load settings from a TOML file.
///
/// If the file is missing, returns `Settings::default()`.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(settings)
}
