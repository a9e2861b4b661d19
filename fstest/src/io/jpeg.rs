//! Solid-color placeholder image written into save-data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use tracing::debug;

use super::settings::ImageSettings;

/// Encode a `size`×`size` image filled with `color` as JPEG at `path`.
pub fn write_placeholder_jpeg(path: &Path, settings: &ImageSettings) -> Result<()> {
    debug!(path = %path.display(), size = settings.size, "encoding placeholder jpeg");
    let pixels = RgbImage::from_pixel(settings.size, settings.size, Rgb(settings.color));
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, settings.quality)
        .encode_image(&pixels)
        .with_context(|| format!("encode jpeg {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))
}
