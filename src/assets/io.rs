use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::TeamColorResult;
use crate::raster::buffer::PixelBuffer;

/// Decode encoded image bytes into straight RGBA8, whatever the source layout.
pub fn decode_image(bytes: &[u8]) -> TeamColorResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    PixelBuffer::from_image(dyn_img.to_rgba8())
}

/// Read and decode an image file into straight RGBA8.
pub fn load_image(path: &Path) -> TeamColorResult<PixelBuffer> {
    let dyn_img = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("sniff image format '{}'", path.display()))?
        .decode()
        .with_context(|| format!("decode image '{}'", path.display()))?;
    let buf = PixelBuffer::from_image(dyn_img.to_rgba8())?;
    tracing::debug!(path = %path.display(), w = buf.width(), h = buf.height(), "image loaded");
    Ok(buf)
}

/// Write a buffer; the format follows the file extension.
pub fn save_image(buf: &PixelBuffer, path: &Path) -> TeamColorResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer(
        path,
        buf.as_bytes(),
        buf.width(),
        buf.height(),
        image::ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

/// Path the glow output is saved under: `_glow` inserted before the extension.
pub fn glow_output_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_glow.{}", ext.to_string_lossy()),
        None => format!("{stem}_glow"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/io.rs"]
mod tests;
