//! Source image decoding and JPEG export of painted canvases

use crate::io::error::{ArtError, Result};
use crate::spatial::Canvas;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageBuffer, Rgba};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Decoded source image with 16 bits per channel
pub type SourceImage = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Decode an image file into a 16-bit RGBA buffer
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a supported image format
pub fn load_source(path: &Path) -> Result<SourceImage> {
    let img = image::open(path).map_err(|e| ArtError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba16())
}

/// Create the parent directory of `path` if it does not exist yet
///
/// # Errors
///
/// Returns an error if the directory cannot be created
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ArtError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Write a canvas as a JPEG image; the alpha channel is dropped
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The output file cannot be created
/// - JPEG encoding fails
pub fn export_canvas(canvas: &Canvas, output_path: &Path, quality: u8) -> Result<()> {
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(|e| ArtError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;

    let rgb = DynamicImage::ImageRgba8(canvas.to_rgba8()).to_rgb8();
    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality.clamp(1, 100));
    encoder
        .encode_image(&rgb)
        .map_err(|e| ArtError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
