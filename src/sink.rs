//! Output persistence: [`Bitmap`] → PNG or JPEG file.
//!
//! The format comes from the output path: a `png` extension (any case)
//! selects PNG, everything else JPEG. JPEG has no alpha channel, so alpha
//! is dropped rather than composited.
//!
//! Encoding happens fully in memory before the file is created, so an
//! encoder failure never leaves a truncated file behind.

use crate::imaging::{Bitmap, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to encode {format}: {reason}")]
    EncodeFailed {
        format: OutputFormat,
        reason: String,
    },
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if is_png { Self::Png } else { Self::Jpeg }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
        })
    }
}

/// Encode `bitmap` into an in-memory file of the given format.
pub fn encode(
    bitmap: &Bitmap,
    format: OutputFormat,
    quality: Quality,
) -> Result<Vec<u8>, SinkError> {
    let failed = |e: image::ImageError| SinkError::EncodeFailed {
        format,
        reason: e.to_string(),
    };
    let (width, height) = (bitmap.width(), bitmap.height());
    let mut out = Vec::new();

    match format {
        OutputFormat::Png => PngEncoder::new(&mut out)
            .write_image(bitmap.pixels(), width, height, ExtendedColorType::Rgba8)
            .map_err(failed)?,
        OutputFormat::Jpeg => {
            let rgb: Vec<u8> = bitmap
                .pixels()
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            JpegEncoder::new_with_quality(&mut out, quality.value())
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(failed)?
        }
    }

    Ok(out)
}

/// Encode and write `bitmap` to `path`.
pub fn save(bitmap: &Bitmap, path: &Path, quality: Quality) -> Result<OutputFormat, SinkError> {
    let format = OutputFormat::from_path(path);
    let bytes = encode(bitmap, format, quality)?;
    log::debug!(
        "Writing {} bytes of {format} to {}",
        bytes.len(),
        path.display()
    );
    std::fs::write(path, bytes).map_err(|e| SinkError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(format)
}
