// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/export.rs
//
// Encoding the final banner to PNG or WebP.

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::domain::document::operations::compose::ExportFormat;
use crate::error::ExportError;

/// Quality must be a finite value in 0.0..=1.0.
pub fn validate_quality(quality: f32) -> Result<(), ExportError> {
    if quality.is_finite() && (0.0..=1.0).contains(&quality) {
        Ok(())
    } else {
        Err(ExportError::InvalidQuality(quality))
    }
}

/// Encode `raster` to `format`.
///
/// Both encoders are lossless, so `quality` is validated but has no effect
/// on the output.
pub fn encode(raster: &RgbaImage, format: ExportFormat, quality: f32) -> Result<Vec<u8>, ExportError> {
    validate_quality(quality)?;
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCanvas);
    }

    let mut buffer = Vec::new();
    match format {
        ExportFormat::Png => PngEncoder::new(&mut buffer).write_image(
            raster.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        ExportFormat::Webp => {
            log::debug!("WebP output is lossless; quality {quality} unused");
            WebPEncoder::new_lossless(&mut buffer).write_image(
                raster.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )
        }
    }
    .map_err(|e| ExportError::Encode(e.to_string()))?;

    Ok(buffer)
}

/// Write encoded bytes to `path`, creating parent directories.
pub async fn write(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ExportError::Io(format!("{}: {e}", parent.display())))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| ExportError::Io(format!("{}: {e}", path.display())))
}
