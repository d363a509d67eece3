// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/raster.rs
//
// Raster decoding: encoded bytes to an oriented RGBA source bitmap.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageReader, imageops};

use crate::domain::document::core::bitmap::SourceBitmap;
use crate::error::DecodeError;

/// Decode any format the `image` crate understands.
pub fn decode(bytes: &[u8]) -> Result<SourceBitmap, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Unreadable(e.to_string()))?;
    let document = reader
        .decode()
        .map_err(|e| DecodeError::Unreadable(e.to_string()))?;

    let document = apply_orientation(document, orientation(bytes));
    SourceBitmap::new(document.into_rgba8())
}

/// Decode on the blocking pool so the caller's loop stays responsive.
pub async fn decode_async(bytes: Vec<u8>) -> Result<SourceBitmap, DecodeError> {
    tokio::task::spawn_blocking(move || decode(&bytes))
        .await
        .map_err(|e| {
            log::error!("Decode task failed: {e}");
            DecodeError::Aborted
        })?
}

/// Read and decode a file.
pub async fn open(path: &Path) -> Result<SourceBitmap, DecodeError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DecodeError::Unreadable(format!("{}: {e}", path.display())))?;
    decode_async(bytes).await
}

/// EXIF orientation tag (1-8); 1 when absent.
#[cfg(feature = "exif")]
fn orientation(bytes: &[u8]) -> u32 {
    let Ok(exif) = exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) else {
        return 1;
    };
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .filter(|value| (1..=8).contains(value))
        .unwrap_or(1)
}

#[cfg(not(feature = "exif"))]
fn orientation(_bytes: &[u8]) -> u32 {
    1
}

/// Rotate/flip so the pixels match how the image is meant to be displayed.
fn apply_orientation(document: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => DynamicImage::ImageRgba8(imageops::flip_horizontal(&document)),
        3 => DynamicImage::ImageRgba8(imageops::rotate180(&document)),
        4 => DynamicImage::ImageRgba8(imageops::flip_vertical(&document)),
        5 => DynamicImage::ImageRgba8(imageops::flip_horizontal(&imageops::rotate90(&document))),
        6 => DynamicImage::ImageRgba8(imageops::rotate90(&document)),
        7 => DynamicImage::ImageRgba8(imageops::flip_horizontal(&imageops::rotate270(&document))),
        8 => DynamicImage::ImageRgba8(imageops::rotate270(&document)),
        _ => document,
    }
}
