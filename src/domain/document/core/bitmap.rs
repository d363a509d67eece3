// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/core/bitmap.rs
//
// Immutable decoded source image.

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::DecodeError;

/// A decoded source image. Cloning shares the pixel buffer.
#[derive(Clone)]
pub struct SourceBitmap {
    pixels: Arc<RgbaImage>,
}

impl SourceBitmap {
    /// Wrap decoded pixels; empty images are rejected.
    pub fn new(pixels: RgbaImage) -> Result<Self, DecodeError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(DecodeError::ZeroDimensions);
        }
        Ok(Self {
            pixels: Arc::new(pixels),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Returns the native pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl fmt::Debug for SourceBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceBitmap({}x{})", self.width(), self.height())
    }
}

impl PartialEq for SourceBitmap {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels) || *self.pixels == *other.pixels
    }
}
