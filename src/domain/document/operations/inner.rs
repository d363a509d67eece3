// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/inner.rs
//
// Inner compositor: the square cover/pad image at the target size.

use image::RgbaImage;
use tiny_skia::Pixmap;

use super::crop::{CropModel, FillMode};
use crate::domain::document::core::bitmap::SourceBitmap;
use crate::domain::document::core::raster::{
    DestRect, SourceRect, draw_scaled, from_pixmap, round_half_up,
};

/// The square inner image, `target_size` × `target_size`. Always fully regenerated.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerRaster(RgbaImage);

impl InnerRaster {
    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        self.0.width()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    pub fn into_image(self) -> RgbaImage {
        self.0
    }
}

/// Render the inner image. `None` when the target size is zero or the crop
/// model has not been bound to a source yet.
pub fn render(source: &SourceBitmap, crop: &CropModel) -> Option<InnerRaster> {
    let target = crop.target_size();
    if target == 0 || !crop.is_initialized() {
        return None;
    }

    let mut raster = Pixmap::new(target, target)?;
    draw_into(&mut raster, source, crop, DestRect::square(0, 0, target));
    Some(InnerRaster(from_pixmap(&raster)))
}

/// Draw the inner composite into the square `frame` of `dst`, resampling
/// straight from the source at the frame's resolution.
pub fn draw_into(dst: &mut Pixmap, source: &SourceBitmap, crop: &CropModel, frame: DestRect) {
    let target = crop.target_size();
    if target == 0 || frame.width == 0 || !crop.is_initialized() {
        return;
    }

    match crop.fill_mode() {
        FillMode::Cover => draw_scaled(dst, source.pixels(), crop.crop_window(), frame),
        FillMode::Pad => {
            let (draw_w, draw_h) = crop.pad_extent();
            if draw_w == 0 || draw_h == 0 {
                return;
            }
            let t = f64::from(target);
            let dx = round_half_up((t - f64::from(draw_w)) / 2.0);
            let dy = round_half_up((t - f64::from(draw_h)) / 2.0);

            // Target space → frame space.
            let k = f64::from(frame.width) / t;
            let to = DestRect::new(
                frame.x + (dx * k).round() as i64,
                frame.y + (dy * k).round() as i64,
                (f64::from(draw_w) * k).round() as u32,
                (f64::from(draw_h) * k).round() as u32,
            );
            let (w, h) = source.dimensions();
            draw_scaled(dst, source.pixels(), SourceRect::full(w, h), to);
        }
    }
}
