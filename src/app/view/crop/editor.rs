// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/editor.rs
//
// Editor renderer: live crop preview inside a fixed-size viewport.

use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::constant::{
    DEFAULT_EDITOR_SIZE, EDITOR_BORDER_COLOR, EDITOR_BORDER_WIDTH, EDITOR_INSET, EDITOR_TINT_COLOR,
};
use crate::domain::document::core::bitmap::SourceBitmap;
use crate::domain::document::core::color::Color;
use crate::domain::document::core::raster::{
    DestRect, fill, fill_rect, from_pixmap, round_half_up, stroke_rect,
};
use crate::domain::document::operations::crop::CropModel;
use crate::domain::document::operations::inner;
use crate::preferences::Theme;

/// Size of the editor viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorViewport {
    pub width: u32,
    pub height: u32,
}

impl Default for EditorViewport {
    fn default() -> Self {
        Self::new(DEFAULT_EDITOR_SIZE, DEFAULT_EDITOR_SIZE)
    }
}

impl EditorViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Edge length of the crop preview square.
    pub fn draw_size(&self) -> u32 {
        self.width.min(self.height).saturating_sub(EDITOR_INSET)
    }

    /// The crop preview square, centered in the viewport.
    pub fn frame(&self) -> DestRect {
        let side = self.draw_size();
        let x = round_half_up(f64::from(self.width - side) / 2.0) as i64;
        let y = round_half_up(f64::from(self.height - side) / 2.0) as i64;
        DestRect::square(x, y, side)
    }
}

/// Render the viewport: page color and tint, then the crop preview and its
/// outline once an image is loaded.
pub fn render(
    viewport: EditorViewport,
    theme: Theme,
    source: Option<&SourceBitmap>,
    crop: &CropModel,
) -> RgbaImage {
    let Some(mut canvas) = Pixmap::new(viewport.width, viewport.height) else {
        return RgbaImage::new(viewport.width, viewport.height);
    };

    fill(&mut canvas, theme.page_color());
    let whole = DestRect::new(0, 0, viewport.width, viewport.height);
    fill_rect(&mut canvas, whole, Color::from_array(EDITOR_TINT_COLOR));

    let frame = viewport.frame();
    match source {
        Some(source) if frame.width > 0 && crop.is_initialized() => {
            // Straight from the source at preview resolution, not upscaled from the inner raster.
            inner::draw_into(&mut canvas, source, crop, frame);
            stroke_rect(
                &mut canvas,
                frame,
                EDITOR_BORDER_WIDTH,
                Color::from_array(EDITOR_BORDER_COLOR),
            );
        }
        _ => {}
    }

    from_pixmap(&canvas)
}
