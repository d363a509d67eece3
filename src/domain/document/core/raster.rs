// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/core/raster.rs
//
// Raster primitives: smoothed scaled drawing, rectangle fills and outlines.

use fast_image_resize as fr;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tiny_skia::{ColorU8, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform};

use super::color::Color;

/// Rectangle in source pixel space (fractional).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of a `width` × `height` bitmap.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, f64::from(width), f64::from(height))
    }
}

/// Rectangle in destination pixel space. May extend past the raster edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl DestRect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn square(x: i64, y: i64, side: u32) -> Self {
        Self::new(x, y, side, side)
    }
}

/// Rounds halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Premultiplies `image` into a pixmap. `None` for an empty image.
pub fn to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Unpremultiplies `pixmap` back into straight RGBA.
pub fn from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

/// Resamples `from` into a `width` × `height` raster with bilinear
/// convolution over premultiplied colors.
///
/// Only the pixel extent of `from` inside `src` is read, so nothing outside
/// the requested region bleeds into the edges. `None` when `from` does not
/// overlap `src` or the output would be empty.
pub fn resample(src: &RgbaImage, from: SourceRect, width: u32, height: u32) -> Option<RgbaImage> {
    let (src_w, src_h) = (f64::from(src.width()), f64::from(src.height()));
    let x0 = from.x.max(0.0);
    let y0 = from.y.max(0.0);
    let x1 = (from.x + from.width).min(src_w);
    let y1 = (from.y + from.height).min(src_h);
    if !(x1 > x0 && y1 > y0) || width == 0 || height == 0 {
        return None;
    }

    let (left, top) = (x0.floor(), y0.floor());
    let (right, bottom) = (x1.ceil(), y1.ceil());
    let extent = imageops::crop_imm(
        src,
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    )
    .to_image();

    match resize_box(&extent, (x0 - left, y0 - top, x1 - x0, y1 - y0), width, height) {
        Ok(scaled) => Some(scaled),
        Err(e) => {
            log::warn!("fast_image_resize failed, falling back to imageops::resize: {e}");
            Some(imageops::resize(&extent, width, height, FilterType::Triangle))
        }
    }
}

fn resize_box(
    extent: &RgbaImage,
    (left, top, box_w, box_h): (f64, f64, f64, f64),
    width: u32,
    height: u32,
) -> Result<RgbaImage, String> {
    let src = fr::images::Image::from_vec_u8(
        extent.width(),
        extent.height(),
        extent.as_raw().clone(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| e.to_string())?;
    let mut dst = fr::images::Image::new(width, height, fr::PixelType::U8x4);

    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Bilinear))
        .crop(left, top, box_w, box_h);
    fr::Resizer::new()
        .resize(&src, &mut dst, Some(&options))
        .map_err(|e| e.to_string())?;

    RgbaImage::from_raw(width, height, dst.into_vec())
        .ok_or_else(|| "resized buffer has the wrong length".to_owned())
}

/// Composites `src` onto `dst` with its top-left corner at (`x`, `y`), clipped.
pub fn draw(dst: &mut Pixmap, src: &Pixmap, x: i64, y: i64) {
    let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
        return;
    };
    dst.draw_pixmap(x, y, src.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
}

/// Draws `from` (a region of `src`) scaled into `to` on `dst`, compositing
/// source-over with smoothing always on.
pub fn draw_scaled(dst: &mut Pixmap, src: &RgbaImage, from: SourceRect, to: DestRect) {
    let Some(scaled) = resample(src, from, to.width, to.height) else {
        return;
    };
    if let Some(scaled) = to_pixmap(&scaled) {
        draw(dst, &scaled, to.x, to.y);
    }
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = false;
    paint
}

fn to_rect(rect: DestRect) -> Option<Rect> {
    Rect::from_xywh(rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32)
}

/// Replaces every pixel with `color`.
pub fn fill(dst: &mut Pixmap, color: Color) {
    dst.fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
}

/// Blends `color` over the part of `rect` inside `dst`.
pub fn fill_rect(dst: &mut Pixmap, rect: DestRect, color: Color) {
    if let Some(rect) = to_rect(rect) {
        dst.fill_rect(rect, &solid(color), Transform::identity(), None);
    }
}

/// Outlines `rect` with a stroke of `width` pixels centered on its edges.
pub fn stroke_rect(dst: &mut Pixmap, rect: DestRect, width: u32, color: Color) {
    let Some(bounds) = to_rect(rect) else {
        return;
    };
    if width == 0 {
        return;
    }
    let stroke = Stroke {
        width: width as f32,
        ..Stroke::default()
    };
    let path = PathBuilder::from_rect(bounds);
    dst.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
}
