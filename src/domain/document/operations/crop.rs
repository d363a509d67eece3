// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/crop.rs
//
// Crop model: normalized crop state over the source image.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constant::{MAX_ZOOM, MIN_ZOOM};
use crate::domain::document::core::raster::SourceRect;

/// How the source is fitted into the square target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Crop to fill the square; no background visible.
    #[default]
    Cover,
    /// Scale to fit inside the square; background shows around it.
    Pad,
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cover => write!(f, "cover"),
            Self::Pad => write!(f, "pad"),
        }
    }
}

impl FromStr for FillMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cover" => Ok(Self::Cover),
            "pad" | "contain" => Ok(Self::Pad),
            other => Err(format!("unknown fill mode {other:?} (expected cover or pad)")),
        }
    }
}

/// A single mutation of the crop model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CropCommand {
    /// Move the center by a delta in source pixels.
    Pan { dx: f64, dy: f64 },
    /// Set the zoom factor (clamped).
    SetZoom { zoom: f64 },
    /// Multiply the zoom factor (clamped).
    ScaleZoom { factor: f64 },
    /// Zoom 1, centered.
    Reset,
}

/// Clamp a zoom factor into the supported range. Non-finite input yields `None`.
pub fn clamp_zoom(zoom: f64) -> Option<f64> {
    zoom.is_finite().then(|| zoom.clamp(MIN_ZOOM, MAX_ZOOM))
}

/// Crop state in source pixel space.
///
/// The model is inert until [`CropModel::init`] has been called with the
/// source dimensions; commands before that are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct CropModel {
    center: Option<(f64, f64)>,
    zoom: f64,
    base_scale: f64,
    source_width: u32,
    source_height: u32,
    target_size: u32,
    mode: FillMode,
}

impl Default for CropModel {
    fn default() -> Self {
        Self {
            center: None,
            zoom: 1.0,
            base_scale: 1.0,
            source_width: 0,
            source_height: 0,
            target_size: 0,
            mode: FillMode::Cover,
        }
    }
}

impl CropModel {
    /// Scale that makes a `width` × `height` source fit or cover a `target` square at zoom 1.
    pub fn base_scale_for(width: u32, height: u32, target: u32, mode: FillMode) -> f64 {
        let sx = f64::from(target) / f64::from(width);
        let sy = f64::from(target) / f64::from(height);
        match mode {
            FillMode::Cover => sx.max(sy),
            FillMode::Pad => sx.min(sy),
        }
    }

    /// Bind the model to a source and target. Centers on the image if no center is set yet.
    pub fn init(&mut self, source_width: u32, source_height: u32, target_size: u32, mode: FillMode) {
        self.source_width = source_width;
        self.source_height = source_height;
        self.target_size = target_size;
        self.mode = mode;
        if !self.has_source() {
            return;
        }

        self.base_scale = Self::base_scale_for(source_width, source_height, target_size, mode);
        if self.center.is_none() {
            self.center = Some(self.image_center());
        }
        self.clamp_center();
    }

    /// Recompute for a new target size or fill mode, keeping zoom and center.
    pub fn reinit(&mut self, target_size: u32, mode: FillMode) {
        self.init(self.source_width, self.source_height, target_size, mode);
    }

    pub fn is_initialized(&self) -> bool {
        self.center.is_some() && self.has_source()
    }

    fn has_source(&self) -> bool {
        self.source_width > 0 && self.source_height > 0 && self.target_size > 0
    }

    fn image_center(&self) -> (f64, f64) {
        (
            f64::from(self.source_width) / 2.0,
            f64::from(self.source_height) / 2.0,
        )
    }

    pub fn center(&self) -> Option<(f64, f64)> {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn base_scale(&self) -> f64 {
        self.base_scale
    }

    pub fn target_size(&self) -> u32 {
        self.target_size
    }

    pub fn fill_mode(&self) -> FillMode {
        self.mode
    }

    pub fn source_size(&self) -> (u32, u32) {
        (self.source_width, self.source_height)
    }

    /// Effective scale from source to target pixels.
    pub fn scale(&self) -> f64 {
        self.base_scale * self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if let Some(zoom) = clamp_zoom(zoom) {
            self.zoom = zoom;
            self.clamp_center();
        }
    }

    pub fn scale_zoom(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    /// Add a source-pixel delta to the center, then re-clamp.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        if let Some((cx, cy)) = self.center {
            self.center = Some((cx + dx, cy + dy));
            self.clamp_center();
        }
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        if self.has_source() {
            self.center = Some(self.image_center());
            self.clamp_center();
        }
    }

    pub fn apply(&mut self, command: CropCommand) {
        match command {
            CropCommand::Pan { dx, dy } => self.pan(dx, dy),
            CropCommand::SetZoom { zoom } => self.set_zoom(zoom),
            CropCommand::ScaleZoom { factor } => self.scale_zoom(factor),
            CropCommand::Reset => self.reset(),
        }
    }

    /// Side of the square source window shown in cover mode.
    ///
    /// `target / (base_scale * zoom)` reduces to `min(w, h) / zoom` for the
    /// cover scale. Never wider than the short edge of the source, so zoom
    /// below 1.0 cannot expose area outside the image.
    pub fn crop_side(&self) -> f64 {
        let short = f64::from(self.source_width.min(self.source_height));
        (short / self.zoom).min(short)
    }

    /// Region of the source that is drawn into the target square.
    pub fn crop_window(&self) -> SourceRect {
        let (w, h) = (f64::from(self.source_width), f64::from(self.source_height));
        match self.mode {
            FillMode::Cover => {
                let side = self.crop_side();
                let (cx, cy) = self.center.unwrap_or_else(|| self.image_center());
                let x = (cx - side / 2.0).min(w - side).max(0.0);
                let y = (cy - side / 2.0).min(h - side).max(0.0);
                SourceRect::new(x, y, side, side)
            }
            FillMode::Pad => SourceRect::full(self.source_width, self.source_height),
        }
    }

    /// Size of the whole source scaled into target space (pad mode), rounded.
    pub fn pad_extent(&self) -> (u32, u32) {
        let scale = self.scale();
        (
            (f64::from(self.source_width) * scale).round() as u32,
            (f64::from(self.source_height) * scale).round() as u32,
        )
    }

    /// Convert a viewport-pixel delta to source pixels at the current zoom.
    pub fn viewport_to_source(&self, delta: f64, draw_size: u32) -> f64 {
        self.viewport_to_source_at(delta, draw_size, self.zoom)
    }

    /// Convert a viewport-pixel delta to source pixels at an explicit zoom.
    pub fn viewport_to_source_at(&self, delta: f64, draw_size: u32, zoom: f64) -> f64 {
        if draw_size == 0 {
            return 0.0;
        }
        delta * (f64::from(self.target_size) / f64::from(draw_size)) / (self.base_scale * zoom)
    }

    /// Keep the crop window inside the source. Pad mode never crops, so it is left alone.
    fn clamp_center(&mut self) {
        if self.mode != FillMode::Cover || !self.has_source() {
            return;
        }
        let Some((cx, cy)) = self.center else {
            return;
        };

        let half = self.crop_side() / 2.0;
        let (w, h) = (f64::from(self.source_width), f64::from(self.source_height));
        self.center = Some((cx.max(half).min(w - half), cy.max(half).min(h - half)));
    }
}
