// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Application state.

use image::RgbaImage;

use crate::app::view::crop::{EditorViewport, GestureTranslator, editor};
use crate::config::AppConfig;
use crate::domain::document::operations::inner;
use crate::domain::document::{
    CropModel, FillMode, FinalRaster, InnerRaster, OutputConfig, SourceBitmap, compose,
};
use crate::preferences::Theme;

// =============================================================================
// Notices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A user-facing message, localized at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info<S: Into<String>>(message: S) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Identifies one requested load. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadTicket(pub(crate) u64);

// =============================================================================
// Model
// =============================================================================

pub struct AppModel {
    // Document.
    pub source: Option<SourceBitmap>,
    pub crop: CropModel,

    // Inner image.
    pub target_size: u32,
    pub fill_mode: FillMode,

    // Output.
    pub output: OutputConfig,
    pub export_quality: f32,

    // Editor.
    pub viewport: EditorViewport,
    pub gestures: GestureTranslator,
    pub theme: Theme,

    // Derived rasters, rebuilt by `recompute`.
    pub inner: Option<InnerRaster>,
    pub editor_frame: RgbaImage,
    pub final_raster: FinalRaster,

    // Loading.
    pub(crate) latest_ticket: LoadTicket,

    // UI state.
    pub notice: Option<Notice>,
    pub tick: u64,
}

impl AppModel {
    pub fn new(config: &AppConfig, theme: Theme) -> Self {
        let mut model = Self {
            source: None,
            crop: CropModel::default(),
            target_size: config.target_size(),
            fill_mode: config.fill_mode,
            output: config.output_config(),
            export_quality: config.export_quality,
            viewport: EditorViewport::new(config.editor_width, config.editor_height),
            gestures: GestureTranslator::default(),
            theme,
            inner: None,
            editor_frame: RgbaImage::new(0, 0),
            final_raster: FinalRaster::new(0, 0),
            latest_ticket: LoadTicket::default(),
            notice: None,
            tick: 0,
        };
        model.recompute();
        model
    }

    pub fn set_notice(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => log::info!("{}", notice.message),
            NoticeKind::Error => log::error!("{}", notice.message),
        }
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Zoom as the whole percent shown next to the slider.
    pub fn zoom_percent(&self) -> u32 {
        (self.crop.zoom() * 100.0).round() as u32
    }

    /// Replace the source and reset the crop onto it.
    pub fn set_source(&mut self, source: SourceBitmap) {
        let (width, height) = source.dimensions();
        self.crop = CropModel::default();
        self.crop.init(width, height, self.target_size, self.fill_mode);
        self.gestures.cancel();
        self.source = Some(source);
    }

    pub fn clear_source(&mut self) {
        self.source = None;
        self.crop = CropModel::default();
        self.gestures.cancel();
    }

    /// Rebuild the inner raster, the editor frame and the output raster from
    /// the current state.
    pub fn recompute(&mut self) {
        self.inner = self
            .source
            .as_ref()
            .and_then(|source| inner::render(source, &self.crop));
        self.editor_frame =
            editor::render(self.viewport, self.theme, self.source.as_ref(), &self.crop);
        self.final_raster = compose(&self.output, self.inner.as_ref());
        self.tick += 1;
        log::debug!(
            "recompute #{}: zoom {:.3}, center {:?}",
            self.tick,
            self.crop.zoom(),
            self.crop.center()
        );
    }
}
