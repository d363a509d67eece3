// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/update.rs
//
// Message dispatch: apply one message, then recompute derived rasters.

use crate::app::message::AppMessage;
use crate::app::model::{AppModel, Notice};
use crate::app::view::crop::{EditorViewport, EventStatus};
use crate::config::inner_size_or_default;
use crate::domain::document::CropCommand;
use crate::fl;
use crate::preferences::Theme;

/// What the caller should do after a message has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    /// Nothing changed.
    None,
    /// State changed and the rasters were rebuilt.
    Redrawn,
    /// An editor event was consumed; stop propagating it.
    Captured { redrawn: bool },
    /// The theme changed and should be persisted.
    ThemeChanged(Theme),
}

pub fn update(model: &mut AppModel, message: AppMessage) -> UpdateResult {
    match message {
        AppMessage::Editor(event) => {
            let draw_size = model.viewport.draw_size();
            let gesture = model.gestures.translate(&event, &model.crop, draw_size);
            if gesture.status == EventStatus::Ignored {
                return UpdateResult::None;
            }
            let redrawn = !gesture.commands.is_empty();
            for command in gesture.commands {
                model.crop.apply(command);
            }
            if redrawn {
                model.recompute();
            }
            UpdateResult::Captured { redrawn }
        }

        AppMessage::Crop(command) => {
            if !model.has_image() {
                return UpdateResult::None;
            }
            model.crop.apply(command);
            redraw(model)
        }

        AppMessage::SetZoomPercent(percent) => {
            if !model.has_image() {
                return UpdateResult::None;
            }
            model.crop.apply(CropCommand::SetZoom {
                zoom: percent / 100.0,
            });
            redraw(model)
        }

        AppMessage::SetTargetSize(size) => {
            let size = inner_size_or_default(size);
            model.target_size = size;
            model.crop.reinit(size, model.fill_mode);
            redraw(model)
        }

        AppMessage::SetFillMode(mode) => {
            model.fill_mode = mode;
            model.crop.reinit(model.target_size, mode);
            redraw(model)
        }

        AppMessage::SetCanvasSize { width, height } => {
            model.output.canvas_width = width;
            model.output.canvas_height = height;
            redraw(model)
        }

        AppMessage::SetTransparent(transparent) => {
            model.output.transparent = transparent;
            redraw(model)
        }

        AppMessage::SetBackground(color) => {
            model.output.background = color;
            redraw(model)
        }

        AppMessage::SetExportFormat(format) => {
            // Encoding only; no raster depends on it.
            model.output.export_format = format;
            UpdateResult::None
        }

        AppMessage::SetViewportSize { width, height } => {
            model.viewport = EditorViewport::new(width, height);
            redraw(model)
        }

        AppMessage::ImageDecoded { ticket, result } => {
            if ticket < model.latest_ticket {
                log::debug!("Discarding stale decode {ticket:?}, latest is {:?}", model.latest_ticket);
                return UpdateResult::None;
            }
            match result {
                Ok(source) => {
                    let (width, height) = source.dimensions();
                    log::info!("Loaded image {width}x{height}");
                    model.set_source(source);
                    model.clear_notice();
                    redraw(model)
                }
                Err(e) => {
                    log::error!("Failed to load image: {e}");
                    model.set_notice(Notice::error(fl!("decode-failed")));
                    UpdateResult::None
                }
            }
        }

        AppMessage::ClearImage => {
            if !model.has_image() {
                return UpdateResult::None;
            }
            model.clear_source();
            redraw(model)
        }

        AppMessage::SetTheme(theme) => set_theme(model, theme),

        AppMessage::ToggleTheme => set_theme(model, model.theme.toggled()),

        AppMessage::ClearNotice => {
            model.clear_notice();
            UpdateResult::None
        }
    }
}

fn redraw(model: &mut AppModel) -> UpdateResult {
    model.recompute();
    UpdateResult::Redrawn
}

fn set_theme(model: &mut AppModel, theme: Theme) -> UpdateResult {
    if model.theme == theme {
        return UpdateResult::None;
    }
    model.theme = theme;
    model.recompute();
    UpdateResult::ThemeChanged(theme)
}
