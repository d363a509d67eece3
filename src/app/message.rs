// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Application messages: editor input, settings changes and load results.

use crate::app::model::LoadTicket;
use crate::app::view::crop::EditorEvent;
use crate::domain::document::{Color, CropCommand, ExportFormat, FillMode, SourceBitmap};
use crate::error::DecodeError;
use crate::preferences::Theme;

#[derive(Debug, Clone)]
pub enum AppMessage {
    // Editor viewport input.
    Editor(EditorEvent),

    // Direct crop operations (zoom slider, reset button, replay).
    Crop(CropCommand),
    SetZoomPercent(f64),

    // Inner image.
    SetTargetSize(u32),
    SetFillMode(FillMode),

    // Output canvas.
    SetCanvasSize { width: u32, height: u32 },
    SetTransparent(bool),
    SetBackground(Color),
    SetExportFormat(ExportFormat),

    // Editor viewport geometry.
    SetViewportSize { width: u32, height: u32 },

    // Loading.
    ImageDecoded {
        ticket: LoadTicket,
        result: Result<SourceBitmap, DecodeError>,
    },
    ClearImage,

    // Theme.
    SetTheme(Theme),
    ToggleTheme,

    // Notices.
    ClearNotice,
}
