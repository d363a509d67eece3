// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Editing session: state, dispatch, loading and export.

pub mod document;
pub mod message;
pub mod model;
pub mod update;
pub mod view;

use std::path::{Path, PathBuf};

pub use message::AppMessage;
pub use model::{AppModel, LoadTicket, Notice, NoticeKind};
pub use update::UpdateResult;

use crate::app::document::{ClipboardSink, export, raster};
use crate::config::AppConfig;
use crate::domain::document::ExportFormat;
use crate::error::{ClipboardError, ExportError};
use crate::fl;
use crate::preferences::Theme;

/// One editing session over a single source image.
pub struct App {
    pub model: AppModel,
}

impl App {
    pub fn new(config: &AppConfig, theme: Theme) -> Self {
        Self {
            model: AppModel::new(config, theme),
        }
    }

    pub fn update(&mut self, message: AppMessage) -> UpdateResult {
        update::update(&mut self.model, message)
    }

    /// Reserve a ticket for a new load. Results for older tickets are dropped.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.model.latest_ticket = LoadTicket(self.model.latest_ticket.0 + 1);
        self.model.latest_ticket
    }

    /// Start decoding `bytes`. The returned future resolves to the message to
    /// feed back through [`App::update`].
    pub fn load_bytes(&mut self, bytes: Vec<u8>) -> impl Future<Output = AppMessage> + Send + use<> {
        let ticket = self.begin_load();
        log::info!("Loading image ({} bytes)", bytes.len());
        async move {
            AppMessage::ImageDecoded {
                ticket,
                result: raster::decode_async(bytes).await,
            }
        }
    }

    /// Start reading and decoding the file at `path`.
    pub fn open(&mut self, path: PathBuf) -> impl Future<Output = AppMessage> + Send + use<> {
        let ticket = self.begin_load();
        log::info!("Loading image {}", path.display());
        async move {
            AppMessage::ImageDecoded {
                ticket,
                result: raster::open(&path).await,
            }
        }
    }

    /// Encode the current output raster.
    pub fn export(&mut self, format: ExportFormat, quality: f32) -> Result<Vec<u8>, ExportError> {
        let result = export::encode(&self.model.final_raster, format, quality);
        match &result {
            Ok(bytes) => log::info!("Exported {} ({} bytes)", format.mime_type(), bytes.len()),
            Err(e) => {
                log::error!("Export failed: {e}");
                self.model.set_notice(Notice::error(fl!("export-failed")));
            }
        }
        result
    }

    /// Encode and write the output raster. Without an explicit format it is
    /// taken from the file extension, then from the configured format.
    pub async fn save(
        &mut self,
        path: &Path,
        format: Option<ExportFormat>,
        quality: f32,
    ) -> Result<ExportFormat, ExportError> {
        let format = format
            .or_else(|| ExportFormat::from_path(path))
            .unwrap_or(self.model.output.export_format);
        let bytes = self.export(format, quality)?;

        if let Err(e) = export::write(path, &bytes).await {
            log::error!("Export failed: {e}");
            self.model.set_notice(Notice::error(fl!("export-failed")));
            return Err(e);
        }

        let path = path.display().to_string();
        self.model.set_notice(Notice::info(fl!("saved-file", path = path)));
        Ok(format)
    }

    /// Place the output raster on `sink` as an image.
    pub fn copy_to_clipboard(&mut self, sink: &mut dyn ClipboardSink) -> Result<(), ClipboardError> {
        match sink.set_image(&self.model.final_raster) {
            Ok(()) => {
                self.model.set_notice(Notice::info(fl!("copied-png")));
                Ok(())
            }
            Err(e) => {
                log::error!("Clipboard write failed: {e}");
                let message = if e.is_unavailable() {
                    fl!("copy-unsupported")
                } else {
                    fl!("copy-failed")
                };
                self.model.set_notice(Notice::error(message));
                Err(e)
            }
        }
    }
}
