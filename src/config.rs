// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// User defaults for the banner canvas, crop and export, stored as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::constant::{
    CONFIG_DIR, CONFIG_FILE, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_EDITOR_SIZE,
    DEFAULT_EXPORT_QUALITY, DEFAULT_INNER_SIZE,
};
use crate::domain::document::core::color::Color;
use crate::domain::document::operations::compose::{ExportFormat, OutputConfig};
use crate::domain::document::operations::crop::FillMode;
use crate::error::ConfigError;

/// Global configuration for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output canvas width in pixels.
    pub canvas_width: u32,
    /// Output canvas height in pixels.
    pub canvas_height: u32,
    /// Edge length of the square inner image.
    pub inner_size: u32,
    /// Leave the background clear instead of filling it.
    pub transparent: bool,
    /// Background fill, ignored while `transparent` is set.
    #[serde(deserialize_with = "lenient_color")]
    pub background: Color,
    pub fill_mode: FillMode,
    /// Initial crop zoom in percent (50..=500).
    pub zoom_percent: f64,
    pub export_format: ExportFormat,
    /// Encoder quality, 0.0..=1.0.
    pub export_quality: f32,
    pub editor_width: u32,
    pub editor_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            inner_size: DEFAULT_INNER_SIZE,
            transparent: false,
            background: Color::WHITE,
            fill_mode: FillMode::Cover,
            zoom_percent: 100.0,
            export_format: ExportFormat::Png,
            export_quality: DEFAULT_EXPORT_QUALITY,
            editor_width: DEFAULT_EDITOR_SIZE,
            editor_height: DEFAULT_EDITOR_SIZE,
        }
    }
}

impl AppConfig {
    /// `<config_dir>/img2banner/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults on any failure.
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::warn!("Using default config: {e}");
                Self::default()
            }
        }
    }

    /// Load from `path`. A missing file yields defaults silently; a malformed
    /// one is logged and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Output canvas settings derived from this config.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            transparent: self.transparent,
            background: self.background,
            export_format: self.export_format,
        }
    }

    /// Initial zoom factor (`zoom_percent / 100`).
    pub fn zoom_factor(&self) -> f64 {
        self.zoom_percent / 100.0
    }

    /// Edge length of the inner image; zero falls back to the default.
    pub fn target_size(&self) -> u32 {
        inner_size_or_default(self.inner_size)
    }
}

pub(crate) fn inner_size_or_default(size: u32) -> u32 {
    if size == 0 { DEFAULT_INNER_SIZE } else { size }
}

/// An unparseable color falls back to the default background rather than
/// rejecting the whole file.
fn lenient_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_else(|e| {
        log::warn!("{e}, using {}", Color::WHITE);
        Color::WHITE
    }))
}
