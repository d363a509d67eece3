// SPDX-License-Identifier: GPL-3.0-or-later
// src/error.rs
//
// Error types for decoding, exporting, clipboard placement and settings IO.

use thiserror::Error;

/// The image could not be turned into a source bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("failed to decode image: {0}")]
    Unreadable(String),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("image decoding was aborted")]
    Aborted,
}

/// The composited canvas could not be encoded or written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("quality must be between 0.0 and 1.0, got {0}")]
    InvalidQuality(f32),

    #[error("the canvas has no pixels to export")]
    EmptyCanvas,

    #[error("failed to write image: {0}")]
    Io(String),
}

/// The raster could not be placed on the system clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is not supported on this platform")]
    Unsupported,

    #[error("clipboard access denied: {0}")]
    Denied(String),

    #[error("clipboard write failed: {0}")]
    Failed(String),
}

impl ClipboardError {
    /// Unsupported and denied share one user-facing message.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unsupported | Self::Denied(_))
    }
}

/// Reading or writing a settings file failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    #[error("settings file IO failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
