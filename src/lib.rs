// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Crop, zoom and composite an image onto a banner canvas.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod preferences;

pub use app::{App, AppMessage, UpdateResult};
pub use config::AppConfig;
pub use preferences::{Preferences, Theme};
