// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Application constants that should not be changed by the user.

/// Smallest crop zoom factor (50%).
pub const MIN_ZOOM: f64 = 0.5;

/// Largest crop zoom factor (500%).
pub const MAX_ZOOM: f64 = 5.0;

/// Relative zoom change applied per mouse wheel tick.
pub const WHEEL_ZOOM_STEP: f64 = 0.06;

/// Total inset (both sides) between the editor viewport edge and the crop preview.
pub const EDITOR_INSET: u32 = 8;

/// Stroke width of the crop boundary outline in the editor viewport.
pub const EDITOR_BORDER_WIDTH: u32 = 2;

/// Outline color of the crop boundary, rgba(255, 255, 255, 0.95).
pub const EDITOR_BORDER_COLOR: [u8; 4] = [255, 255, 255, 242];

/// Neutral tint painted over the editor viewport, rgba(0, 0, 0, 0.06).
pub const EDITOR_TINT_COLOR: [u8; 4] = [0, 0, 0, 15];

/// Page color behind the editor viewport for the dark theme.
pub const DARK_PAGE_COLOR: [u8; 4] = [0x1e, 0x1f, 0x24, 255];

/// Page color behind the editor viewport for the light theme.
pub const LIGHT_PAGE_COLOR: [u8; 4] = [0xf5, 0xf6, 0xf8, 255];

/// Preference key under which the theme is stored.
pub const THEME_KEY: &str = "img2banner-theme";

/// Application directory name under the platform config directory.
pub const CONFIG_DIR: &str = "img2banner";

/// Configuration file name.
pub const CONFIG_FILE: &str = "config.json";

/// Preference (key-value) file name.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Default output canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 300;

/// Default output canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 200;

/// Default inner (crop target) size in pixels.
pub const DEFAULT_INNER_SIZE: u32 = 100;

/// Default export quality handed to the encoder.
pub const DEFAULT_EXPORT_QUALITY: f32 = 0.92;

/// Default editor viewport edge length in pixels.
pub const DEFAULT_EDITOR_SIZE: u32 = 360;
