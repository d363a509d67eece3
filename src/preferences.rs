// SPDX-License-Identifier: GPL-3.0-or-later
// src/preferences.rs
//
// Theme preference stored in a flat key-value file.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constant::{CONFIG_DIR, DARK_PAGE_COLOR, LIGHT_PAGE_COLOR, PREFERENCES_FILE, THEME_KEY};
use crate::domain::document::core::color::Color;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Page color behind the editor viewport.
    pub fn page_color(self) -> Color {
        match self {
            Self::Dark => Color::from_array(DARK_PAGE_COLOR),
            Self::Light => Color::from_array(LIGHT_PAGE_COLOR),
        }
    }

    /// Localized display name.
    pub fn label(self) -> String {
        match self {
            Self::Dark => crate::fl!("theme-dark"),
            Self::Light => crate::fl!("theme-light"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown theme {other:?} (expected dark or light)")),
        }
    }
}

/// Process-wide string preferences. Writes go straight to disk when the
/// store is file-backed.
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl Preferences {
    /// `<config_dir>/img2banner/preferences.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(CONFIG_DIR).join(PREFERENCES_FILE))
    }

    /// Open the store at the default location. Falls back to an in-memory
    /// store when the platform has no config directory.
    pub fn open_default() -> Self {
        match Self::default_path() {
            Ok(path) => Self::open(path),
            Err(e) => {
                log::warn!("Preferences unavailable, using in-memory store: {e}");
                Self::in_memory()
            }
        }
    }

    /// Open a file-backed store. A missing file is an empty store; an
    /// unreadable one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_values(&path) {
            Ok(values) => values,
            Err(e) => {
                log::warn!("Ignoring preferences at {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        Self {
            path: Some(path),
            values,
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.values.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    /// Stored theme; dark when unset or unrecognized.
    pub fn theme(&self) -> Theme {
        self.get(THEME_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), ConfigError> {
        self.set(THEME_KEY, theme.as_str())
    }

    /// Flip and persist the theme, returning the new one.
    pub fn toggle_theme(&mut self) -> Result<Theme, ConfigError> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    fn flush(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("img2banner-prefs-{}-{name}", std::process::id()))
            .join(PREFERENCES_FILE)
    }

    #[test]
    fn unset_theme_defaults_to_dark() {
        assert_eq!(Preferences::in_memory().theme(), Theme::Dark);
    }

    #[test]
    fn unknown_value_defaults_to_dark() {
        let mut prefs = Preferences::in_memory();
        prefs.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn toggle_flips_and_returns_new_theme() {
        let mut prefs = Preferences::in_memory();
        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(prefs.get(THEME_KEY), Some("light"));
        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn theme_persists_under_fixed_key() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        let mut prefs = Preferences::open(&path);
        prefs.set_theme(Theme::Light).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"img2banner-theme\": \"light\""), "{raw}");
        assert_eq!(Preferences::open(&path).theme(), Theme::Light);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_is_ignored() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        assert_eq!(Preferences::open(&path).theme(), Theme::Dark);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!(" Light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
