// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/compose.rs
//
// Output compositor: background plus the centered inner image.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::RgbaImage;
use tiny_skia::Pixmap;
use serde::{Deserialize, Serialize};

use super::inner::InnerRaster;
use crate::constant::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::domain::document::core::color::Color;
use crate::domain::document::core::raster::{draw, fill, from_pixmap, round_half_up, to_pixmap};

/// The final banner, `canvas_width` × `canvas_height`.
pub type FinalRaster = RgbaImage;

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Webp,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "image/png" => Ok(Self::Png),
            "webp" | "image/webp" => Ok(Self::Webp),
            other => Err(format!("unsupported export format {other:?} (expected png or webp)")),
        }
    }
}

/// Output canvas settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub transparent: bool,
    /// Ignored while `transparent` is set.
    pub background: Color,
    pub export_format: ExportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            transparent: false,
            background: Color::WHITE,
            export_format: ExportFormat::Png,
        }
    }
}

impl OutputConfig {
    /// Canvas size with zero dimensions replaced by the defaults.
    pub fn canvas_size(&self) -> (u32, u32) {
        let w = if self.canvas_width == 0 {
            DEFAULT_CANVAS_WIDTH
        } else {
            self.canvas_width
        };
        let h = if self.canvas_height == 0 {
            DEFAULT_CANVAS_HEIGHT
        } else {
            self.canvas_height
        };
        (w, h)
    }
}

/// Fill the background (unless transparent) and center `inner` on it.
pub fn compose(config: &OutputConfig, inner: Option<&InnerRaster>) -> FinalRaster {
    let (width, height) = config.canvas_size();
    let Some(mut canvas) = Pixmap::new(width, height) else {
        log::warn!("Cannot allocate a {width}x{height} canvas");
        return RgbaImage::new(0, 0);
    };
    if !config.transparent {
        fill(&mut canvas, config.background);
    }

    if let Some(inner) = inner {
        let size = f64::from(inner.size());
        let dx = round_half_up((f64::from(width) - size) / 2.0) as i64;
        let dy = round_half_up((f64::from(height) - size) / 2.0) as i64;
        if let Some(inner) = to_pixmap(inner.image()) {
            draw(&mut canvas, &inner, dx, dy);
        }
    }

    from_pixmap(&canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::core::bitmap::SourceBitmap;
    use crate::domain::document::operations::crop::{CropModel, FillMode};
    use crate::domain::document::operations::inner;
    use image::Rgba;

    fn inner_of(width: u32, height: u32, target: u32, mode: FillMode) -> InnerRaster {
        let source =
            SourceBitmap::new(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])))
                .unwrap();
        let mut crop = CropModel::default();
        crop.init(width, height, target, mode);
        inner::render(&source, &crop).unwrap()
    }

    #[test]
    fn transparent_without_image_is_cleared() {
        let config = OutputConfig {
            transparent: true,
            ..OutputConfig::default()
        };

        let canvas = compose(&config, None);

        assert_eq!(canvas.dimensions(), (300, 200));
        assert!(canvas.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn background_outside_inner_matches_color() {
        let background = Color::rgb(12, 34, 56);
        let config = OutputConfig {
            background,
            ..OutputConfig::default()
        };
        let inner = inner_of(800, 600, 100, FillMode::Cover);

        let canvas = compose(&config, Some(&inner));

        // Inner spans x 100..200, y 50..150.
        for (x, y) in [(0, 0), (99, 100), (200, 100), (150, 49), (150, 150), (299, 199)] {
            assert_eq!(*canvas.get_pixel(x, y), background.to_rgba(), "pixel {x},{y}");
        }
        assert_eq!(canvas.get_pixel(100, 50).0, [200, 10, 10, 255]);
        assert_eq!(canvas.get_pixel(199, 149).0, [200, 10, 10, 255]);
    }

    #[test]
    fn translucent_source_keeps_opaque_background_opaque() {
        let source = SourceBitmap::new(RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 128]))).unwrap();
        let mut crop = CropModel::default();
        crop.init(64, 64, 100, FillMode::Cover);
        let inner = inner::render(&source, &crop).unwrap();

        let canvas = compose(&OutputConfig::default(), Some(&inner));

        let shaded = canvas.get_pixel(150, 100).0;
        assert_eq!(shaded[3], 255);
        assert!((126..=128).contains(&shaded[0]), "got {shaded:?}");
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn pad_letterbox_shows_background() {
        let background = Color::rgb(0, 255, 0);
        let config = OutputConfig {
            background,
            ..OutputConfig::default()
        };
        let inner = inner_of(800, 600, 100, FillMode::Pad);

        let canvas = compose(&config, Some(&inner));

        // Letterbox row inside the inner square.
        assert_eq!(*canvas.get_pixel(150, 55), background.to_rgba());
        assert_eq!(canvas.get_pixel(150, 100).0, [200, 10, 10, 255]);
    }

    #[test]
    fn inner_larger_than_canvas_is_clipped_centered() {
        let config = OutputConfig {
            canvas_width: 50,
            canvas_height: 40,
            ..OutputConfig::default()
        };
        let inner = inner_of(100, 100, 100, FillMode::Cover);

        let canvas = compose(&config, Some(&inner));

        assert_eq!(canvas.dimensions(), (50, 40));
        assert!(canvas.pixels().all(|p| p.0 == [200, 10, 10, 255]));
    }

    #[test]
    fn zero_canvas_size_falls_back_to_default() {
        let config = OutputConfig {
            canvas_width: 0,
            canvas_height: 0,
            ..OutputConfig::default()
        };
        assert_eq!(compose(&config, None).dimensions(), (300, 200));
    }

    #[test]
    fn export_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/banner.WEBP")),
            Some(ExportFormat::Webp)
        );
        assert_eq!(ExportFormat::from_path(Path::new("banner.png")), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_path(Path::new("banner.jpg")), None);
        assert_eq!(ExportFormat::from_path(Path::new("banner")), None);
    }

    #[test]
    fn export_format_names() {
        assert_eq!("image/webp".parse::<ExportFormat>(), Ok(ExportFormat::Webp));
        assert_eq!(ExportFormat::Webp.mime_type(), "image/webp");
        assert_eq!(ExportFormat::Png.to_string(), "png");
        assert!("gif".parse::<ExportFormat>().is_err());
    }
}
