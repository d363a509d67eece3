// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Headless front-end: load, replay editor input, export.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use i18n_embed::DesktopLanguageRequester;
use serde::Deserialize;
use tokio::io::AsyncReadExt;

use img2banner::app::document::{ClipboardHold, SystemClipboard, export};
use img2banner::app::view::crop::EditorEvent;
use img2banner::domain::document::{Color, CropCommand, ExportFormat, FillMode};
use img2banner::{App, AppConfig, AppMessage, Preferences, Theme, UpdateResult, i18n};

/// Crop an image into a square and center it on a banner canvas.
#[derive(Parser, Debug)]
#[command(name = "img2banner", version, about)]
struct Args {
    /// Source image; `-` reads from stdin. Without one the banner is just the background.
    input: Option<PathBuf>,

    /// Output file. The format follows the extension unless --format is given.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: png or webp.
    #[arg(long)]
    format: Option<ExportFormat>,

    /// Encoder quality, 0.0 to 1.0.
    #[arg(long)]
    quality: Option<f32>,

    /// Output canvas size, e.g. 300x200.
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    canvas: Option<(u32, u32)>,

    /// Edge length of the square inner image.
    #[arg(long, value_name = "N")]
    size: Option<u32>,

    /// Fill mode: cover or pad.
    #[arg(long)]
    mode: Option<FillMode>,

    /// Crop zoom in percent (50 to 500).
    #[arg(long, value_name = "PERCENT")]
    zoom: Option<f64>,

    /// Background color (hex, rgb()/rgba(), or a color name).
    #[arg(long, value_name = "COLOR")]
    background: Option<Color>,

    /// Leave the background transparent.
    #[arg(long)]
    transparent: bool,

    /// Move the crop center by source pixels; repeatable.
    #[arg(long, value_name = "DX,DY", value_parser = parse_pan, allow_hyphen_values = true)]
    pan: Vec<(f64, f64)>,

    /// JSON array of editor events and crop commands to apply in order.
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Write the editor viewport as PNG.
    #[arg(long, value_name = "FILE")]
    preview: Option<PathBuf>,

    /// Editor viewport size, e.g. 360x360.
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    viewport: Option<(u32, u32)>,

    /// Copy the banner to the clipboard as PNG.
    #[arg(long)]
    copy: bool,

    /// With --copy on Linux, serve the clipboard for at most this many seconds.
    /// Without it the process blocks until another application takes the
    /// clipboard; 0 exits at once and relies on a clipboard manager.
    #[arg(long, value_name = "SECONDS", requires = "copy")]
    copy_wait: Option<u64>,

    /// Set or toggle the stored theme: dark, light or toggle.
    #[arg(long, value_name = "THEME")]
    theme: Option<String>,

    /// Persist the effective settings as the new defaults.
    #[arg(long)]
    save_defaults: bool,
}

/// One replayed interaction.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplayStep {
    Editor(EditorEvent),
    Crop(CropCommand),
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {value:?}"))?;
    let w = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Ok((w, h))
}

fn parse_pan(value: &str) -> Result<(f64, f64), String> {
    let (dx, dy) = value
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got {value:?}"))?;
    let dx = dx.trim().parse().map_err(|e| format!("dx: {e}"))?;
    let dy = dy.trim().parse().map_err(|e| format!("dy: {e}"))?;
    Ok((dx, dy))
}

impl Args {
    /// Apply command line overrides on top of the stored defaults.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some((width, height)) = self.canvas {
            config.canvas_width = width;
            config.canvas_height = height;
        }
        if let Some(size) = self.size {
            config.inner_size = size;
        }
        if let Some(mode) = self.mode {
            config.fill_mode = mode;
        }
        if let Some(zoom) = self.zoom {
            config.zoom_percent = zoom;
        }
        if let Some(background) = self.background {
            config.background = background;
        }
        if self.transparent {
            config.transparent = true;
        }
        if let Some(format) = self.format {
            config.export_format = format;
        }
        if let Some(quality) = self.quality {
            config.export_quality = quality;
        }
        if let Some((width, height)) = self.viewport {
            config.editor_width = width;
            config.editor_height = height;
        }
    }

    /// Export unless the run only copies, previews or manages settings.
    fn wants_export(&self) -> bool {
        if self.output.is_some() {
            return true;
        }
        let settings_only = self.input.is_none() && (self.theme.is_some() || self.save_defaults);
        !(settings_only || self.copy || self.preview.is_some())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    i18n::init(&DesktopLanguageRequester::requested_languages());

    let args = Args::parse();

    let mut config = AppConfig::load();
    args.apply_to(&mut config);

    let mut preferences = Preferences::open_default();
    let theme = match args.theme.as_deref() {
        None => preferences.theme(),
        Some("toggle") => preferences.toggle_theme()?,
        Some(value) => {
            let theme: Theme = value.parse().map_err(anyhow::Error::msg)?;
            preferences.set_theme(theme)?;
            theme
        }
    };
    log::info!("Theme: {}", theme.label());

    let mut app = App::new(&config, theme);

    if let Some(input) = &args.input {
        let load = if input == Path::new("-") {
            let mut bytes = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut bytes)
                .await
                .context("reading stdin")?;
            app.load_bytes(bytes).await
        } else {
            app.open(input.clone()).await
        };
        app.update(load);
        if !app.model.has_image() {
            bail!(notice_or(&app, "failed to load image"));
        }
        app.update(AppMessage::Crop(CropCommand::SetZoom {
            zoom: config.zoom_factor(),
        }));
    }

    for &(dx, dy) in &args.pan {
        app.update(AppMessage::Crop(CropCommand::Pan { dx, dy }));
    }

    if let Some(path) = &args.replay {
        replay(&mut app, path).await?;
    }

    if let Some(path) = &args.preview {
        let bytes = export::encode(&app.model.editor_frame, ExportFormat::Png, 1.0)?;
        export::write(path, &bytes).await?;
        log::info!("Wrote editor preview to {}", path.display());
    }

    if args.wants_export() {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("image.{}", config.export_format.extension())));
        if app.save(&path, args.format, config.export_quality).await.is_err() {
            bail!(notice_or(&app, "export failed"));
        }
    }

    if args.copy {
        let mut clipboard = SystemClipboard::new()
            .with_context(|| img2banner::fl!("copy-unsupported"))?
            .with_hold(ClipboardHold::from_secs(args.copy_wait));
        if app.copy_to_clipboard(&mut clipboard).is_err() {
            bail!(notice_or(&app, "copy failed"));
        }
    }

    if args.save_defaults {
        let path = config.save()?;
        log::info!("Saved defaults to {}", path.display());
    }

    Ok(())
}

async fn replay(app: &mut App, path: &Path) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let steps: Vec<ReplayStep> =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

    let mut redraws = 0usize;
    for step in steps {
        let message = match step {
            ReplayStep::Editor(event) => AppMessage::Editor(event),
            ReplayStep::Crop(command) => AppMessage::Crop(command),
        };
        if matches!(
            app.update(message),
            UpdateResult::Redrawn | UpdateResult::Captured { redrawn: true }
        ) {
            redraws += 1;
        }
    }
    log::info!("Replayed {} ({redraws} redraws)", path.display());
    Ok(())
}

fn notice_or(app: &App, fallback: &str) -> String {
    app.model
        .notice
        .as_ref()
        .map(|notice| notice.message.clone())
        .unwrap_or_else(|| fallback.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_args(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("img2banner").chain(argv.iter().copied()))
    }

    fn args(argv: &[&str]) -> Args {
        try_args(argv).unwrap()
    }

    #[test]
    fn size_accepts_either_separator() {
        assert_eq!(parse_size("640x360"), Ok((640, 360)));
        assert_eq!(parse_size(" 12 X 7 "), Ok((12, 7)));
        assert_eq!(parse_size("0x0"), Ok((0, 0)));
    }

    #[test]
    fn malformed_sizes_are_rejected() {
        assert!(parse_size("640").is_err());
        assert!(parse_size("wide x 20").is_err());
        assert!(parse_size("10x-1").is_err());
        assert!(try_args(&["--canvas", "300by200"]).is_err());
    }

    #[test]
    fn pan_accepts_negative_deltas() {
        assert_eq!(parse_pan("-12.5, 4"), Ok((-12.5, 4.0)));
        assert!(parse_pan("3").is_err());
        assert!(parse_pan("a,b").is_err());

        let parsed = args(&["in.png", "--pan", "-5,10", "--pan", "3,-4"]);
        assert_eq!(parsed.pan, vec![(-5.0, 10.0), (3.0, -4.0)]);
    }

    #[test]
    fn export_runs_unless_only_copying_previewing_or_configuring() {
        assert!(args(&["in.png"]).wants_export());
        assert!(args(&[]).wants_export());
        assert!(args(&["in.png", "--copy", "-o", "out.webp"]).wants_export());

        assert!(!args(&["in.png", "--copy"]).wants_export());
        assert!(!args(&["in.png", "--preview", "view.png"]).wants_export());
        assert!(!args(&["--theme", "toggle"]).wants_export());
        assert!(!args(&["--zoom", "150", "--save-defaults"]).wants_export());
        assert!(args(&["in.png", "--save-defaults"]).wants_export());
    }

    #[test]
    fn copy_wait_needs_copy() {
        assert!(try_args(&["in.png", "--copy-wait", "5"]).is_err());
        assert_eq!(args(&["in.png", "--copy", "--copy-wait", "5"]).copy_wait, Some(5));
    }

    #[test]
    fn zero_sizes_fall_back_to_defaults() {
        let mut config = AppConfig::default();
        args(&["--canvas", "0x0", "--size", "0"]).apply_to(&mut config);

        assert_eq!(config.output_config().canvas_size(), (300, 200));
        assert_eq!(config.target_size(), 100);
    }

    #[test]
    fn overrides_replace_stored_defaults() {
        let mut config = AppConfig::default();
        let parsed = args(&[
            "--canvas",
            "640x320",
            "--mode",
            "pad",
            "--zoom",
            "250",
            "--background",
            "#102030",
            "--format",
            "webp",
        ]);
        parsed.apply_to(&mut config);

        assert_eq!((config.canvas_width, config.canvas_height), (640, 320));
        assert_eq!(config.fill_mode, FillMode::Pad);
        assert_eq!(config.zoom_factor(), 2.5);
        assert_eq!(config.background, Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(config.export_format, ExportFormat::Webp);
        assert!(!config.transparent);
    }

    #[test]
    fn replay_mixes_editor_events_and_crop_commands() {
        let steps: Vec<ReplayStep> = serde_json::from_str(
            r#"[
                {"kind": "pointer_down", "x": 10, "y": 20},
                {"kind": "pan", "dx": -3.5, "dy": 2},
                {"kind": "wheel", "delta_y": -100},
                {"kind": "set_zoom", "zoom": 2},
                {"kind": "touch_start", "touches": [{"x": 1, "y": 2}, {"x": 3, "y": 4}]},
                {"kind": "reset"}
            ]"#,
        )
        .unwrap();

        assert_eq!(steps.len(), 6);
        assert!(matches!(steps[0], ReplayStep::Editor(EditorEvent::PointerDown { .. })));
        assert!(matches!(
            steps[1],
            ReplayStep::Crop(CropCommand::Pan { dx, dy }) if dx == -3.5 && dy == 2.0
        ));
        assert!(matches!(steps[2], ReplayStep::Editor(EditorEvent::Wheel { .. })));
        assert!(matches!(steps[3], ReplayStep::Crop(CropCommand::SetZoom { .. })));
        assert!(matches!(
            &steps[4],
            ReplayStep::Editor(EditorEvent::TouchStart { touches }) if touches.len() == 2
        ));
        assert!(matches!(steps[5], ReplayStep::Crop(CropCommand::Reset)));

        assert!(serde_json::from_str::<Vec<ReplayStep>>(r#"[{"kind": "spin"}]"#).is_err());
    }

    #[tokio::test]
    async fn replay_file_drives_the_session() {
        let dir = std::env::temp_dir().join(format!("img2banner-replay-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("steps.json");
        std::fs::write(
            &path,
            r#"[{"kind": "wheel", "delta_y": -1}, {"kind": "set_zoom", "zoom": 3}]"#,
        )
        .unwrap();

        let mut app = App::new(&AppConfig::default(), Theme::Dark);
        let image = image::RgbaImage::from_pixel(80, 60, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let load = app.load_bytes(bytes).await;
        app.update(load);

        replay(&mut app, &path).await.unwrap();
        assert_eq!(app.model.crop.zoom(), 3.0);

        std::fs::write(&path, "not json").unwrap();
        assert!(replay(&mut app, &path).await.is_err());

        let _ = std::fs::remove_dir_all(dir);
    }
}
