//! Configuration file support.
//!
//! Settings load from `~/.config/markshot/config.toml`: canvas geometry,
//! stroke appearance, the capture window length, and keyboard shortcuts.
//! A missing file means defaults; invalid values are clamped with a warning
//! rather than rejected.

pub mod keybindings;
pub mod types;

pub use keybindings::{Action, KeyBinding, KeybindingsConfig, ShortcutMap};
pub use types::{CanvasConfig, CaptureConfig, StrokeConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::draw::{StrokeStyle, color};
use crate::util;

/// Root configuration, deserialized from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Canvas geometry defaults
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Stroke appearance for gestures and text
    #[serde(default)]
    pub stroke: StrokeConfig,

    /// Capture window settings
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// Returns defaults when no config file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                debug!("no config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                debug!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads and validates the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate_and_clamp();
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("markshot").join("config.toml"))
    }

    /// Clamps out-of-range values to their valid ranges, warning per field.
    fn validate_and_clamp(&mut self) {
        if !(100..=4096).contains(&self.canvas.width) {
            log::warn!(
                "invalid canvas width {}, clamping to 100-4096 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(100, 4096);
        }

        if !(0.5..=4.0).contains(&self.canvas.aspect_ratio) {
            log::warn!(
                "invalid aspect_ratio {:.2}, clamping to 0.5-4.0 range",
                self.canvas.aspect_ratio
            );
            self.canvas.aspect_ratio = self.canvas.aspect_ratio.clamp(0.5, 4.0);
        }
        self.canvas.aspect_ratio = util::round2(self.canvas.aspect_ratio);

        if !(100..=4096).contains(&self.canvas.portrait_height) {
            log::warn!(
                "invalid portrait_height {}, clamping to 100-4096 range",
                self.canvas.portrait_height
            );
            self.canvas.portrait_height = self.canvas.portrait_height.clamp(100, 4096);
        }

        if !(1.0..=20.0).contains(&self.stroke.width) {
            log::warn!(
                "invalid stroke width {:.1}, clamping to 1.0-20.0 range",
                self.stroke.width
            );
            self.stroke.width = self.stroke.width.clamp(1.0, 20.0);
        }

        if !(8.0..=72.0).contains(&self.stroke.font_size) {
            log::warn!(
                "invalid font_size {:.1}, clamping to 8.0-72.0 range",
                self.stroke.font_size
            );
            self.stroke.font_size = self.stroke.font_size.clamp(8.0, 72.0);
        }

        if !(50..=10_000).contains(&self.capture.window_ms) {
            log::warn!(
                "invalid capture window {}ms, clamping to 50-10000 range",
                self.capture.window_ms
            );
            self.capture.window_ms = self.capture.window_ms.clamp(50, 10_000);
        }
    }

    /// Resolves the configured stroke style, falling back to red when the
    /// color name is unknown.
    pub fn stroke_style(&self) -> StrokeStyle {
        let stroke_color = util::name_to_color(&self.stroke.color).unwrap_or_else(|| {
            log::warn!("unknown stroke color '{}', using red", self.stroke.color);
            color::RED
        });
        StrokeStyle {
            color: stroke_color,
            width: self.stroke.width,
        }
    }

    /// The configured capture window as a duration.
    pub fn capture_window(&self) -> Duration {
        Duration::from_millis(self.capture.window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.canvas.aspect_ratio, 1.78);
        assert_eq!(config.stroke.width, 3.0);
        assert_eq!(config.capture.window_ms, 300);
        assert_eq!(config.stroke_style().color, color::RED);
    }

    #[test]
    fn load_from_reads_partial_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[stroke]\ncolor = \"blue\"\nwidth = 5.0\n\n[capture]\nwindow_ms = 500"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.stroke.color, "blue");
        assert_eq!(config.stroke.width, 5.0);
        assert_eq!(config.capture.window_ms, 500);
        // Untouched sections keep defaults
        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.stroke_style().color, color::BLUE);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[canvas]\nwidth = 10\naspect_ratio = 9.0\n\n[stroke]\nwidth = 99.0\n\n[capture]\nwindow_ms = 1"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.canvas.width, 100);
        assert_eq!(config.canvas.aspect_ratio, 4.0);
        assert_eq!(config.stroke.width, 20.0);
        assert_eq!(config.capture.window_ms, 50);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn unknown_stroke_color_falls_back_to_red() {
        let config = Config {
            stroke: StrokeConfig {
                color: "mauve".to_string(),
                ..StrokeConfig::default()
            },
            ..Config::default()
        };
        assert_eq!(config.stroke_style().color, color::RED);
    }
}
