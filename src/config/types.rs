//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Canvas geometry defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels for landscape prints (valid range: 100 - 4096)
    #[serde(default = "default_canvas_width")]
    pub width: i32,

    /// Width-over-height ratio for landscape prints (valid range: 0.5 - 4.0)
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,

    /// Fixed canvas height in pixels for portrait prints (valid range: 100 - 4096)
    #[serde(default = "default_portrait_height")]
    pub portrait_height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            aspect_ratio: default_aspect_ratio(),
            portrait_height: default_portrait_height(),
        }
    }
}

/// Stroke appearance for the drawing gestures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeConfig {
    /// Stroke color name (red, green, blue, yellow, orange, pink, white, black)
    #[serde(default = "default_stroke_color")]
    pub color: String,

    /// Stroke width in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_stroke_width")]
    pub width: f64,

    /// Font size for text annotations in points (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            color: default_stroke_color(),
            width: default_stroke_width(),
            font_size: default_font_size(),
        }
    }
}

/// Capture window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// How long the capture window stays open before self-terminating,
    /// in milliseconds (valid range: 50 - 10000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
        }
    }
}

fn default_canvas_width() -> i32 {
    800
}

fn default_aspect_ratio() -> f64 {
    // 16:9 at the 2-decimal precision used throughout the engine
    1.78
}

fn default_portrait_height() -> i32 {
    720
}

fn default_stroke_color() -> String {
    "red".to_string()
}

fn default_stroke_width() -> f64 {
    3.0
}

fn default_font_size() -> f64 {
    20.0
}

fn default_window_ms() -> u64 {
    300
}
