//! Canvas geometry and color-name helpers.

use crate::draw::{Color, color};

/// Rounds a ratio to two decimal places.
///
/// Aspect ratios are stored and compared at this precision everywhere in the
/// engine, so a 1920x1080 print and a 1280x720 print share the same ratio.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Canvas geometry chosen for a base image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub width: i32,
    pub height: i32,
    /// Width-over-height ratio the canvas ends up with (2-decimal precision).
    pub aspect_ratio: f64,
}

/// Picks canvas dimensions for a print.
///
/// Landscape prints keep the configured canvas width and the configured
/// aspect ratio. Portrait prints keep a fixed height and adopt the print's
/// own ratio instead, so a tall phone-shaped capture is not letterboxed into
/// a 16:9 canvas.
///
/// Degenerate image dimensions fall back to the landscape defaults.
pub fn canvas_size_for_image(
    image_width: i32,
    image_height: i32,
    default_width: i32,
    default_aspect: f64,
    portrait_height: i32,
) -> CanvasGeometry {
    let landscape = CanvasGeometry {
        width: default_width,
        height: (default_width as f64 / default_aspect).round() as i32,
        aspect_ratio: default_aspect,
    };

    if image_width <= 0 || image_height <= 0 {
        return landscape;
    }

    if image_width < image_height {
        let aspect = round2(image_width as f64 / image_height as f64);
        CanvasGeometry {
            width: (portrait_height as f64 * aspect).round() as i32,
            height: portrait_height,
            aspect_ratio: aspect,
        }
    } else {
        landscape
    }
}

/// Maps color name strings to palette values.
///
/// Used by the configuration system to parse the stroke color from the
/// config file. Matching is case-insensitive.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(color::RED),
        "green" => Some(color::GREEN),
        "blue" => Some(color::BLUE),
        "yellow" => Some(color::YELLOW),
        "orange" => Some(color::ORANGE),
        "pink" => Some(color::PINK),
        "white" => Some(color::WHITE),
        "black" => Some(color::BLACK),
        _ => None,
    }
}
