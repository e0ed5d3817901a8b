//! Drawing surface and raster primitives (Cairo-based).
//!
//! This module owns the mutable canvas the user paints into:
//! - [`Color`]: RGBA color with the named palette used by the config file
//! - [`StrokeStyle`]: stroke color and line width
//! - [`DrawingSurface`]: clear/stroke/paint/encode operations over an
//!   ARGB32 image surface

pub mod color;
pub mod surface;

pub use color::Color;
pub use surface::{DrawError, DrawingSurface, StrokeStyle, decode_png, png_dimensions};
