//! The mutable raster canvas the user paints on.

use cairo::{Context, Format, ImageSurface};
use thiserror::Error;

use super::color::Color;

/// Errors from surface creation, drawing, and the PNG codec.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("cairo operation failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG codec error: {0}")]
    Png(#[from] cairo::IoError),

    #[error("invalid surface dimensions {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
}

/// Stroke appearance for gesture drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
}

/// Mutable 2D raster canvas.
///
/// Owned exclusively by the annotation editor; cleared and redrawn on every
/// mode change and every history step. All drawing goes through a short-lived
/// cairo context so the surface itself stays the single source of pixels.
pub struct DrawingSurface {
    surface: ImageSurface,
}

impl DrawingSurface {
    /// Creates a fully transparent canvas of the given size.
    pub fn new(width: i32, height: i32) -> Result<Self, DrawError> {
        if width <= 0 || height <= 0 {
            return Err(DrawError::InvalidSize { width, height });
        }
        Ok(Self {
            surface: ImageSurface::create(Format::ARgb32, width, height)?,
        })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    fn context(&self) -> Result<Context, DrawError> {
        Ok(Context::new(&self.surface)?)
    }

    /// Wipes the whole surface back to transparency.
    pub fn clear(&mut self) -> Result<(), DrawError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Strokes an unfilled rectangle spanning two drag corners.
    ///
    /// The corners may arrive in any order; the rectangle is normalized so
    /// dragging up-left behaves the same as dragging down-right.
    pub fn stroke_rect(
        &mut self,
        start: (i32, i32),
        end: (i32, i32),
        style: &StrokeStyle,
    ) -> Result<(), DrawError> {
        let ctx = self.context()?;
        ctx.set_source_rgba(style.color.r, style.color.g, style.color.b, style.color.a);
        ctx.set_line_width(style.width);
        ctx.set_line_join(cairo::LineJoin::Miter);

        let (x, w) = if end.0 >= start.0 {
            (start.0, end.0 - start.0)
        } else {
            (end.0, start.0 - end.0)
        };
        let (y, h) = if end.1 >= start.1 {
            (start.1, end.1 - start.1)
        } else {
            (end.1, start.1 - end.1)
        };

        ctx.rectangle(x as f64, y as f64, w as f64, h as f64);
        ctx.stroke()?;
        Ok(())
    }

    /// Strokes a single segment on top of the existing content.
    ///
    /// Round caps and joins so consecutive segments read as one continuous
    /// freehand stroke.
    pub fn stroke_segment(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        style: &StrokeStyle,
    ) -> Result<(), DrawError> {
        let ctx = self.context()?;
        ctx.set_source_rgba(style.color.r, style.color.g, style.color.b, style.color.a);
        ctx.set_line_width(style.width);
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.set_line_join(cairo::LineJoin::Round);

        ctx.move_to(from.0 as f64, from.1 as f64);
        ctx.line_to(to.0 as f64, to.1 as f64);
        ctx.stroke()?;
        Ok(())
    }

    /// Draws a text annotation with its baseline at (x, y).
    pub fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        size: f64,
        style: &StrokeStyle,
    ) -> Result<(), DrawError> {
        let ctx = self.context()?;
        ctx.set_source_rgba(style.color.r, style.color.g, style.color.b, style.color.a);
        ctx.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        ctx.set_font_size(size);
        ctx.move_to(x as f64, y as f64);
        ctx.show_text(text)?;
        Ok(())
    }

    /// Decodes a PNG and paints it scaled to cover the full canvas.
    pub fn paint_png(&mut self, image: &[u8]) -> Result<(), DrawError> {
        let decoded = decode_png(image)?;
        let ctx = self.context()?;
        ctx.scale(
            self.width() as f64 / decoded.width() as f64,
            self.height() as f64 / decoded.height() as f64,
        );
        ctx.set_source_surface(&decoded, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    /// Paints one rectangular region of a PNG scaled to cover the full canvas.
    ///
    /// The region is clamped to the decoded image bounds; an empty region
    /// after clamping is an error rather than a silent no-op.
    pub fn paint_png_region(
        &mut self,
        image: &[u8],
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), DrawError> {
        let decoded = decode_png(image)?;

        let x0 = x.clamp(0, decoded.width());
        let y0 = y.clamp(0, decoded.height());
        let w = width.min(decoded.width() - x0);
        let h = height.min(decoded.height() - y0);
        if w <= 0 || h <= 0 {
            return Err(DrawError::InvalidSize {
                width: w,
                height: h,
            });
        }

        let ctx = self.context()?;
        ctx.scale(self.width() as f64 / w as f64, self.height() as f64 / h as f64);
        ctx.set_source_surface(&decoded, -(x0 as f64), -(y0 as f64))?;
        ctx.paint()?;
        Ok(())
    }

    /// Snapshots the current surface content as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, DrawError> {
        let mut buffer = Vec::new();
        self.surface.write_to_png(&mut buffer)?;
        Ok(buffer)
    }
}

/// Decodes PNG bytes into an image surface.
pub fn decode_png(image: &[u8]) -> Result<ImageSurface, DrawError> {
    let mut reader = image;
    Ok(ImageSurface::create_from_png(&mut reader)?)
}

/// Reads the pixel dimensions of a PNG without keeping the surface around.
pub fn png_dimensions(image: &[u8]) -> Result<(i32, i32), DrawError> {
    let decoded = decode_png(image)?;
    Ok((decoded.width(), decoded.height()))
}
