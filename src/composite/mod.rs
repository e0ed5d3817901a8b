//! Image compositing: flattening snapshot layers into one preview image.
//!
//! The compositor consumes an ordered list of optional PNG layers and
//! produces a single flattened PNG, skipping absent entries. Merging runs
//! off the interaction thread; see [`PreviewGenerator`] for the
//! fire-and-forget sequencing around it.

pub mod preview;

pub use preview::{Preview, PreviewGenerator};

use async_trait::async_trait;
use cairo::{Context, Format, ImageSurface};
use thiserror::Error;
use tokio::task;

use crate::draw::{DrawError, decode_png};

/// One entry in the ordered layer list handed to the compositor.
///
/// Entries past the history cursor carry no source; the compositor skips
/// them without error.
#[derive(Clone, Debug)]
pub struct CompositeLayer {
    /// PNG bytes for this layer, or absent.
    pub source: Option<Vec<u8>>,
}

/// Errors from the merge step.
#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("layer decode or paint failed: {0}")]
    Draw(#[from] DrawError),

    #[error("compositing task failed: {0}")]
    TaskJoin(String),
}

/// Flattens an ordered layer list into one image.
///
/// Implementations must tolerate an empty (or fully absent) list by
/// returning `Ok(None)` and must not block the caller's thread.
#[async_trait]
pub trait ImageCompositor: Send + Sync {
    async fn merge(&self, layers: Vec<CompositeLayer>) -> Result<Option<Vec<u8>>, CompositeError>;
}

/// Default compositor: cairo decode/paint on a blocking worker thread.
pub struct CairoCompositor;

#[async_trait]
impl ImageCompositor for CairoCompositor {
    async fn merge(&self, layers: Vec<CompositeLayer>) -> Result<Option<Vec<u8>>, CompositeError> {
        task::spawn_blocking(move || merge_layers(&layers))
            .await
            .map_err(|e| CompositeError::TaskJoin(e.to_string()))?
    }
}

/// Synchronous merge: later layers paint over earlier ones.
///
/// The output canvas adopts the maximum width and height across the present
/// layers, so differently sized snapshots (e.g. after a canvas resize) still
/// merge without clipping.
pub fn merge_layers(layers: &[CompositeLayer]) -> Result<Option<Vec<u8>>, CompositeError> {
    let mut decoded = Vec::new();
    for layer in layers {
        if let Some(source) = &layer.source {
            decoded.push(decode_png(source)?);
        }
    }

    if decoded.is_empty() {
        return Ok(None);
    }

    let width = decoded.iter().map(ImageSurface::width).max().unwrap_or(0);
    let height = decoded.iter().map(ImageSurface::height).max().unwrap_or(0);

    let canvas =
        ImageSurface::create(Format::ARgb32, width, height).map_err(DrawError::from)?;
    let ctx = Context::new(&canvas).map_err(DrawError::from)?;
    for image in &decoded {
        ctx.set_source_surface(image, 0.0, 0.0)
            .map_err(DrawError::from)?;
        ctx.paint().map_err(DrawError::from)?;
    }
    drop(ctx);

    let mut buffer = Vec::new();
    canvas.write_to_png(&mut buffer).map_err(DrawError::from)?;
    Ok(Some(buffer))
}
