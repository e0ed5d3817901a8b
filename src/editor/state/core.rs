//! Editor struct, construction, and the base-image handoff.

use super::crop::CropRegion;
use crate::composite::PreviewGenerator;
use crate::config::{Action, Config};
use crate::draw::{self, DrawError, DrawingSurface, StrokeStyle};
use crate::editor::mode::Mode;
use crate::history::{History, SnapshotKind};
use crate::util;

/// Pointer-drag state machine.
///
/// Rect gestures use the press position in `start_x`/`start_y`; line
/// gestures track the previous sample in `last_x`/`last_y` so each motion
/// strokes exactly one new segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// No drag in progress.
    Idle,
    /// Pointer held down since the recorded start position.
    Dragging {
        start_x: i32,
        start_y: i32,
        last_x: i32,
        last_y: i32,
    },
}

/// The annotation editor.
///
/// Owns the drawing surface and the snapshot history, and triggers preview
/// recomputation after every history mutation. All methods run on the
/// caller's (single) interaction thread; only compositing is asynchronous.
pub struct AnnotationEditor {
    pub(super) surface: DrawingSurface,
    pub(super) history: History,
    pub(super) preview: PreviewGenerator,
    pub(super) stroke: StrokeStyle,
    pub(super) font_size: f64,
    pub(super) mode: Option<Mode>,
    pub(super) gesture: GestureState,
    /// The captured print, kept for reset.
    pub(super) base_image: Option<Vec<u8>>,
    /// Latest crop rectangle reported by the crop widget.
    pub(super) crop_selection: Option<CropRegion>,
    /// Action waiting for the capture layer (stop-capture shortcut).
    pub(super) pending_capture_action: Option<Action>,
    pub(super) show_surface: bool,
    pub(super) show_preview: bool,
    pub(super) default_width: i32,
    pub(super) default_aspect: f64,
    pub(super) portrait_height: i32,
    pub(super) aspect_ratio: f64,
}

impl AnnotationEditor {
    /// Creates an editor with an empty history and a blank canvas sized
    /// from the config defaults.
    pub fn new(config: &Config, preview: PreviewGenerator) -> Result<Self, DrawError> {
        let width = config.canvas.width;
        let aspect = config.canvas.aspect_ratio;
        let height = (width as f64 / aspect).round() as i32;

        Ok(Self {
            surface: DrawingSurface::new(width, height)?,
            history: History::new(),
            preview,
            stroke: config.stroke_style(),
            font_size: config.stroke.font_size,
            mode: None,
            gesture: GestureState::Idle,
            base_image: None,
            crop_selection: None,
            pending_capture_action: None,
            show_surface: true,
            show_preview: true,
            default_width: width,
            default_aspect: aspect,
            portrait_height: config.canvas.portrait_height,
            aspect_ratio: aspect,
        })
    }

    /// The snapshot history (read-only).
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Currently active interaction mode, if any.
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn is_surface_visible(&self) -> bool {
        self.show_surface
    }

    pub fn is_preview_visible(&self) -> bool {
        self.show_preview
    }

    /// Canvas dimensions in pixels.
    pub fn canvas_size(&self) -> (i32, i32) {
        (self.surface.width(), self.surface.height())
    }

    /// Canvas width-over-height ratio (2-decimal precision).
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Latest applied preview image, if any.
    pub fn preview_image(&self) -> Option<Vec<u8>> {
        self.preview.current()
    }

    /// Waits until all queued preview recomputations have been applied and
    /// returns the result. Intended for tests and batch consumers; the
    /// interactive path reads [`Self::preview_image`] instead.
    pub async fn settled_preview(&self) -> Option<Vec<u8>> {
        self.preview.settled().await
    }

    /// Installs a freshly captured print as the base layer.
    ///
    /// Resets the history, resizes the canvas for the print's orientation,
    /// draws the print scaled to the canvas, and commits it as snapshot 0.
    pub fn set_base_image(&mut self, image: Vec<u8>) -> Result<(), DrawError> {
        self.history.reset();
        self.apply_base_image(&image)?;
        self.base_image = Some(image);
        Ok(())
    }

    pub(super) fn apply_base_image(&mut self, image: &[u8]) -> Result<(), DrawError> {
        let (print_width, print_height) = draw::png_dimensions(image)?;
        let geometry = util::canvas_size_for_image(
            print_width,
            print_height,
            self.default_width,
            self.default_aspect,
            self.portrait_height,
        );

        if geometry.width != self.surface.width() || geometry.height != self.surface.height() {
            self.surface = DrawingSurface::new(geometry.width, geometry.height)?;
        } else {
            self.surface.clear()?;
        }
        self.aspect_ratio = geometry.aspect_ratio;

        self.surface.paint_png(image)?;
        self.commit(SnapshotKind::Base)?;
        log::info!(
            "base print applied ({print_width}x{print_height} -> {}x{})",
            geometry.width,
            geometry.height
        );
        Ok(())
    }
}
