//! Crop flow: payload for the external widget, the adjustment callback,
//! and confirmation.
//!
//! The crop widget itself is a collaborator. It consumes the current
//! preview as bare base64 plus an aspect-ratio hint, reports a region on
//! every adjustment, and the user confirms once. Confirmation re-renders
//! the cropped region into the surface and commits it, so the composite
//! immediately reflects the crop.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::draw::DrawError;
use crate::history::SnapshotKind;

use super::core::AnnotationEditor;

/// Crop rectangle in preview-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Payload handed to the external crop widget.
#[derive(Debug, Clone)]
pub struct CropRequest {
    /// The preview image as base64, without any data-URI prefix.
    pub image_base64: String,
    /// Aspect-ratio hint for the widget's selection frame.
    pub aspect_ratio: f64,
}

impl AnnotationEditor {
    /// Builds the crop-widget payload from the current preview.
    ///
    /// Returns `None` while no preview exists (nothing to crop).
    pub fn crop_source(&self) -> Option<CropRequest> {
        let image = self.preview_image()?;
        Some(CropRequest {
            image_base64: STANDARD.encode(&image),
            aspect_ratio: self.aspect_ratio(),
        })
    }

    /// Records the latest crop rectangle reported by the widget.
    ///
    /// Invoked on every adjustment; only the newest region is kept.
    pub fn on_crop_adjusted(&mut self, region: CropRegion) {
        self.crop_selection = Some(region);
    }

    /// Confirms the pending crop.
    ///
    /// Restores surface/preview visibility, leaves crop mode, and — when a
    /// region was reported and a preview exists — re-renders the cropped
    /// region scaled to the full canvas and commits it as a snapshot.
    pub fn confirm_crop(&mut self) -> Result<(), DrawError> {
        self.show_surface = true;
        self.show_preview = true;
        self.mode = None;

        let Some(region) = self.crop_selection.take() else {
            log::debug!("crop confirmed without a reported region");
            return Ok(());
        };
        let Some(image) = self.preview_image() else {
            log::debug!("crop confirmed without a preview");
            return Ok(());
        };

        self.surface.clear()?;
        self.surface
            .paint_png_region(&image, region.x, region.y, region.width, region.height)?;
        self.commit(SnapshotKind::Crop)
    }
}
