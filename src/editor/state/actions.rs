//! Mode selection, history movement, and action dispatch.

use crate::config::Action;
use crate::draw::DrawError;
use crate::editor::mode::Mode;
use crate::history::SnapshotKind;

use super::core::{AnnotationEditor, GestureState};

impl AnnotationEditor {
    /// Toggles the interaction mode.
    ///
    /// Selecting the active mode again deactivates drawing entirely and
    /// restores surface/preview visibility. Any other switch first resets
    /// the gesture state, so exactly one mode's handling is ever live.
    /// Crop mode hides the surface and preview in favor of the external
    /// crop widget.
    pub fn select_mode(&mut self, requested: Mode) {
        self.detach_gesture();

        if self.mode == Some(requested) {
            self.mode = None;
            self.show_surface = true;
            self.show_preview = true;
            log::debug!("mode {requested:?} toggled off");
            return;
        }

        self.mode = Some(requested);
        match requested {
            Mode::Rect => {
                self.show_surface = true;
                self.show_preview = true;
            }
            Mode::Line => {
                self.show_surface = true;
                self.show_preview = true;
                // Line mode starts from a blank surface; strokes then
                // accumulate on it until release.
                if let Err(err) = self.surface.clear() {
                    log::error!("failed to clear surface entering line mode: {err}");
                }
            }
            Mode::Crop => {
                self.show_surface = false;
                self.show_preview = false;
            }
        }
        log::debug!("mode {requested:?} activated");
    }

    /// Drops any in-progress drag without committing.
    pub(super) fn detach_gesture(&mut self) {
        self.gesture = GestureState::Idle;
    }

    /// Steps the history cursor back and refreshes the preview.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.regenerate();
        }
        moved
    }

    /// Steps the history cursor forward and refreshes the preview.
    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.regenerate();
        }
        moved
    }

    /// Discards all annotations.
    ///
    /// Clears the surface, empties the history, and clears the preview; if
    /// a base print is present it is redrawn and committed as snapshot 0.
    pub fn reset(&mut self) -> Result<(), DrawError> {
        self.surface.clear()?;
        self.history.reset();
        self.regenerate();

        if let Some(base) = self.base_image.clone() {
            self.apply_base_image(&base)?;
        }
        Ok(())
    }

    /// Draws a text annotation and commits it.
    pub fn place_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DrawError> {
        if text.is_empty() {
            return Ok(());
        }
        self.surface.draw_text(x, y, text, self.font_size, &self.stroke)?;
        self.commit(SnapshotKind::Text)
    }

    /// Applies a shortcut action.
    ///
    /// Capture actions are not handled here; they are stored for the layer
    /// that owns the capture manager (see
    /// [`Self::take_pending_capture_action`]).
    pub fn apply_action(&mut self, action: Action) -> Result<(), DrawError> {
        match action {
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::Reset => self.reset()?,
            Action::StopCapture => {
                log::debug!("action {action:?} pending for capture layer");
                self.pending_capture_action = Some(action);
            }
        }
        Ok(())
    }

    /// Takes and clears any pending capture action.
    pub fn take_pending_capture_action(&mut self) -> Option<Action> {
        self.pending_capture_action.take()
    }

    /// Reads the surface, records it as a snapshot, clears the surface for
    /// the next gesture, and queues a preview recomputation.
    pub(super) fn commit(&mut self, kind: SnapshotKind) -> Result<(), DrawError> {
        let image = self.surface.encode_png()?;
        let position = self.history.commit(kind, image);
        log::debug!("committed {kind:?} snapshot at position {position}");
        self.surface.clear()?;
        self.regenerate();
        Ok(())
    }

    /// Queues a preview recomputation from the visible history layers.
    pub(super) fn regenerate(&mut self) {
        self.preview.regenerate(self.history.visible_layers());
    }
}
