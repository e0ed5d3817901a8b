//! Pointer gesture handling for the rect and line modes.

use crate::draw::DrawError;
use crate::editor::mode::Mode;
use crate::history::SnapshotKind;

use super::core::{AnnotationEditor, GestureState};

impl AnnotationEditor {
    /// Pointer pressed on the drawing surface.
    ///
    /// Starts a drag when a drawing mode is active; crop mode and no-mode
    /// ignore pointer input entirely.
    pub fn on_pointer_press(&mut self, x: i32, y: i32) {
        if !matches!(self.mode, Some(Mode::Rect) | Some(Mode::Line)) {
            return;
        }
        self.gesture = GestureState::Dragging {
            start_x: x,
            start_y: y,
            last_x: x,
            last_y: y,
        };
    }

    /// Pointer moved while (possibly) dragging.
    ///
    /// Rect mode redraws the whole provisional rectangle from scratch on
    /// every sample; line mode strokes one segment from the previous sample
    /// and accumulates.
    pub fn on_pointer_motion(&mut self, x: i32, y: i32) -> Result<(), DrawError> {
        let GestureState::Dragging {
            start_x,
            start_y,
            last_x,
            last_y,
        } = self.gesture
        else {
            return Ok(());
        };

        match self.mode {
            Some(Mode::Rect) => {
                self.surface.clear()?;
                self.surface
                    .stroke_rect((start_x, start_y), (x, y), &self.stroke)?;
            }
            Some(Mode::Line) => {
                self.surface
                    .stroke_segment((last_x, last_y), (x, y), &self.stroke)?;
            }
            _ => return Ok(()),
        }

        self.gesture = GestureState::Dragging {
            start_x,
            start_y,
            last_x: x,
            last_y: y,
        };
        Ok(())
    }

    /// Pointer released: finalize the drag as a committed snapshot.
    pub fn on_pointer_release(&mut self, _x: i32, _y: i32) -> Result<(), DrawError> {
        if !matches!(self.gesture, GestureState::Dragging { .. }) {
            return Ok(());
        }
        self.gesture = GestureState::Idle;

        match self.mode {
            Some(Mode::Rect) => self.commit(SnapshotKind::Rect),
            Some(Mode::Line) => self.commit(SnapshotKind::Line),
            _ => Ok(()),
        }
    }

    /// Pointer left the surface mid-drag: abandon without committing.
    pub fn on_pointer_leave(&mut self) -> Result<(), DrawError> {
        if !matches!(self.gesture, GestureState::Dragging { .. }) {
            return Ok(());
        }
        self.gesture = GestureState::Idle;
        self.surface.clear()
    }
}
