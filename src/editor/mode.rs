//! Interaction mode selection.

/// Interaction mode for the annotation canvas.
///
/// At most one mode is active at a time; selecting the active mode again
/// deactivates it entirely (the editor then holds no mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Hand the preview to the external crop widget.
    Crop,
    /// Drag a stroked rectangle outline.
    Rect,
    /// Accumulate freehand line strokes.
    Line,
}
