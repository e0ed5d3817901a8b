//! Annotation editor: mode selection, pointer gestures, and the crop flow.
//!
//! The editor owns the drawing surface and the snapshot history, translates
//! pointer gestures into committed snapshots, and keeps the composited
//! preview in sync after every mutation.

pub mod mode;
pub mod state;

pub use mode::Mode;
pub use state::crop::{CropRegion, CropRequest};
pub use state::{AnnotationEditor, GestureState};
