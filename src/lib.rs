//! Screen-print annotation engine.
//!
//! markshot takes a still image (the "print") out of a short screen-recording
//! window and drives an annotation surface over it: rectangle and freehand
//! line gestures, cropping, a snapshot history with undo/redo, and an
//! asynchronously composited preview of everything up to the history cursor.
//!
//! The outer UI shell, the actual display capture, and the crop widget are
//! collaborators behind small interfaces ([`capture::FrameSource`],
//! [`composite::ImageCompositor`], the crop payload/callback pair on
//! [`editor::AnnotationEditor`]); everything else lives here.

pub mod capture;
pub mod composite;
pub mod config;
pub mod draw;
pub mod editor;
pub mod history;
pub mod util;

pub use config::Config;
pub use editor::AnnotationEditor;
pub use history::{History, Snapshot, SnapshotKind};
