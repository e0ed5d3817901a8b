//! Capture provider: turning a short screen-recording window into one print.
//!
//! The actual display acquisition is a collaborator behind [`FrameSource`];
//! this module owns the session lifecycle around it:
//! - an explicit [`RecordingSession`] state machine (idle/recording/stopped)
//! - a [`CaptureManager`] that runs the fixed capture window on a tokio
//!   runtime, supports stopping early, and emits the resulting still frame
//!   through a single-subscriber channel

pub mod session;
pub mod source;
pub mod types;

mod manager;

pub use manager::CaptureManager;
pub use session::{RecordingSession, SessionState};
pub use source::FrameSource;
pub use types::{CaptureError, StillFrame};
