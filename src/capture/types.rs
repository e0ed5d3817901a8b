//! Data types for the capture provider.

use thiserror::Error;

/// One still image extracted from a capture session (PNG bytes).
#[derive(Debug, Clone)]
pub struct StillFrame {
    pub image_data: Vec<u8>,
}

/// Errors from capture sessions and frame acquisition.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("screen capture permission denied")]
    PermissionDenied,

    #[error("capture source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("frame extraction failed: {0}")]
    FrameExtraction(String),

    #[error("capture already in progress")]
    AlreadyRecording,

    #[error("no capture in progress")]
    NotRecording,

    #[error("capture manager is not running")]
    ManagerStopped,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
