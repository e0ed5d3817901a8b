//! Frame acquisition seam for the capture provider.

use async_trait::async_trait;

use super::types::{CaptureError, StillFrame};

/// Acquires one still frame from the underlying screen-capture machinery.
///
/// Implementations wrap whatever the host environment provides (a display
/// portal, a recorded media stream, a test fixture). The engine asks for
/// exactly one frame per capture window, after the window has elapsed or
/// was stopped early.
#[async_trait]
pub trait FrameSource: Send + Sync {
    async fn acquire(&self) -> Result<StillFrame, CaptureError>;
}
