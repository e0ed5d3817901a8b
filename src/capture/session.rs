//! Explicit recording-session state machine.

use super::types::CaptureError;

/// Lifecycle of a single recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No capture has run yet (or the session was reset).
    Idle,
    /// A capture window is open.
    Recording,
    /// The last capture window has closed.
    Stopped,
}

/// Recording lifecycle with fallible transitions.
///
/// Only `Idle/Stopped -> Recording -> Stopped` moves are valid; anything
/// else is reported as an error instead of silently flipping a flag.
#[derive(Debug)]
pub struct RecordingSession {
    state: SessionState,
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Opens a capture window. Fails when one is already open.
    pub fn begin(&mut self) -> Result<(), CaptureError> {
        match self.state {
            SessionState::Recording => Err(CaptureError::AlreadyRecording),
            SessionState::Idle | SessionState::Stopped => {
                self.state = SessionState::Recording;
                Ok(())
            }
        }
    }

    /// Closes the open capture window. Fails when none is open.
    pub fn stop(&mut self) -> Result<(), CaptureError> {
        match self.state {
            SessionState::Recording => {
                self.state = SessionState::Stopped;
                Ok(())
            }
            SessionState::Idle | SessionState::Stopped => Err(CaptureError::NotRecording),
        }
    }

    /// Returns to the idle state regardless of the current one.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = RecordingSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.is_recording());
    }

    #[test]
    fn begin_stop_cycle() {
        let mut session = RecordingSession::new();
        session.begin().unwrap();
        assert!(session.is_recording());
        session.stop().unwrap();
        assert_eq!(session.state(), SessionState::Stopped);
    }

    #[test]
    fn double_begin_is_rejected() {
        let mut session = RecordingSession::new();
        session.begin().unwrap();
        assert!(matches!(
            session.begin(),
            Err(CaptureError::AlreadyRecording)
        ));
        assert!(session.is_recording());
    }

    #[test]
    fn stop_without_begin_is_rejected() {
        let mut session = RecordingSession::new();
        assert!(matches!(session.stop(), Err(CaptureError::NotRecording)));
    }

    #[test]
    fn stopped_session_can_record_again() {
        let mut session = RecordingSession::new();
        session.begin().unwrap();
        session.stop().unwrap();
        session.begin().unwrap();
        assert!(session.is_recording());
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut session = RecordingSession::new();
        session.begin().unwrap();
        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
    }
}
