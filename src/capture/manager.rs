use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc, oneshot, watch};
use tokio::time;

use super::session::{RecordingSession, SessionState};
use super::source::FrameSource;
use super::types::{CaptureError, StillFrame};

enum Command {
    Start,
    Stop,
}

/// Shared handle for driving capture sessions from the sync event loop.
///
/// A background task owns the [`RecordingSession`] and serializes all
/// transitions; callers only ever send commands and observe state through a
/// watch channel. Each capture opens a fixed window that self-terminates
/// (default comes from config), acquires exactly one frame from the
/// [`FrameSource`], and publishes it on the frame channel.
#[derive(Clone)]
pub struct CaptureManager {
    command_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<SessionState>,
    /// Handed out once; the frame channel has a single subscriber.
    frame_rx: Arc<Mutex<Option<mpsc::UnboundedReceiver<StillFrame>>>>,
}

impl CaptureManager {
    /// Creates a manager and spawns its session task on the given runtime.
    ///
    /// # Arguments
    /// * `runtime_handle` - Tokio runtime handle for the background work
    /// * `source` - Frame acquisition collaborator
    /// * `window` - Capture window duration before self-termination
    pub fn new(
        runtime_handle: &tokio::runtime::Handle,
        source: Arc<dyn FrameSource>,
        window: Duration,
    ) -> Self {
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<Command>();
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);
        let (frame_tx, frame_rx) = mpsc::unbounded_channel::<StillFrame>();

        runtime_handle.spawn(async move {
            let mut session = RecordingSession::new();
            let mut stop_tx: Option<oneshot::Sender<()>> = None;
            // Window tasks report completion here so the session task can
            // close the state machine.
            let (done_tx, mut done_rx) = mpsc::unbounded_channel::<()>();

            loop {
                tokio::select! {
                    command = command_rx.recv() => {
                        let Some(command) = command else { break };
                        match command {
                            Command::Start => match session.begin() {
                                Ok(()) => {
                                    let _ = state_tx.send(SessionState::Recording);
                                    let (tx, rx) = oneshot::channel();
                                    stop_tx = Some(tx);
                                    tokio::spawn(run_capture_window(
                                        source.clone(),
                                        window,
                                        rx,
                                        frame_tx.clone(),
                                        done_tx.clone(),
                                    ));
                                    log::info!("capture window opened ({window:?})");
                                }
                                Err(err) => log::warn!("ignoring start request: {err}"),
                            },
                            Command::Stop => match stop_tx.take() {
                                Some(tx) => {
                                    let _ = tx.send(());
                                    log::debug!("early stop requested");
                                }
                                None => log::debug!("stop requested with no open window"),
                            },
                        }
                    }
                    Some(()) = done_rx.recv() => {
                        if let Err(err) = session.stop() {
                            log::warn!("capture window closed twice: {err}");
                        }
                        stop_tx = None;
                        let _ = state_tx.send(SessionState::Stopped);
                    }
                }
            }
        });

        Self {
            command_tx,
            state_rx,
            frame_rx: Arc::new(Mutex::new(Some(frame_rx))),
        }
    }

    /// Begins a capture session.
    ///
    /// Non-blocking; the window runs in the background and self-terminates.
    /// A start while a window is already open is ignored by the session task
    /// (logged, state unchanged).
    pub fn start_capture(&self) -> Result<(), CaptureError> {
        self.command_tx
            .send(Command::Start)
            .map_err(|_| CaptureError::ManagerStopped)
    }

    /// Ends the current capture window early.
    ///
    /// The frame is still extracted; only the window is cut short.
    pub fn stop_capture(&self) -> Result<(), CaptureError> {
        if *self.state_rx.borrow() != SessionState::Recording {
            return Err(CaptureError::NotRecording);
        }
        self.command_tx
            .send(Command::Stop)
            .map_err(|_| CaptureError::ManagerStopped)
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        *self.state_rx.borrow()
    }

    /// Watch channel for session-state changes.
    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    /// Takes the frame receiver. Only the first caller gets it; the channel
    /// has exactly one subscriber.
    pub fn take_frames(&self) -> Option<mpsc::UnboundedReceiver<StillFrame>> {
        self.frame_rx.try_lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Runs one capture window: wait for the timer (or an early stop), then
/// extract the single still frame.
///
/// Acquisition failures are logged and leave the print unset; the session
/// still closes, so downstream simply has no base image to draw.
async fn run_capture_window(
    source: Arc<dyn FrameSource>,
    window: Duration,
    stop_rx: oneshot::Receiver<()>,
    frame_tx: mpsc::UnboundedSender<StillFrame>,
    done_tx: mpsc::UnboundedSender<()>,
) {
    tokio::select! {
        _ = time::sleep(window) => log::debug!("capture window elapsed"),
        _ = stop_rx => log::debug!("capture window stopped early"),
    }

    match source.acquire().await {
        Ok(frame) => {
            log::info!("print extracted ({} bytes)", frame.image_data.len());
            let _ = frame_tx.send(frame);
        }
        Err(err) => log::error!("frame extraction failed: {err}"),
    }

    let _ = done_tx.send(());
}
