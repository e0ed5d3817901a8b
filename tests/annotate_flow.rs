//! End-to-end flow: capture a print, annotate it, walk the history.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use markshot::capture::{CaptureError, CaptureManager, FrameSource, SessionState, StillFrame};
use markshot::composite::{CairoCompositor, PreviewGenerator};
use markshot::config::{Action, Config};
use markshot::draw::{DrawingSurface, StrokeStyle, color};
use markshot::editor::{AnnotationEditor, CropRegion, Mode};
use markshot::history::SnapshotKind;

/// Frame source standing in for the user's screen.
struct ScriptedScreen {
    frame: Vec<u8>,
}

#[async_trait]
impl FrameSource for ScriptedScreen {
    async fn acquire(&self) -> Result<StillFrame, CaptureError> {
        Ok(StillFrame {
            image_data: self.frame.clone(),
        })
    }
}

fn sample_screen(width: i32, height: i32) -> Vec<u8> {
    let mut surface = DrawingSurface::new(width, height).unwrap();
    surface
        .stroke_rect(
            (4, 4),
            (width - 4, height - 4),
            &StrokeStyle {
                color: color::GREEN,
                width: 4.0,
            },
        )
        .unwrap();
    surface.encode_png().unwrap()
}

fn editor_with_defaults(config: &Config) -> AnnotationEditor {
    let preview = PreviewGenerator::new(
        &tokio::runtime::Handle::current(),
        Arc::new(CairoCompositor),
    );
    AnnotationEditor::new(config, preview).unwrap()
}

#[tokio::test]
async fn capture_annotate_undo_redo_crop() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = Config::default();
    let mut editor = editor_with_defaults(&config);

    // Capture: short window, one frame
    let manager = CaptureManager::new(
        &tokio::runtime::Handle::current(),
        Arc::new(ScriptedScreen {
            frame: sample_screen(640, 360),
        }),
        Duration::from_millis(20),
    );
    let mut frames = manager.take_frames().expect("first subscriber");
    manager.start_capture().unwrap();
    let frame = timeout(Duration::from_secs(2), frames.recv())
        .await
        .unwrap()
        .unwrap();

    // The print becomes snapshot 0
    editor.set_base_image(frame.image_data).unwrap();
    assert_eq!(editor.history().cursor(), 0);
    assert_eq!(editor.history().snapshots()[0].kind, SnapshotKind::Base);

    // Rectangle gesture
    editor.select_mode(Mode::Rect);
    editor.on_pointer_press(100, 100);
    editor.on_pointer_motion(200, 160).unwrap();
    editor.on_pointer_motion(300, 220).unwrap();
    editor.on_pointer_release(300, 220).unwrap();
    assert_eq!(editor.history().cursor(), 1);

    // Freehand line gesture
    editor.select_mode(Mode::Rect); // toggle off
    editor.select_mode(Mode::Line);
    editor.on_pointer_press(50, 50);
    editor.on_pointer_motion(80, 90).unwrap();
    editor.on_pointer_motion(130, 110).unwrap();
    editor.on_pointer_release(130, 110).unwrap();
    assert_eq!(editor.history().cursor(), 2);

    let full_preview = editor.settled_preview().await.unwrap();

    // Undo the line, commit a new rectangle: the line is discarded
    assert!(editor.undo());
    editor.select_mode(Mode::Line); // toggle off
    editor.select_mode(Mode::Rect);
    editor.on_pointer_press(400, 100);
    editor.on_pointer_motion(500, 200).unwrap();
    editor.on_pointer_release(500, 200).unwrap();

    let kinds: Vec<_> = editor
        .history()
        .snapshots()
        .iter()
        .map(|s| s.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![SnapshotKind::Base, SnapshotKind::Rect, SnapshotKind::Rect]
    );

    let rewritten_preview = editor.settled_preview().await.unwrap();
    assert_ne!(full_preview, rewritten_preview);

    // Crop the preview and confirm: a crop snapshot lands on top
    editor.select_mode(Mode::Rect); // toggle off
    editor.select_mode(Mode::Crop);
    assert!(!editor.is_surface_visible());
    let request = editor.crop_source().unwrap();
    assert!(!request.image_base64.is_empty());
    editor.on_crop_adjusted(CropRegion {
        x: 0,
        y: 0,
        width: 400,
        height: 225,
    });
    editor.confirm_crop().unwrap();
    assert!(editor.is_surface_visible());
    assert_eq!(
        editor.history().snapshots().last().unwrap().kind,
        SnapshotKind::Crop
    );
    assert!(editor.settled_preview().await.is_some());
}

#[tokio::test]
async fn stop_capture_shortcut_ends_the_window_early() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = Config::default();
    let shortcuts = config.keybindings.build_shortcut_map().unwrap();
    let mut editor = editor_with_defaults(&config);

    // A window long enough that only the shortcut can end it in time
    let manager = CaptureManager::new(
        &tokio::runtime::Handle::current(),
        Arc::new(ScriptedScreen {
            frame: sample_screen(320, 180),
        }),
        Duration::from_secs(60),
    );
    let mut frames = manager.take_frames().unwrap();
    manager.start_capture().unwrap();

    let mut state_rx = manager.subscribe_state();
    timeout(Duration::from_secs(2), async {
        while *state_rx.borrow_and_update() != SessionState::Recording {
            state_rx.changed().await.unwrap();
        }
    })
    .await
    .unwrap();

    // Ctrl+S arrives from the host UI; the chord is consumed
    let action = shortcuts.lookup("s", true, false, false).unwrap();
    assert_eq!(action, Action::StopCapture);
    editor.apply_action(action).unwrap();

    // The capture layer drains the pending action and stops the window
    if let Some(Action::StopCapture) = editor.take_pending_capture_action() {
        manager.stop_capture().unwrap();
    }

    let frame = timeout(Duration::from_secs(2), frames.recv())
        .await
        .expect("frame well before the 60s window")
        .unwrap();
    editor.set_base_image(frame.image_data).unwrap();
    assert_eq!(editor.history().cursor(), 0);
}

#[tokio::test]
async fn portrait_capture_resizes_the_canvas() {
    let config = Config::default();
    let mut editor = editor_with_defaults(&config);

    let manager = CaptureManager::new(
        &tokio::runtime::Handle::current(),
        Arc::new(ScriptedScreen {
            frame: sample_screen(180, 320),
        }),
        Duration::from_millis(10),
    );
    let mut frames = manager.take_frames().unwrap();
    manager.start_capture().unwrap();
    let frame = timeout(Duration::from_secs(2), frames.recv())
        .await
        .unwrap()
        .unwrap();

    editor.set_base_image(frame.image_data).unwrap();
    let (width, height) = editor.canvas_size();
    assert_eq!(height, 720);
    assert_eq!(width, 403);
}
