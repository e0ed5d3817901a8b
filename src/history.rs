//! Snapshot history and the undo/redo cursor.
//!
//! Every finalized drawing step is recorded as an immutable [`Snapshot`] of
//! the full surface. The [`History`] keeps those snapshots in commit order
//! together with a cursor marking the current undo/redo position; the
//! composited preview is always the layered merge of the snapshots at or
//! before the cursor.

use crate::composite::CompositeLayer;

/// Which operation produced a committed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    /// The captured print drawn as the first layer.
    Base,
    /// A confirmed crop of the preview, re-rendered to full canvas size.
    Crop,
    /// A placed text annotation.
    Text,
    /// A dragged rectangle outline.
    Rect,
    /// An accumulated freehand line stroke.
    Line,
}

/// One committed, immutable rendering of the drawing surface.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub kind: SnapshotKind,
    /// PNG-encoded surface content at commit time.
    pub image: Vec<u8>,
    /// Index this snapshot occupies in the history sequence.
    pub position: usize,
}

/// Ordered snapshot sequence plus the undo/redo cursor.
///
/// The cursor is -1 while no snapshot is active and otherwise addresses the
/// last snapshot included in the composite. It never leaves `[-1, len - 1]`:
/// undo at the start and redo at the end are no-ops.
#[derive(Debug)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: isize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Creates an empty history with the cursor at -1.
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: -1,
        }
    }

    /// Current undo/redo position (-1 = nothing active).
    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All committed snapshots in sequence order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Commits a new snapshot at the position after the cursor.
    ///
    /// Anything beyond the cursor is discarded first, so committing after an
    /// undo rewrites the future instead of interleaving with it. Returns the
    /// position the snapshot was stored at.
    pub fn commit(&mut self, kind: SnapshotKind, image: Vec<u8>) -> usize {
        let position = (self.cursor + 1) as usize;
        self.snapshots.truncate(position);
        self.snapshots.push(Snapshot {
            kind,
            image,
            position,
        });
        self.cursor = position as isize;
        position
    }

    /// Steps the cursor back one snapshot.
    ///
    /// Returns false (and leaves the cursor untouched) when already at -1;
    /// no snapshot is ever discarded by undo.
    pub fn undo(&mut self) -> bool {
        if self.cursor < 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Steps the cursor forward one snapshot, if there is one.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.snapshots.len() as isize {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Discards all snapshots and returns the cursor to -1.
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.cursor = -1;
    }

    /// Builds the compositor input: one entry per snapshot, in order, with
    /// the image present only for snapshots at or before the cursor.
    pub fn visible_layers(&self) -> Vec<CompositeLayer> {
        self.snapshots
            .iter()
            .map(|snapshot| CompositeLayer {
                source: (snapshot.position as isize <= self.cursor)
                    .then(|| snapshot.image.clone()),
            })
            .collect()
    }
}
