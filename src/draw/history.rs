//! Linear undo/redo history over frame snapshots.

use super::frame::Frame;

/// Undo/redo log holding full snapshots of the shape collection.
///
/// The stack is linear: one cursor, entries before it reachable by undo,
/// entries after it by redo. Recording a new snapshot after an undo discards
/// the redo tail, so there is never any branching. The first entry is always
/// the baseline (normally the empty frame), which is why N committed
/// mutations undo back to the starting state in exactly N steps.
///
/// Snapshots are whole-frame clones. That is O(shapes) memory per entry,
/// which is fine at this scale; structural diffs are not worth it here.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Frame>,
    cursor: usize,
}

impl History {
    /// Creates a history whose baseline entry is the empty frame.
    pub fn new() -> Self {
        Self {
            entries: vec![Frame::new()],
            cursor: 0,
        }
    }

    /// Records a snapshot of `frame` as the newest entry.
    ///
    /// Any entries after the cursor (left over from prior undos) are
    /// discarded first; redo is only available until the next commit.
    pub fn record(&mut self, frame: &Frame) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(frame.clone());
        self.cursor = self.entries.len() - 1;
    }

    /// Steps the cursor back one entry and returns the snapshot to restore.
    ///
    /// Returns `None` (a no-op) when already at the earliest entry.
    pub fn undo(&mut self) -> Option<&Frame> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Steps the cursor forward one entry and returns the snapshot to restore.
    ///
    /// Returns `None` (a no-op) when no entry was undone since the last commit.
    pub fn redo(&mut self) -> Option<&Frame> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// True when an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// True when a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Discards all entries and starts over with `frame` as the baseline.
    ///
    /// Used when a saved session replaces the canvas wholesale; the restored
    /// drawing becomes the new floor that undo cannot go below.
    pub fn reset(&mut self, frame: &Frame) {
        self.entries.clear();
        self.entries.push(frame.clone());
        self.cursor = 0;
    }

    /// Number of snapshots currently held (for inspection/logging).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the baseline entry is never removed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Shape;
    use crate::draw::color::RED;

    fn frame_with(n: usize) -> Frame {
        let mut frame = Frame::new();
        for i in 0..n {
            frame.add_shape(Shape::Rect {
                x: i as f64,
                y: 0.0,
                w: 10.0,
                h: 10.0,
                color: RED,
                thick: 2.0,
            });
        }
        frame
    }

    #[test]
    fn n_undos_return_to_empty_baseline() {
        let mut history = History::new();
        for n in 1..=5 {
            history.record(&frame_with(n));
        }

        let mut last = None;
        for _ in 0..5 {
            last = history.undo().cloned();
        }
        assert_eq!(last.unwrap().len(), 0);
        assert!(history.undo().is_none());
    }

    #[test]
    fn undo_then_redo_is_identity() {
        let mut history = History::new();
        history.record(&frame_with(1));
        history.record(&frame_with(2));

        let undone = history.undo().unwrap().len();
        assert_eq!(undone, 1);
        let redone = history.redo().unwrap().len();
        assert_eq!(redone, 2);
        assert!(history.redo().is_none());
    }

    #[test]
    fn record_after_undo_discards_redo_tail() {
        let mut history = History::new();
        history.record(&frame_with(1));
        history.record(&frame_with(2));

        history.undo().unwrap();
        assert!(history.can_redo());

        history.record(&frame_with(3));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());

        // The discarded entry is gone: undoing lands on the 1-shape frame.
        assert_eq!(history.undo().unwrap().len(), 1);
    }

    #[test]
    fn reset_installs_new_baseline() {
        let mut history = History::new();
        history.record(&frame_with(4));

        history.reset(&frame_with(2));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }
}
