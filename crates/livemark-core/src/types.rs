//! Selection state supplied by the host editor.

use serde::{Deserialize, Serialize};

/// Text selection with anchor and head positions.
///
/// The anchor is where the selection started, the head is where the cursor is now.
/// They may be in any order - use `start()` and `end()` for ordered bounds.
/// A collapsed selection (anchor == head) is a plain caret.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Where selection started
    pub anchor: usize,
    /// Where cursor is now
    pub head: usize,
}

impl Selection {
    /// Create a new selection.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor position).
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Get the start (lower bound) of the selection.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Get the end (upper bound) of the selection.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Pull both ends into `0..=len`.
    ///
    /// Hosts occasionally report positions past the end of a document that
    /// just shrank; those are pinned to the end rather than rejected.
    pub fn clamped(&self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            head: self.head.min(len),
        }
    }

    /// Whether the closed interval `[start, end]` touches this selection.
    ///
    /// Both boundaries count, so a caret sitting right before or right after
    /// a span is considered inside it.
    pub fn touches(&self, start: usize, end: usize) -> bool {
        self.start() <= end && self.end() >= start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        // Forward selection
        let sel = Selection::new(5, 10);
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 10);

        // Backward selection
        let sel = Selection::new(10, 5);
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 10);
    }

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(7);
        assert_eq!(sel.start(), 7);
        assert_eq!(sel.end(), 7);
    }

    #[test]
    fn test_clamped() {
        let sel = Selection::new(3, 40).clamped(10);
        assert_eq!(sel, Selection::new(3, 10));
        assert_eq!(Selection::collapsed(99).clamped(0), Selection::collapsed(0));
    }

    #[test]
    fn test_touches_is_boundary_inclusive() {
        let caret = Selection::collapsed(21);
        assert!(caret.touches(20, 21));
        assert!(caret.touches(21, 30));
        assert!(!caret.touches(0, 20));

        let range = Selection::new(0, 3);
        assert!(range.touches(0, 3));
        assert!(range.touches(3, 5));
        assert!(!range.touches(4, 5));
    }
}
