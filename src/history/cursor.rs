/// Viewing position within the history log.
///
/// The cursor is owned by the session, not the log: navigating never
/// mutates entries, and clearing the log versus resetting the position
/// stay independent actions. `index` ranges over `[-1, len - 1]` where
/// -1 means "no current entry". Movement clamps at both ends; there is
/// no wraparound.
///
/// Appending while the cursor sits behind the tip does not truncate
/// anything: the log is append-only, so entries past the old position
/// simply become unreachable once the cursor resets to the new tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCursor {
    index: isize,
}

impl Default for HistoryCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryCursor {
    pub fn new() -> Self {
        Self { index: -1 }
    }

    /// Index of the entry the cursor points at, or `None` at -1.
    pub fn current(&self) -> Option<usize> {
        if self.index >= 0 {
            Some(self.index as usize)
        } else {
            None
        }
    }

    /// Step back one entry. A no-op at index 0 (the first entry stays
    /// current) and at -1.
    pub fn undo(&mut self) -> Option<usize> {
        if self.index > 0 {
            self.index -= 1;
            Some(self.index as usize)
        } else {
            None
        }
    }

    /// Step forward one entry. A no-op at the tip.
    pub fn redo(&mut self, len: usize) -> Option<usize> {
        if self.index < len as isize - 1 {
            self.index += 1;
            Some(self.index as usize)
        } else {
            None
        }
    }

    /// Point at the newest entry; called after every normal-path append
    /// and after a history load.
    pub fn reset_to_tip(&mut self, len: usize) {
        self.index = len as isize - 1;
    }

    /// Back to "no current entry".
    pub fn reset(&mut self) {
        self.index = -1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_no_current_entry() {
        let cursor = HistoryCursor::new();
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.undo(), None);
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_redo_on_empty_is_noop() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.redo(0), None);
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_undo_at_index_zero_is_noop() {
        let mut cursor = HistoryCursor::new();
        cursor.reset_to_tip(1);
        assert_eq!(cursor.current(), Some(0));
        assert_eq!(cursor.undo(), None);
        assert_eq!(cursor.current(), Some(0));
    }

    #[test]
    fn test_redo_at_tip_is_noop() {
        let mut cursor = HistoryCursor::new();
        cursor.reset_to_tip(3);
        assert_eq!(cursor.current(), Some(2));
        assert_eq!(cursor.redo(3), None);
        assert_eq!(cursor.current(), Some(2));
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut cursor = HistoryCursor::new();
        cursor.reset_to_tip(3);

        assert_eq!(cursor.undo(), Some(1));
        assert_eq!(cursor.undo(), Some(0));
        assert_eq!(cursor.undo(), None);

        assert_eq!(cursor.redo(3), Some(1));
        assert_eq!(cursor.redo(3), Some(2));
        assert_eq!(cursor.redo(3), None);
    }

    #[test]
    fn test_reset_to_tip_of_empty_log() {
        let mut cursor = HistoryCursor::new();
        cursor.reset_to_tip(0);
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_reset_clears_position() {
        let mut cursor = HistoryCursor::new();
        cursor.reset_to_tip(5);
        cursor.reset();
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_append_behind_tip_resets_forward() {
        // Undo back, then a new entry arrives: the cursor jumps to the
        // new tip and the redo path beyond it is simply unreachable.
        let mut cursor = HistoryCursor::new();
        cursor.reset_to_tip(3);
        cursor.undo();
        cursor.undo();
        assert_eq!(cursor.current(), Some(0));

        cursor.reset_to_tip(4);
        assert_eq!(cursor.current(), Some(3));
        assert_eq!(cursor.redo(4), None);
    }
}
