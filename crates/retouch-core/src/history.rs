//! Bounded linear undo/redo history.
//!
//! Entries are full snapshots. Pushing while the cursor is behind the newest
//! entry drops everything after the cursor first; pushing past capacity
//! evicts the oldest entry.

use std::collections::VecDeque;

use crate::config::DEFAULT_HISTORY_DEPTH;
use crate::raster::Raster;

/// Snapshot history with a cursor at the currently displayed entry.
#[derive(Debug, Clone)]
pub struct HistoryStore<T = Raster> {
    entries: VecDeque<T>,
    /// Index of the current entry; meaningless while `entries` is empty.
    cursor: usize,
    capacity: usize,
}

impl<T> Default for HistoryStore<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl<T> HistoryStore<T> {
    /// Create an empty store keeping at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Record a new entry and move the cursor to it.
    pub fn push(&mut self, entry: T) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry. `None` when already at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry. `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, or `None` when empty.
    pub fn position(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.cursor)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
