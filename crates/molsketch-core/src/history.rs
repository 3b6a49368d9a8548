//! Linear undo/redo over graph snapshots.

use crate::molecule::Snapshot;

/// Maximum number of history entries to keep.
pub const MAX_UNDO_HISTORY: usize = 100;

/// Ordered snapshots plus a cursor.
///
/// Entry `index` is the live state. Entries after it are redo states and are
/// dropped by the next commit.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<Snapshot>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl History {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Rebuild a history from host-supplied parts.
    ///
    /// An empty entry list falls back to `current` as the single entry; an
    /// out-of-range index is clamped to the last entry.
    pub fn from_parts(entries: Vec<Snapshot>, index: usize, current: Snapshot) -> Self {
        if entries.is_empty() {
            return Self::new(current);
        }
        let index = index.min(entries.len() - 1);
        Self { entries, index }
    }

    /// Record a new state, discarding any redo states.
    pub fn commit(&mut self, snapshot: Snapshot) -> &Snapshot {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);

        if self.entries.len() > MAX_UNDO_HISTORY {
            let excess = self.entries.len() - MAX_UNDO_HISTORY;
            self.entries.drain(..excess);
        }
        self.index = self.entries.len() - 1;

        log::debug!(
            "history commit: {} entries, index {}",
            self.entries.len(),
            self.index
        );
        &self.entries[self.index]
    }

    /// Step back one entry. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        log::debug!("undo to index {}", self.index);
        self.entries.get(self.index)
    }

    /// Step forward one entry. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        log::debug!("redo to index {}", self.index);
        self.entries.get(self.index)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
