//! Linear undo/redo over whole-grid snapshots.
//!
//! Every entry is an owned copy of the cell map, so restoring is a plain
//! clone and no two entries share state. The stack always holds the state
//! the grid is in right now at `index`; undo walks back, redo walks forward,
//! and a new push discards everything after `index`.

use gridquant::Color;
use std::collections::HashMap;

/// Default number of retained states
pub const HISTORY_CAPACITY: usize = 50;

/// `(col, row)`
pub type CellKey = (u32, u32);

/// Owned copy of a grid's explicitly assigned cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    cells: HashMap<CellKey, Color>,
}

impl Snapshot {
    pub fn new(cells: HashMap<CellKey, Color>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &HashMap<CellKey, Color> {
        &self.cells
    }

    pub fn into_cells(self) -> HashMap<CellKey, Color> {
        self.cells
    }
}

#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<Snapshot>,
    /// `None` only while empty
    index: Option<usize>,
    capacity: usize,
}

impl HistoryStack {
    /// Empty stack. A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: None,
            capacity: capacity.max(1),
        }
    }

    /// Append a state, dropping any redo branch and, past capacity, the
    /// oldest entry.
    pub fn push(&mut self, snapshot: Snapshot) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot);

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.index = Some(self.entries.len() - 1);
    }

    /// Step back. Returns the state to restore, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                self.entries.get(i - 1)
            }
            _ => None,
        }
    }

    /// Step forward. Returns the state to restore, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.index.map_or(0, |i| i + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.index = Some(next);
        self.entries.get(next)
    }

    /// Forget everything and start over from one state.
    pub fn reset(&mut self, snapshot: Snapshot) {
        self.entries.clear();
        self.entries.push(snapshot);
        self.index = Some(0);
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.index.and_then(|i| self.entries.get(i))
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.map_or(0, |i| i + 1) < self.entries.len()
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}
