//! Sparse coordinate-addressed color grid with selection and history.

use std::collections::{HashMap, HashSet};

use gridquant::{Color, ColorHistogram, SampledGrid};

use super::geometry::{CellGeometry, GeometryKind};
use super::history::{CellKey, HistoryStack, Snapshot, HISTORY_CAPACITY};
use crate::error::GridError;

/// Largest `cols * rows` a grid may have. Every snapshot, save and
/// histogram walks all cells.
pub const MAX_GRID_CELLS: u64 = 250_000;

/// Whether `cols x rows` is a usable grid extent.
pub fn is_valid_extent(cols: u32, rows: u32) -> bool {
    cols > 0 && rows > 0 && cols as u64 * rows as u64 <= MAX_GRID_CELLS
}

/// Construction parameters shared by new and loaded grids.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    /// Color of every cell that was never assigned
    pub default_color: Color,
    pub history_capacity: usize,
    pub geometry: GeometryKind,
    pub cell_size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            default_color: Color::WHITE,
            history_capacity: HISTORY_CAPACITY,
            geometry: GeometryKind::Square,
            cell_size: 20.0,
        }
    }
}

/// A fixed `cols x rows` grid of colors.
///
/// Unassigned cells read as the default color, so every in-range lookup
/// succeeds. Bulk mutations (`apply_to_selection`, `apply_color_map`,
/// `apply_sample`, `clear`) are recorded in the history and can be undone.
/// Single-cell [`set`](Self::set) is not recorded on its own: the next
/// recorded mutation, undo or redo commits it first.
#[derive(Debug, Clone)]
pub struct CoordinateGrid {
    cols: u32,
    rows: u32,
    default_color: Color,
    cells: HashMap<CellKey, Color>,
    selection: HashSet<CellKey>,
    history: HistoryStack,
    /// Direct writes since the last recorded state
    dirty: bool,
    geometry: Box<dyn CellGeometry>,
}

impl CoordinateGrid {
    /// Create an all-default grid whose history holds that initial state.
    pub fn new(cols: u32, rows: u32, settings: &GridSettings) -> Result<Self, GridError> {
        Self::with_cells(cols, rows, settings, HashMap::new())
    }

    /// Create a grid from explicit cell assignments.
    ///
    /// Fails without building anything if any key is out of range. History
    /// starts with exactly this state.
    pub fn with_cells(
        cols: u32,
        rows: u32,
        settings: &GridSettings,
        cells: HashMap<CellKey, Color>,
    ) -> Result<Self, GridError> {
        if !is_valid_extent(cols, rows) {
            return Err(GridError::InvalidExtent { cols, rows });
        }
        if let Some(&(col, row)) = cells.keys().find(|(c, r)| *c >= cols || *r >= rows) {
            return Err(GridError::OutOfRange {
                col,
                row,
                cols,
                rows,
            });
        }

        let mut history = HistoryStack::new(settings.history_capacity);
        history.reset(Snapshot::new(cells.clone()));

        Ok(Self {
            cols,
            rows,
            default_color: settings.default_color,
            cells,
            selection: HashSet::new(),
            history,
            dirty: false,
            geometry: settings.geometry.build(settings.cell_size),
        })
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    pub fn geometry(&self) -> &dyn CellGeometry {
        self.geometry.as_ref()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    fn check(&self, col: u32, row: u32) -> Result<CellKey, GridError> {
        if col < self.cols && row < self.rows {
            Ok((col, row))
        } else {
            Err(GridError::OutOfRange {
                col,
                row,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }

    fn color_at(&self, key: CellKey) -> Color {
        self.cells.get(&key).copied().unwrap_or(self.default_color)
    }

    pub fn get(&self, col: u32, row: u32) -> Result<Color, GridError> {
        self.check(col, row).map(|key| self.color_at(key))
    }

    /// Overwrite one cell without recording history.
    pub fn set(&mut self, col: u32, row: u32, color: Color) -> Result<(), GridError> {
        let key = self.check(col, row)?;
        self.cells.insert(key, color);
        self.dirty = true;
        Ok(())
    }

    /// Every cell as `(col, row, color)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| {
            (0..cols).map(move |col| (col, row, self.color_at((col, row))))
        })
    }

    /// Cell under a canvas point, per the grid's geometry.
    pub fn cell_at_pixel(&self, x: f64, y: f64) -> Option<CellKey> {
        self.geometry.cell_at(x, y, self.cols, self.rows)
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Returns `true` if the cell was not already selected.
    pub fn select(&mut self, col: u32, row: u32) -> Result<bool, GridError> {
        let key = self.check(col, row)?;
        Ok(self.selection.insert(key))
    }

    /// Returns `true` if the cell was selected.
    pub fn deselect(&mut self, col: u32, row: u32) -> Result<bool, GridError> {
        let key = self.check(col, row)?;
        Ok(self.selection.remove(&key))
    }

    /// Flip a cell's selection. Returns the new state.
    pub fn toggle(&mut self, col: u32, row: u32) -> Result<bool, GridError> {
        let key = self.check(col, row)?;
        if self.selection.remove(&key) {
            Ok(false)
        } else {
            self.selection.insert(key);
            Ok(true)
        }
    }

    /// Select the inclusive rectangle spanned by two corners, in any order.
    ///
    /// Both corners are validated before anything is selected. Returns the
    /// number of newly selected cells.
    pub fn select_rect(&mut self, from: CellKey, to: CellKey) -> Result<usize, GridError> {
        self.check(from.0, from.1)?;
        self.check(to.0, to.1)?;

        let (c0, c1) = (from.0.min(to.0), from.0.max(to.0));
        let (r0, r1) = (from.1.min(to.1), from.1.max(to.1));
        let mut added = 0;
        for row in r0..=r1 {
            for col in c0..=c1 {
                if self.selection.insert((col, row)) {
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    pub fn select_all(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.selection.insert((col, row));
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, col: u32, row: u32) -> bool {
        self.selection.contains(&(col, row))
    }

    /// Selected cells, row-major.
    pub fn selected_cells(&self) -> Vec<CellKey> {
        let mut keys: Vec<CellKey> = self.selection.iter().copied().collect();
        keys.sort_by_key(|&(col, row)| (row, col));
        keys
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    // ---------------------------------------------------------------------
    // Recorded mutations
    // ---------------------------------------------------------------------

    /// Paint every selected cell. No-op (returns `false`) with an empty
    /// selection.
    pub fn apply_to_selection(&mut self, color: Color) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.commit_pending();
        for &key in &self.selection {
            self.cells.insert(key, color);
        }
        self.record();
        true
    }

    /// Replace each cell's color by its entry in `map`, if it has one.
    ///
    /// Cells whose color is not a key of `map` are left alone. Returns the
    /// number of cells that changed; nothing is recorded when that is 0.
    pub fn apply_color_map(&mut self, map: &HashMap<Color, Color>) -> usize {
        let updates: Vec<(CellKey, Color)> = self
            .cells()
            .filter_map(|(col, row, current)| match map.get(&current) {
                Some(&new) if new != current => Some(((col, row), new)),
                _ => None,
            })
            .collect();
        if updates.is_empty() {
            return 0;
        }

        self.commit_pending();
        let changed = updates.len();
        self.cells.extend(updates);
        self.record();
        changed
    }

    /// Overwrite every cell from a sampled image.
    pub fn apply_sample(&mut self, sample: &SampledGrid) -> Result<(), GridError> {
        if sample.cols() != self.cols || sample.rows() != self.rows {
            return Err(GridError::SampleMismatch {
                sample_cols: sample.cols(),
                sample_rows: sample.rows(),
                cols: self.cols,
                rows: self.rows,
            });
        }
        self.commit_pending();
        self.cells = sample
            .iter()
            .map(|(col, row, color)| ((col, row), color))
            .collect();
        self.record();
        Ok(())
    }

    /// Reset every cell to the default color and drop the selection.
    pub fn clear(&mut self) {
        self.commit_pending();
        self.cells.clear();
        self.selection.clear();
        self.record();
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Restore the previous recorded state. Returns `false` if there is none.
    pub fn undo(&mut self) -> bool {
        self.commit_pending();
        match self.history.undo() {
            Some(snapshot) => {
                self.cells = snapshot.cells().clone();
                true
            }
            None => false,
        }
    }

    /// Re-apply the next recorded state. Returns `false` if there is none.
    ///
    /// Uncommitted direct writes count as a new edit and discard the redo
    /// branch.
    pub fn redo(&mut self) -> bool {
        self.commit_pending();
        match self.history.redo() {
            Some(snapshot) => {
                self.cells = snapshot.cells().clone();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.dirty || self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.dirty && self.history.can_redo()
    }

    pub fn has_uncommitted(&self) -> bool {
        self.dirty
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.cells.clone())
    }

    fn commit_pending(&mut self) {
        if self.dirty {
            self.record();
        }
    }

    fn record(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
        self.dirty = false;
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn distinct_colors(&self) -> HashSet<Color> {
        self.cells().map(|(_, _, color)| color).collect()
    }

    /// Cell count per color, in row-major first-seen order.
    pub fn histogram(&self) -> ColorHistogram {
        self.cells().map(|(_, _, color)| color).collect()
    }
}
