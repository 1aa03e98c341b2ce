//! Cell shape layouts
//!
//! The grid itself only knows `(col, row) -> color`. Everything that depends
//! on how cells are laid out on a canvas (pixel origin, hit-testing, total
//! canvas size) lives behind [`CellGeometry`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel <-> cell transform for one layout.
pub trait CellGeometry: fmt::Debug + Send + Sync {
    fn kind(&self) -> GeometryKind;

    /// Edge length of one cell in canvas pixels
    fn cell_size(&self) -> f64;

    /// Canvas `(width, height)` needed to draw a `cols x rows` grid
    fn canvas_size(&self, cols: u32, rows: u32) -> (f64, f64);

    /// Top-left corner of a cell
    fn cell_origin(&self, col: u32, row: u32) -> (f64, f64);

    /// Cell containing the canvas point, if any.
    fn cell_at(&self, x: f64, y: f64, cols: u32, rows: u32) -> Option<(u32, u32)>;

    fn boxed_clone(&self) -> Box<dyn CellGeometry>;
}

impl Clone for Box<dyn CellGeometry> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// Layout selector, as written in config and grid files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    #[default]
    Square,
    Brick,
}

impl GeometryKind {
    pub fn build(self, cell_size: f64) -> Box<dyn CellGeometry> {
        match self {
            GeometryKind::Square => Box::new(SquareGeometry::new(cell_size)),
            GeometryKind::Brick => Box::new(BrickGeometry::new(cell_size)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Square => "square",
            GeometryKind::Brick => "brick",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned square cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareGeometry {
    cell_size: f64,
}

impl SquareGeometry {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: sanitize_size(cell_size),
        }
    }
}

impl CellGeometry for SquareGeometry {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Square
    }

    fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn canvas_size(&self, cols: u32, rows: u32) -> (f64, f64) {
        (cols as f64 * self.cell_size, rows as f64 * self.cell_size)
    }

    fn cell_origin(&self, col: u32, row: u32) -> (f64, f64) {
        (col as f64 * self.cell_size, row as f64 * self.cell_size)
    }

    fn cell_at(&self, x: f64, y: f64, cols: u32, rows: u32) -> Option<(u32, u32)> {
        let col = index_along(x, self.cell_size, cols)?;
        let row = index_along(y, self.cell_size, rows)?;
        Some((col, row))
    }

    fn boxed_clone(&self) -> Box<dyn CellGeometry> {
        Box::new(*self)
    }
}

/// Brick-stitch layout: odd rows are shifted right by half a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickGeometry {
    cell_size: f64,
}

impl BrickGeometry {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: sanitize_size(cell_size),
        }
    }

    fn row_offset(&self, row: u32) -> f64 {
        if row % 2 == 1 {
            self.cell_size / 2.0
        } else {
            0.0
        }
    }
}

impl CellGeometry for BrickGeometry {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Brick
    }

    fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn canvas_size(&self, cols: u32, rows: u32) -> (f64, f64) {
        let extra = if rows > 1 { self.cell_size / 2.0 } else { 0.0 };
        (
            cols as f64 * self.cell_size + extra,
            rows as f64 * self.cell_size,
        )
    }

    fn cell_origin(&self, col: u32, row: u32) -> (f64, f64) {
        (
            col as f64 * self.cell_size + self.row_offset(row),
            row as f64 * self.cell_size,
        )
    }

    fn cell_at(&self, x: f64, y: f64, cols: u32, rows: u32) -> Option<(u32, u32)> {
        let row = index_along(y, self.cell_size, rows)?;
        let col = index_along(x - self.row_offset(row), self.cell_size, cols)?;
        Some((col, row))
    }

    fn boxed_clone(&self) -> Box<dyn CellGeometry> {
        Box::new(*self)
    }
}

fn sanitize_size(cell_size: f64) -> f64 {
    if cell_size.is_finite() && cell_size > 0.0 {
        cell_size
    } else {
        1.0
    }
}

/// Index of the `size`-wide span containing `pos`, if below `count`.
fn index_along(pos: f64, size: f64, count: u32) -> Option<u32> {
    if !pos.is_finite() || pos < 0.0 {
        return None;
    }
    let i = (pos / size).floor();
    if i < count as f64 {
        Some(i as u32)
    } else {
        None
    }
}
