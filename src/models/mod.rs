pub mod config;
pub mod geometry;
pub mod grid;
pub mod history;

pub use config::{AppConfig, ExportConfig, GridConfig};
pub use geometry::{BrickGeometry, CellGeometry, GeometryKind, SquareGeometry};
pub use grid::{is_valid_extent, CoordinateGrid, GridSettings, MAX_GRID_CELLS};
pub use history::{CellKey, HistoryStack, Snapshot, HISTORY_CAPACITY};
