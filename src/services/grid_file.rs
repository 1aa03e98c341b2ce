//! Grid file persistence
//!
//! ```json
//! {
//!   "cols": 2, "rows": 1, "cellSize": 20.0, "geometry": "square",
//!   "colorMap": { "0,0": "#FF0000", "1,0": "#FFFFFF" },
//!   "timestamp": "2024-05-01T12:00:00.000Z",
//!   "palette": ["#FF0000", "#FFFFFF", ...]
//! }
//! ```
//!
//! `cols`, `rows` and `colorMap` are required. Loading validates the whole
//! document before building anything, so a bad file never half-replaces a
//! grid.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use gridquant::{Color, Palette};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, LoadError};
use crate::models::{is_valid_extent, CellKey, CoordinateGrid, GeometryKind, GridSettings};

/// On-disk shape of a grid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    pub cols: Option<u32>,
    pub rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryKind>,
    pub color_map: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub palette: Vec<String>,
}

/// A validated grid file.
#[derive(Debug, Clone)]
pub struct LoadedGrid {
    pub grid: CoordinateGrid,
    /// `None` when the file carried no palette
    pub palette: Option<Palette>,
    pub timestamp: Option<String>,
}

impl GridDocument {
    /// Capture every cell of `grid`, stamped with the current time.
    pub fn from_grid(grid: &CoordinateGrid, palette: &Palette) -> Self {
        let color_map = grid
            .cells()
            .map(|(col, row, color)| (format_key(col, row), color.to_hex()))
            .collect();

        Self {
            cols: Some(grid.cols()),
            rows: Some(grid.rows()),
            cell_size: Some(grid.geometry().cell_size()),
            geometry: Some(grid.geometry().kind()),
            color_map: Some(color_map),
            timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            palette: palette.to_hex_strings(),
        }
    }

    /// Validate and build a grid.
    ///
    /// `settings` supplies whatever the file leaves out (default color,
    /// history capacity, and geometry for files written without one).
    pub fn into_grid(
        self,
        settings: &GridSettings,
        palette_slots: usize,
    ) -> Result<LoadedGrid, LoadError> {
        let cols = self.cols.ok_or(LoadError::MissingField("cols"))?;
        let rows = self.rows.ok_or(LoadError::MissingField("rows"))?;
        let color_map = self.color_map.ok_or(LoadError::MissingField("colorMap"))?;
        if !is_valid_extent(cols, rows) {
            return Err(LoadError::InvalidExtent { cols, rows });
        }

        let mut cells: HashMap<CellKey, Color> = HashMap::with_capacity(color_map.len());
        for (key, value) in &color_map {
            let (col, row) = parse_key(key)?;
            if col >= cols || row >= rows {
                return Err(LoadError::CellOutOfRange {
                    key: key.clone(),
                    cols,
                    rows,
                });
            }
            cells.insert((col, row), parse_color("colorMap", value)?);
        }

        let palette = if self.palette.is_empty() {
            None
        } else {
            let colors = self
                .palette
                .iter()
                .map(|value| parse_color("palette", value))
                .collect::<Result<Vec<_>, _>>()?;
            Some(Palette::new(&colors, palette_slots, settings.default_color))
        };

        let settings = GridSettings {
            cell_size: self.cell_size.unwrap_or(settings.cell_size),
            geometry: self.geometry.unwrap_or(settings.geometry),
            ..settings.clone()
        };
        let grid = CoordinateGrid::with_cells(cols, rows, &settings, cells).map_err(|e| match e {
            GridError::OutOfRange {
                col,
                row,
                cols,
                rows,
            } => LoadError::CellOutOfRange {
                key: format_key(col, row),
                cols,
                rows,
            },
            _ => LoadError::InvalidExtent { cols, rows },
        })?;

        Ok(LoadedGrid {
            grid,
            palette,
            timestamp: self.timestamp,
        })
    }
}

/// `"col,row"`, no padding.
pub fn format_key(col: u32, row: u32) -> String {
    format!("{col},{row}")
}

/// Parse a `"col,row"` cell key. Only plain decimal digits without
/// leading zeros are accepted, so each cell has exactly one key.
pub fn parse_key(key: &str) -> Result<CellKey, LoadError> {
    let invalid = || LoadError::InvalidCellKey(key.to_string());
    let (col, row) = key.split_once(',').ok_or_else(invalid)?;
    let number = |s: &str| -> Result<u32, LoadError> {
        let padded = s.len() > 1 && s.starts_with('0');
        if s.is_empty() || padded || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse().map_err(|_| invalid())
    };
    Ok((number(col)?, number(row)?))
}

fn parse_color(field: &'static str, value: &str) -> Result<Color, LoadError> {
    value.parse().map_err(|source| LoadError::InvalidColor {
        field,
        value: value.to_string(),
        source,
    })
}

pub fn to_json(grid: &CoordinateGrid, palette: &Palette) -> Result<String, LoadError> {
    Ok(serde_json::to_string_pretty(&GridDocument::from_grid(
        grid, palette,
    ))?)
}

pub fn from_json(
    text: &str,
    settings: &GridSettings,
    palette_slots: usize,
) -> Result<LoadedGrid, LoadError> {
    let document: GridDocument = serde_json::from_str(text)?;
    document.into_grid(settings, palette_slots)
}

pub fn save(path: &Path, grid: &CoordinateGrid, palette: &Palette) -> Result<(), LoadError> {
    let json = to_json(grid, palette)?;
    fs::write(path, json)?;
    tracing::info!(
        path = %path.display(),
        cols = grid.cols(),
        rows = grid.rows(),
        "Saved grid"
    );
    Ok(())
}

pub fn load(
    path: &Path,
    settings: &GridSettings,
    palette_slots: usize,
) -> Result<LoadedGrid, LoadError> {
    let text = fs::read_to_string(path)?;
    let loaded = from_json(&text, settings, palette_slots)?;
    tracing::info!(
        path = %path.display(),
        cols = loaded.grid.cols(),
        rows = loaded.grid.rows(),
        "Loaded grid"
    );
    Ok(loaded)
}
