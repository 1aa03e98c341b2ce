//! Assertion helpers for tests.

use std::collections::HashSet;

use beadgrid::models::CoordinateGrid;
use gridquant::Color;
use pretty_assertions::assert_eq;

pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Assert bytes are a PNG image
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert specific cells hold specific colors, given as hex
pub fn assert_cells(grid: &CoordinateGrid, expected: &[(u32, u32, &str)]) {
    for &(col, row, hex) in expected {
        let want: Color = hex.parse().expect("Bad hex in test");
        let got = grid.get(col, row).expect("Cell out of range");
        assert_eq!(got, want, "cell ({col},{row})");
    }
}

/// Assert two grids have the same extent and the same color in every cell
pub fn assert_same_cells(a: &CoordinateGrid, b: &CoordinateGrid) {
    assert_eq!((a.cols(), a.rows()), (b.cols(), b.rows()), "grid extent");
    let left: Vec<_> = a.cells().collect();
    let right: Vec<_> = b.cells().collect();
    assert_eq!(left, right);
}

/// Assert a grid uses no more than `max` distinct colors
pub fn assert_at_most_colors(grid: &CoordinateGrid, max: usize) {
    let colors = grid.distinct_colors();
    assert!(
        colors.len() <= max,
        "Expected at most {max} colors, got {}: {:?}",
        colors.len(),
        colors
    );
}

/// Assert every grid color is drawn from `allowed`
pub fn assert_colors_within(grid: &CoordinateGrid, allowed: &[Color]) {
    let allowed: HashSet<_> = allowed.iter().copied().collect();
    for (col, row, color) in grid.cells() {
        assert!(
            allowed.contains(&color),
            "cell ({col},{row}) has {color}, not in {allowed:?}"
        );
    }
}
