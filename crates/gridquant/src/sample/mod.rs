//! Image sampling onto a cell grid
//!
//! Downsamples a decoded image to `cols × rows` with nearest-neighbor
//! picking (no averaging) and snaps every sample to the closest reference
//! palette color.

mod buffer;

use std::collections::HashMap;
use std::fmt;

use crate::color::Color;
use crate::histogram::ColorHistogram;

pub use buffer::{PixelBuffer, PixelLayout};

/// Error type for sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// The reference palette was empty; callers substitute the built-in
    /// fallback palette before sampling.
    EmptyReferencePalette,
    /// Source image or target grid has a zero side
    ZeroDimension { width: u32, height: u32 },
    /// Pixel data length doesn't match the declared dimensions
    BufferSize { expected: usize, actual: usize },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::EmptyReferencePalette => {
                write!(f, "reference palette is empty")
            }
            SampleError::ZeroDimension { width, height } => {
                write!(f, "zero dimension: {}x{}", width, height)
            }
            SampleError::BufferSize { expected, actual } => {
                write!(
                    f,
                    "pixel buffer holds {} bytes, expected {}",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for SampleError {}

/// Per-cell colors of a sampled image plus their histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledGrid {
    cols: u32,
    rows: u32,
    cells: Vec<Color>,
    histogram: ColorHistogram,
}

impl SampledGrid {
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Color assigned to `(col, row)`, or `None` out of range.
    pub fn get(&self, col: u32, row: u32) -> Option<Color> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }

    /// `(col, row, color)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| ((i as u32) % cols, (i as u32) / cols, c))
    }

    /// Matched palette color → number of cells, in first-seen order.
    pub fn histogram(&self) -> &ColorHistogram {
        &self.histogram
    }
}

/// Map the source pixel nearest to each cell center onto the reference
/// palette.
///
/// Cell `(col, row)` reads source pixel
/// `(floor((col + 0.5) * width / cols), floor((row + 0.5) * height / rows))`.
/// Cells are visited row-major, which fixes the histogram's first-seen order.
///
/// # Errors
///
/// - [`SampleError::EmptyReferencePalette`] if `reference` is empty
/// - [`SampleError::ZeroDimension`] if `cols` or `rows` is 0
///
/// # Example
///
/// ```
/// use gridquant::{sample, Color, PixelBuffer, ReferencePalette};
///
/// let image = PixelBuffer::filled(64, 64, Color::from_rgb(250, 10, 10)).unwrap();
/// let reference = ReferencePalette::fallback();
/// let sampled = sample(&image, 4, 4, reference.colors()).unwrap();
///
/// assert_eq!(sampled.get(0, 0), Some(Color::from_rgb(255, 0, 0)));
/// assert_eq!(sampled.histogram().count(Color::from_rgb(255, 0, 0)), 16);
/// ```
pub fn sample(
    buffer: &PixelBuffer,
    cols: u32,
    rows: u32,
    reference: &[Color],
) -> Result<SampledGrid, SampleError> {
    if reference.is_empty() {
        return Err(SampleError::EmptyReferencePalette);
    }
    if cols == 0 || rows == 0 {
        return Err(SampleError::ZeroDimension {
            width: cols,
            height: rows,
        });
    }

    let src_x: Vec<u32> = (0..cols)
        .map(|col| nearest_source(col, cols, buffer.width()))
        .collect();

    let mut matched: HashMap<Color, Color> = HashMap::new();
    let mut cells = Vec::with_capacity(cols as usize * rows as usize);
    let mut histogram = ColorHistogram::new();

    for row in 0..rows {
        let y = nearest_source(row, rows, buffer.height());
        for &x in &src_x {
            let raw = buffer.pixel(x, y);
            let snapped = *matched.entry(raw).or_insert_with(|| {
                // reference is non-empty, checked above
                raw.nearest(reference).unwrap_or(reference[0])
            });
            cells.push(snapped);
            histogram.add(snapped);
        }
    }

    Ok(SampledGrid {
        cols,
        rows,
        cells,
        histogram,
    })
}

/// Source index whose span contains the center of target cell `i`.
#[inline]
fn nearest_source(i: u32, target: u32, source: u32) -> u32 {
    let pos = (2 * i as u64 + 1) * source as u64 / (2 * target as u64);
    (pos as u32).min(source - 1)
}
