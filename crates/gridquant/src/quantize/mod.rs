//! Color reduction
//!
//! Shrinks an observed color set to exactly `k` representatives with a
//! bounded, deterministic k-means in RGB space, then maps every old color
//! onto its nearest replacement.
//!
//! # Seeding
//!
//! Centroids are seeded from a [`QuantizationContext`]: when a reference
//! palette from the session's first image exists it wins, so reducing the
//! same picture again lands on the same colors instead of drifting. Without
//! one, the most frequent input colors are used. See
//! [`reduce_colors_detailed`] for the full rule.
//!
//! # Example
//!
//! ```
//! use gridquant::{reduce_color_set, Color, QuantizationContext};
//!
//! let colors = [
//!     "#000000".parse::<Color>().unwrap(),
//!     "#080808".parse().unwrap(),
//!     "#FFFFFF".parse().unwrap(),
//! ];
//! let reduced = reduce_color_set(&colors, 2, &QuantizationContext::new()).unwrap();
//! assert_eq!(reduced.len(), 2);
//! ```

mod context;
mod kmeans;

use std::collections::HashMap;
use std::fmt;

use crate::color::Color;
use crate::histogram::ColorHistogram;

pub use context::QuantizationContext;
pub use kmeans::MAX_ITERATIONS;

/// Error type for color reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizeError {
    /// Target cluster count must be at least 1
    InvalidClusterCount(usize),
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::InvalidClusterCount(k) => {
                write!(f, "target color count must be at least 1, got {}", k)
            }
        }
    }
}

impl std::error::Error for QuantizeError {}

/// Result of a reduction, with convergence details for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    /// The replacement colors, in centroid-index order
    pub colors: Vec<Color>,
    /// Refinement rounds run (0 on the no-op path)
    pub iterations: usize,
    /// Whether assignments stabilized before the iteration cap
    pub converged: bool,
    /// Whether the input already had at most `k` colors
    pub unchanged: bool,
}

/// Reduce the distinct colors of `colors` to exactly `k`.
///
/// See [`reduce_colors_detailed`].
pub fn reduce_colors(
    colors: &ColorHistogram,
    k: usize,
    ctx: &QuantizationContext,
) -> Result<Vec<Color>, QuantizeError> {
    reduce_colors_detailed(colors, k, ctx).map(|r| r.colors)
}

/// Reduce a plain color list, treating every distinct color as seen once.
///
/// Duplicates are dropped (first occurrence kept) before reducing.
pub fn reduce_color_set(
    colors: &[Color],
    k: usize,
    ctx: &QuantizationContext,
) -> Result<Vec<Color>, QuantizeError> {
    let mut hist = ColorHistogram::new();
    for &c in colors {
        if !hist.contains(c) {
            hist.add(c);
        }
    }
    reduce_colors(&hist, k, ctx)
}

/// Reduce the distinct colors of `colors` to exactly `k`, reporting how
/// the refinement went.
///
/// - If there are at most `k` distinct colors they are returned as-is, in
///   histogram order.
/// - Otherwise `k` centroids are seeded (context reference palette by
///   frequency; else the most frequent inputs; backfilled from the
///   context's known colors and remaining inputs; repeated if still
///   short), then refined for at most [`MAX_ITERATIONS`] rounds. Each round
///   assigns every distinct color to its nearest centroid (lowest index on
///   ties) and moves each centroid to the rounded mean of its members.
///   Refinement stops as soon as an assignment pass changes nothing.
///
/// # Errors
///
/// [`QuantizeError::InvalidClusterCount`] when `k == 0`.
pub fn reduce_colors_detailed(
    colors: &ColorHistogram,
    k: usize,
    ctx: &QuantizationContext,
) -> Result<Reduction, QuantizeError> {
    if k == 0 {
        return Err(QuantizeError::InvalidClusterCount(k));
    }

    if colors.len() <= k {
        return Ok(Reduction {
            colors: colors.colors().collect(),
            iterations: 0,
            converged: true,
            unchanged: true,
        });
    }

    let points: Vec<Color> = colors.colors().collect();
    let seeds = kmeans::seed_centroids(colors, k, ctx);
    let refinement = kmeans::refine(&points, seeds);

    Ok(Reduction {
        colors: refinement.centroids,
        iterations: refinement.iterations,
        converged: refinement.converged,
        unchanged: false,
    })
}

/// Map each old color to its nearest new color.
///
/// Ties go to the earliest entry of `new_colors`. An empty `new_colors`
/// yields an empty map, which leaves a grid untouched when applied.
pub fn build_replacement_map<I>(old_colors: I, new_colors: &[Color]) -> HashMap<Color, Color>
where
    I: IntoIterator<Item = Color>,
{
    old_colors
        .into_iter()
        .filter_map(|old| old.nearest(new_colors).map(|new| (old, new)))
        .collect()
}
