//! Seeded k-means in RGB space.
//!
//! Points are the distinct input colors, each weighted equally. Centroids
//! are integer colors; every recomputation rounds the componentwise mean.

use super::context::QuantizationContext;
use crate::color::Color;
use crate::histogram::ColorHistogram;

/// Hard cap on refinement rounds.
pub const MAX_ITERATIONS: usize = 50;

/// Choose `k` initial centroids.
///
/// Priority: the context's reference palette (by historical frequency),
/// otherwise the most frequent input colors. Short seed lists are
/// backfilled from the context's known colors, then from the remaining
/// input colors, and finally by repeating existing seeds.
pub(crate) fn seed_centroids(
    colors: &ColorHistogram,
    k: usize,
    ctx: &QuantizationContext,
) -> Vec<Color> {
    let mut seeds: Vec<Color> = Vec::with_capacity(k);

    let primary = ctx.reference().unwrap_or(colors);
    push_unique(&mut seeds, primary, k);

    if seeds.len() < k {
        if let Some(known) = ctx.known_colors() {
            push_unique(&mut seeds, known, k);
        }
    }
    if seeds.len() < k {
        push_unique(&mut seeds, colors, k);
    }

    // degenerate input: reuse seeds rather than shrink the cluster count
    let distinct = seeds.len();
    if distinct == 0 {
        seeds.resize(k, Color::WHITE);
    }
    let mut i = 0;
    while seeds.len() < k {
        seeds.push(seeds[i % distinct.max(1)]);
        i += 1;
    }

    seeds
}

fn push_unique(seeds: &mut Vec<Color>, source: &ColorHistogram, k: usize) {
    for (color, _) in source.by_frequency() {
        if seeds.len() >= k {
            break;
        }
        if !seeds.contains(&color) {
            seeds.push(color);
        }
    }
}

/// Outcome of a refinement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Refinement {
    pub centroids: Vec<Color>,
    pub iterations: usize,
    pub converged: bool,
}

/// Lloyd iterations until assignments stop changing or the cap is hit.
pub(crate) fn refine(points: &[Color], mut centroids: Vec<Color>) -> Refinement {
    let mut previous: Option<Vec<usize>> = None;

    for round in 1..=MAX_ITERATIONS {
        let assignments = assign(points, &centroids);
        if previous.as_ref() == Some(&assignments) {
            return Refinement {
                centroids,
                iterations: round,
                converged: true,
            };
        }
        centroids = recompute(points, &assignments, &centroids);
        previous = Some(assignments);
    }

    Refinement {
        centroids,
        iterations: MAX_ITERATIONS,
        converged: false,
    }
}

/// Index of the nearest centroid for each point; lowest index wins ties.
fn assign(points: &[Color], centroids: &[Color]) -> Vec<usize> {
    points
        .iter()
        .map(|p| p.nearest_index(centroids).unwrap_or(0))
        .collect()
}

/// Rounded mean of each cluster. Empty clusters keep their old centroid.
fn recompute(points: &[Color], assignments: &[usize], old: &[Color]) -> Vec<Color> {
    let mut sums = vec![[0u64; 3]; old.len()];
    let mut counts = vec![0u64; old.len()];

    for (p, &cluster) in points.iter().zip(assignments) {
        sums[cluster][0] += p.r as u64;
        sums[cluster][1] += p.g as u64;
        sums[cluster][2] += p.b as u64;
        counts[cluster] += 1;
    }

    old.iter()
        .enumerate()
        .map(|(i, &prev)| {
            let n = counts[i];
            if n == 0 {
                return prev;
            }
            // round half up
            let mean = |sum: u64| ((2 * sum + n) / (2 * n)).min(255) as u8;
            Color::from_rgb(mean(sums[i][0]), mean(sums[i][1]), mean(sums[i][2]))
        })
        .collect()
}
