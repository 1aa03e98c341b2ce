//! User-facing swatch palette and top-N extraction from a histogram.

use crate::color::Color;
use crate::histogram::ColorHistogram;

/// Number of swatches in a user-facing palette.
pub const PALETTE_SLOTS: usize = 10;

/// Pick the `n` most frequent colors of `histogram`, padded with white.
///
/// See [`extract_top_padded`] for the ranking rule.
pub fn extract_top(histogram: &ColorHistogram, n: usize) -> Vec<Color> {
    extract_top_padded(histogram, n, Color::WHITE)
}

/// Pick the `n` most frequent colors of `histogram`, padding with `fill`.
///
/// Ranking is count descending, then intensity (`r + g + b`) descending,
/// then first-seen order. The result always has exactly `n` entries
/// because callers index palette slots positionally.
pub fn extract_top_padded(histogram: &ColorHistogram, n: usize, fill: Color) -> Vec<Color> {
    let mut ranked: Vec<(Color, usize)> = histogram.iter().collect();
    // stable: histogram order is the last tie-breaker
    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.0.intensity().cmp(&a.0.intensity()))
    });

    let mut top: Vec<Color> = ranked.into_iter().take(n).map(|(c, _)| c).collect();
    top.resize(n, fill);
    top
}

/// A fixed-size, ordered set of swatches.
///
/// Slot count never changes after construction; shorter inputs are padded
/// with the fill color and longer ones truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    slots: Vec<Color>,
}

impl Palette {
    /// Build a palette of exactly `n` slots from an ordered color list.
    pub fn new(colors: &[Color], n: usize, fill: Color) -> Self {
        let mut slots: Vec<Color> = colors.iter().copied().take(n).collect();
        slots.resize(n, fill);
        Self { slots }
    }

    /// A palette with every slot set to `fill`.
    pub fn filled(n: usize, fill: Color) -> Self {
        Self {
            slots: vec![fill; n],
        }
    }

    /// Top-`n` palette of a histogram (see [`extract_top_padded`]).
    pub fn from_histogram(histogram: &ColorHistogram, n: usize, fill: Color) -> Self {
        Self {
            slots: extract_top_padded(histogram, n, fill),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<Color> {
        self.slots.get(slot).copied()
    }

    /// Overwrite one slot. Returns `false` if the slot doesn't exist.
    pub fn set(&mut self, slot: usize, color: Color) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = color;
                true
            }
            None => false,
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.slots
    }

    /// Slots as canonical hex strings.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.slots.iter().map(|c| c.to_hex()).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::filled(PALETTE_SLOTS, Color::WHITE)
    }
}
