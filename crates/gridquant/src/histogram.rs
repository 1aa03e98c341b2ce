//! Insertion-ordered color frequency table.
//!
//! Several rankings in this crate break ties by "first seen", so the
//! histogram keeps entries in the order colors were first added and a
//! side index for O(1) lookup.

use std::collections::HashMap;

use crate::color::Color;

/// Color → count table that remembers first-seen order.
///
/// # Example
///
/// ```
/// use gridquant::{Color, ColorHistogram};
///
/// let mut hist = ColorHistogram::new();
/// hist.add(Color::WHITE);
/// hist.add(Color::BLACK);
/// hist.add(Color::WHITE);
///
/// assert_eq!(hist.count(Color::WHITE), 2);
/// assert_eq!(hist.colors().collect::<Vec<_>>(), vec![Color::WHITE, Color::BLACK]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorHistogram {
    entries: Vec<(Color, usize)>,
    index: HashMap<Color, usize>,
}

impl ColorHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `color`.
    #[inline]
    pub fn add(&mut self, color: Color) {
        self.add_count(color, 1);
    }

    /// Count `n` occurrences of `color`. A zero count still records the
    /// color's first-seen position.
    pub fn add_count(&mut self, color: Color, n: usize) {
        match self.index.get(&color) {
            Some(&pos) => self.entries[pos].1 += n,
            None => {
                self.index.insert(color, self.entries.len());
                self.entries.push((color, n));
            }
        }
    }

    /// Occurrences of `color` (0 if never seen).
    pub fn count(&self, color: Color) -> usize {
        self.index
            .get(&color)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn contains(&self, color: Color) -> bool {
        self.index.contains_key(&color)
    }

    /// Number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, n)| n).sum()
    }

    /// `(color, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Distinct colors in first-seen order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.entries.iter().map(|&(c, _)| c)
    }

    /// Entries sorted by count, highest first. The sort is stable, so equal
    /// counts keep first-seen order.
    pub fn by_frequency(&self) -> Vec<(Color, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl FromIterator<Color> for ColorHistogram {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut hist = Self::new();
        hist.extend(iter);
        hist
    }
}

impl FromIterator<(Color, usize)> for ColorHistogram {
    fn from_iter<I: IntoIterator<Item = (Color, usize)>>(iter: I) -> Self {
        let mut hist = Self::new();
        for (color, n) in iter {
            hist.add_count(color, n);
        }
        hist
    }
}

impl Extend<Color> for ColorHistogram {
    fn extend<I: IntoIterator<Item = Color>>(&mut self, iter: I) {
        for color in iter {
            self.add(color);
        }
    }
}
