//! Session-level seeding inputs for color reduction.

use crate::histogram::ColorHistogram;

/// Explicit state that steers centroid seeding.
///
/// Holds the palette-matched histogram of the first image processed in a
/// session (the *reference*) and the color set of the most recent image
/// (the *known colors*, used to backfill seeds). Both are plain inputs:
/// running a reduction twice with the same context yields the same result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantizationContext {
    reference: Option<ColorHistogram>,
    known_colors: Option<ColorHistogram>,
}

impl QuantizationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with a fixed reference palette already in place.
    pub fn with_reference(reference: ColorHistogram) -> Self {
        Self {
            reference: Some(reference),
            known_colors: None,
        }
    }

    /// Set the backfill color set.
    pub fn with_known_colors(mut self, known: ColorHistogram) -> Self {
        self.known_colors = Some(known);
        self
    }

    /// Record the histogram of a freshly sampled image.
    ///
    /// The first non-empty histogram becomes the reference and stays fixed
    /// for the rest of the session; every call replaces the known colors.
    /// Returns `true` when this call established the reference.
    pub fn record_image(&mut self, histogram: &ColorHistogram) -> bool {
        if histogram.is_empty() {
            return false;
        }
        self.known_colors = Some(histogram.clone());
        if self.reference.is_none() {
            self.reference = Some(histogram.clone());
            return true;
        }
        false
    }

    pub fn reference(&self) -> Option<&ColorHistogram> {
        self.reference.as_ref()
    }

    pub fn known_colors(&self) -> Option<&ColorHistogram> {
        self.known_colors.as_ref()
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.reference = None;
        self.known_colors = None;
    }
}
