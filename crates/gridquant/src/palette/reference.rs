//! Reference palette: the nearest-match universe for image sampling.

use super::error::PaletteError;
use crate::color::Color;

/// Upper bound on reference palette size.
pub const MAX_REFERENCE_COLORS: usize = 120;

/// Built-in 12-color set used whenever a configured reference palette is
/// missing or malformed.
pub const DEFAULT_REFERENCE_COLORS: [Color; 12] = [
    Color::from_rgb(0xFF, 0x00, 0x00), // red
    Color::from_rgb(0x00, 0xFF, 0x00), // green
    Color::from_rgb(0x00, 0x00, 0xFF), // blue
    Color::from_rgb(0xFF, 0xFF, 0x00), // yellow
    Color::from_rgb(0xFF, 0x00, 0xFF), // magenta
    Color::from_rgb(0x00, 0xFF, 0xFF), // cyan
    Color::from_rgb(0xFF, 0xFF, 0xFF), // white
    Color::from_rgb(0x00, 0x00, 0x00), // black
    Color::from_rgb(0x80, 0x80, 0x80), // gray
    Color::from_rgb(0xFF, 0xA5, 0x00), // orange
    Color::from_rgb(0x98, 0xFF, 0x98), // mint
    Color::from_rgb(0x8F, 0x00, 0xFF), // violet
];

/// A non-empty ordered list of at most [`MAX_REFERENCE_COLORS`] colors.
///
/// Order matters: nearest-matching breaks distance ties by position.
///
/// # Example
///
/// ```
/// use gridquant::ReferencePalette;
///
/// let palette = ReferencePalette::from_hex(&["#000", "#FFF"]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(ReferencePalette::fallback().len(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePalette {
    colors: Vec<Color>,
}

impl ReferencePalette {
    /// Validate and wrap a color list.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::TooManyColors`] above [`MAX_REFERENCE_COLORS`]
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > MAX_REFERENCE_COLORS {
            return Err(PaletteError::TooManyColors {
                count: colors.len(),
                max: MAX_REFERENCE_COLORS,
            });
        }
        Ok(Self { colors })
    }

    /// Parse hex strings into a reference palette.
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Color::parse(s.as_ref()).map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// The built-in 12-color set.
    pub fn fallback() -> Self {
        Self {
            colors: DEFAULT_REFERENCE_COLORS.to_vec(),
        }
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Nearest reference color to `color`.
    #[inline]
    pub fn nearest(&self, color: Color) -> Color {
        // non-empty by construction
        color.nearest(&self.colors).unwrap_or(self.colors[0])
    }
}

impl Default for ReferencePalette {
    fn default() -> Self {
        Self::fallback()
    }
}
