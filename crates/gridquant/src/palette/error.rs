//! Error types for palette construction

use std::fmt;

use crate::color::FormatError;

/// Error type for reference palette validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// No colors provided
    EmptyPalette,
    /// More colors than a reference palette may hold
    TooManyColors {
        /// Number of colors supplied
        count: usize,
        /// Upper bound
        max: usize,
    },
    /// A hex string in the input could not be parsed
    ParseColor {
        /// Position of the offending entry
        index: usize,
        /// Underlying parse failure
        source: FormatError,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::EmptyPalette => write!(f, "palette cannot be empty"),
            PaletteError::TooManyColors { count, max } => {
                write!(f, "palette has {} colors (max {})", count, max)
            }
            PaletteError::ParseColor { index, source } => {
                write!(f, "invalid color at index {}: {}", index, source)
            }
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::ParseColor { source, .. } => Some(source),
            _ => None,
        }
    }
}
