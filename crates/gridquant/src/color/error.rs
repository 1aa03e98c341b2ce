//! Error type for hex color parsing.

use std::fmt;

/// Error returned when a hex color string cannot be parsed.
///
/// Accepted inputs are `RGB` or `RRGGBB` hex digits, optionally prefixed
/// with a single `#`. Anything else is rejected without touching any
/// previously stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input was empty (or just `#`)
    Empty,
    /// Hex part has the wrong number of digits (must be 3 or 6)
    InvalidLength(usize),
    /// A character outside `[0-9A-Fa-f]` was found
    InvalidDigit(char),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Empty => write!(f, "empty color string"),
            FormatError::InvalidLength(len) => {
                write!(
                    f,
                    "invalid hex color length {} (expected 3 or 6 digits)",
                    len
                )
            }
            FormatError::InvalidDigit(c) => write!(f, "invalid hex digit {:?}", c),
        }
    }
}

impl std::error::Error for FormatError {}
