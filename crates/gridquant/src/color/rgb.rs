//! The `Color` value type: an 8-bit RGB triple with a canonical hex form.

use std::fmt;
use std::str::FromStr;

use super::error::FormatError;

/// An 8-bit-per-channel RGB color.
///
/// The canonical textual form is `#RRGGBB` (uppercase, always six digits).
/// Because the struct stores the channels rather than the text, two colors
/// compare equal exactly when their canonical strings match, and every
/// value that reaches the grid is already normalized.
///
/// # Example
///
/// ```
/// use gridquant::Color;
///
/// let red: Color = "#f00".parse().unwrap();
/// assert_eq!(red, Color::from_rgb(255, 0, 0));
/// assert_eq!(red.to_string(), "#FF0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);

    /// Create a color from its three channels.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Return the channels as an `(r, g, b)` tuple.
    #[inline]
    pub const fn to_rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Channels as a byte array, in PNG sample order.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse a 3- or 6-digit hex color, with or without a leading `#`.
    ///
    /// Shorthand digits are duplicated (`#F0A` becomes `#FF00AA`). No
    /// whitespace is tolerated, so `Color::parse(s).is_ok()` agrees with
    /// [`Color::is_valid`] for every input.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if hex.is_empty() {
            return Err(FormatError::Empty);
        }

        let mut digits = [0u8; 6];
        let count = hex.chars().count();
        if count != 3 && count != 6 {
            return Err(FormatError::InvalidLength(count));
        }
        for (slot, c) in digits.iter_mut().zip(hex.chars()) {
            *slot = nibble(c).ok_or(FormatError::InvalidDigit(c))?;
        }

        if count == 3 {
            Ok(Self::from_rgb(
                digits[0] * 17,
                digits[1] * 17,
                digits[2] * 17,
            ))
        } else {
            Ok(Self::from_rgb(
                (digits[0] << 4) | digits[1],
                (digits[2] << 4) | digits[3],
                (digits[4] << 4) | digits[5],
            ))
        }
    }

    /// Syntactic check: `^#?[0-9A-Fa-f]{3}$` or `^#?[0-9A-Fa-f]{6}$`.
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    /// Parse and re-emit a hex string in canonical `#RRGGBB` form.
    pub fn normalize(text: &str) -> Result<String, FormatError> {
        Self::parse(text).map(|c| c.to_hex())
    }

    /// Canonical `#RRGGBB` string.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Euclidean distance in RGB space.
    ///
    /// No perceptual weighting is applied; nearest-matching and clustering
    /// both depend on this exact metric for reproducible results.
    #[inline]
    pub fn distance(self, other: Color) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance, for comparisons that don't need the root.
    #[inline]
    pub fn distance_squared(self, other: Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        dr * dr + dg * dg + db * db
    }

    /// Sum of the three channels, used to rank equally frequent colors.
    #[inline]
    pub fn intensity(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    /// Index of the candidate closest to `self`.
    ///
    /// Ties go to the earliest candidate, so callers must pass candidates
    /// in a reproducible order. Returns `None` for an empty slice.
    pub fn nearest_index(self, candidates: &[Color]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &candidate) in candidates.iter().enumerate() {
            let dist = self.distance_squared(candidate);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((i, dist)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// The candidate closest to `self` (first occurrence wins ties).
    pub fn nearest(self, candidates: &[Color]) -> Option<Color> {
        self.nearest_index(candidates).map(|i| candidates[i])
    }
}

fn nibble(c: char) -> Option<u8> {
    c.to_digit(16).map(|d| d as u8)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl From<[u8; 3]> for Color {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_rgb(bytes[0], bytes[1], bytes[2])
    }
}
