//! Color type, hex codec and RGB distance
//!
//! Every color in the engine is an 8-bit RGB triple. Text enters through
//! [`Color::parse`] and leaves through `Display`, which always yields the
//! canonical `#RRGGBB` form.

mod error;
mod rgb;

pub use error::FormatError;
pub use rgb::Color;
