//! Palette types
//!
//! Two palettes coexist: the small fixed-slot [`Palette`] the user paints
//! from, and the larger [`ReferencePalette`] that raw image pixels are
//! snapped to during sampling.

mod error;
mod extract;
mod reference;

pub use error::PaletteError;
pub use extract::{extract_top, extract_top_padded, Palette, PALETTE_SLOTS};
pub use reference::{ReferencePalette, DEFAULT_REFERENCE_COLORS, MAX_REFERENCE_COLORS};
