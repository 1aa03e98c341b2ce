//! Reference palette loading
//!
//! `{ "colors": ["#RRGGBB", ...] }` with up to 120 entries. Any failure
//! (unreadable, malformed, invalid entry, empty) falls back to the built-in
//! 12-color set so image sampling always has something to match against.

use gridquant::{ReferencePalette, MAX_REFERENCE_COLORS};
use serde::Deserialize;

use crate::assets::AssetLoader;
use crate::error::LoadError;

#[derive(Debug, Deserialize)]
struct ReferencePaletteDocument {
    colors: Vec<String>,
}

/// Parse a reference palette file.
///
/// Entries past [`MAX_REFERENCE_COLORS`] are ignored with a warning.
pub fn parse(bytes: &[u8]) -> Result<ReferencePalette, LoadError> {
    let mut document: ReferencePaletteDocument = serde_json::from_slice(bytes)?;
    if document.colors.len() > MAX_REFERENCE_COLORS {
        tracing::warn!(
            count = document.colors.len(),
            max = MAX_REFERENCE_COLORS,
            "Reference palette too large, ignoring extra entries"
        );
        document.colors.truncate(MAX_REFERENCE_COLORS);
    }
    Ok(ReferencePalette::from_hex(&document.colors)?)
}

/// Load the configured reference palette, or the fallback set.
pub fn load(loader: &AssetLoader) -> ReferencePalette {
    let result = loader
        .read_reference_palette()
        .map_err(LoadError::from)
        .and_then(|bytes| parse(&bytes));

    match result {
        Ok(palette) => {
            tracing::info!(colors = palette.len(), "Loaded reference palette");
            palette
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to load reference palette, using built-in fallback");
            ReferencePalette::fallback()
        }
    }
}
