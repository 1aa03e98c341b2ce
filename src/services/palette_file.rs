//! Palette file import/export
//!
//! `{ "name", "description", "timestamp", "colors": ["#RRGGBB", ...] }`.
//! Import is lenient: invalid colors are dropped, and only a file with no
//! valid color at all is rejected.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use gridquant::{Color, Palette};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// ISO-8601, UTC
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl PaletteFile {
    pub fn new(name: impl Into<String>, description: impl Into<String>, colors: &[Color]) -> Self {
        Self::with_timestamp(name, description, colors, Utc::now())
    }

    pub fn with_timestamp(
        name: impl Into<String>,
        description: impl Into<String>,
        colors: &[Color],
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            colors: colors.iter().map(|c| c.to_hex()).collect(),
        }
    }

    pub fn from_palette(
        name: impl Into<String>,
        description: impl Into<String>,
        palette: &Palette,
    ) -> Self {
        Self::new(name, description, palette.colors())
    }

    /// Parsed colors, skipping entries that aren't valid hex.
    pub fn valid_colors(&self) -> Result<Vec<Color>, LoadError> {
        let colors: Vec<Color> = self
            .colors
            .iter()
            .filter_map(|value| match value.parse::<Color>() {
                Ok(color) => Some(color),
                Err(e) => {
                    tracing::debug!(value = %value, %e, "Dropping invalid palette color");
                    None
                }
            })
            .collect();

        if colors.is_empty() {
            return Err(LoadError::NoValidColors);
        }
        if colors.len() < self.colors.len() {
            tracing::warn!(
                dropped = self.colors.len() - colors.len(),
                kept = colors.len(),
                "Palette file contained invalid colors"
            );
        }
        Ok(colors)
    }

    /// Valid colors as an `n`-slot palette padded with `fill`.
    pub fn to_palette(&self, n: usize, fill: Color) -> Result<Palette, LoadError> {
        Ok(Palette::new(&self.valid_colors()?, n, fill))
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), colors = self.colors.len(), "Saved palette");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
