use crate::assets::AssetLoader;
use crate::models::{GeometryKind, GridSettings};
use gridquant::{Color, PALETTE_SLOTS};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// New-grid layout
    #[serde(default)]
    pub grid: GridConfig,

    /// Color of unassigned cells and of padded palette slots
    #[serde(default = "default_color")]
    pub default_color: String,

    /// Number of user-facing swatches
    #[serde(default = "default_palette_slots")]
    pub palette_slots: usize,

    /// Retained undo states
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Reduction target used when none is given on the command line
    #[serde(default = "default_max_colors")]
    pub max_colors: usize,

    #[serde(default)]
    pub export: ExportConfig,
}

fn default_color() -> String {
    "#FFFFFF".to_string()
}

fn default_palette_slots() -> usize {
    PALETTE_SLOTS
}

fn default_history_capacity() -> usize {
    50
}

fn default_max_colors() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_cols")]
    pub cols: u32,

    #[serde(default = "default_rows")]
    pub rows: u32,

    /// Canvas pixels per cell, used for hit-testing
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,

    #[serde(default)]
    pub geometry: GeometryKind,
}

fn default_cols() -> u32 {
    40
}

fn default_rows() -> u32 {
    30
}

fn default_cell_size() -> f64 {
    20.0
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
            cell_size: default_cell_size(),
            geometry: GeometryKind::default(),
        }
    }
}

/// Rendered PNG export settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExportConfig {
    /// Output pixels per cell for colors-only and decorated renders
    #[serde(default = "default_export_cell_size")]
    pub cell_size: u32,

    #[serde(default = "default_outline_color")]
    pub outline_color: String,
}

fn default_export_cell_size() -> u32 {
    20
}

fn default_outline_color() -> String {
    "#C0C0C0".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            cell_size: default_export_cell_size(),
            outline_color: default_outline_color(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        cols = config.grid.cols,
                        rows = config.grid.rows,
                        geometry = %config.grid.geometry,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parsed default color; an invalid value falls back to white.
    pub fn default_color(&self) -> Color {
        parse_or(&self.default_color, Color::WHITE, "default_color")
    }

    pub fn outline_color(&self) -> Color {
        parse_or(
            &self.export.outline_color,
            Color::from_rgb(0xC0, 0xC0, 0xC0),
            "export.outline_color",
        )
    }

    pub fn grid_settings(&self) -> GridSettings {
        GridSettings {
            default_color: self.default_color(),
            history_capacity: self.history_capacity,
            geometry: self.grid.geometry,
            cell_size: self.grid.cell_size,
        }
    }
}

fn parse_or(value: &str, fallback: Color, field: &str) -> Color {
    value.parse().unwrap_or_else(|e| {
        tracing::warn!(field, value, %e, "Invalid color in config, using fallback");
        fallback
    })
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            default_color: default_color(),
            palette_slots: default_palette_slots(),
            history_capacity: default_history_capacity(),
            max_colors: default_max_colors(),
            export: ExportConfig::default(),
        }
    }
}
