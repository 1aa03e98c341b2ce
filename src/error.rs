use gridquant::{FormatError, PaletteError, QuantizeError, SampleError};
use thiserror::Error;

/// Invalid access to a [`CoordinateGrid`](crate::models::CoordinateGrid).
///
/// Always a caller bug; coordinates are never clamped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell ({col},{row}) out of range for {cols}x{rows} grid")]
    OutOfRange {
        col: u32,
        row: u32,
        cols: u32,
        rows: u32,
    },

    #[error("Invalid grid extent: {cols}x{rows}")]
    InvalidExtent { cols: u32, rows: u32 },

    #[error("Sample is {sample_cols}x{sample_rows}, grid is {cols}x{rows}")]
    SampleMismatch {
        sample_cols: u32,
        sample_rows: u32,
        cols: u32,
        rows: u32,
    },
}

/// Malformed or incomplete persisted data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid color {value:?} in {field}: {source}")]
    InvalidColor {
        field: &'static str,
        value: String,
        source: FormatError,
    },

    #[error("Invalid cell key: {0:?}")]
    InvalidCellKey(String),

    #[error("Cell {key} out of range for {cols}x{rows} grid")]
    CellOutOfRange { key: String, cols: u32, rows: u32 },

    #[error("Invalid grid extent: {cols}x{rows}")]
    InvalidExtent { cols: u32, rows: u32 },

    #[error("No valid colors")]
    NoValidColors,

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image too large: {width}x{height} (max {max} pixels)")]
    ImageTooLarge { width: u32, height: u32, max: u64 },

    #[error("Invalid export cell size: {0}")]
    InvalidCellSize(u32),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Pixel buffer error: {0}")]
    Buffer(#[from] SampleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything a [`Session`](crate::services::Session) operation can fail with.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),

    #[error("Reduction error: {0}")]
    Quantize(#[from] QuantizeError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_out_of_range() {
        let error = GridError::OutOfRange {
            col: 5,
            row: 2,
            cols: 4,
            rows: 4,
        };
        assert_eq!(error.to_string(), "Cell (5,2) out of range for 4x4 grid");
    }

    #[test]
    fn test_grid_error_invalid_extent() {
        let error = GridError::InvalidExtent { cols: 0, rows: 3 };
        assert_eq!(error.to_string(), "Invalid grid extent: 0x3");
    }

    #[test]
    fn test_grid_error_sample_mismatch() {
        let error = GridError::SampleMismatch {
            sample_cols: 2,
            sample_rows: 2,
            cols: 3,
            rows: 3,
        };
        assert_eq!(error.to_string(), "Sample is 2x2, grid is 3x3");
    }

    #[test]
    fn test_load_error_missing_field() {
        let error = LoadError::MissingField("colorMap");
        assert_eq!(error.to_string(), "Missing required field: colorMap");
    }

    #[test]
    fn test_load_error_invalid_color() {
        let error = LoadError::InvalidColor {
            field: "colorMap",
            value: "#GG0000".to_string(),
            source: FormatError::InvalidDigit('G'),
        };
        assert!(error.to_string().starts_with("Invalid color \"#GG0000\" in colorMap: "));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_load_error_cell_out_of_range() {
        let error = LoadError::CellOutOfRange {
            key: "9,9".to_string(),
            cols: 2,
            rows: 2,
        };
        assert_eq!(error.to_string(), "Cell 9,9 out of range for 2x2 grid");
    }

    #[test]
    fn test_load_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: LoadError = json_error.into();
        match error {
            LoadError::Json(_) => {}
            _ => panic!("Expected Json variant"),
        }
    }

    #[test]
    fn test_load_error_from_palette_error() {
        let error: LoadError = PaletteError::EmptyPalette.into();
        assert_eq!(error.to_string(), "Invalid palette: palette cannot be empty");
    }

    #[test]
    fn test_render_error_image_too_large() {
        let error = RenderError::ImageTooLarge {
            width: 10_000,
            height: 10_000,
            max: 1_000,
        };
        assert_eq!(
            error.to_string(),
            "Image too large: 10000x10000 (max 1000 pixels)"
        );
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_session_error_from_grid_error() {
        let error: SessionError = GridError::InvalidExtent { cols: 0, rows: 0 }.into();
        match error {
            SessionError::Grid(_) => {}
            _ => panic!("Expected Grid variant"),
        }
    }

    #[test]
    fn test_session_error_from_sample_error() {
        let error: SessionError = SampleError::EmptyReferencePalette.into();
        assert_eq!(
            error.to_string(),
            "Sampling error: reference palette is empty"
        );
    }
}
