pub mod export;
pub mod import;

pub use export::{export_png, render, ExportMode, ExportOptions, Raster};
pub use import::{decode_png, load_png};
