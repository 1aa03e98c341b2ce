pub mod grid_file;
pub mod palette_file;
pub mod reference_palette;
pub mod session;

pub use grid_file::{GridDocument, LoadedGrid};
pub use palette_file::PaletteFile;
pub use session::Session;
