//! gridquant: color quantization for cell-based pattern grids
//!
//! This library holds the algorithmic core of a grid painting tool: mapping
//! image pixels onto a bounded palette, ranking colors into a fixed set of
//! swatches, and reducing an oversized color set to exactly `k`
//! representatives.
//!
//! # Quick Start
//!
//! ```
//! use gridquant::{
//!     build_replacement_map, extract_top, reduce_colors, sample, Color, PixelBuffer,
//!     QuantizationContext, ReferencePalette,
//! };
//!
//! let image = PixelBuffer::filled(32, 32, Color::from_rgb(250, 160, 10)).unwrap();
//! let reference = ReferencePalette::fallback();
//!
//! // Sample onto an 8x8 grid and remember the first image's palette
//! let sampled = sample(&image, 8, 8, reference.colors()).unwrap();
//! let mut ctx = QuantizationContext::new();
//! ctx.record_image(sampled.histogram());
//!
//! // Ten swatches for the UI
//! let swatches = extract_top(sampled.histogram(), 10);
//! assert_eq!(swatches.len(), 10);
//!
//! // Reduce and build the old -> new mapping
//! let reduced = reduce_colors(sampled.histogram(), 1, &ctx).unwrap();
//! let map = build_replacement_map(sampled.histogram().colors(), &reduced);
//! assert_eq!(map.len(), 1);
//! ```
//!
//! # Distance
//!
//! Every comparison uses plain Euclidean distance in 8-bit RGB space. It is
//! cheap and fully deterministic; ties are always resolved by position
//! (first candidate, lowest centroid index, first-seen histogram entry), so
//! the same inputs always produce the same grid.
//!
//! # Modules
//!
//! - [`color`]: [`Color`] and its hex codec
//! - [`histogram`]: insertion-ordered [`ColorHistogram`]
//! - [`palette`]: swatch [`Palette`], [`ReferencePalette`], top-N extraction
//! - [`quantize`]: seeded k-means reduction and replacement maps
//! - [`sample`]: nearest-neighbor image sampling onto a grid

pub mod color;
pub mod histogram;
pub mod palette;
pub mod quantize;
pub mod sample;


pub use color::{Color, FormatError};
pub use histogram::ColorHistogram;
pub use palette::{
    extract_top, extract_top_padded, Palette, PaletteError, ReferencePalette,
    DEFAULT_REFERENCE_COLORS, MAX_REFERENCE_COLORS, PALETTE_SLOTS,
};
pub use quantize::{
    build_replacement_map, reduce_color_set, reduce_colors, reduce_colors_detailed,
    QuantizationContext, QuantizeError, Reduction, MAX_ITERATIONS,
};
pub use sample::{sample, PixelBuffer, PixelLayout, SampleError, SampledGrid};
