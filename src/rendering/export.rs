//! Bitmap exports of a grid
//!
//! Three projections of the same cell colors:
//! - cell map: one pixel per cell, exactly `cols x rows`
//! - colors only: flat fills at `cell_size` pixels per cell
//! - decorated: flat fills plus a 1px outline around every cell
//!
//! Full-size renders follow the grid's geometry (a brick grid exports as a
//! brick layout). Output is RGB8 PNG, re-compressed with oxipng.

use std::io::Cursor;

use gridquant::Color;

use crate::error::RenderError;
use crate::models::{AppConfig, CoordinateGrid};

/// Largest canvas an export may allocate
pub const MAX_EXPORT_PIXELS: u64 = 64 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportMode {
    /// One pixel per cell
    CellMap,
    /// Flat cell fills
    ColorsOnly,
    /// Cell fills with outlines
    Decorated,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Output pixels per cell (ignored for the cell map)
    pub cell_size: u32,
    pub outline: Color,
    /// Canvas color outside any cell (brick row gaps)
    pub background: Color,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            cell_size: 20,
            outline: Color::from_rgb(0xC0, 0xC0, 0xC0),
            background: Color::WHITE,
        }
    }
}

impl ExportOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cell_size: config.export.cell_size,
            outline: config.outline_color(),
            background: config.default_color(),
        }
    }
}

/// Row-major RGB8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    fn new(width: u32, height: u32, fill: Color) -> Result<Self, RenderError> {
        let pixels = width as u64 * height as u64;
        if pixels == 0 || pixels > MAX_EXPORT_PIXELS {
            return Err(RenderError::ImageTooLarge {
                width,
                height,
                max: MAX_EXPORT_PIXELS,
            });
        }
        Ok(Self {
            width,
            height,
            data: fill.to_bytes().repeat(pixels as usize),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Color at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some(Color::from_rgb(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    fn put(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let i = (y as usize * self.width as usize + x as usize) * 3;
            self.data[i..i + 3].copy_from_slice(&color.to_bytes());
        }
    }

    /// Fill `[x0, x1) x [y0, y1)`, clipped to the raster.
    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.put(x, y, color);
            }
        }
    }

    /// 1px border just inside `[x0, x1) x [y0, y1)`.
    fn outline_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        for x in x0..x1 {
            self.put(x, y0, color);
            self.put(x, y1 - 1, color);
        }
        for y in y0..y1 {
            self.put(x0, y, color);
            self.put(x1 - 1, y, color);
        }
    }
}

/// Rasterize a grid.
pub fn render(
    grid: &CoordinateGrid,
    mode: ExportMode,
    options: &ExportOptions,
) -> Result<Raster, RenderError> {
    match mode {
        ExportMode::CellMap => render_cell_map(grid),
        ExportMode::ColorsOnly => render_cells(grid, options, false),
        ExportMode::Decorated => render_cells(grid, options, true),
    }
}

fn render_cell_map(grid: &CoordinateGrid) -> Result<Raster, RenderError> {
    let mut raster = Raster::new(grid.cols(), grid.rows(), grid.default_color())?;
    for (col, row, color) in grid.cells() {
        raster.put(col, row, color);
    }
    Ok(raster)
}

fn render_cells(
    grid: &CoordinateGrid,
    options: &ExportOptions,
    outline: bool,
) -> Result<Raster, RenderError> {
    if options.cell_size == 0 {
        return Err(RenderError::InvalidCellSize(options.cell_size));
    }
    let size = options.cell_size as f64;
    let geometry = grid.geometry().kind().build(size);
    let (width, height) = geometry.canvas_size(grid.cols(), grid.rows());
    let mut raster = Raster::new(
        width.ceil() as u32,
        height.ceil() as u32,
        options.background,
    )?;

    // Outlines would cover the whole fill of tiny cells
    let outline = outline && options.cell_size >= 3;

    for (col, row, color) in grid.cells() {
        let (x, y) = geometry.cell_origin(col, row);
        let (x0, y0) = (x.round() as u32, y.round() as u32);
        let (x1, y1) = ((x + size).round() as u32, (y + size).round() as u32);
        raster.fill_rect(x0, y0, x1, y1, color);
        if outline {
            raster.outline_rect(x0, y0, x1, y1, options.outline);
        }
    }

    tracing::debug!(
        geometry = %geometry.kind(),
        width = raster.width,
        height = raster.height,
        "Rendered grid"
    );
    Ok(raster)
}

/// Render and encode a grid as PNG.
pub fn export_png(
    grid: &CoordinateGrid,
    mode: ExportMode,
    options: &ExportOptions,
) -> Result<Vec<u8>, RenderError> {
    let raster = render(grid, mode, options)?;

    // Encode PNG (fast settings, oxipng re-compresses)
    let png_bytes = encode_png(&raster)?;

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or_else(|e| {
        tracing::debug!(%e, "PNG optimization failed, keeping unoptimized output");
        png_bytes
    });
    Ok(optimized)
}

fn encode_png(raster: &Raster) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, raster.width, raster.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&raster.data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
