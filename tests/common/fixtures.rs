//! Test fixtures and constants.

use std::io::Cursor;

use gridquant::{Color, PixelBuffer, PixelLayout};

pub mod colors {
    use gridquant::Color;

    pub const RED: Color = Color::from_rgb(255, 0, 0);
    pub const GREEN: Color = Color::from_rgb(0, 255, 0);
    pub const BLUE: Color = Color::from_rgb(0, 0, 255);
    pub const WHITE: Color = Color::WHITE;
    pub const BLACK: Color = Color::BLACK;
}

/// 2x2 grid: red top-left, blue bottom-right, the rest left at default.
pub const SMALL_GRID_JSON: &str = r##"{
  "cols": 2,
  "rows": 2,
  "colorMap": {
    "0,0": "#FF0000",
    "1,1": "#0000ff"
  },
  "timestamp": "2024-05-01T12:00:00.000Z",
  "palette": ["#FF0000", "#0000FF"]
}"##;

/// Brick grid written by an older build without cellSize.
pub const BRICK_GRID_JSON: &str = r##"{
  "cols": 3,
  "rows": 2,
  "geometry": "brick",
  "colorMap": { "1,1": "#00FF00" }
}"##;

pub const MISSING_COLS_JSON: &str = r##"{ "rows": 2, "colorMap": {} }"##;

pub const BAD_KEY_JSON: &str = r##"{ "cols": 2, "rows": 2, "colorMap": { "a,b": "#FF0000" } }"##;

pub const OUT_OF_RANGE_JSON: &str =
    r##"{ "cols": 2, "rows": 2, "colorMap": { "2,0": "#FF0000" } }"##;

/// Tiny file declaring a 64 million cell grid.
pub const HUGE_EXTENT_JSON: &str = r##"{ "cols": 8000, "rows": 8000, "colorMap": {} }"##;

pub const BAD_COLOR_JSON: &str =
    r##"{ "cols": 2, "rows": 2, "colorMap": { "0,0": "red" } }"##;

/// Vertical stripes of `stripes` colors across `width x height`.
pub fn striped_image(width: u32, height: u32, stripes: &[Color]) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _y in 0..height {
        for x in 0..width {
            let stripe = (x as usize * stripes.len()) / width as usize;
            data.extend_from_slice(&stripes[stripe].to_bytes());
        }
    }
    PixelBuffer::new(width, height, PixelLayout::Rgb, data).expect("Bad test image")
}

/// Horizontal gray ramp, one distinct gray per column.
pub fn gray_ramp(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _y in 0..height {
        for x in 0..width {
            let v = ((x * 255) / (width - 1).max(1)) as u8;
            data.extend_from_slice(&[v, v, v]);
        }
    }
    PixelBuffer::new(width, height, PixelLayout::Rgb, data).expect("Bad test image")
}

/// Encode an RGB buffer as PNG bytes.
pub fn encode_png(image: &PixelBuffer) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(match image.layout() {
            PixelLayout::Rgb => png::ColorType::Rgb,
            PixelLayout::Rgba => png::ColorType::Rgba,
        });
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("PNG header");
        writer.write_image_data(image.data()).expect("PNG data");
    }
    buf.into_inner()
}
