//! PNG decoding into a [`PixelBuffer`] for sampling.

use std::fs;
use std::path::Path;

use gridquant::{PixelBuffer, PixelLayout};

use crate::error::RenderError;

/// Decode any PNG color type to 8-bit RGB or RGBA.
///
/// Palette images are expanded, 16-bit channels stripped and grayscale
/// widened to three channels.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, RenderError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(RenderError::UnsupportedImage(format!(
            "bit depth {:?} after normalization",
            info.bit_depth
        )));
    }

    let (layout, data) = match info.color_type {
        png::ColorType::Rgb => (PixelLayout::Rgb, buf),
        png::ColorType::Rgba => (PixelLayout::Rgba, buf),
        png::ColorType::Grayscale => (
            PixelLayout::Rgb,
            buf.iter().flat_map(|&v| [v, v, v]).collect(),
        ),
        png::ColorType::GrayscaleAlpha => (
            PixelLayout::Rgba,
            buf.chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
        ),
        png::ColorType::Indexed => {
            return Err(RenderError::UnsupportedImage(
                "indexed color after expansion".to_string(),
            ))
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );
    Ok(PixelBuffer::new(info.width, info.height, layout, data)?)
}

pub fn load_png(path: &Path) -> Result<PixelBuffer, RenderError> {
    let bytes = fs::read(path)?;
    decode_png(&bytes)
}
