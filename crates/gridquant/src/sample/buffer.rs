//! Decoded source pixels.

use super::SampleError;
use crate::color::Color;

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 bytes per pixel
    Rgb,
    /// 4 bytes per pixel, straight (non-premultiplied) alpha
    Rgba,
}

impl PixelLayout {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }
}

/// A fully decoded 8-bit image, row-major, no row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw bytes.
    ///
    /// # Errors
    ///
    /// - [`SampleError::ZeroDimension`] if either side is 0
    /// - [`SampleError::BufferSize`] if `data` doesn't hold exactly
    ///   `width * height` pixels
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> Result<Self, SampleError> {
        if width == 0 || height == 0 {
            return Err(SampleError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize * layout.channels();
        if data.len() != expected {
            return Err(SampleError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Solid-color RGB buffer, mostly useful in tests.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, SampleError> {
        let data = color
            .to_bytes()
            .repeat(width as usize * height as usize);
        Self::new(width, height, PixelLayout::Rgb, data)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Color at `(x, y)`. RGBA pixels are composited over white.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let channels = self.layout.channels();
        let i = (y as usize * self.width as usize + x as usize) * channels;
        let px = &self.data[i..i + channels];
        match self.layout {
            PixelLayout::Rgb => Color::from_rgb(px[0], px[1], px[2]),
            PixelLayout::Rgba => {
                let a = px[3] as u32;
                let over_white = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
                Color::from_rgb(over_white(px[0]), over_white(px[1]), over_white(px[2]))
            }
        }
    }
}
