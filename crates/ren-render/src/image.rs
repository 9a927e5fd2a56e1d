//! Image - owned RGBA pixel buffer

use crate::{Color, PixelTarget, RenderError, Result, Surface};

/// Off-screen RGBA image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl Image {
    /// Create a transparent black image; both dimensions must be positive
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        let len = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|e| RenderError::OutOfMemory(format!("image {width}x{height}: {e}")))?;
        pixels.resize(len, Color::TRANSPARENT);
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, `None` outside the image
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Fill the whole image with `color`
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Get pixel data as raw bytes (RGBA)
    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect()
    }
}

impl Surface for Image {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn target(&mut self) -> PixelTarget<'_> {
        PixelTarget::new(&mut self.pixels, self.width as usize)
    }
}
