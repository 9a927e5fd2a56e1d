//! Glyph metrics, baked bitmaps and 256-codepoint glyph sets

use crate::{Result, TextError};

/// Number of codepoints covered by one glyph set
pub const GLYPHS_PER_SET: usize = 256;

/// Number of glyph set slots per font; block indices wrap past this
pub const MAX_GLYPH_SETS: u32 = 256;

/// Slot holding the glyphs for `codepoint`.
///
/// Codepoints whose high bits differ only above the slot count share a
/// slot, so e.g. U+10041 is drawn with the glyph for U+0041.
#[inline]
pub fn block_index(codepoint: u32) -> u32 {
    (codepoint >> 8) % MAX_GLYPH_SETS
}

/// Per-glyph metrics as produced by a glyph engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Glyph box in the set bitmap, in pixels (`x1`/`y1` exclusive)
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
    /// Offset from the pen position to the top-left of the box
    pub xoff: i32,
    pub yoff: i32,
    /// Horizontal advance in subpixel units
    pub xadvance: i32,
}

impl GlyphMetrics {
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0) as u32
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0) as u32
    }

    /// Collapse the box to zero width, keeping the advance
    pub fn make_invisible(&mut self) {
        self.x1 = self.x0;
    }
}

/// Coverage bitmap baked for one glyph set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Coverage bytes per pixel: 1 for grayscale, 3 for subpixel (R, G, B)
    pub channels: u8,
    /// Row-major coverage, `width * channels` bytes per row
    pub data: Vec<u8>,
}

impl GlyphBitmap {
    /// Create a zeroed bitmap
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        let len = width as usize * height as usize * channels as usize;
        Self {
            width,
            height,
            channels,
            data: vec![0; len],
        }
    }

    /// Create a zeroed bitmap, reporting allocation failure
    pub fn try_new(width: u32, height: u32, channels: u8) -> Result<Self> {
        let len = width as usize * height as usize * channels as usize;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| TextError::OutOfMemory(format!("glyph bitmap {width}x{height}: {e}")))?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Bytes per row
    pub fn pitch(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Coverage of channel `channel` at pixel `(x, y)`, 0 outside the bitmap
    pub fn coverage(&self, x: u32, y: u32, channel: u8) -> u8 {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return 0;
        }
        let idx =
            y as usize * self.pitch() + x as usize * self.channels as usize + channel as usize;
        self.data.get(idx).copied().unwrap_or(0)
    }

    /// Mutable row `y`
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let pitch = self.pitch();
        let start = y as usize * pitch;
        &mut self.data[start..start + pitch]
    }
}

/// Glyph set: the bitmap and metrics for 256 consecutive codepoints
#[derive(Debug, Clone)]
pub struct GlyphSet {
    index: u32,
    bitmap: GlyphBitmap,
    glyphs: Box<[GlyphMetrics; GLYPHS_PER_SET]>,
}

impl GlyphSet {
    /// Assemble a set for block `index` from a baked bitmap and metrics.
    ///
    /// Missing metrics are zero; extra metrics are ignored.
    pub fn new(index: u32, bitmap: GlyphBitmap, metrics: &[GlyphMetrics]) -> Self {
        let mut glyphs = Box::new([GlyphMetrics::default(); GLYPHS_PER_SET]);
        for (slot, metric) in glyphs.iter_mut().zip(metrics) {
            *slot = *metric;
        }
        Self { index, bitmap, glyphs }
    }

    /// Block index (`first codepoint >> 8`)
    pub fn index(&self) -> u32 {
        self.index
    }

    /// First codepoint covered by this set
    pub fn first_codepoint(&self) -> u32 {
        self.index << 8
    }

    pub fn bitmap(&self) -> &GlyphBitmap {
        &self.bitmap
    }

    /// Metrics for `codepoint` (only its low byte is used)
    pub fn glyph(&self, codepoint: u32) -> &GlyphMetrics {
        &self.glyphs[(codepoint & 0xff) as usize]
    }

    pub(crate) fn glyph_mut(&mut self, codepoint: u32) -> &mut GlyphMetrics {
        &mut self.glyphs[(codepoint & 0xff) as usize]
    }

    pub fn glyphs(&self) -> &[GlyphMetrics] {
        &self.glyphs[..]
    }
}
