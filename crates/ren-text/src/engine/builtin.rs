//! Built-in cell engine
//!
//! Draws every printable codepoint as a solid cell without any font
//! file. Whitespace and control codepoints bake to empty boxes. Used
//! when no font can be found and wherever deterministic glyphs are
//! needed.

use tracing::debug;

use super::{BakedBlock, GlyphEngine};
use crate::glyph::{GlyphBitmap, GlyphMetrics};
use crate::{Result, TextError};

/// Font-less engine with fixed-size solid glyphs
#[derive(Debug, Clone)]
pub struct BuiltinEngine {
    cell_width: u16,
    cell_height: u16,
    subpixel: bool,
}

impl BuiltinEngine {
    /// Engine with `cell_width x cell_height` pixel cells
    pub fn new(cell_width: u16, cell_height: u16) -> Self {
        Self {
            cell_width,
            cell_height,
            subpixel: false,
        }
    }

    /// Bake three coverage values per pixel and use a subpixel scale of 3
    pub fn with_subpixel(mut self, subpixel: bool) -> Self {
        self.subpixel = subpixel;
        self
    }

    fn is_blank(codepoint: u32) -> bool {
        match char::from_u32(codepoint) {
            Some(c) => c.is_whitespace() || c.is_control(),
            None => true,
        }
    }
}

impl Default for BuiltinEngine {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

impl GlyphEngine for BuiltinEngine {
    fn name(&self) -> &str {
        "builtin"
    }

    fn font_height(&self, _size: f32) -> i32 {
        self.cell_height as i32
    }

    fn bake_glyph_block(
        &self,
        pixel_height: i32,
        first_codepoint: u32,
        count: usize,
    ) -> Result<BakedBlock> {
        let block = first_codepoint >> 8;
        let height = u16::try_from(pixel_height).map_err(|_| TextError::GlyphBakeFailed {
            block,
            reason: format!("invalid pixel height {pixel_height}"),
        })?;

        // Every visible glyph shares one solid cell
        let channels = if self.subpixel { 3 } else { 1 };
        let mut bitmap = GlyphBitmap::try_new(self.cell_width as u32, height as u32, channels)?;
        bitmap.data.fill(255);

        let advance = self.cell_width as i32 * self.subpixel_scale();
        let metrics = (0..count as u32)
            .map(|i| {
                let visible = !Self::is_blank(first_codepoint + i);
                GlyphMetrics {
                    x0: 0,
                    y0: 0,
                    x1: if visible { self.cell_width } else { 0 },
                    y1: height,
                    xoff: 0,
                    yoff: 0,
                    xadvance: advance,
                }
            })
            .collect();

        debug!(block, count, "baked builtin glyph block");
        Ok(BakedBlock { bitmap, metrics })
    }

    fn subpixel_scale(&self) -> i32 {
        if self.subpixel { 3 } else { 1 }
    }
}
