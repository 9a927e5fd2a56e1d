//! Glyph engines
//!
//! An engine turns a font into baked glyph blocks: one coverage bitmap
//! plus metrics for 256 consecutive codepoints. It also owns the
//! horizontal subpixel scale used for advances and glyph placement.

mod blit;
mod builtin;
mod ttf;

pub use blit::blend_glyph_bitmap;
pub use builtin::BuiltinEngine;
pub use ttf::TtfEngine;

use crate::glyph::{GlyphBitmap, GlyphMetrics};
use crate::pixel::{ClipArea, Color, PixelTarget};
use crate::Result;

/// Engine flags derived from the font options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Subpixel (LCD) antialiasing: 3 coverage values per pixel
    pub subpixel: bool,
    /// Snap glyph metrics to the pixel grid
    pub hinting: bool,
    /// Keep horizontal metrics unhinted (fractional advances)
    pub prescale_x: bool,
}

/// Result of baking one glyph block
#[derive(Debug, Clone)]
pub struct BakedBlock {
    pub bitmap: GlyphBitmap,
    /// One entry per requested codepoint
    pub metrics: Vec<GlyphMetrics>,
}

/// A glyph rasterization backend
pub trait GlyphEngine {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Line height in pixels for a font of `size`
    fn font_height(&self, size: f32) -> i32;

    /// Bake `count` glyphs starting at `first_codepoint` for a line height
    /// of `pixel_height`
    fn bake_glyph_block(
        &self,
        pixel_height: i32,
        first_codepoint: u32,
        count: usize,
    ) -> Result<BakedBlock>;

    /// Subpixel units per pixel
    fn subpixel_scale(&self) -> i32;

    /// Blend one baked glyph into `target` with its pen at `(x_subpixel, y)`
    #[allow(clippy::too_many_arguments)]
    fn blend_glyph(
        &self,
        clip: &ClipArea,
        x_subpixel: i32,
        y: i32,
        target: &mut PixelTarget<'_>,
        bitmap: &GlyphBitmap,
        glyph: &GlyphMetrics,
        color: Color,
    ) {
        blend_glyph_bitmap(
            clip,
            x_subpixel,
            y,
            self.subpixel_scale(),
            target,
            bitmap,
            glyph,
            color,
        );
    }
}
