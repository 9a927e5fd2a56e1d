//! TrueType/OpenType engine using ttf-parser and tiny-skia
//!
//! Each glyph of a block is rasterized into a cell sized to its ink
//! box. The line baseline sits at the font ascender, and `yoff` places
//! the cell relative to the top of the line, so ink reaching past the
//! ascender or descender is kept. Cells are shelf-packed into one shared
//! block bitmap. Subpixel mode rasterizes at three times the horizontal
//! resolution and keeps one coverage byte per color channel.

use std::path::{Path, PathBuf};

use tracing::debug;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::{BakedBlock, EngineOptions, GlyphEngine};
use crate::glyph::{GlyphBitmap, GlyphMetrics};
use crate::{Result, TextError};

/// Bitmap width in multiples of the line height
const CELLS_PER_ROW: u32 = 16;

/// Engine backed by a parsed font file
pub struct TtfEngine {
    options: EngineOptions,
    /// Raw font file contents
    data: Vec<u8>,
    face_index: u32,
}

/// One rasterized glyph before packing
struct RasterGlyph {
    /// Ink size in pixels
    width: u32,
    height: u32,
    /// `height` coverage rows of `width * channels` bytes
    coverage: Vec<u8>,
    /// Left edge of the ink relative to the pen
    left: i32,
    /// Top edge of the ink relative to the top of the line
    top: i32,
    xadvance: i32,
}

impl TtfEngine {
    /// Create an engine without a font
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            data: Vec::new(),
            face_index: 0,
        }
    }

    /// Load the first face of a font file
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        let data = std::fs::read(path).map_err(|e| TextError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.load(data, 0, path)
    }

    /// Load face `face_index` from font data already in memory
    pub fn load_font_data(&mut self, data: Vec<u8>, face_index: u32) -> Result<()> {
        self.load(data, face_index, Path::new("<memory>"))
    }

    fn load(&mut self, data: Vec<u8>, face_index: u32, origin: &Path) -> Result<()> {
        let glyphs = Face::parse(&data, face_index)
            .map(|face| face.number_of_glyphs())
            .map_err(|e| TextError::FontLoad {
                path: PathBuf::from(origin),
                reason: e.to_string(),
            })?;
        debug!(path = %origin.display(), face_index, glyphs, "loaded font face");

        self.data = data;
        self.face_index = face_index;
        Ok(())
    }

    /// Check if a font is loaded
    pub fn is_loaded(&self) -> bool {
        !self.data.is_empty()
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, self.face_index).ok()
    }

    fn channels(&self) -> u8 {
        if self.options.subpixel { 3 } else { 1 }
    }

    /// Full hinting snaps advances to whole pixels
    fn snaps_advance(&self) -> bool {
        self.options.hinting && !self.options.prescale_x
    }

    fn rasterize(&self, face: &Face<'_>, codepoint: u32, scale: f32, baseline: f32) -> RasterGlyph {
        let glyph = char::from_u32(codepoint)
            .and_then(|c| face.glyph_index(c))
            .unwrap_or(GlyphId(0));

        let advance = face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
        let subpixel_scale = self.subpixel_scale();
        let xadvance = if self.snaps_advance() {
            advance.round() as i32 * subpixel_scale
        } else {
            (advance * subpixel_scale as f32).round() as i32
        };

        let empty = RasterGlyph {
            width: 0,
            height: 0,
            coverage: Vec::new(),
            left: 0,
            top: 0,
            xadvance,
        };

        let Some(bbox) = face.glyph_bounding_box(glyph) else {
            return empty;
        };
        let left = (bbox.x_min as f32 * scale).floor() as i32;
        let right = (bbox.x_max as f32 * scale).ceil() as i32;
        let top = (baseline - bbox.y_max as f32 * scale).floor() as i32;
        let bottom = (baseline - bbox.y_min as f32 * scale).ceil() as i32;
        let width = (right - left).max(0) as u32;
        let height = (bottom - top).max(0) as u32;
        if width == 0 || height == 0 {
            return empty;
        }

        let channels = self.channels() as u32;
        let mut builder = PathBuilder::new(
            scale * channels as f32,
            scale,
            left as f32 * channels as f32,
            baseline - top as f32,
        );
        if face.outline_glyph(glyph, &mut builder).is_none() {
            return empty;
        }
        let Some(path) = builder.finish() else {
            return empty;
        };
        let Some(mut pixmap) = tiny_skia::Pixmap::new(width * channels, height) else {
            return empty;
        };

        let mut paint = tiny_skia::Paint::default();
        paint.set_color(tiny_skia::Color::WHITE);
        paint.anti_alias = true;

        pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );

        // One coverage byte per subpixel column
        let coverage = pixmap.pixels().iter().map(|p| p.alpha()).collect();

        RasterGlyph {
            width,
            height,
            coverage,
            left,
            top,
            xadvance,
        }
    }
}

impl GlyphEngine for TtfEngine {
    fn name(&self) -> &str {
        "ttf"
    }

    fn font_height(&self, size: f32) -> i32 {
        let Some(face) = self.face() else {
            return 0;
        };
        let units_per_em = face.units_per_em().max(1) as f32;
        let units = face.ascender() as f32 - face.descender() as f32;
        (units * size / units_per_em).round() as i32
    }

    fn bake_glyph_block(
        &self,
        pixel_height: i32,
        first_codepoint: u32,
        count: usize,
    ) -> Result<BakedBlock> {
        let block = first_codepoint >> 8;
        let fail = |reason: String| TextError::GlyphBakeFailed { block, reason };

        let face = self.face().ok_or_else(|| fail("no font loaded".into()))?;
        let height = u16::try_from(pixel_height)
            .ok()
            .filter(|h| *h > 0)
            .ok_or_else(|| fail(format!("invalid pixel height {pixel_height}")))?
            as u32;

        let units = face.ascender() as f32 - face.descender() as f32;
        if units <= 0.0 {
            return Err(fail("font has no vertical extent".into()));
        }
        let scale = height as f32 / units;
        let mut baseline = face.ascender() as f32 * scale;
        if self.options.hinting {
            baseline = baseline.round();
        }

        let glyphs: Vec<RasterGlyph> = (0..count as u32)
            .map(|i| self.rasterize(&face, first_codepoint + i, scale, baseline))
            .collect();

        // Shelf-pack the cells; each shelf is as tall as its tallest cell
        let widest = glyphs.iter().map(|g| g.width).max().unwrap_or(0);
        let bitmap_width = (height * CELLS_PER_ROW).max(widest).max(1);
        let mut origins = Vec::with_capacity(glyphs.len());
        let (mut x, mut shelf_top, mut shelf_height) = (0u32, 0u32, 0u32);
        for glyph in &glyphs {
            if x + glyph.width > bitmap_width {
                x = 0;
                shelf_top += shelf_height;
                shelf_height = 0;
            }
            origins.push((x, shelf_top));
            x += glyph.width;
            shelf_height = shelf_height.max(glyph.height);
        }
        let bitmap_height = (shelf_top + shelf_height).max(1);
        if bitmap_width > u16::MAX as u32 || bitmap_height > u16::MAX as u32 {
            return Err(fail(format!("block bitmap {bitmap_width}x{bitmap_height} too large")));
        }

        let channels = self.channels();
        let mut bitmap = GlyphBitmap::try_new(bitmap_width, bitmap_height, channels)?;
        let mut metrics = Vec::with_capacity(glyphs.len());

        for (glyph, &(x0, y0)) in glyphs.iter().zip(&origins) {
            let pitch = glyph.width as usize * channels as usize;
            if pitch > 0 {
                let start = x0 as usize * channels as usize;
                for (r, src) in glyph.coverage.chunks_exact(pitch).enumerate() {
                    bitmap.row_mut(y0 + r as u32)[start..start + pitch].copy_from_slice(src);
                }
            }
            metrics.push(GlyphMetrics {
                x0: x0 as u16,
                y0: y0 as u16,
                x1: (x0 + glyph.width) as u16,
                y1: (y0 + glyph.height) as u16,
                xoff: glyph.left,
                yoff: glyph.top,
                xadvance: glyph.xadvance,
            });
        }

        debug!(block, count, width = bitmap_width, height = bitmap_height, "baked glyph block");
        Ok(BakedBlock { bitmap, metrics })
    }

    fn subpixel_scale(&self) -> i32 {
        if self.options.subpixel { 3 } else { 1 }
    }
}

/// Path builder that converts ttf-parser outlines to tiny-skia paths
/// in cell coordinates (y down, baseline at `baseline` below the cell top)
struct PathBuilder {
    builder: tiny_skia::PathBuilder,
    scale_x: f32,
    scale_y: f32,
    offset_x: f32,
    baseline: f32,
}

impl PathBuilder {
    fn new(scale_x: f32, scale_y: f32, offset_x: f32, baseline: f32) -> Self {
        Self {
            builder: tiny_skia::PathBuilder::new(),
            scale_x,
            scale_y,
            offset_x,
            baseline,
        }
    }

    fn transform_x(&self, x: f32) -> f32 {
        x * self.scale_x - self.offset_x
    }

    fn transform_y(&self, y: f32) -> f32 {
        self.baseline - y * self.scale_y // Flip Y axis
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.transform_x(x), self.transform_y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.transform_x(x), self.transform_y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = (self.transform_x(x1), self.transform_y(y1));
        let (x, y) = (self.transform_x(x), self.transform_y(y));
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = (self.transform_x(x1), self.transform_y(y1));
        let (x2, y2) = (self.transform_x(x2), self.transform_y(y2));
        let (x, y) = (self.transform_x(x), self.transform_y(y));
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
