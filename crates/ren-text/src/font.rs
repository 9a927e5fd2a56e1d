//! Font handle and glyph set cache
//!
//! A `Font` owns its glyph engine and a lazily filled table of glyph
//! sets, one per 256-codepoint block. Sets are baked on first use and
//! kept until the font is dropped.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use tracing::{debug, warn};

use crate::engine::{EngineOptions, GlyphEngine, TtfEngine};
use crate::glyph::{GLYPHS_PER_SET, GlyphMetrics, GlyphSet, block_index};
use crate::pixel::{ClipArea, Color, PixelTarget};
use crate::subpixel::{Rounding, round_subpixel_width};
use crate::{Result, TextError, utf8};

/// Antialiasing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Antialiasing {
    /// Grayscale antialiasing
    #[default]
    Grayscale,
    /// Subpixel antialiasing (LCD)
    Subpixel,
}

/// Font hinting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hinting {
    /// No hinting (rasterize outlines as-is)
    None,
    /// Vertical hinting only, horizontal metrics stay fractional
    #[default]
    Slight,
    /// Hint both directions
    Full,
}

/// Options used when loading a font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontOptions {
    pub antialiasing: Antialiasing,
    pub hinting: Hinting,
}

impl FontOptions {
    /// Engine flags for these options
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            subpixel: self.antialiasing == Antialiasing::Subpixel,
            hinting: self.hinting != Hinting::None,
            prescale_x: self.hinting == Hinting::Slight,
        }
    }
}

impl From<FontOptions> for EngineOptions {
    fn from(options: FontOptions) -> Self {
        options.engine_options()
    }
}

/// Width of a measured string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Sum of advances in subpixel units
    pub width: i32,
    /// Subpixel units per pixel
    pub subpixel_scale: i32,
}

impl Measurement {
    /// Width in whole pixels
    pub fn pixels(&self, rounding: Rounding) -> i32 {
        round_subpixel_width(self.width, self.subpixel_scale, rounding)
    }
}

/// A loaded font with its glyph set cache
pub struct Font {
    sets: HashMap<u32, GlyphSet>,
    size: f32,
    height: i32,
    space_advance: i32,
    engine: Box<dyn GlyphEngine>,
}

impl Font {
    /// Load a font file at `size`
    pub fn load(path: impl AsRef<Path>, size: f32, options: FontOptions) -> Result<Self> {
        let mut engine = TtfEngine::new(options.engine_options());
        engine.load_font_file(path.as_ref())?;
        Self::from_engine(Box::new(engine), size)
    }

    /// Load face `face_index` of in-memory font data at `size`
    pub fn from_data(
        data: Vec<u8>,
        face_index: u32,
        size: f32,
        options: FontOptions,
    ) -> Result<Self> {
        let mut engine = TtfEngine::new(options.engine_options());
        engine.load_font_data(data, face_index)?;
        Self::from_engine(Box::new(engine), size)
    }

    /// Build a font around an engine that already has its font loaded.
    ///
    /// Bakes the block holding the space, tab and newline glyphs, records
    /// the space advance and makes tab and newline invisible.
    pub fn from_engine(engine: Box<dyn GlyphEngine>, size: f32) -> Result<Self> {
        let height = engine.font_height(size);
        let mut font = Self {
            sets: HashMap::new(),
            size,
            height,
            space_advance: 0,
            engine,
        };

        font.space_advance = font.glyph(' ' as u32)?.xadvance;

        let set = font.load_set('\n' as u32)?;
        set.glyph_mut('\t' as u32).make_invisible();
        set.glyph_mut('\n' as u32).make_invisible();

        debug!(
            engine = font.engine.name(),
            size,
            height,
            space_advance = font.space_advance,
            "loaded font"
        );
        Ok(font)
    }

    fn load_set(&mut self, codepoint: u32) -> Result<&mut GlyphSet> {
        let index = block_index(codepoint);
        match self.sets.entry(index) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let set = bake_set(self.engine.as_ref(), self.height, index)?;
                Ok(entry.insert(set))
            }
        }
    }

    /// The glyph set holding `codepoint`, baking it on first use
    pub fn glyph_set(&mut self, codepoint: u32) -> Result<&GlyphSet> {
        self.load_set(codepoint).map(|set| &*set)
    }

    /// Metrics for `codepoint`
    pub fn glyph(&mut self, codepoint: u32) -> Result<GlyphMetrics> {
        Ok(*self.load_set(codepoint)?.glyph(codepoint))
    }

    /// Set the tab advance to `n` space advances.
    ///
    /// Fails without changing the tab if `n` is negative or the advance
    /// does not fit in an `i32`.
    pub fn set_tab_size(&mut self, n: i32) -> Result<()> {
        let advance = self
            .space_advance
            .checked_mul(n)
            .filter(|_| n >= 0)
            .ok_or(TextError::TabSizeOutOfRange { size: n })?;
        self.load_set('\t' as u32)?.glyph_mut('\t' as u32).xadvance = advance;
        Ok(())
    }

    /// Tab advance in space advances, rounded down
    pub fn tab_size(&mut self) -> Result<i32> {
        let advance = self.glyph('\t' as u32)?.xadvance;
        if self.space_advance == 0 {
            return Ok(0);
        }
        Ok(advance / self.space_advance)
    }

    /// Sum of the advances of `text` in subpixel units, saturating at
    /// the `i32` range
    pub fn measure_width<T: AsRef<[u8]> + ?Sized>(&mut self, text: &T) -> Result<Measurement> {
        let mut width = 0i32;
        for codepoint in utf8::codepoints(text) {
            width = width.saturating_add(self.glyph(codepoint)?.xadvance);
        }
        Ok(Measurement {
            width,
            subpixel_scale: self.subpixel_scale(),
        })
    }

    /// Blend the glyph for `codepoint` with its pen at `(x_subpixel, y)`
    pub fn blend_glyph(
        &mut self,
        codepoint: u32,
        clip: &ClipArea,
        x_subpixel: i32,
        y: i32,
        target: &mut PixelTarget<'_>,
        color: Color,
    ) -> Result<()> {
        let index = block_index(codepoint);
        self.load_set(codepoint)?;
        if let Some(set) = self.sets.get(&index) {
            let glyph = set.glyph(codepoint);
            self.engine.blend_glyph(clip, x_subpixel, y, target, set.bitmap(), glyph, color);
        }
        Ok(())
    }

    /// Line height in pixels
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size the font was loaded at
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Advance of the space glyph in subpixel units
    pub fn space_advance(&self) -> i32 {
        self.space_advance
    }

    /// Subpixel units per pixel
    pub fn subpixel_scale(&self) -> i32 {
        self.engine.subpixel_scale()
    }

    /// Number of glyph sets baked so far
    pub fn cached_sets(&self) -> usize {
        self.sets.len()
    }
}

fn bake_set(engine: &dyn GlyphEngine, height: i32, index: u32) -> Result<GlyphSet> {
    match engine.bake_glyph_block(height, index << 8, GLYPHS_PER_SET) {
        Ok(baked) => {
            debug!(engine = engine.name(), block = index, "cached glyph set");
            Ok(GlyphSet::new(index, baked.bitmap, &baked.metrics))
        }
        Err(e) => {
            warn!(engine = engine.name(), block = index, error = %e, "glyph set bake failed");
            Err(e)
        }
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("engine", &self.engine.name())
            .field("size", &self.size)
            .field("height", &self.height)
            .field("space_advance", &self.space_advance)
            .field("cached_sets", &self.sets.len())
            .finish()
    }
}
