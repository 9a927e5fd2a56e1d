//! ren Text - Glyph Cache and Font Handling
//!
//! This crate provides the text half of the ren editor renderer:
//! - Lenient UTF-8 codepoint decoding
//! - Codepoint replacement tables (draw one glyph in place of another)
//! - Glyph engines that bake 256-codepoint glyph blocks (ttf-parser + tiny-skia)
//! - A per-font glyph block cache with subpixel advances
//! - Pixel blend primitives shared with the rect rasterizer

use std::path::PathBuf;

pub mod utf8;
pub mod replace;
pub mod pixel;
pub mod glyph;
pub mod engine;
pub mod font;
pub mod subpixel;

pub use utf8::{Codepoints, codepoints, decode, first_codepoint};
pub use replace::{REPLACEMENT_CHUNK_SIZE, Replacement, ReplacementTable};
pub use pixel::{ClipArea, Color, PixelTarget, blend_straight, blend_tinted};
pub use glyph::{GLYPHS_PER_SET, MAX_GLYPH_SETS, GlyphBitmap, GlyphMetrics, GlyphSet, block_index};
pub use engine::{BakedBlock, BuiltinEngine, EngineOptions, GlyphEngine, TtfEngine};
pub use font::{Antialiasing, Font, FontOptions, Hinting, Measurement};
pub use subpixel::{Rounding, round_subpixel_width};

/// Text rendering error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Failed to load font {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("Failed to bake glyph block {block}: {reason}")]
    GlyphBakeFailed { block: u32, reason: String },

    #[error("Tab size {size} out of range")]
    TabSizeOutOfRange { size: i32 },

    #[error("Out of memory: {0}")]
    OutOfMemory(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
