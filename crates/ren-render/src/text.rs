//! Text drawing pipeline
//!
//! For each codepoint: decode, look up its glyph, optionally swap in a
//! replacement glyph, blend it, then advance the pen by the advance of
//! the codepoint that was actually in the text.

use ren_text::{Font, ReplacementTable, codepoints};

use crate::{ClipArea, Color, PixelTarget, Result};

/// Draw `text` with its pen starting at `(x_subpixel, y)`.
///
/// Codepoints found in `replacements` are drawn with the replacement
/// glyph in `replace_color`; every other glyph uses `color`. Nothing is
/// drawn when `color` is fully transparent, but the pen still advances.
/// Returns the pen position after the last glyph, in subpixel units,
/// saturating at the `i32` range.
#[allow(clippy::too_many_arguments)]
pub fn draw_text_subpixel<T: AsRef<[u8]> + ?Sized>(
    target: &mut PixelTarget<'_>,
    clip: &ClipArea,
    font: &mut Font,
    text: &T,
    x_subpixel: i32,
    y: i32,
    color: Color,
    replacements: Option<&ReplacementTable>,
    replace_color: Color,
) -> Result<i32> {
    let mut x = x_subpixel;

    for codepoint in codepoints(text) {
        // Layout always follows the original codepoint
        let advance = font.glyph(codepoint)?.xadvance;

        let (glyph, glyph_color) = match replacements.and_then(|table| table.lookup(codepoint)) {
            Some(replacement) => (replacement, replace_color),
            None => (codepoint, color),
        };

        if !color.is_transparent() {
            font.blend_glyph(glyph, clip, x, y, target, glyph_color)?;
        }

        x = x.saturating_add(advance);
    }

    Ok(x)
}
