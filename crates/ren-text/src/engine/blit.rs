//! Glyph bitmap blending

use crate::glyph::{GlyphBitmap, GlyphMetrics};
use crate::pixel::{ClipArea, Color, PixelTarget, blend_tinted};

/// Blend `glyph` from `bitmap` into `target`.
///
/// The glyph box lands at `x_subpixel / subpixel_scale + xoff`,
/// `y + yoff`. Grayscale bitmaps blend one coverage value per pixel.
/// Three-channel bitmaps blend each color channel with its own coverage
/// and are shifted right by the remaining subpixel phase. Nothing is
/// written outside `clip` or the target.
#[allow(clippy::too_many_arguments)]
pub fn blend_glyph_bitmap(
    clip: &ClipArea,
    x_subpixel: i32,
    y: i32,
    subpixel_scale: i32,
    target: &mut PixelTarget<'_>,
    bitmap: &GlyphBitmap,
    glyph: &GlyphMetrics,
    color: Color,
) {
    let width = glyph.width() as i32;
    let height = glyph.height() as i32;
    if width == 0 || height == 0 || color.is_transparent() {
        return;
    }

    let scale = subpixel_scale.max(1);
    let left = x_subpixel.div_euclid(scale).saturating_add(glyph.xoff);
    let top = y.saturating_add(glyph.yoff);

    let lcd = bitmap.channels == 3;
    // Phase in thirds of a pixel; a shifted glyph spills into one more column
    let phase = if lcd { x_subpixel.rem_euclid(scale) * 3 / scale } else { 0 };
    let spill = if phase > 0 { 1 } else { 0 };

    let glyph_box = ClipArea::new(
        left,
        top,
        left.saturating_add(width + spill),
        top.saturating_add(height),
    );
    let area = clip.intersect(&target.bounds()).intersect(&glyph_box);
    if area.is_empty() {
        return;
    }

    for py in area.top..area.bottom {
        let src_y = glyph.y0 as u32 + (py - top) as u32;
        let row = target.row_mut(py as usize);
        for px in area.left..area.right {
            let col = px - left;
            let dst = &mut row[px as usize];
            if lcd {
                *dst = blend_lcd_pixel(*dst, bitmap, glyph, src_y, col * 3 - phase, width, color);
            } else {
                let coverage = bitmap.coverage(glyph.x0 as u32 + col as u32, src_y, 0);
                if coverage != 0 {
                    *dst = blend_tinted(*dst, Color::coverage(coverage), color);
                }
            }
        }
    }
}

/// Blend the three subpixel columns starting at `first` into one pixel
fn blend_lcd_pixel(
    dst: Color,
    bitmap: &GlyphBitmap,
    glyph: &GlyphMetrics,
    src_y: u32,
    first: i32,
    width: i32,
    color: Color,
) -> Color {
    let mut out = dst;
    for channel in 0..3 {
        let sub = first + channel;
        if sub < 0 || sub >= width * 3 {
            continue;
        }
        let coverage = bitmap.coverage(glyph.x0 as u32 + (sub / 3) as u32, src_y, (sub % 3) as u8);
        if coverage == 0 {
            continue;
        }
        let blended = blend_tinted(dst, Color::coverage(coverage), color);
        match channel {
            0 => out.r = blended.r,
            1 => out.g = blended.g,
            _ => out.b = blended.b,
        }
    }
    out
}
