//! Integration tests - text and rect drawing through the renderer
//!
//! Tests the full path: decode → glyph cache → replacement → blend

use std::cell::RefCell;
use std::rc::Rc;

use ren_render::{Color, Image, Rect, Renderer};
use ren_text::{
    BakedBlock, BuiltinEngine, ClipArea, Font, GlyphBitmap, GlyphEngine, GlyphMetrics, PixelTarget,
    ReplacementTable, Result, Rounding, blend_straight, blend_tinted,
};

/// One recorded glyph blend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Blend {
    x_subpixel: i32,
    y: i32,
    /// Low byte of the codepoint whose glyph was drawn
    glyph: i32,
    color: Color,
}

/// Engine whose glyph advance equals the low byte of the codepoint and
/// which records blends instead of drawing
struct RecordingEngine {
    blends: Rc<RefCell<Vec<Blend>>>,
}

impl GlyphEngine for RecordingEngine {
    fn name(&self) -> &str {
        "recording"
    }

    fn font_height(&self, _size: f32) -> i32 {
        10
    }

    fn bake_glyph_block(
        &self,
        pixel_height: i32,
        first_codepoint: u32,
        count: usize,
    ) -> Result<BakedBlock> {
        let metrics = (0..count as u32)
            .map(|i| GlyphMetrics {
                x0: 0,
                y0: 0,
                x1: 1,
                y1: pixel_height as u16,
                xoff: 0,
                yoff: 0,
                xadvance: ((first_codepoint + i) & 0xff) as i32,
            })
            .collect();
        Ok(BakedBlock {
            bitmap: GlyphBitmap::new(1, pixel_height as u32, 1),
            metrics,
        })
    }

    fn subpixel_scale(&self) -> i32 {
        1
    }

    fn blend_glyph(
        &self,
        _clip: &ClipArea,
        x_subpixel: i32,
        y: i32,
        _target: &mut PixelTarget<'_>,
        _bitmap: &GlyphBitmap,
        glyph: &GlyphMetrics,
        color: Color,
    ) {
        self.blends.borrow_mut().push(Blend {
            x_subpixel,
            y,
            glyph: glyph.xadvance,
            color,
        });
    }
}

fn recording_font() -> (Font, Rc<RefCell<Vec<Blend>>>) {
    let blends = Rc::new(RefCell::new(Vec::new()));
    let engine = RecordingEngine { blends: blends.clone() };
    (Font::from_engine(Box::new(engine), 10.0).unwrap(), blends)
}

fn builtin_font(cell_width: u16, cell_height: u16) -> Font {
    let engine = BuiltinEngine::new(cell_width, cell_height);
    Font::from_engine(Box::new(engine), cell_height as f32).unwrap()
}

const RED: Color = Color::rgb(255, 0, 0);
const BLUE: Color = Color::rgb(0, 0, 255);

// ============================================================================
// SUBSTITUTION
// ============================================================================

#[test]
fn test_replacement_draws_other_glyph_keeps_layout() {
    let (mut font, blends) = recording_font();
    let mut table = ReplacementTable::new();
    table.add("A", "B").unwrap();

    let mut renderer = Renderer::new(Image::new(400, 20).unwrap());
    let end = renderer.draw_text(&mut font, "xAy", 0, 3, RED, Some(&table), BLUE).unwrap();

    let blends = blends.borrow();
    assert_eq!(
        *blends,
        vec![
            Blend { x_subpixel: 0, y: 3, glyph: 'x' as i32, color: RED },
            Blend { x_subpixel: 'x' as i32, y: 3, glyph: 'B' as i32, color: BLUE },
            Blend { x_subpixel: 'x' as i32 + 'A' as i32, y: 3, glyph: 'y' as i32, color: RED },
        ]
    );
    // Advanced by A, not by B
    assert_eq!(end, 'x' as i32 + 'A' as i32 + 'y' as i32);
}

#[test]
fn test_without_table_uses_primary_color() {
    let (mut font, blends) = recording_font();
    let mut renderer = Renderer::new(Image::new(400, 20).unwrap());

    renderer.draw_text(&mut font, "A", 5, 0, RED, None, BLUE).unwrap();

    let blends = blends.borrow();
    assert_eq!(blends.len(), 1);
    assert_eq!(blends[0].glyph, 'A' as i32);
    assert_eq!(blends[0].color, RED);
    assert_eq!(blends[0].x_subpixel, 5);
}

#[test]
fn test_transparent_primary_skips_replacements_too() {
    let (mut font, blends) = recording_font();
    let mut table = ReplacementTable::new();
    table.add("A", "B").unwrap();
    let mut renderer = Renderer::new(Image::new(400, 20).unwrap());

    let end = renderer
        .draw_text(&mut font, "AA", 0, 0, Color::TRANSPARENT, Some(&table), BLUE)
        .unwrap();

    assert!(blends.borrow().is_empty());
    assert_eq!(end, 2 * 'A' as i32);
}

#[test]
fn test_draw_end_matches_measure() {
    let (mut font, _) = recording_font();
    let mut renderer = Renderer::new(Image::new(400, 20).unwrap());
    let text = "héllo wörld";

    let measured = font.measure_width(text).unwrap();
    let end = renderer.draw_text_subpixel(&mut font, text, 0, 0, RED, None, RED).unwrap();

    assert_eq!(end, measured.width);
}

#[test]
fn test_replacement_into_other_block() {
    let (mut font, blends) = recording_font();
    let mut table = ReplacementTable::new();
    table.add("\t", "»").unwrap();
    let mut renderer = Renderer::new(Image::new(400, 20).unwrap());

    renderer.draw_text(&mut font, "\t", 0, 0, RED, Some(&table), BLUE).unwrap();

    let blends = blends.borrow();
    assert_eq!(blends[0].glyph, ('»' as u32 & 0xff) as i32);
    assert_eq!(blends[0].color, BLUE);
}

// ============================================================================
// PIXELS
// ============================================================================

#[test]
fn test_text_pixels_land_in_cells() {
    let mut font = builtin_font(3, 5);
    let mut renderer = Renderer::new(Image::new(12, 5).unwrap());
    renderer.draw_rect(Rect::new(0, 0, 12, 5), Color::WHITE);

    renderer.draw_text(&mut font, "a b", 0, 0, Color::BLACK, None, Color::BLACK).unwrap();

    let inked = blend_tinted(Color::WHITE, Color::coverage(255), Color::BLACK);
    let image = renderer.into_surface();
    for y in 0..5 {
        for x in 0..3 {
            assert_eq!(image.pixel(x, y), Some(inked), "a at ({x}, {y})");
            assert_eq!(image.pixel(x + 3, y), Some(Color::WHITE), "space at ({x}, {y})");
            assert_eq!(image.pixel(x + 6, y), Some(inked), "b at ({x}, {y})");
            assert_eq!(image.pixel(x + 9, y), Some(Color::WHITE), "after text at ({x}, {y})");
        }
    }
}

#[test]
fn test_text_respects_clip() {
    let mut font = builtin_font(3, 4);
    let mut renderer = Renderer::new(Image::new(12, 4).unwrap());
    renderer.draw_rect(Rect::new(0, 0, 12, 4), Color::WHITE);
    renderer.set_clip_rect(Rect::new(4, 0, 4, 2));

    renderer.draw_text(&mut font, "xxxx", 0, 0, Color::BLACK, None, Color::BLACK).unwrap();

    let image = renderer.into_surface();
    assert_eq!(image.pixel(3, 0), Some(Color::WHITE));
    assert_ne!(image.pixel(4, 0), Some(Color::WHITE));
    assert_ne!(image.pixel(7, 1), Some(Color::WHITE));
    assert_eq!(image.pixel(8, 0), Some(Color::WHITE));
    assert_eq!(image.pixel(5, 2), Some(Color::WHITE));
}

#[test]
fn test_blank_replacement_leaves_gap() {
    let mut font = builtin_font(2, 2);
    let mut table = ReplacementTable::new();
    table.add("b", " ").unwrap();
    let mut renderer = Renderer::new(Image::new(6, 2).unwrap());
    renderer.draw_rect(Rect::new(0, 0, 6, 2), Color::WHITE);

    renderer.draw_text(&mut font, "abc", 0, 0, Color::BLACK, Some(&table), Color::BLACK).unwrap();

    let image = renderer.into_surface();
    assert_ne!(image.pixel(0, 0), Some(Color::WHITE));
    assert_eq!(image.pixel(2, 0), Some(Color::WHITE));
    assert_eq!(image.pixel(3, 1), Some(Color::WHITE));
    assert_ne!(image.pixel(4, 0), Some(Color::WHITE));
}

#[test]
fn test_subpixel_pen_positions() {
    let engine = BuiltinEngine::new(2, 2).with_subpixel(true);
    let mut font = Font::from_engine(Box::new(engine), 2.0).unwrap();
    assert_eq!(font.subpixel_scale(), 3);

    let mut renderer = Renderer::new(Image::new(10, 2).unwrap());
    let end = renderer.draw_text(&mut font, "ab", 1, 0, Color::BLACK, None, Color::BLACK).unwrap();

    assert_eq!(end, 3 + 2 * 6);
    assert_eq!(ren_text::round_subpixel_width(end, 3, Rounding::Up), 5);
}

// ============================================================================
// RECTS
// ============================================================================

#[test]
fn test_rect_outside_clip_is_untouched() {
    let mut renderer = Renderer::new(Image::new(10, 10).unwrap());
    renderer.draw_rect(Rect::new(0, 0, 10, 10), Color::WHITE);
    let before = renderer.surface().clone();

    renderer.set_clip_rect(Rect::new(0, 0, 5, 5));
    renderer.draw_rect(Rect::new(6, 6, 3, 3), Color::BLACK);

    assert_eq!(*renderer.surface(), before);
}

#[test]
fn test_rect_opaque_overwrites() {
    let mut renderer = Renderer::new(Image::new(4, 4).unwrap());
    renderer.draw_rect(Rect::new(0, 0, 4, 4), Color::rgb(200, 100, 50));
    renderer.draw_rect(Rect::new(1, 1, 2, 2), Color::rgb(1, 2, 3));

    assert_eq!(renderer.surface().pixel(1, 1), Some(Color::rgb(1, 2, 3)));
    assert_eq!(renderer.surface().pixel(0, 0), Some(Color::rgb(200, 100, 50)));
}

#[test]
fn test_rect_alpha_zero_is_noop() {
    let mut renderer = Renderer::new(Image::new(4, 4).unwrap());
    renderer.draw_rect(Rect::new(0, 0, 4, 4), Color::rgb(7, 8, 9));
    let before = renderer.surface().clone();

    renderer.draw_rect(Rect::new(0, 0, 4, 4), Color::rgba(255, 255, 255, 0));

    assert_eq!(*renderer.surface(), before);
}

#[test]
fn test_rect_translucent_blend() {
    let mut renderer = Renderer::new(Image::new(2, 2).unwrap());
    renderer.draw_rect(Rect::new(0, 0, 2, 2), Color::rgb(100, 100, 100));
    let color = Color::rgba(0, 200, 0, 64);
    renderer.draw_rect(Rect::new(0, 0, 2, 2), color);

    let expected = blend_straight(Color::rgb(100, 100, 100), color);
    assert_eq!(renderer.surface().pixel(1, 1), Some(expected));
}

// ============================================================================
// FONT CACHE
// ============================================================================

#[test]
fn test_tab_size_affects_layout() {
    let (mut font, _) = recording_font();
    font.set_tab_size(4).unwrap();
    assert_eq!(font.tab_size().unwrap(), 4);

    let width = font.measure_width("\t").unwrap();
    assert_eq!(width.width, 4 * ' ' as i32);
    assert_eq!(width.pixels(Rounding::Nearest), 128);
}
