//! Solid rectangle fills

use ren_text::blend_straight;

use crate::{ClipArea, Color, PixelTarget, Rect};

/// Fill `rect` with `color`, clipped to `clip` and the target bounds.
///
/// Fully transparent colors draw nothing; opaque colors overwrite the
/// destination, anything in between is blended.
pub fn fill_rect(target: &mut PixelTarget<'_>, clip: &ClipArea, rect: Rect, color: Color) {
    if color.is_transparent() {
        return;
    }

    let area = rect.to_clip().intersect(clip).intersect(&target.bounds());
    if area.is_empty() {
        return;
    }

    let (x1, x2) = (area.left as usize, area.right as usize);
    for y in area.top..area.bottom {
        let row = &mut target.row_mut(y as usize)[x1..x2];
        if color.is_opaque() {
            row.fill(color);
        } else {
            for pixel in row {
                *pixel = blend_straight(*pixel, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: usize, height: usize, color: Color) -> Vec<Color> {
        vec![color; width * height]
    }

    #[test]
    fn test_opaque_overwrites() {
        let mut pixels = canvas(4, 4, Color::rgb(9, 9, 9));
        let mut target = PixelTarget::new(&mut pixels, 4);
        let clip = target.bounds();

        fill_rect(&mut target, &clip, Rect::new(1, 1, 2, 2), Color::rgba(10, 20, 30, 255));

        assert_eq!(target.pixel(1, 1), Some(Color::rgba(10, 20, 30, 255)));
        assert_eq!(target.pixel(2, 2), Some(Color::rgba(10, 20, 30, 255)));
        assert_eq!(target.pixel(0, 0), Some(Color::rgb(9, 9, 9)));
        assert_eq!(target.pixel(3, 3), Some(Color::rgb(9, 9, 9)));
    }

    #[test]
    fn test_translucent_blends() {
        let mut pixels = canvas(2, 1, Color::BLACK);
        let mut target = PixelTarget::new(&mut pixels, 2);
        let clip = target.bounds();
        let color = Color::rgba(255, 0, 0, 128);

        fill_rect(&mut target, &clip, Rect::new(0, 0, 2, 1), color);

        assert_eq!(target.pixel(0, 0), Some(blend_straight(Color::BLACK, color)));
    }

    #[test]
    fn test_transparent_is_noop() {
        let mut pixels = canvas(3, 3, Color::WHITE);
        let mut target = PixelTarget::new(&mut pixels, 3);
        let clip = target.bounds();

        fill_rect(&mut target, &clip, Rect::new(0, 0, 3, 3), Color::rgba(0, 0, 0, 0));

        assert!(pixels.iter().all(|p| *p == Color::WHITE));
    }

    #[test]
    fn test_clipped_to_clip_area() {
        let mut pixels = canvas(6, 6, Color::WHITE);
        let mut target = PixelTarget::new(&mut pixels, 6);
        let clip = ClipArea::new(2, 2, 4, 4);

        fill_rect(&mut target, &clip, Rect::new(0, 0, 6, 6), Color::BLACK);

        assert_eq!(target.pixel(2, 2), Some(Color::BLACK));
        assert_eq!(target.pixel(3, 3), Some(Color::BLACK));
        assert_eq!(target.pixel(1, 2), Some(Color::WHITE));
        assert_eq!(target.pixel(4, 3), Some(Color::WHITE));
    }

    #[test]
    fn test_outside_clip_untouched() {
        let mut pixels = canvas(4, 4, Color::WHITE);
        let mut target = PixelTarget::new(&mut pixels, 4);
        let clip = ClipArea::new(0, 0, 2, 2);

        fill_rect(&mut target, &clip, Rect::new(2, 2, 2, 2), Color::BLACK);
        fill_rect(&mut target, &clip, Rect::new(-5, -5, 3, 3), Color::BLACK);

        assert!(pixels.iter().all(|p| *p == Color::WHITE));
    }

    #[test]
    fn test_clip_larger_than_target() {
        let mut pixels = canvas(2, 2, Color::WHITE);
        let mut target = PixelTarget::new(&mut pixels, 2);
        let clip = ClipArea::new(-10, -10, 100, 100);

        fill_rect(&mut target, &clip, Rect::new(-1, -1, 50, 50), Color::BLACK);

        assert!(pixels.iter().all(|p| *p == Color::BLACK));
    }

    #[test]
    fn test_negative_size_draws_nothing() {
        let mut pixels = canvas(4, 4, Color::WHITE);
        let mut target = PixelTarget::new(&mut pixels, 4);
        let clip = target.bounds();

        fill_rect(&mut target, &clip, Rect::new(3, 3, -2, -2), Color::BLACK);

        assert!(pixels.iter().all(|p| *p == Color::WHITE));
    }
}
