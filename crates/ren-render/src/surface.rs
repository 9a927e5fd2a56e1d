//! Drawable surfaces

use ren_text::PixelTarget;

/// Something the renderer can draw into.
///
/// Implementations hand out their RGBA pixels for the duration of one
/// draw call. A window-backed surface may reallocate between calls when
/// its drawable size changes.
pub trait Surface {
    /// Size in pixels as `(width, height)`
    fn size(&self) -> (i32, i32);

    /// Borrow the pixels for drawing
    fn target(&mut self) -> PixelTarget<'_>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> (i32, i32) {
        (**self).size()
    }

    fn target(&mut self) -> PixelTarget<'_> {
        (**self).target()
    }
}
