//! Renderer - draws rects and text onto a surface under a clip rect

use ren_text::{Font, ReplacementTable};
use tracing::trace;

use crate::rect::fill_rect;
use crate::text::draw_text_subpixel;
use crate::{ClipArea, Color, Rect, Result, Surface};

/// Drawing context owning a surface and the current clip rect
#[derive(Debug)]
pub struct Renderer<S: Surface> {
    surface: S,
    /// Clip rect as last set
    clip_rect: Rect,
    clip: ClipArea,
}

impl<S: Surface> Renderer<S> {
    /// Create a renderer clipped to the full surface
    pub fn new(surface: S) -> Self {
        let (width, height) = surface.size();
        let clip_rect = Rect::new(0, 0, width, height);
        Self {
            surface,
            clip_rect,
            clip: clip_rect.to_clip(),
        }
    }

    /// Restrict all following draws to `rect`.
    ///
    /// A rect with a negative width or height clips everything.
    pub fn set_clip_rect(&mut self, rect: Rect) {
        trace!(?rect, "set clip rect");
        self.clip_rect = rect;
        self.clip = rect.to_clip();
    }

    /// Current clip rect, exactly as passed to [`Renderer::set_clip_rect`]
    pub fn clip_rect(&self) -> Rect {
        self.clip_rect
    }

    /// Surface size as `(width, height)`
    pub fn size(&self) -> (i32, i32) {
        self.surface.size()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Fill `rect` with `color`
    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        let mut target = self.surface.target();
        fill_rect(&mut target, &self.clip, rect, color);
    }

    /// Draw `text` with its pen at pixel `(x, y)`; see [`Renderer::draw_text_subpixel`]
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text<T: AsRef<[u8]> + ?Sized>(
        &mut self,
        font: &mut Font,
        text: &T,
        x: i32,
        y: i32,
        color: Color,
        replacements: Option<&ReplacementTable>,
        replace_color: Color,
    ) -> Result<i32> {
        let x_subpixel = x.saturating_mul(font.subpixel_scale());
        self.draw_text_subpixel(font, text, x_subpixel, y, color, replacements, replace_color)
    }

    /// Draw `text` with its pen at `(x_subpixel, y)`, `y` being the top of
    /// the line.
    ///
    /// Returns the pen position after the text, in subpixel units.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_subpixel<T: AsRef<[u8]> + ?Sized>(
        &mut self,
        font: &mut Font,
        text: &T,
        x_subpixel: i32,
        y: i32,
        color: Color,
        replacements: Option<&ReplacementTable>,
        replace_color: Color,
    ) -> Result<i32> {
        let mut target = self.surface.target();
        draw_text_subpixel(
            &mut target,
            &self.clip,
            font,
            text,
            x_subpixel,
            y,
            color,
            replacements,
            replace_color,
        )
    }
}
