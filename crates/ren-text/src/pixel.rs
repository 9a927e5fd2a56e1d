//! Pixel format, clip area and blend math
//!
//! Destination pixels are 4 bytes, `r, g, b, a` in memory order. Only
//! source colors use the alpha channel; blending never writes the
//! destination alpha.

/// Color (RGBA)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// White at the given coverage, the source color of a glyph pixel
    pub const fn coverage(a: u8) -> Self {
        Self { r: 255, g: 255, b: 255, a }
    }

    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// Rectangle outside of which no pixel is written.
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipArea {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ClipArea {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Clip area covering `width x height` pixels at `(x, y)`
    pub const fn from_rect(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x.saturating_add(width),
            bottom: y.saturating_add(height),
        }
    }

    /// Intersection of two clip areas (may be empty)
    pub fn intersect(&self, other: &ClipArea) -> ClipArea {
        ClipArea {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }
}

/// Mutable view of a destination pixel buffer, borrowed for one draw call
#[derive(Debug)]
pub struct PixelTarget<'a> {
    pixels: &'a mut [Color],
    stride: usize,
}

impl<'a> PixelTarget<'a> {
    /// Wrap `pixels`, laid out in rows of `stride` pixels
    pub fn new(pixels: &'a mut [Color], stride: usize) -> Self {
        Self { pixels, stride }
    }

    /// Pixels per row
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of complete rows
    pub fn rows(&self) -> usize {
        if self.stride == 0 { 0 } else { self.pixels.len() / self.stride }
    }

    /// The target bounds as a clip area
    pub fn bounds(&self) -> ClipArea {
        ClipArea::new(0, 0, self.stride as i32, self.rows() as i32)
    }

    /// Pixels of row `y`
    pub fn row_mut(&mut self, y: usize) -> &mut [Color] {
        let start = y * self.stride;
        &mut self.pixels[start..start + self.stride]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.stride {
            return None;
        }
        self.pixels.get(y * self.stride + x).copied()
    }
}

/// Straight alpha blend of `src` over `dst`.
///
/// Uses `>> 8` in place of a divide by 255, so even full coverage never
/// reaches 255 exactly; opaque fills skip this function.
#[inline]
pub fn blend_straight(dst: Color, src: Color) -> Color {
    let a = src.a as u32;
    let ia = 0xff - a;
    Color {
        r: ((src.r as u32 * a + dst.r as u32 * ia) >> 8) as u8,
        g: ((src.g as u32 * a + dst.g as u32 * ia) >> 8) as u8,
        b: ((src.b as u32 * a + dst.b as u32 * ia) >> 8) as u8,
        a: dst.a,
    }
}

/// Blend `src` tinted by `tint` over `dst`.
///
/// The effective alpha is `src.a * tint.a >> 8`; each channel is
/// `src * tint * alpha >> 16` plus the destination weighted by the
/// remaining alpha.
#[inline]
pub fn blend_tinted(dst: Color, src: Color, tint: Color) -> Color {
    let a = (src.a as u32 * tint.a as u32) >> 8;
    let ia = 0xff - a;
    Color {
        r: (((src.r as u32 * tint.r as u32 * a) >> 16) + ((dst.r as u32 * ia) >> 8)) as u8,
        g: (((src.g as u32 * tint.g as u32 * a) >> 16) + ((dst.g as u32 * ia) >> 8)) as u8,
        b: (((src.b as u32 * tint.b as u32 * a) >> 16) + ((dst.b as u32 * ia) >> 8)) as u8,
        a: dst.a,
    }
}
