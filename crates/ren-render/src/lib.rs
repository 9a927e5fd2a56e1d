//! ren Render - Software Rasterizer
//!
//! Clipped rectangle fills and text drawing into RGBA pixel surfaces.

mod image;
mod rect;
mod renderer;
mod surface;
mod text;

pub use image::Image;
pub use rect::fill_rect;
pub use renderer::Renderer;
pub use surface::Surface;
pub use text::draw_text_subpixel;

pub use ren_text::{ClipArea, Color, PixelTarget};

/// Rectangle in destination pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn to_clip(&self) -> ClipArea {
        ClipArea::from_rect(self.x, self.y, self.width, self.height)
    }
}

/// Rendering error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid image size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("Out of memory: {0}")]
    OutOfMemory(String),

    #[error(transparent)]
    Text(#[from] ren_text::TextError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
