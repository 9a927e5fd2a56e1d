//! Subpixel width rounding

/// How a subpixel width is converted to whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Integer division
    Truncate,
    /// Round to nearest, ties up
    #[default]
    Nearest,
    /// Ceiling
    Up,
}

impl Rounding {
    /// Negative orientation truncates, zero rounds to nearest, positive rounds up
    pub fn from_orientation(orientation: i32) -> Self {
        match orientation {
            o if o < 0 => Rounding::Truncate,
            0 => Rounding::Nearest,
            _ => Rounding::Up,
        }
    }
}

impl From<i32> for Rounding {
    fn from(orientation: i32) -> Self {
        Self::from_orientation(orientation)
    }
}

/// Convert `width` in subpixel units to whole pixels
#[inline]
pub fn round_subpixel_width(width: i32, subpixel_scale: i32, rounding: Rounding) -> i32 {
    let scale = subpixel_scale.max(1);
    let biased = match rounding {
        Rounding::Truncate => width,
        Rounding::Nearest => width + scale / 2,
        Rounding::Up => width + scale - 1,
    };
    biased / scale
}
