use crate::geometry::Offset;

/// Per-axis skew applied to an elevation layer to fake parallax while panning.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Shear {
    pub x: f64,
    pub y: f64,
}

impl Shear {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ZERO: Shear = Shear { x: 0.0, y: 0.0 };

    /// Builds a shear from a map-space offset divided by an elevation scale.
    pub fn from_offset(offset: Offset, scale: f64) -> Self {
        Self {
            x: offset.x / scale,
            y: offset.y / scale,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Replaces non-finite axes with zero.
    pub fn sanitized(self) -> Self {
        fn axis(value: f64) -> f64 {
            if value.is_finite() {
                value
            } else {
                0.0
            }
        }
        Self {
            x: axis(self.x),
            y: axis(self.y),
        }
    }
}
