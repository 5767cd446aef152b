//! Geometric primitives: Pixel, Coordinate, Offset

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A position in screen space, measured in CSS pixels from the top-left
/// corner of the map viewport.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

impl Pixel {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ZERO: Pixel = Pixel { x: 0.0, y: 0.0 };
}

/// A position in map projection units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ORIGIN: Coordinate = Coordinate { x: 0.0, y: 0.0 };

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A displacement in map projection units.
///
/// Produced by subtracting two coordinates; used for velocities,
/// accelerations and spring extensions.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    /// Euclidean norm.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Applies `f` to each axis independently.
    pub fn map_axes(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

impl Sub for Coordinate {
    type Output = Offset;

    fn sub(self, rhs: Coordinate) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Offset> for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Offset) -> Coordinate {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Offset> for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Offset) -> Coordinate {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign<Offset> for Coordinate {
    fn add_assign(&mut self, rhs: Offset) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign<Offset> for Coordinate {
    fn sub_assign(&mut self, rhs: Offset) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Offset {
    type Output = Offset;

    fn mul(self, rhs: f64) -> Offset {
        Offset::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Offset {
    type Output = Offset;

    fn div(self, rhs: f64) -> Offset {
        Offset::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset::new(-self.x, -self.y)
    }
}
