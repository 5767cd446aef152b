//! Pure math/data for the terrain interaction crates
//!
//! Screen-space pixels, map-space coordinates and offsets, and the shear
//! vector applied to an elevation layer.

mod geometry;
mod shear;

pub use geometry::*;
pub use shear::*;

pub mod prelude {
    pub use crate::geometry::{Coordinate, Offset, Pixel};
    pub use crate::shear::Shear;
}
