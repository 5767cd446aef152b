//! Elevation-dependent response: how a spring step turns into a new view
//! center and a terrain shear.
//!
//! Points above the critical elevation shear in the drag direction, scaled
//! down by their height, and the view follows the spring. Points at or below
//! it shear against the drag, scaled by their distance to the ceiling, and the
//! view is offset so the grabbed point stays under the cursor.

use terrashear_geometry::{Coordinate, Offset, Shear};

use super::spring::SpringAnchor;

/// Pull-back multiplier applied below the minimum zoom.
const LOW_ZOOM_PULLBACK: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationRange {
    pub min: f64,
    pub max: f64,
}

impl ElevationRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn critical(&self) -> f64 {
        self.min + (self.max - self.min) / 2.0
    }

    /// Passes finite samples through unchanged; non-finite samples fall
    /// back to the floor.
    pub fn sanitize(&self, elevation: f64) -> f64 {
        if elevation.is_finite() {
            elevation
        } else {
            self.min
        }
    }

    pub fn branch(&self, elevation: f64) -> ElevationBranch {
        if elevation > self.critical() {
            ElevationBranch::High
        } else {
            ElevationBranch::Low
        }
    }
}

impl Default for ElevationRange {
    fn default() -> Self {
        Self::new(0.0, 3000.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElevationBranch {
    High,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationResponse {
    pub center: Coordinate,
    pub shear: Shear,
    pub branch: ElevationBranch,
    pub distance_xy: Offset,
}

/// Inputs that stay fixed for one tick.
#[derive(Clone, Copy, Debug)]
pub struct ResponseContext<'a> {
    pub range: &'a ElevationRange,
    pub start_elevation: f64,
    pub anchor: &'a SpringAnchor,
    pub zoom: f64,
    pub min_zoom: f64,
}

/// Advances `current_center` by the spring change and derives the view
/// center and shear for the selected branch.
pub fn respond(
    ctx: &ResponseContext<'_>,
    current_center: &mut Coordinate,
    current_change: Offset,
) -> ElevationResponse {
    *current_center -= current_change;
    let distance_xy = ctx.anchor.distance(*current_center);
    let branch = ctx.range.branch(ctx.start_elevation);

    let (center, shear) = match branch {
        ElevationBranch::High => {
            let shear = Shear::from_offset(distance_xy, ctx.start_elevation);
            let center = if ctx.zoom >= ctx.min_zoom {
                *current_center
            } else {
                let zoom_factor = 1.0 - ctx.zoom / ctx.min_zoom;
                *current_center - distance_xy * (LOW_ZOOM_PULLBACK * zoom_factor)
            };
            (center, shear)
        }
        ElevationBranch::Low => {
            let shear = Shear::from_offset(-distance_xy, ctx.range.max - ctx.start_elevation);
            (*current_center - distance_xy, shear)
        }
    };

    ElevationResponse {
        center: if center.is_finite() {
            center
        } else {
            *current_center
        },
        shear: shear.sanitized(),
        branch,
        distance_xy,
    }
}
