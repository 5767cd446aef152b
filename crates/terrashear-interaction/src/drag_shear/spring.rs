//! Damped spring integration for the drag.
//!
//! The spring stretches between the live pointer position and the
//! *animating position*, i.e. where the drag-start point would sit had the
//! view not moved. Each tick the velocity-like `current_change` loses a
//! friction fraction and gains the spring acceleration.

use terrashear_geometry::{Coordinate, Offset};

/// Map-space reference points of the running drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringAnchor {
    pub start_drag: Coordinate,
    pub current_drag: Coordinate,
    pub start_center: Coordinate,
}

impl SpringAnchor {
    /// Drag-start point shifted back by how far the center has moved.
    pub fn animating_position(&self, center: Coordinate) -> Coordinate {
        self.start_drag - (center - self.start_center)
    }

    /// Spring extension for a view centred on `center`.
    pub fn distance(&self, center: Coordinate) -> Offset {
        self.current_drag - self.animating_position(center)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub spring_length: f64,
    pub spring_coefficient: f64,
    pub friction_force: f64,
    pub threshold: f64,
}

/// Result of one integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringStep {
    pub current_change: Offset,
    pub distance_xy: Offset,
    pub distance: f64,
    pub spring_length_xy: Offset,
    pub acceleration: Offset,
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// `distance_xy` rescaled to a norm of `spring_length`; zero when the
/// extension itself is zero.
pub fn spring_length_vector(distance_xy: Offset, distance: f64, spring_length: f64) -> Offset {
    if distance > 0.0 {
        (distance_xy * (spring_length / distance)).map_axes(finite_or_zero)
    } else {
        Offset::ZERO
    }
}

/// Zeroes each axis whose magnitude is below `threshold`, independently.
pub fn settle_axes(change: Offset, threshold: f64) -> Offset {
    change.map_axes(|value| {
        if !value.is_finite() || value.abs() < threshold {
            0.0
        } else {
            value
        }
    })
}

pub fn step(current_change: Offset, distance_xy: Offset, params: &SpringParams) -> SpringStep {
    let distance = distance_xy.length();
    let spring_length_xy = spring_length_vector(distance_xy, distance, params.spring_length);
    let acceleration =
        ((distance_xy - spring_length_xy) * params.spring_coefficient).map_axes(finite_or_zero);

    let friction = 1.0 - params.friction_force;
    let raw = current_change * friction + acceleration;

    SpringStep {
        current_change: settle_axes(raw, params.threshold),
        distance_xy,
        distance,
        spring_length_xy,
        acceleration,
    }
}

/// Both axes still moving faster than `threshold`.
///
/// A change settled on one axis is not animating, whatever the other axis
/// does.
pub fn is_animating(change: Offset, threshold: f64) -> bool {
    change.x.abs() > threshold && change.y.abs() > threshold
}

/// Hybrid shearing holds the spring open on both axes.
pub fn is_hybrid_shearing(spring_length_xy: Offset) -> bool {
    spring_length_xy.x.abs() > 0.0 && spring_length_xy.y.abs() > 0.0
}

#[cfg(test)]
#[path = "tests/spring_tests.rs"]
mod tests;
