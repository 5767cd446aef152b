//! Collaborators the interaction drives: the map view and the terrain layer.
//!
//! Both live on the single-threaded UI event queue and are shared as
//! `Rc<RefCell<dyn …>>`. Borrows are held only for the duration of a call.

use std::cell::RefCell;
use std::rc::Rc;

use terrashear_geometry::{Coordinate, Pixel, Shear};

/// Activity counters published by the view. Each running animation or
/// interaction increments its counter for as long as it is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewHints {
    pub animating: u32,
    pub interacting: u32,
}

impl ViewHints {
    pub fn is_animating(&self) -> bool {
        self.animating > 0
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting > 0
    }
}

pub trait MapView {
    fn center(&self) -> Coordinate;

    fn set_center(&mut self, center: Coordinate);

    fn zoom(&self) -> f64;

    /// Map units per pixel at the current zoom.
    fn resolution(&self) -> f64;

    fn hints(&self) -> ViewHints;

    fn pixel_to_coordinate(&self, pixel: Pixel) -> Coordinate;
}

pub trait TerrainLayer {
    fn set_shear(&mut self, shear: Shear);

    fn shear(&self) -> Shear;

    /// Requests a repaint with the current shear.
    fn redraw(&mut self);

    /// Elevation in metres under `coordinate` at the given zoom.
    fn elevation_at(&self, coordinate: Coordinate, zoom: f64) -> f64;
}

pub type SharedView = Rc<RefCell<dyn MapView>>;
pub type SharedTerrain = Rc<RefCell<dyn TerrainLayer>>;
