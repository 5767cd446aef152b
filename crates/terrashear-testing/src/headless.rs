use std::cell::RefCell;

use terrashear_geometry::{Coordinate, Pixel, Shear};
use terrashear_interaction::{MapView, TerrainLayer, ViewHints};

/// Axis-aligned view without rotation. Map y grows upwards, pixel y grows
/// downwards, and the center sits in the middle of the viewport.
#[derive(Clone, Debug)]
pub struct HeadlessView {
    center: Coordinate,
    zoom: f64,
    resolution: f64,
    viewport: Pixel,
    hints: ViewHints,
    center_history: Vec<Coordinate>,
}

impl HeadlessView {
    pub fn new(center: Coordinate, zoom: f64, resolution: f64) -> Self {
        Self {
            center,
            zoom,
            resolution,
            viewport: Pixel::new(800.0, 600.0),
            hints: ViewHints::default(),
            center_history: Vec::new(),
        }
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Pixel::new(width, height);
        self
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn set_resolution(&mut self, resolution: f64) {
        self.resolution = resolution;
    }

    pub fn set_interacting(&mut self, interacting: bool) {
        self.hints.interacting = u32::from(interacting);
    }

    pub fn set_hints(&mut self, hints: ViewHints) {
        self.hints = hints;
    }

    /// Every center written through [`MapView::set_center`], oldest first.
    pub fn center_history(&self) -> &[Coordinate] {
        &self.center_history
    }

    pub fn coordinate_to_pixel(&self, coordinate: Coordinate) -> Pixel {
        Pixel::new(
            (coordinate.x - self.center.x) / self.resolution + self.viewport.x / 2.0,
            (self.center.y - coordinate.y) / self.resolution + self.viewport.y / 2.0,
        )
    }
}

impl MapView for HeadlessView {
    fn center(&self) -> Coordinate {
        self.center
    }

    fn set_center(&mut self, center: Coordinate) {
        self.center = center;
        self.center_history.push(center);
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn resolution(&self) -> f64 {
        self.resolution
    }

    fn hints(&self) -> ViewHints {
        self.hints
    }

    fn pixel_to_coordinate(&self, pixel: Pixel) -> Coordinate {
        Coordinate::new(
            self.center.x + (pixel.x - self.viewport.x / 2.0) * self.resolution,
            self.center.y - (pixel.y - self.viewport.y / 2.0) * self.resolution,
        )
    }
}

type ElevationFn = Box<dyn Fn(Coordinate, f64) -> f64>;

/// Terrain layer that records every shear and redraw.
pub struct HeadlessTerrain {
    shear: Shear,
    shear_history: Vec<Shear>,
    redraws: usize,
    elevation: ElevationFn,
    samples: RefCell<Vec<(Coordinate, f64)>>,
}

impl HeadlessTerrain {
    /// Terrain of constant height.
    pub fn flat(elevation: f64) -> Self {
        Self::with_elevation(move |_, _| elevation)
    }

    pub fn with_elevation(elevation: impl Fn(Coordinate, f64) -> f64 + 'static) -> Self {
        Self {
            shear: Shear::ZERO,
            shear_history: Vec::new(),
            redraws: 0,
            elevation: Box::new(elevation),
            samples: RefCell::new(Vec::new()),
        }
    }

    pub fn shear_history(&self) -> &[Shear] {
        &self.shear_history
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Coordinates and zooms passed to [`TerrainLayer::elevation_at`].
    pub fn samples(&self) -> Vec<(Coordinate, f64)> {
        self.samples.borrow().clone()
    }
}

impl TerrainLayer for HeadlessTerrain {
    fn set_shear(&mut self, shear: Shear) {
        self.shear = shear;
        self.shear_history.push(shear);
    }

    fn shear(&self) -> Shear {
        self.shear
    }

    fn redraw(&mut self) {
        self.redraws += 1;
    }

    fn elevation_at(&self, coordinate: Coordinate, zoom: f64) -> f64 {
        self.samples.borrow_mut().push((coordinate, zoom));
        (self.elevation)(coordinate, zoom)
    }
}
