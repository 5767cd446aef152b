//! Gesture capture: pointer down/drag/up turned into drag session state.

use std::cell::RefCell;
use std::rc::Rc;

use terrashear_geometry::{Coordinate, Pixel};

use super::spring::SpringAnchor;
use super::DragShearState;
use crate::input::{Condition, PointerEvent, SequenceControl, TargetPointers};
use crate::map::{MapView, SharedTerrain, SharedView};

/// State of one pointer-down .. pointer-up cycle.
///
/// Positions survive pointer-up so the spring can keep decaying against the
/// last drag; the next pointer-down overwrites them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragSession {
    pub start_drag_pixel: Pixel,
    pub current_drag_pixel: Pixel,
    /// Elevation under the pointer at drag start. Non-finite samples read as
    /// the range floor.
    pub start_drag_elevation: f64,
    pub start_center: Coordinate,
    pub current_center: Coordinate,
    pub dragging: bool,
}

impl DragSession {
    /// Projects the session's pixels through the view's current transform.
    pub fn anchor(&self, view: &dyn MapView) -> SpringAnchor {
        SpringAnchor {
            start_drag: view.pixel_to_coordinate(self.start_drag_pixel),
            current_drag: view.pixel_to_coordinate(self.current_drag_pixel),
            start_center: self.start_center,
        }
    }
}

pub(crate) struct GestureCapture {
    state: Rc<RefCell<DragShearState>>,
    view: SharedView,
    terrain: SharedTerrain,
    condition: Condition,
}

impl GestureCapture {
    pub(crate) fn new(
        state: Rc<RefCell<DragShearState>>,
        view: SharedView,
        terrain: SharedTerrain,
        condition: Condition,
    ) -> Self {
        Self {
            state,
            view,
            terrain,
            condition,
        }
    }

    fn accepts(&self, event: &PointerEvent, pointers: &TargetPointers) -> bool {
        !pointers.is_empty() && (self.condition)(event)
    }

    pub(crate) fn drag_start(
        &self,
        event: &PointerEvent,
        pointers: &TargetPointers,
    ) -> SequenceControl {
        if !self.accepts(event, pointers) {
            return SequenceControl::Release;
        }
        let Some(centroid) = pointers.centroid() else {
            return SequenceControl::Release;
        };

        let (center, sampled) = {
            let view = self.view.borrow();
            let zoom = view.zoom();
            let coordinate = view.pixel_to_coordinate(event.position);
            let sampled = self.terrain.borrow().elevation_at(coordinate, zoom);
            (view.center(), sampled)
        };

        let mut state = self.state.borrow_mut();
        let start_drag_elevation = state.range.sanitize(sampled);
        state.session = DragSession {
            start_drag_pixel: centroid,
            current_drag_pixel: centroid,
            start_drag_elevation,
            start_center: center,
            current_center: center,
            dragging: true,
        };
        log::debug!(
            "drag-shear session started at ({:.1}, {:.1}) px, elevation {start_drag_elevation:.1}",
            centroid.x,
            centroid.y
        );
        SequenceControl::Capture
    }

    /// Records the new drag position. Returns false when the event is
    /// ignored; the caller starts the animation otherwise.
    pub(crate) fn drag_move(&self, event: &PointerEvent, pointers: &TargetPointers) -> bool {
        if !self.accepts(event, pointers) {
            return false;
        }
        let Some(centroid) = pointers.centroid() else {
            return false;
        };

        let mut state = self.state.borrow_mut();
        state.session.current_drag_pixel = centroid;

        if state.config.hybrid_enabled() {
            let view = self.view.borrow();
            let distance = state
                .session
                .anchor(&*view)
                .distance(state.session.current_center)
                .length();
            let cap = state.config.hybrid_shearing_radius_px * view.resolution();
            state.spring_length = cap.min(distance);
            log::trace!("hybrid spring length {:.3}", state.spring_length);
        }
        true
    }

    pub(crate) fn drag_end(
        &self,
        _event: &PointerEvent,
        pointers: &TargetPointers,
    ) -> SequenceControl {
        if !pointers.is_empty() {
            return SequenceControl::Capture;
        }
        let mut state = self.state.borrow_mut();
        state.spring_length = 0.0;
        state.session.dragging = false;
        log::debug!("drag-shear session ended");
        SequenceControl::Release
    }
}
