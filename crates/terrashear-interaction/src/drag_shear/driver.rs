//! Per-frame pipeline: spring step, elevation response, render-state push.

use std::cell::RefCell;
use std::rc::Rc;

use terrashear_core::{FrameAction, FrameTask};
use terrashear_geometry::{Coordinate, Offset, Shear};

use super::elevation::{self, ElevationBranch, ResponseContext};
use super::spring::{self, SpringParams};
use super::DragShearState;
use crate::map::{SharedTerrain, SharedView};

/// Spring state carried from frame to frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhysicsState {
    /// Per-axis velocity-like delta applied to the center each tick.
    pub current_change: Offset,
    /// Spring extension measured at the start of the last tick.
    pub distance_xy: Offset,
    pub distance: f64,
    pub spring_length_xy: Offset,
}

/// What the last tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Center and shear were pushed; another tick follows.
    Applied {
        center: Coordinate,
        shear: Shear,
        branch: ElevationBranch,
        distance_xy: Offset,
    },
    /// Another interaction owns the view; shear was reset and the loop idled.
    Preempted,
    /// Motion fell below the threshold; the loop idled.
    Settled,
}

enum Effect {
    Apply {
        center: Coordinate,
        shear: Shear,
    },
    ResetShear,
    Nothing,
}

pub(crate) struct AnimationDriver {
    state: Rc<RefCell<DragShearState>>,
    view: SharedView,
    terrain: SharedTerrain,
}

impl AnimationDriver {
    pub(crate) fn new(
        state: Rc<RefCell<DragShearState>>,
        view: SharedView,
        terrain: SharedTerrain,
    ) -> Self {
        Self {
            state,
            view,
            terrain,
        }
    }

    /// Runs the pipeline against shared state and decides what to push.
    /// Collaborators are only touched after the state borrow is released.
    fn advance(&self, frame_time_nanos: u64) -> (Effect, FrameAction) {
        let (anchor, zoom, other_interaction_active) = {
            let view = self.view.borrow();
            let state = self.state.borrow();
            (
                state.session.anchor(&*view),
                view.zoom(),
                view.hints().is_interacting(),
            )
        };

        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let config = state.config;

        let distance_xy = anchor.distance(state.session.current_center);
        let params = SpringParams {
            spring_length: state.spring_length,
            spring_coefficient: config.spring_coefficient,
            friction_force: config.friction_force,
            threshold: config.threshold,
        };
        let step = spring::step(state.physics.current_change, distance_xy, &params);
        let stepped = PhysicsState {
            current_change: step.current_change,
            distance_xy: step.distance_xy,
            distance: step.distance,
            spring_length_xy: step.spring_length_xy,
        };

        let animation_active = spring::is_animating(step.current_change, config.threshold);
        let hybrid_shearing_active = spring::is_hybrid_shearing(step.spring_length_xy);

        if other_interaction_active {
            // Physics stays as it was so the motion resumes where it left off.
            log::debug!("drag-shear preempted by another interaction");
            state.last_outcome = Some(TickOutcome::Preempted);
            return (Effect::ResetShear, FrameAction::Idle);
        }

        state.physics = stepped;
        if animation_active || hybrid_shearing_active {
            let ctx = ResponseContext {
                range: &state.range,
                start_elevation: state.session.start_drag_elevation,
                anchor: &anchor,
                zoom,
                min_zoom: config.min_zoom,
            };
            let response =
                elevation::respond(&ctx, &mut state.session.current_center, step.current_change);
            log::trace!(
                "tick {frame_time_nanos}ns: {:?} center ({:.3}, {:.3}) shear ({:.5}, {:.5})",
                response.branch,
                response.center.x,
                response.center.y,
                response.shear.x,
                response.shear.y
            );
            state.last_outcome = Some(TickOutcome::Applied {
                center: response.center,
                shear: response.shear,
                branch: response.branch,
                distance_xy: response.distance_xy,
            });
            (
                Effect::Apply {
                    center: response.center,
                    shear: response.shear,
                },
                FrameAction::Continue,
            )
        } else {
            log::debug!("drag-shear settled");
            state.last_outcome = Some(TickOutcome::Settled);
            (Effect::Nothing, FrameAction::Idle)
        }
    }
}

impl FrameTask for AnimationDriver {
    fn tick(&mut self, frame_time_nanos: u64) -> FrameAction {
        let (effect, action) = self.advance(frame_time_nanos);
        match effect {
            Effect::Apply { center, shear } => {
                self.view.borrow_mut().set_center(center);
                let mut terrain = self.terrain.borrow_mut();
                terrain.set_shear(shear);
                terrain.redraw();
            }
            Effect::ResetShear => {
                let mut terrain = self.terrain.borrow_mut();
                terrain.set_shear(Shear::ZERO);
                terrain.redraw();
            }
            Effect::Nothing => {}
        }
        action
    }
}
