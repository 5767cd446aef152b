//! Integrated drag-shear interaction.
//!
//! Dragging the map stretches a damped spring between the pointer and the
//! grabbed point. Every frame the spring pans the view and shears the terrain
//! layer, with a response that depends on whether the grabbed point sits
//! above or below the critical elevation. The loop runs on after pointer-up
//! until the motion settles or another interaction takes over the view.

mod config;
mod driver;
mod elevation;
mod session;
pub mod spring;

use std::cell::RefCell;
use std::rc::Rc;

use terrashear_core::{AnimationLoop, FrameClock};

pub use config::{ConfigError, DragShearConfig, DragShearOptions};
pub use driver::{PhysicsState, TickOutcome};
pub use elevation::{respond, ElevationBranch, ElevationRange, ElevationResponse, ResponseContext};
pub use session::DragSession;

use crate::input::{PointerEvent, PointerGestureHandler, SequenceControl, TargetPointers};
use crate::map::{SharedTerrain, SharedView};
use driver::AnimationDriver;
use session::GestureCapture;

/// State shared by gesture capture and the animation driver.
pub(crate) struct DragShearState {
    pub(crate) config: DragShearConfig,
    pub(crate) range: ElevationRange,
    /// Natural spring length in use; hybrid shearing shortens it mid-drag.
    pub(crate) spring_length: f64,
    pub(crate) session: DragSession,
    pub(crate) physics: PhysicsState,
    pub(crate) last_outcome: Option<TickOutcome>,
}

pub struct DragShearIntegrated {
    state: Rc<RefCell<DragShearState>>,
    capture: GestureCapture,
    animation: AnimationLoop,
}

impl DragShearIntegrated {
    /// Validates `options` and wires the interaction to its collaborators.
    pub fn new(
        options: DragShearOptions,
        view: SharedView,
        terrain: SharedTerrain,
        clock: FrameClock,
    ) -> Result<Self, ConfigError> {
        let config = DragShearConfig::try_from(&options)?;
        let state = Rc::new(RefCell::new(DragShearState {
            config,
            range: ElevationRange::default(),
            spring_length: config.spring_length,
            session: DragSession::default(),
            physics: PhysicsState::default(),
            last_outcome: None,
        }));

        let capture = GestureCapture::new(
            state.clone(),
            view.clone(),
            terrain.clone(),
            options.condition_or_default(),
        );
        let driver = Rc::new(RefCell::new(AnimationDriver::new(state.clone(), view, terrain)));
        let animation = AnimationLoop::new(clock, driver);

        log::debug!("drag-shear interaction created: {config:?}");
        Ok(Self {
            state,
            capture,
            animation,
        })
    }

    /// Replaces the elevation range used for branch selection.
    pub fn with_elevation_range(self, range: ElevationRange) -> Self {
        self.state.borrow_mut().range = range;
        self
    }

    pub fn config(&self) -> DragShearConfig {
        self.state.borrow().config
    }

    pub fn elevation_range(&self) -> ElevationRange {
        self.state.borrow().range
    }

    /// Spring length currently in effect.
    pub fn spring_length(&self) -> f64 {
        self.state.borrow().spring_length
    }

    pub fn session(&self) -> DragSession {
        self.state.borrow().session
    }

    pub fn physics(&self) -> PhysicsState {
        self.state.borrow().physics
    }

    pub fn last_outcome(&self) -> Option<TickOutcome> {
        self.state.borrow().last_outcome
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().session.dragging
    }

    /// Whether a frame tick is pending.
    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    pub fn frames_run(&self) -> u64 {
        self.animation.frames_run()
    }

    /// Cancels a pending tick without touching spring state.
    pub fn stop_animation(&self) {
        self.animation.stop();
    }

    /// Tears the frame loop down; no tick runs after this returns.
    pub fn dispose(&self) {
        self.animation.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.animation.is_disposed()
    }
}

impl PointerGestureHandler for DragShearIntegrated {
    fn on_drag_start(
        &mut self,
        event: &PointerEvent,
        pointers: &TargetPointers,
    ) -> SequenceControl {
        self.capture.drag_start(event, pointers)
    }

    fn on_drag_move(&mut self, event: &PointerEvent, pointers: &TargetPointers) {
        if self.capture.drag_move(event, pointers) {
            self.animation.start();
        }
    }

    fn on_drag_end(&mut self, event: &PointerEvent, pointers: &TargetPointers) -> SequenceControl {
        self.capture.drag_end(event, pointers)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
