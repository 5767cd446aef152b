use std::cell::RefCell;
use std::rc::Rc;

use terrashear_core::Runtime;
use terrashear_geometry::Pixel;
use terrashear_interaction::{
    ConfigError, DragShearIntegrated, DragShearOptions, Modifiers, PointerDispatcher,
    PointerEvent, PointerId,
};

use crate::headless::{HeadlessTerrain, HeadlessView};

/// One display frame at 60 Hz.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Runtime, collaborators, dispatcher and interaction wired together.
pub struct InteractionRig {
    pub runtime: Runtime,
    pub view: Rc<RefCell<HeadlessView>>,
    pub terrain: Rc<RefCell<HeadlessTerrain>>,
    pub interaction: DragShearIntegrated,
    pub dispatcher: PointerDispatcher,
    frame_time: u64,
}

impl InteractionRig {
    pub fn new(
        options: DragShearOptions,
        view: HeadlessView,
        terrain: HeadlessTerrain,
    ) -> Result<Self, ConfigError> {
        let runtime = Runtime::default();
        let view = Rc::new(RefCell::new(view));
        let terrain = Rc::new(RefCell::new(terrain));
        let interaction = DragShearIntegrated::new(
            options,
            view.clone(),
            terrain.clone(),
            runtime.frame_clock(),
        )?;
        Ok(Self {
            runtime,
            view,
            terrain,
            interaction,
            dispatcher: PointerDispatcher::new(),
            frame_time: 0,
        })
    }

    pub fn dispatch(&mut self, event: PointerEvent) -> bool {
        self.dispatcher.dispatch(event, &mut self.interaction)
    }

    pub fn press(&mut self, x: f64, y: f64) -> bool {
        self.press_pointer(0, x, y)
    }

    pub fn press_with_modifiers(&mut self, x: f64, y: f64, modifiers: Modifiers) -> bool {
        self.dispatch(PointerEvent::down(Pixel::new(x, y)).with_modifiers(modifiers))
    }

    pub fn press_pointer(&mut self, id: PointerId, x: f64, y: f64) -> bool {
        self.dispatch(PointerEvent::down(Pixel::new(x, y)).with_id(id))
    }

    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        self.drag_pointer(0, x, y)
    }

    pub fn drag_pointer(&mut self, id: PointerId, x: f64, y: f64) -> bool {
        self.dispatch(PointerEvent::moved(Pixel::new(x, y)).with_id(id))
    }

    pub fn release(&mut self) -> bool {
        self.release_pointer(0)
    }

    pub fn release_pointer(&mut self, id: PointerId) -> bool {
        let position = self
            .dispatcher
            .target_pointers()
            .centroid()
            .unwrap_or(Pixel::ZERO);
        self.dispatch(PointerEvent::up(position).with_id(id))
    }

    pub fn frame_time(&self) -> u64 {
        self.frame_time
    }

    /// Delivers one display frame. Returns whether another tick is pending.
    pub fn advance_frame(&mut self) -> bool {
        self.frame_time += FRAME_NANOS;
        self.runtime.handle().drain_frame_callbacks(self.frame_time);
        self.interaction.is_animating()
    }

    /// Advances frames until the interaction idles; returns the number of
    /// frames delivered, or `None` if it was still running after
    /// `max_frames`.
    pub fn run_until_idle(&mut self, max_frames: usize) -> Option<usize> {
        for frame in 1..=max_frames {
            if !self.advance_frame() {
                return Some(frame);
            }
        }
        log::warn!("interaction still animating after {max_frames} frames");
        None
    }
}
