//! Idempotent per-frame loop.
//!
//! An [`AnimationLoop`] keeps at most one frame callback pending. Each frame it
//! ticks its [`FrameTask`] and re-arms itself only when the task asks to
//! continue. After [`AnimationLoop::dispose`] the task is released and no
//! queued invocation can reach it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::frame_clock::{FrameCallbackRegistration, FrameClock};

/// What a task wants after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameAction {
    /// Schedule another tick on the next frame.
    Continue,
    /// Go idle until someone calls `start` again.
    Idle,
}

/// Work executed once per display frame while an [`AnimationLoop`] runs.
pub trait FrameTask {
    fn tick(&mut self, frame_time_nanos: u64) -> FrameAction;
}

struct LoopInner {
    clock: FrameClock,
    task: Option<Rc<RefCell<dyn FrameTask>>>,
    registration: Option<FrameCallbackRegistration>,
    frames_run: u64,
}

pub struct AnimationLoop {
    inner: Rc<RefCell<LoopInner>>,
}

impl AnimationLoop {
    pub fn new(clock: FrameClock, task: Rc<RefCell<dyn FrameTask>>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LoopInner {
                clock,
                task: Some(task),
                registration: None,
                frames_run: 0,
            })),
        }
    }

    /// Schedules the next tick. A no-op while a tick is already pending or
    /// after disposal.
    pub fn start(&self) {
        Self::schedule_frame(&self.inner);
    }

    /// Cancels the pending tick, if any.
    pub fn stop(&self) {
        let registration = self.inner.borrow_mut().registration.take();
        if let Some(registration) = registration {
            registration.cancel();
        }
    }

    /// Stops the loop for good and releases the task.
    pub fn dispose(&self) {
        self.stop();
        let task = self.inner.borrow_mut().task.take();
        if task.is_some() {
            log::debug!("animation loop disposed");
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().task.is_none()
    }

    /// Number of ticks delivered to the task so far.
    pub fn frames_run(&self) -> u64 {
        self.inner.borrow().frames_run
    }

    fn schedule_frame(this: &Rc<RefCell<LoopInner>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() || inner.task.is_none() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if registration.is_active() {
            this.borrow_mut().registration = Some(registration);
        }
    }

    fn on_frame(this: &Rc<RefCell<LoopInner>>, frame_time_nanos: u64) {
        let task = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            let Some(task) = inner.task.clone() else {
                return;
            };
            inner.frames_run += 1;
            task
        };

        let action = task.borrow_mut().tick(frame_time_nanos);

        if action == FrameAction::Continue {
            Self::schedule_frame(this);
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "tests/animation_loop_tests.rs"]
mod tests;
