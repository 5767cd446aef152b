//! Single-threaded runtime holding the next-frame callback queue.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::frame_clock::FrameClock;
use crate::FrameCallbackId;

/// Host hook asked to deliver a frame whenever callbacks are pending.
///
/// Browser hosts map this onto `requestAnimationFrame`, desktop hosts onto a
/// redraw request. Headless hosts can ignore it and drain frames manually.
pub trait RuntimeScheduler {
    fn schedule_frame(&self);
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

#[derive(Default)]
struct FrameQueue {
    entries: VecDeque<(FrameCallbackId, FrameCallback)>,
    last_id: FrameCallbackId,
}

impl FrameQueue {
    fn push(&mut self, callback: FrameCallback) -> FrameCallbackId {
        self.last_id += 1;
        self.entries.push_back((self.last_id, callback));
        self.last_id
    }

    fn remove(&mut self, id: FrameCallbackId) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    queue: RefCell<FrameQueue>,
    frames_drained: Cell<u64>,
}

impl RuntimeInner {
    fn register(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.queue.borrow_mut().push(callback);
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
        id
    }

    fn cancel(&self, id: FrameCallbackId) {
        let mut queue = self.queue.borrow_mut();
        queue.remove(id);
        if queue.entries.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Runs every callback queued before this call. Callbacks registered while
    /// draining wait for the next frame.
    fn drain(&self, frame_time_nanos: u64) {
        let batch = std::mem::take(&mut self.queue.borrow_mut().entries);
        self.needs_frame.set(false);
        self.frames_drained.set(self.frames_drained.get() + 1);
        log::trace!(
            "frame {} at {frame_time_nanos}ns: {} callback(s)",
            self.frames_drained.get(),
            batch.len()
        );
        for (_, callback) in batch {
            callback(frame_time_nanos);
        }
    }
}

/// Owner of the frame queue. Cloning shares the same queue.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                scheduler,
                needs_frame: Cell::new(false),
                queue: RefCell::new(FrameQueue::default()),
                frames_drained: Cell::new(0),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether a callback is waiting for the next frame.
    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frames_drained(&self) -> u64 {
        self.inner.frames_drained.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Arc::new(DefaultScheduler))
    }
}

/// Non-owning handle to a [`Runtime`]. Every operation is a no-op once the
/// runtime has been dropped.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Queues `callback` for the next frame. `None` when the runtime is gone.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        let inner = self.inner.upgrade()?;
        Some(inner.register(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel(id);
        }
    }

    /// Delivers one display frame to everything queued so far.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.pending_frame_callbacks() > 0
    }

    pub fn pending_frame_callbacks(&self) -> usize {
        self.inner.upgrade().map_or(0, |inner| inner.pending())
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}
