//! Frame-synchronised scheduling for map interactions.
//!
//! A [`Runtime`] owns a queue of one-shot frame callbacks that the host drains
//! once per display refresh. [`FrameClock`] hands out cancel-on-drop
//! registrations, and [`AnimationLoop`] builds an idempotent start/stop loop on
//! top of them.

pub mod animation_loop;
pub mod frame_clock;
pub mod runtime;

pub use animation_loop::{AnimationLoop, FrameAction, FrameTask};
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle, RuntimeScheduler};

pub type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::animation_loop::{AnimationLoop, FrameAction, FrameTask};
    pub use crate::frame_clock::FrameClock;
    pub use crate::runtime::{Runtime, RuntimeHandle};
}
