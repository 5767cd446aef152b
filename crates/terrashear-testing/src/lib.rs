//! Testing utilities for the terrain interaction crates.
//!
//! [`HeadlessView`] and [`HeadlessTerrain`] stand in for a real map and DEM
//! layer; [`InteractionRig`] wires them to a runtime and a pointer dispatcher so
//! scenarios can be scripted frame by frame.

pub mod headless;
pub mod rig;

pub use headless::{HeadlessTerrain, HeadlessView};
pub use rig::{InteractionRig, FRAME_NANOS};

pub mod prelude {
    pub use crate::headless::{HeadlessTerrain, HeadlessView};
    pub use crate::rig::{InteractionRig, FRAME_NANOS};
}
