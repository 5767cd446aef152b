//! Pointer interactions for elevation-aware maps.
//!
//! The centrepiece is [`DragShearIntegrated`]: a drag gesture that drives a
//! damped spring, pans the view and shears the terrain layer every frame until
//! the motion settles.

pub mod drag_shear;
pub mod input;
pub mod map;

pub use drag_shear::{
    ConfigError, DragSession, DragShearConfig, DragShearIntegrated, DragShearOptions,
    ElevationBranch, ElevationRange, PhysicsState, TickOutcome,
};
pub use input::{
    centroid, Condition, Modifiers, PointerButton, PointerButtons, PointerDispatcher,
    PointerEvent, PointerEventKind, PointerGestureHandler, PointerId, SequenceControl,
    TargetPointers,
};
pub use map::{MapView, SharedTerrain, SharedView, TerrainLayer, ViewHints};

pub mod prelude {
    pub use crate::drag_shear::{DragShearIntegrated, DragShearOptions};
    pub use crate::input::{condition, PointerDispatcher, PointerEvent, PointerEventKind};
    pub use crate::map::{MapView, TerrainLayer, ViewHints};
}
