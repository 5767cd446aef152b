pub mod condition;
pub mod dispatcher;
pub mod types;

pub use condition::Condition;
pub use dispatcher::{
    centroid, PointerDispatcher, PointerGestureHandler, SequenceControl, TargetPointers,
};
pub use types::{
    Modifiers, PointerButton, PointerButtons, PointerEvent, PointerEventKind, PointerId,
};

pub mod prelude {
    pub use super::types::{
        Modifiers, PointerButton, PointerButtons, PointerEvent, PointerEventKind, PointerId,
    };
}
