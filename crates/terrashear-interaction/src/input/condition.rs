//! Activation predicates deciding whether a pointer event may drive a gesture.

use std::rc::Rc;

use super::types::{PointerButton, PointerEvent};

pub type Condition = Rc<dyn Fn(&PointerEvent) -> bool>;

pub fn always() -> Condition {
    Rc::new(|_: &PointerEvent| true)
}

pub fn never() -> Condition {
    Rc::new(|_: &PointerEvent| false)
}

/// Default activation: no keyboard modifier held.
pub fn no_modifier_keys() -> Condition {
    Rc::new(|event: &PointerEvent| event.modifiers.is_empty())
}

pub fn shift_key_only() -> Condition {
    Rc::new(|event: &PointerEvent| {
        let m = event.modifiers;
        m.shift && !m.alt && !m.ctrl && !m.meta
    })
}

pub fn alt_key_only() -> Condition {
    Rc::new(|event: &PointerEvent| {
        let m = event.modifiers;
        m.alt && !m.shift && !m.ctrl && !m.meta
    })
}

pub fn alt_shift_keys_only() -> Condition {
    Rc::new(|event: &PointerEvent| {
        let m = event.modifiers;
        m.alt && m.shift && !m.ctrl && !m.meta
    })
}

/// Matches events whose button set contains the primary button, or that carry
/// no button information at all (touch and pen).
pub fn primary_button() -> Condition {
    Rc::new(|event: &PointerEvent| {
        event.buttons.is_empty() || event.buttons.contains(PointerButton::Primary)
    })
}

/// Both conditions must hold.
pub fn all(first: Condition, second: Condition) -> Condition {
    Rc::new(move |event: &PointerEvent| first(event) && second(event))
}
