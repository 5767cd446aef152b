use std::cell::Cell;
use std::rc::Rc;
use terrashear_geometry::Pixel;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Buttons held while the event fired. Touch and pen contacts report none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(PointerButton::Primary.bit());

    pub const fn with(self, button: PointerButton) -> Self {
        Self(self.0 | button.bit())
    }

    pub fn contains(self, button: PointerButton) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Keyboard modifiers held while the pointer event fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.shift || self.alt || self.ctrl || self.meta)
    }
}

/// Pointer event delivered by the host in viewport pixel space.
///
/// Consumption is shared across copies so a handler that claims the event is
/// visible to everyone holding a clone.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Pixel,
    pub modifiers: Modifiers,
    pub buttons: PointerButtons,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Pixel) -> Self {
        Self {
            id: 0,
            kind,
            position,
            modifiers: Modifiers::NONE,
            buttons: PointerButtons::NONE,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(position: Pixel) -> Self {
        Self::new(PointerEventKind::Down, position).with_buttons(PointerButtons::PRIMARY)
    }

    pub fn moved(position: Pixel) -> Self {
        Self::new(PointerEventKind::Move, position).with_buttons(PointerButtons::PRIMARY)
    }

    pub fn up(position: Pixel) -> Self {
        Self::new(PointerEventKind::Up, position)
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_events_carry_the_primary_button() {
        assert!(PointerEvent::down(Pixel::ZERO).buttons.contains(PointerButton::Primary));
        assert!(PointerEvent::moved(Pixel::ZERO).buttons.contains(PointerButton::Primary));
        assert!(PointerEvent::up(Pixel::ZERO).buttons.is_empty());
        assert!(!PointerButtons::PRIMARY.contains(PointerButton::Middle));
    }

    #[test]
    fn consumption_is_shared_between_clones() {
        let event = PointerEvent::down(Pixel::new(4.0, 2.0));
        let copy = event.clone();
        copy.consume();
        assert!(event.is_consumed());
    }

    #[test]
    fn modifiers_report_emptiness() {
        assert!(Modifiers::NONE.is_empty());
        assert!(!Modifiers::shift().is_empty());
    }
}
