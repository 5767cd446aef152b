//! Pointer input dispatcher plumbing.
//!
//! Hosts enqueue raw pointer events; the dispatcher keeps the set of pressed
//! pointers and turns the stream into down/drag/up calls on a gesture handler.
//! A handler that captures on down keeps receiving drags until it releases on
//! up.

use smallvec::SmallVec;
use terrashear_geometry::Pixel;

use super::types::{PointerEvent, PointerEventKind, PointerId};

/// Whether a handler wants to keep receiving the current pointer sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceControl {
    Capture,
    Release,
}

impl SequenceControl {
    pub fn is_capture(self) -> bool {
        self == SequenceControl::Capture
    }
}

/// Capability interface consumed by [`PointerDispatcher`].
pub trait PointerGestureHandler {
    fn on_drag_start(&mut self, event: &PointerEvent, pointers: &TargetPointers)
        -> SequenceControl;

    fn on_drag_move(&mut self, event: &PointerEvent, pointers: &TargetPointers);

    fn on_drag_end(&mut self, event: &PointerEvent, pointers: &TargetPointers) -> SequenceControl;
}

/// Mean position of `pixels`, or `None` when there are none.
pub fn centroid(pixels: &[Pixel]) -> Option<Pixel> {
    if pixels.is_empty() {
        return None;
    }
    let (sum_x, sum_y) = pixels
        .iter()
        .fold((0.0, 0.0), |(x, y), pixel| (x + pixel.x, y + pixel.y));
    let count = pixels.len() as f64;
    Some(Pixel::new(sum_x / count, sum_y / count))
}

/// Pointers currently pressed, in press order.
#[derive(Clone, Debug, Default)]
pub struct TargetPointers {
    entries: SmallVec<[(PointerId, Pixel); 4]>,
}

impl TargetPointers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    pub fn positions(&self) -> SmallVec<[Pixel; 4]> {
        self.entries.iter().map(|(_, pixel)| *pixel).collect()
    }

    pub fn centroid(&self) -> Option<Pixel> {
        centroid(&self.positions())
    }

    pub fn press(&mut self, id: PointerId, position: Pixel) {
        match self.entries.iter_mut().find(|(entry_id, _)| *entry_id == id) {
            Some(entry) => entry.1 = position,
            None => self.entries.push((id, position)),
        }
    }

    /// Returns false when `id` is not pressed.
    pub fn update(&mut self, id: PointerId, position: Pixel) -> bool {
        match self.entries.iter_mut().find(|(entry_id, _)| *entry_id == id) {
            Some(entry) => {
                entry.1 = position;
                true
            }
            None => false,
        }
    }

    pub fn release(&mut self, id: PointerId) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Default)]
pub struct PointerDispatcher {
    queue: Vec<PointerEvent>,
    pointers: TargetPointers,
    handling: bool,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push(event);
    }

    pub fn drain(&mut self, handler: &mut dyn PointerGestureHandler) {
        let queue = std::mem::take(&mut self.queue);
        for event in queue {
            self.dispatch(event, handler);
        }
    }

    /// Is a pointer sequence currently captured by the handler?
    pub fn is_handling(&self) -> bool {
        self.handling
    }

    pub fn target_pointers(&self) -> &TargetPointers {
        &self.pointers
    }

    /// Routes one event to `handler` and returns whether it was consumed.
    pub fn dispatch(
        &mut self,
        event: PointerEvent,
        handler: &mut dyn PointerGestureHandler,
    ) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                self.pointers.press(event.id, event.position);
                self.handling = handler.on_drag_start(&event, &self.pointers).is_capture();
                if self.handling {
                    event.consume();
                }
            }
            PointerEventKind::Move => {
                if !self.pointers.update(event.id, event.position) {
                    return false;
                }
                if self.handling {
                    handler.on_drag_move(&event, &self.pointers);
                    event.consume();
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                // A cancel ends the whole sequence, not just one pointer.
                if event.kind == PointerEventKind::Cancel {
                    self.pointers.clear();
                } else {
                    self.pointers.release(event.id);
                }
                if self.handling {
                    self.handling = handler.on_drag_end(&event, &self.pointers).is_capture();
                    event.consume();
                }
            }
        }
        event.is_consumed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(&'static str, usize)>,
        accept: bool,
    }

    impl PointerGestureHandler for Recorder {
        fn on_drag_start(
            &mut self,
            _: &PointerEvent,
            pointers: &TargetPointers,
        ) -> SequenceControl {
            self.calls.push(("start", pointers.len()));
            if self.accept {
                SequenceControl::Capture
            } else {
                SequenceControl::Release
            }
        }

        fn on_drag_move(&mut self, _: &PointerEvent, pointers: &TargetPointers) {
            self.calls.push(("move", pointers.len()));
        }

        fn on_drag_end(&mut self, _: &PointerEvent, pointers: &TargetPointers) -> SequenceControl {
            self.calls.push(("end", pointers.len()));
            if pointers.is_empty() {
                SequenceControl::Release
            } else {
                SequenceControl::Capture
            }
        }
    }

    #[test]
    fn centroid_of_nothing_is_none() {
        assert_eq!(centroid(&[]), None);
        assert_eq!(
            centroid(&[Pixel::new(0.0, 0.0), Pixel::new(10.0, 20.0)]),
            Some(Pixel::new(5.0, 10.0))
        );
    }

    #[test]
    fn captured_sequence_receives_moves_until_release() {
        let mut dispatcher = PointerDispatcher::new();
        let mut handler = Recorder {
            accept: true,
            ..Default::default()
        };

        dispatcher.push(PointerEvent::down(Pixel::new(1.0, 1.0)));
        dispatcher.push(PointerEvent::moved(Pixel::new(2.0, 1.0)));
        dispatcher.push(PointerEvent::up(Pixel::new(2.0, 1.0)));
        dispatcher.push(PointerEvent::moved(Pixel::new(3.0, 1.0)));
        dispatcher.drain(&mut handler);

        assert_eq!(handler.calls, vec![("start", 1), ("move", 1), ("end", 0)]);
        assert!(!dispatcher.is_handling());
    }

    #[test]
    fn rejected_sequence_gets_no_moves() {
        let mut dispatcher = PointerDispatcher::new();
        let mut handler = Recorder::default();

        let consumed = dispatcher.dispatch(PointerEvent::down(Pixel::ZERO), &mut handler);
        dispatcher.dispatch(PointerEvent::moved(Pixel::new(5.0, 5.0)), &mut handler);

        assert!(!consumed);
        assert_eq!(handler.calls, vec![("start", 1)]);
        assert_eq!(dispatcher.target_pointers().len(), 1);
    }

    #[test]
    fn lifting_one_of_two_pointers_keeps_sequence() {
        let mut dispatcher = PointerDispatcher::new();
        let mut handler = Recorder {
            accept: true,
            ..Default::default()
        };

        dispatcher.dispatch(PointerEvent::down(Pixel::ZERO).with_id(1), &mut handler);
        dispatcher.dispatch(PointerEvent::down(Pixel::new(10.0, 0.0)).with_id(2), &mut handler);
        assert_eq!(dispatcher.target_pointers().centroid(), Some(Pixel::new(5.0, 0.0)));

        dispatcher.dispatch(PointerEvent::up(Pixel::ZERO).with_id(1), &mut handler);
        assert!(dispatcher.is_handling());
        assert!(!dispatcher.target_pointers().contains(1));

        dispatcher.dispatch(PointerEvent::up(Pixel::ZERO).with_id(2), &mut handler);
        assert!(!dispatcher.is_handling());
    }

    #[test]
    fn cancel_drops_every_pointer_and_ends_sequence() {
        let mut dispatcher = PointerDispatcher::new();
        let mut handler = Recorder {
            accept: true,
            ..Default::default()
        };

        dispatcher.dispatch(PointerEvent::down(Pixel::ZERO).with_id(1), &mut handler);
        dispatcher.dispatch(PointerEvent::down(Pixel::new(10.0, 0.0)).with_id(2), &mut handler);
        let cancel = PointerEvent::new(PointerEventKind::Cancel, Pixel::ZERO).with_id(1);
        assert!(dispatcher.dispatch(cancel, &mut handler));

        assert!(dispatcher.target_pointers().is_empty());
        assert!(!dispatcher.is_handling());
        assert_eq!(handler.calls.last(), Some(&("end", 0)));
    }
}
