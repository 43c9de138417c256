use egui::{Pos2, Rect, Response, Sense};
use rotodial::{DragPhase, GestureEvent, GestureKind, InputSurface};

/// Hit area placed under the dial face; tracks which recognizers are live.
#[derive(Debug, Default)]
pub struct PointerSurface {
    bounds: Option<Rect>,
    tap: bool,
    pan: bool,
}

impl PointerSurface {
    /// Interaction the dial area should request from egui.
    pub fn sense(&self) -> Sense {
        if self.bounds.is_none() {
            return Sense::hover();
        }
        match (self.tap, self.pan) {
            (true, true) => Sense::click_and_drag(),
            (true, false) => Sense::click(),
            (false, true) => Sense::drag(),
            (false, false) => Sense::hover(),
        }
    }
}

impl InputSurface for PointerSurface {
    fn attach(&mut self, frame: Rect) {
        self.bounds = Some(Rect::from_min_size(Pos2::ZERO, frame.size()));
    }

    fn detach(&mut self) {
        self.bounds = None;
    }

    fn install(&mut self, kind: GestureKind) {
        match kind {
            GestureKind::Tap => self.tap = true,
            GestureKind::Pan => self.pan = true,
        }
    }

    fn uninstall(&mut self, kind: GestureKind) {
        match kind {
            GestureKind::Tap => self.tap = false,
            GestureKind::Pan => self.pan = false,
        }
    }

    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

/// Translate an egui response over the dial area into gesture events.
///
/// Contact points are made local to `area`. `cancel` turns the end of an
/// active drag into a cancellation.
pub fn gesture_events(response: &Response, area: Rect, cancel: bool) -> Vec<GestureEvent> {
    let contact = response
        .interact_pointer_pos()
        .map(|p| Pos2::ZERO + (p - area.min));
    let mut events = Vec::new();

    if response.clicked() {
        events.push(GestureEvent::Tap { contact });
    }
    if response.drag_started() {
        events.push(GestureEvent::Pan {
            phase: DragPhase::Began,
            contact,
        });
    } else if response.dragged() && cancel {
        events.push(GestureEvent::Pan {
            phase: DragPhase::Cancelled,
            contact,
        });
    } else if response.dragged() && response.drag_delta() != egui::Vec2::ZERO {
        events.push(GestureEvent::Pan {
            phase: DragPhase::Changed,
            contact,
        });
    }
    if response.drag_stopped() {
        events.push(GestureEvent::Pan {
            phase: DragPhase::Ended,
            contact,
        });
    }
    events
}
