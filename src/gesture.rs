//! Gesture events delivered to a dial and the surface that recognizes them.

use egui::{Pos2, Rect};

/// Recognizer kinds a dial can install on its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Tap,
    Pan,
}

impl GestureKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Pan => "pan",
        }
    }
}

/// Phase of a single-contact drag stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl DragPhase {
    /// Ended and Cancelled both close the stroke.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// One recognized gesture step, in the surface's coordinate space.
///
/// `contact` is `None` when the recognizer lost track of the touch; the
/// sampled angle then degrades to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Tap { contact: Option<Pos2> },
    Pan { phase: DragPhase, contact: Option<Pos2> },
}

impl GestureEvent {
    pub const fn kind(&self) -> GestureKind {
        match self {
            Self::Tap { .. } => GestureKind::Tap,
            Self::Pan { .. } => GestureKind::Pan,
        }
    }

    pub const fn contact(&self) -> Option<Pos2> {
        match self {
            Self::Tap { contact } | Self::Pan { contact, .. } => *contact,
        }
    }
}

/// Hit-testing surface placed under the dial's visual target.
///
/// The dial owns its surface: it attaches it at construction, installs
/// recognizers lazily and tears everything down when dropped.
pub trait InputSurface {
    /// Place the surface under the target, covering `frame`.
    fn attach(&mut self, frame: Rect);

    /// Remove the surface from the host hierarchy.
    fn detach(&mut self);

    /// Start recognizing `kind` (single contact only).
    fn install(&mut self, kind: GestureKind);

    /// Stop recognizing `kind`.
    fn uninstall(&mut self, kind: GestureKind);

    /// Bounds angles are sampled against, `None` while detached.
    fn bounds(&self) -> Option<Rect>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn events_report_their_kind_and_contact() {
        let at = pos2(3.0, 4.0);
        let tap = GestureEvent::Tap { contact: Some(at) };
        assert_eq!(tap.kind(), GestureKind::Tap);
        assert_eq!(tap.contact(), Some(at));

        let lost = GestureEvent::Pan {
            phase: DragPhase::Changed,
            contact: None,
        };
        assert_eq!(lost.kind(), GestureKind::Pan);
        assert_eq!(lost.contact(), None);
        assert_eq!(lost.kind().label(), "pan");
    }

    #[test]
    fn ended_and_cancelled_close_the_stroke() {
        assert!(!DragPhase::Began.is_terminal());
        assert!(!DragPhase::Changed.is_terminal());
        assert!(DragPhase::Ended.is_terminal());
        assert!(DragPhase::Cancelled.is_terminal());
    }
}
