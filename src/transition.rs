//! Rendering side of the dial: transition requests and their completion.

use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use egui::Rect;

/// Timing curve for animated transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Eased progress for linear progress `t` (clamped to `[0, 1]`).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => t * t * 2.0f64.mul_add(-t, 3.0),
        }
    }
}

/// How a target should reach a new angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Jump immediately; used while dragging.
    Instant,
    /// Interpolate over `duration`; used for taps.
    Animated { duration: Duration, easing: Easing },
}

impl Motion {
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::Animated { .. })
    }
}

/// The visual element a dial rotates.
///
/// Dials hold targets through a `Weak` reference and never keep them alive.
pub trait RotationTarget {
    /// Frame of the target in its parent, `None` while it is not laid out.
    fn frame(&self) -> Option<Rect>;

    /// Rotate the target to `angle` radians.
    ///
    /// `completion` is only present for animated motion. The target must
    /// finish it (or drop it) once the animation ends; until then the dial
    /// rejects further taps.
    fn request_transition(
        &mut self,
        angle: f64,
        motion: Motion,
        completion: Option<TransitionCompletion>,
    );
}

/// Idle/Animating flag guarding tap transitions.
#[derive(Debug, Default)]
pub(crate) struct AnimationLock {
    animating: Rc<Cell<bool>>,
}

impl AnimationLock {
    pub(crate) fn is_animating(&self) -> bool {
        self.animating.get()
    }

    /// Flip to Animating and hand out the token that flips it back.
    pub(crate) fn try_acquire(&self) -> Option<TransitionCompletion> {
        if self.animating.replace(true) {
            return None;
        }
        Some(TransitionCompletion {
            lock: Rc::downgrade(&self.animating),
        })
    }
}

/// Completion handle for one animated transition.
///
/// Finishing or dropping it releases the dial's tap lock. If the dial is
/// already gone the release is a no-op.
#[derive(Debug)]
#[must_use = "dropping a completion releases the tap lock immediately"]
pub struct TransitionCompletion {
    lock: Weak<Cell<bool>>,
}

impl TransitionCompletion {
    pub fn complete(self) {}

    /// Whether the dial that issued this completion still exists.
    pub fn is_live(&self) -> bool {
        self.lock.strong_count() > 0
    }
}

impl Drop for TransitionCompletion {
    fn drop(&mut self) {
        if let Some(flag) = self.lock.upgrade() {
            flag.set(false);
        }
    }
}
