//! Dial interaction controller: tap-to-jump and drag-to-rotate.
//!
//! The controller turns gesture events into updates of a single accumulated
//! angle, reports mapped values through caller callbacks and asks the
//! rotation target to follow. Everything runs synchronously on the thread
//! that delivers events; the only deferred piece is the target's tap
//! animation, which hands back a [`TransitionCompletion`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use egui::Pos2;
use tracing::{debug, trace, warn};

use crate::dial::{RotationAccumulator, ValueRange, WorkingArc, sample_angle};
use crate::gesture::{DragPhase, GestureEvent, GestureKind, InputSurface};
use crate::transition::{AnimationLock, Easing, Motion, RotationTarget, TransitionCompletion};

mod settings;

pub use settings::{DEFAULT_ANIMATION_DURATION, DEFAULT_DAMPING, DialSettings, SettingsError};

/// Callback receiving a mapped dial value.
pub type ValueCallback = Box<dyn FnMut(f64)>;

/// Why an event produced no caller-visible step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// No recognizer of that kind is installed.
    NotInstalled,
    /// A tap animation is still running.
    AnimationInFlight,
    /// Drag step without a preceding Began.
    NoActiveDrag,
    /// The rotation target has been dropped.
    TargetGone,
}

/// Result of handing one event to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch {
    /// A callback step happened with this mapped value.
    Delivered(f64),
    /// The event was consumed without a callback (drag Began).
    Absorbed,
    Ignored(Ignored),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Tracking { last_angle: f64 },
}

pub struct DialController<T: RotationTarget, S: InputSurface> {
    target: Weak<RefCell<T>>,
    surface: S,
    arc: WorkingArc,
    accumulator: RotationAccumulator,
    settings: DialSettings,
    lock: AnimationLock,
    drag: DragState,
    tap_installed: bool,
    pan_installed: bool,
    on_tap: Option<ValueCallback>,
    on_drag_change: Option<ValueCallback>,
    on_drag_complete: Option<ValueCallback>,
}

impl<T: RotationTarget, S: InputSurface> DialController<T, S> {
    /// Bind a dial to `target`, placing `surface` under it when the target
    /// already has a frame.
    pub fn new(target: &Rc<RefCell<T>>, mut surface: S) -> Self {
        match target.borrow().frame() {
            Some(frame) => surface.attach(frame),
            None => debug!("dial target has no frame yet, surface left detached"),
        }
        Self {
            target: Rc::downgrade(target),
            surface,
            arc: WorkingArc::FIXED,
            accumulator: RotationAccumulator::new(),
            settings: DialSettings::default(),
            lock: AnimationLock::default(),
            drag: DragState::Idle,
            tap_installed: false,
            pan_installed: false,
            on_tap: None,
            on_drag_change: None,
            on_drag_complete: None,
        }
    }

    pub fn with_settings(mut self, settings: DialSettings) -> Result<Self, SettingsError> {
        self.apply_settings(settings)?;
        Ok(self)
    }

    /// Accumulated angle in `[0, 2pi)`.
    pub const fn current_angle(&self) -> f64 {
        self.accumulator.angle()
    }

    /// Mapped value for the current angle.
    pub fn current_value(&self) -> f64 {
        self.settings.range.value_at(self.arc, self.accumulator.angle())
    }

    pub const fn settings(&self) -> DialSettings {
        self.settings
    }

    pub const fn arc(&self) -> WorkingArc {
        self.arc
    }

    pub fn is_animating(&self) -> bool {
        self.lock.is_animating()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Tracking { .. })
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn apply_settings(&mut self, settings: DialSettings) -> Result<(), SettingsError> {
        settings.validate().inspect_err(|err| warn!("rejected dial settings: {err}"))?;
        self.settings = settings;
        Ok(())
    }

    pub fn set_value_range(&mut self, lower: f64, upper: f64) -> Result<(), SettingsError> {
        let range = ValueRange::new(lower, upper);
        settings::check_range(range).inspect_err(|err| warn!("{err}"))?;
        self.settings.range = range;
        Ok(())
    }

    pub fn set_damping(&mut self, damping: f64) -> Result<(), SettingsError> {
        settings::check_damping(damping).inspect_err(|err| warn!("{err}"))?;
        self.settings.damping = damping;
        Ok(())
    }

    pub fn set_animation_duration(&mut self, duration: Duration) -> Result<(), SettingsError> {
        settings::check_duration(duration).inspect_err(|err| warn!("{err}"))?;
        self.settings.animation_duration = duration;
        Ok(())
    }

    /// Install (or replace) the tap callback; `None` keeps tap rotation
    /// active but silent.
    pub fn attach_tap(&mut self, on_tap: Option<ValueCallback>) {
        self.on_tap = on_tap;
        if !self.tap_installed {
            self.surface.install(GestureKind::Tap);
            self.tap_installed = true;
        }
    }

    /// Install (or replace) the drag callbacks.
    pub fn attach_drag(
        &mut self,
        on_change: Option<ValueCallback>,
        on_complete: Option<ValueCallback>,
    ) {
        self.on_drag_change = on_change;
        self.on_drag_complete = on_complete;
        if !self.pan_installed {
            self.surface.install(GestureKind::Pan);
            self.pan_installed = true;
        }
    }

    pub fn detach_tap(&mut self) {
        if self.tap_installed {
            self.surface.uninstall(GestureKind::Tap);
            self.tap_installed = false;
        }
        self.on_tap = None;
    }

    /// Remove the pan recognizer; a stroke in progress is dropped without a
    /// completion call.
    pub fn detach_drag(&mut self) {
        if self.pan_installed {
            self.surface.uninstall(GestureKind::Pan);
            self.pan_installed = false;
        }
        self.on_drag_change = None;
        self.on_drag_complete = None;
        self.drag = DragState::Idle;
    }

    /// Tear the dial down now. Equivalent to dropping it.
    pub fn dispose(self) {}

    pub fn handle(&mut self, event: GestureEvent) -> Dispatch {
        let outcome = match event {
            GestureEvent::Tap { contact } => self.handle_tap(contact),
            GestureEvent::Pan { phase, contact } => self.handle_pan(phase, contact),
        };
        if let Dispatch::Ignored(reason) = outcome {
            debug!(kind = event.kind().label(), ?reason, "dial event ignored");
        }
        outcome
    }

    fn handle_tap(&mut self, contact: Option<Pos2>) -> Dispatch {
        if !self.tap_installed {
            return Dispatch::Ignored(Ignored::NotInstalled);
        }
        let Some(target) = self.target.upgrade() else {
            return Dispatch::Ignored(Ignored::TargetGone);
        };
        // Taken before any work so a second tap in the same frame is rejected.
        let Some(completion) = self.lock.try_acquire() else {
            return Dispatch::Ignored(Ignored::AnimationInFlight);
        };

        let bounded = self.bounded_sample(contact);
        let angle = self.accumulator.apply_absolute(bounded);
        let value = self.settings.range.value_at(self.arc, angle);
        debug!(bounded, angle, value, "dial tap");

        if let Some(on_tap) = self.on_tap.as_mut() {
            on_tap(value);
        }
        let motion = Motion::Animated {
            duration: self.settings.animation_duration,
            easing: Easing::EaseInOut,
        };
        Self::request_transition(&target, angle, motion, Some(completion));
        Dispatch::Delivered(value)
    }

    fn handle_pan(&mut self, phase: DragPhase, contact: Option<Pos2>) -> Dispatch {
        if !self.pan_installed {
            return Dispatch::Ignored(Ignored::NotInstalled);
        }
        let Some(target) = self.target.upgrade() else {
            self.drag = DragState::Idle;
            return Dispatch::Ignored(Ignored::TargetGone);
        };

        match (phase, self.drag) {
            (DragPhase::Began, _) => {
                let bounded = self.bounded_sample(contact);
                trace!(bounded, "dial drag began");
                self.drag = DragState::Tracking {
                    last_angle: bounded,
                };
                Dispatch::Absorbed
            }
            (DragPhase::Changed, DragState::Tracking { last_angle }) => {
                let bounded = self.bounded_sample(contact);
                let step =
                    self.accumulator
                        .apply_incremental(last_angle, bounded, self.settings.damping);
                self.drag = DragState::Tracking {
                    last_angle: bounded,
                };
                let angle = self.accumulator.angle();
                let value = self.settings.range.value_at(self.arc, angle);
                trace!(bounded, step, angle, value, "dial drag changed");

                if let Some(on_change) = self.on_drag_change.as_mut() {
                    on_change(value);
                }
                Self::request_transition(&target, angle, Motion::Instant, None);
                Dispatch::Delivered(value)
            }
            (phase, DragState::Tracking { .. }) => {
                debug_assert!(phase.is_terminal());
                self.drag = DragState::Idle;
                let value = self.current_value();
                debug!(?phase, value, "dial drag finished");
                if let Some(on_complete) = self.on_drag_complete.as_mut() {
                    on_complete(value);
                }
                Dispatch::Delivered(value)
            }
            (_, DragState::Idle) => Dispatch::Ignored(Ignored::NoActiveDrag),
        }
    }

    fn bounded_sample(&self, contact: Option<Pos2>) -> f64 {
        self.arc.bound(sample_angle(contact, self.surface.bounds()))
    }

    fn request_transition(
        target: &Rc<RefCell<T>>,
        angle: f64,
        motion: Motion,
        completion: Option<TransitionCompletion>,
    ) {
        match target.try_borrow_mut() {
            Ok(mut target) => target.request_transition(angle, motion, completion),
            // Dropping the completion here releases the tap lock.
            Err(_) => warn!("dial target is busy, transition to {angle} skipped"),
        }
    }
}

impl<T: RotationTarget, S: InputSurface> Drop for DialController<T, S> {
    fn drop(&mut self) {
        self.detach_tap();
        self.detach_drag();
        self.surface.detach();
    }
}
