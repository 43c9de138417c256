//! Rotary dial controller.
//!
//! Converts pointer angles around a pivot into a bounded rotation, maps it to
//! a caller-defined value range and drives a rotation target, with
//! tap-to-jump (animated, one at a time) and drag-to-rotate (instant, damped).

pub mod config;
pub mod controller;
pub mod dial;
pub mod gesture;
pub mod transition;

pub use controller::{DialController, DialSettings, Dispatch, Ignored, SettingsError, ValueCallback};
pub use gesture::{DragPhase, GestureEvent, GestureKind, InputSurface};
pub use transition::{Easing, Motion, RotationTarget, TransitionCompletion};
