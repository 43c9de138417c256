//! Linear mapping from accumulated angle to the caller's value range.

use serde::{Deserialize, Serialize};

use super::arc::WorkingArc;

/// Value range a dial reports in.
///
/// `lower` may exceed `upper`; the mapping then decreases as the dial turns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Value at angle 0.
    pub lower: f64,
    /// Value approached as the angle nears a full arc.
    pub upper: f64,
}

impl ValueRange {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Mapped value for an accumulated angle.
    pub fn value_at(self, arc: WorkingArc, angle: f64) -> f64 {
        let t = angle / arc.span();
        (self.upper - self.lower).mul_add(t, self.lower)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }
}
