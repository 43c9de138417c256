//! Accumulated dial rotation kept in `[0, 2pi)`.

use std::f64::consts::{PI, TAU};

/// Normalize an angle into the half-open turn `[0, 2pi)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `2pi`, which is
/// folded back to 0 so the upper bound is never reached. Negative zero is
/// returned as positive zero.
pub fn normalize_turn(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped + 0.0 }
}

/// Shortest signed step from `previous` to `current`, in `[-pi, pi]`.
pub fn shortest_delta(previous: f64, current: f64) -> f64 {
    let mut delta = current - previous;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    delta
}

/// Where the dial currently points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationAccumulator {
    angle: f64,
}

impl RotationAccumulator {
    pub const fn new() -> Self {
        Self { angle: 0.0 }
    }

    /// Current accumulated angle in `[0, 2pi)`.
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Tap update: the bounded angle is *subtracted* from the current angle.
    ///
    /// The sign is opposite to [`Self::apply_incremental`].
    pub fn apply_absolute(&mut self, bounded: f64) -> f64 {
        self.angle = normalize_turn(self.angle - bounded);
        self.angle
    }

    /// Drag update from two consecutive bounded samples.
    ///
    /// Returns the damped step that was actually applied.
    pub fn apply_incremental(&mut self, previous: f64, current: f64, damping: f64) -> f64 {
        let step = shortest_delta(previous, current) * damping;
        self.angle = normalize_turn(self.angle + step);
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS
    }

    #[test]
    fn normalize_wraps_both_directions() {
        assert!(approx_eq(normalize_turn(TAU + 0.25), 0.25));
        assert!(approx_eq(normalize_turn(-0.25), TAU - 0.25));
        assert!(approx_eq(normalize_turn(3.0 * TAU + 1.0), 1.0));
        assert_eq!(normalize_turn(TAU), 0.0);
    }

    #[test]
    fn normalize_never_returns_a_full_turn() {
        let tiny = -f64::EPSILON * 1e-3;
        let wrapped = normalize_turn(tiny);
        assert!(wrapped < TAU);
        assert!(wrapped >= 0.0);
    }

    #[test]
    fn exact_negative_turn_normalizes_to_positive_zero() {
        let wrapped = normalize_turn(-TAU);
        assert_eq!(wrapped, 0.0);
        assert!(wrapped.is_sign_positive());

        let mut acc = RotationAccumulator::new();
        acc.apply_absolute(TAU);
        assert!(acc.angle().is_sign_positive());
        assert!((0.0..TAU).contains(&acc.angle()));
    }

    #[test]
    fn shortest_delta_corrects_wraparound() {
        assert!(approx_eq(shortest_delta(0.2, 0.5), 0.3));
        assert!(approx_eq(shortest_delta(TAU - 0.1, 0.1), 0.2));
        assert!(approx_eq(shortest_delta(0.1, TAU - 0.1), -0.2));
    }

    #[test]
    fn absolute_update_subtracts_bounded_angle() {
        let mut acc = RotationAccumulator::new();
        acc.apply_absolute(PI / 2.0);
        assert!(approx_eq(acc.angle(), 3.0 * PI / 2.0));
        acc.apply_absolute(PI / 2.0);
        assert!(approx_eq(acc.angle(), PI));
    }

    #[test]
    fn incremental_update_is_damped() {
        let mut acc = RotationAccumulator::new();
        let step = acc.apply_incremental(0.2, 0.5, 0.5);
        assert!(approx_eq(step, 0.15));
        assert!(approx_eq(acc.angle(), 0.15));
    }

    #[test]
    fn incremental_updates_stay_in_range() {
        let mut acc = RotationAccumulator::new();
        let mut previous = 0.0;
        for i in 0..2_000 {
            // Walk backwards around the dial in uneven steps.
            let current = normalize_turn(previous - 0.05 - f64::from(i % 7) * 0.11);
            acc.apply_incremental(previous, current, 1.0);
            assert!((0.0..TAU).contains(&acc.angle()), "step {i}: {}", acc.angle());
            previous = current;
        }
    }
}
