//! Working arc of the dial and bounding of raw pointer angles into it.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Angular span the dial is defined over.
///
/// Angles are radians measured from the positive x-axis. The arc is fixed at
/// a full turn that starts and ends straight up, so the top of the pivot is the
/// visual zero crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingArc {
    start: f64,
    end: f64,
}

impl WorkingArc {
    /// The only arc a dial uses: `[-pi/2, 3pi/2]`.
    pub const FIXED: Self = Self {
        start: -FRAC_PI_2,
        end: PI + FRAC_PI_2,
    };

    pub const fn start(self) -> f64 {
        self.start
    }

    pub const fn end(self) -> f64 {
        self.end
    }

    /// Length of the arc in radians (never zero).
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    /// Angle bisecting the excluded gap between `end` and `start + 2pi`.
    ///
    /// Raw angles are folded around this point, so the fold never lands on a
    /// legitimate input inside the arc.
    pub fn midpoint(self) -> f64 {
        (TAU + self.start - self.end) / 2.0 + self.end
    }

    /// Map a raw sampler angle in `(-pi, pi]` into the closed range `[0, span]`.
    ///
    /// The raw angle is folded by a full turn when it lies past the excluded
    /// gap, clamped to `[start, end]`, then re-baselined so `start` maps to 0.
    /// Angles just counter-clockwise of `start` land on `span` itself, which
    /// for the fixed arc is a full turn.
    pub fn bound(self, raw: f64) -> f64 {
        let midpoint = self.midpoint();
        let mut folded = raw;
        if folded > midpoint {
            folded -= TAU;
        } else if folded < midpoint - TAU {
            folded += TAU;
        }
        folded.clamp(self.start, self.end) - self.start
    }
}

impl Default for WorkingArc {
    fn default() -> Self {
        Self::FIXED
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
    fn fixed_arc_is_a_full_turn() {
        let arc = WorkingArc::FIXED;
        assert!(approx_eq(arc.span(), TAU));
        assert!(approx_eq(arc.midpoint(), arc.end()));
    }

    #[test]
    fn angles_inside_arc_are_only_rebaselined() {
        let arc = WorkingArc::FIXED;
        for raw in [-FRAC_PI_2, -1.0, 0.0, 0.5, 2.0, PI] {
            assert!(
                approx_eq(arc.bound(raw), raw - arc.start()),
                "raw {raw} bounded to {}",
                arc.bound(raw)
            );
        }
    }

    #[test]
    fn top_of_dial_bounds_to_zero() {
        assert!(approx_eq(WorkingArc::FIXED.bound(-FRAC_PI_2), 0.0));
    }

    #[test]
    fn upper_left_quadrant_is_folded_up() {
        let arc = WorkingArc::FIXED;
        // Pointing up-left in screen space: atan2 gives -3pi/4.
        let bounded = arc.bound(-3.0 * PI / 4.0);
        assert!(approx_eq(bounded, 7.0 * PI / 4.0));
    }

    #[test]
    fn bounded_angles_stay_within_span() {
        let arc = WorkingArc::FIXED;
        let mut raw = -PI + 1e-9;
        while raw <= PI {
            let bounded = arc.bound(raw);
            assert!((0.0..=arc.span()).contains(&bounded), "raw {raw} -> {bounded}");
            raw += 0.01;
        }
    }

    #[test]
    fn just_left_of_top_bounds_to_the_full_span() {
        let arc = WorkingArc::FIXED;
        // One ulp counter-clockwise of straight up folds onto `end`.
        let below_top = f64::from_bits((-FRAC_PI_2).to_bits() + 1);
        assert!(below_top < -FRAC_PI_2);
        let bounded = arc.bound(below_top);
        assert!(bounded <= arc.span());
        assert!(approx_eq(bounded, TAU), "{bounded}");
    }

    #[test]
    fn crossing_the_atan2_seam_is_continuous() {
        let arc = WorkingArc::FIXED;
        let a = arc.bound(179f64.to_radians());
        let b = arc.bound(-179f64.to_radians());
        assert!((b - a).abs() < 3f64.to_radians(), "{a} vs {b}");
    }
}
