//! Raw angle of a contact point around the pivot.

use egui::{Pos2, Rect};

/// Angle of `contact` around the center of `bounds`, in `(-pi, pi]`.
///
/// Uses screen coordinates (y grows downward), so positive angles turn
/// clockwise on screen. Returns 0 when either the contact or the bounds is
/// missing.
pub fn sample_angle(contact: Option<Pos2>, bounds: Option<Rect>) -> f64 {
    let (Some(contact), Some(bounds)) = (contact, bounds) else {
        return 0.0;
    };
    let center = bounds.center();
    let dx = f64::from(contact.x - center.x);
    let dy = f64::from(contact.y - center.y);
    dy.atan2(dx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn square() -> Rect {
        Rect::from_min_size(pos2(10.0, 10.0), vec2(100.0, 100.0))
    }

    #[test]
    fn cardinal_directions() {
        let b = Some(square());
        assert_eq!(sample_angle(Some(pos2(110.0, 60.0)), b), 0.0);
        assert!((sample_angle(Some(pos2(60.0, 110.0)), b) - FRAC_PI_2).abs() < 1e-12);
        assert!((sample_angle(Some(pos2(60.0, 10.0)), b) + FRAC_PI_2).abs() < 1e-12);
        assert!((sample_angle(Some(pos2(10.0, 60.0)), b) - PI).abs() < 1e-12);
    }

    #[test]
    fn missing_inputs_degrade_to_zero() {
        assert_eq!(sample_angle(None, Some(square())), 0.0);
        assert_eq!(sample_angle(Some(pos2(0.0, 0.0)), None), 0.0);
    }
}
