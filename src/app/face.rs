//! Clock-face rotation target: holds the displayed angle, runs tap animations
//! and paints itself.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::{Duration, Instant};

use egui::{Align2, FontId, Painter, Pos2, Rect, Vec2, vec2};
use rotodial::config::FaceStyle;
use rotodial::dial::shortest_delta;
use rotodial::{Easing, Motion, RotationTarget, TransitionCompletion};

use crate::util::{f64_to_f32, usize_to_f64};

const HOURS: usize = 12;

struct Animation {
    from: f64,
    delta: f64,
    started: Instant,
    duration: Duration,
    easing: Easing,
    completion: Option<TransitionCompletion>,
}

impl Animation {
    fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn angle_at(&self, now: Instant) -> f64 {
        self.easing
            .apply(self.progress(now))
            .mul_add(self.delta, self.from)
    }
}

pub struct DialFace {
    frame: Rect,
    angle: f64,
    animation: Option<Animation>,
}

impl DialFace {
    /// Face of the given radius, laid out at the local origin.
    pub fn new(radius: f32) -> Self {
        Self {
            frame: Rect::from_min_size(Pos2::ZERO, Vec2::splat(radius * 2.0)),
            angle: 0.0,
            animation: None,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.frame.size()
    }

    pub const fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advance a running animation; finishing it releases the dial's tap lock.
    pub fn tick(&mut self, now: Instant) {
        let Some(animation) = self.animation.as_ref() else {
            return;
        };
        self.angle = animation.angle_at(now);
        if animation.progress(now) >= 1.0 {
            self.angle = (animation.from + animation.delta).rem_euclid(TAU);
            if let Some(completion) = self.animation.take().and_then(|a| a.completion) {
                completion.complete();
            }
        }
    }

    pub const fn displayed_angle(&self) -> f64 {
        self.angle
    }

    pub fn paint(&self, painter: &Painter, rect: Rect, style: &FaceStyle, text_color: egui::Color32) {
        let center = rect.center();
        let radius = rect.width().min(rect.height()) / 2.0;
        painter.circle_stroke(center, radius - style.rim.thickness, style.rim.stroke());

        let tick_stroke = style.ticks.stroke();
        for hour in 0..HOURS {
            let angle = self.face_angle(usize_to_f64(hour) * TAU / usize_to_f64(HOURS));
            let dir = vec2(f64_to_f32(angle.cos()), f64_to_f32(angle.sin()));
            painter.line_segment(
                [center + dir * radius * 0.82, center + dir * radius * 0.92],
                tick_stroke,
            );
            let label = if hour == 0 { HOURS } else { hour };
            painter.text(
                center + dir * radius * 0.68,
                Align2::CENTER_CENTER,
                label.to_string(),
                FontId::proportional(radius * 0.14),
                text_color,
            );
        }

        let pointer = self.face_angle(0.0);
        let dir = vec2(f64_to_f32(pointer.cos()), f64_to_f32(pointer.sin()));
        painter.line_segment([center, center + dir * radius * 0.55], style.pointer.stroke());
        painter.circle_filled(center, style.pointer.thickness * 1.5, style.pointer.color32());
    }

    /// Screen angle of a face mark `offset` clockwise from twelve o'clock.
    fn face_angle(&self, offset: f64) -> f64 {
        offset - FRAC_PI_2 + self.angle
    }
}

impl RotationTarget for DialFace {
    fn frame(&self) -> Option<Rect> {
        Some(self.frame)
    }

    fn request_transition(
        &mut self,
        angle: f64,
        motion: Motion,
        completion: Option<TransitionCompletion>,
    ) {
        match motion {
            Motion::Instant => {
                // Dragging overrides a tap animation; its completion is released.
                self.animation = None;
                self.angle = angle;
            }
            Motion::Animated { duration, easing } => {
                self.animation = Some(Animation {
                    from: self.angle,
                    delta: shortest_delta(self.angle, angle),
                    started: Instant::now(),
                    duration,
                    easing,
                    completion,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_transition_jumps() {
        let mut face = DialFace::new(50.0);
        face.request_transition(1.25, Motion::Instant, None);
        assert_eq!(face.displayed_angle(), 1.25);
        assert!(!face.is_animating());
    }

    #[test]
    fn animation_takes_the_short_way_and_settles() {
        let mut face = DialFace::new(50.0);
        face.request_transition(0.1, Motion::Instant, None);
        face.request_transition(
            TAU - 0.1,
            Motion::Animated {
                duration: Duration::from_millis(200),
                easing: Easing::Linear,
            },
            None,
        );
        let start = Instant::now();

        face.tick(start + Duration::from_millis(100));
        assert!(face.is_animating());
        assert!(face.displayed_angle().abs() < 0.05 || face.displayed_angle() > TAU - 0.05);

        face.tick(start + Duration::from_secs(1));
        assert!(!face.is_animating());
        assert!((face.displayed_angle() - (TAU - 0.1)).abs() < 1e-9);
    }
}
