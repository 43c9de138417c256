use std::time::Duration;

use thiserror::Error;

use crate::dial::ValueRange;

/// Default tap animation length.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(500);
/// Default drag sensitivity (half speed).
pub const DEFAULT_DAMPING: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SettingsError {
    #[error("value range bounds must be finite (got {lower}..{upper})")]
    NonFiniteValue { lower: f64, upper: f64 },
    #[error("damping must be in (0, 1], got {0}")]
    DampingOutOfRange(f64),
    #[error("animation duration must be non-zero")]
    ZeroDuration,
}

/// Caller-tunable dial parameters.
///
/// Meant to be changed between gestures; changing them mid-stroke takes
/// effect on the next sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialSettings {
    pub range: ValueRange,
    /// Multiplier on drag steps, `1.0` tracks the finger exactly.
    pub damping: f64,
    pub animation_duration: Duration,
}

impl Default for DialSettings {
    fn default() -> Self {
        Self {
            range: ValueRange::default(),
            damping: DEFAULT_DAMPING,
            animation_duration: DEFAULT_ANIMATION_DURATION,
        }
    }
}

impl DialSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range(self.range)?;
        check_damping(self.damping)?;
        check_duration(self.animation_duration)
    }
}

pub(super) fn check_range(range: ValueRange) -> Result<(), SettingsError> {
    if range.lower.is_finite() && range.upper.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::NonFiniteValue {
            lower: range.lower,
            upper: range.upper,
        })
    }
}

pub(super) fn check_damping(damping: f64) -> Result<(), SettingsError> {
    if damping.is_finite() && damping > 0.0 && damping <= 1.0 {
        Ok(())
    } else {
        Err(SettingsError::DampingOutOfRange(damping))
    }
}

pub(super) fn check_duration(duration: Duration) -> Result<(), SettingsError> {
    if duration.is_zero() {
        Err(SettingsError::ZeroDuration)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(DialSettings::default().validate(), Ok(()));
    }

    #[test]
    fn damping_bounds() {
        assert!(check_damping(1.0).is_ok());
        assert!(check_damping(0.01).is_ok());
        assert_eq!(check_damping(0.0), Err(SettingsError::DampingOutOfRange(0.0)));
        assert!(check_damping(1.5).is_err());
        assert!(check_damping(f64::NAN).is_err());
    }

    #[test]
    fn inverted_and_degenerate_ranges_are_accepted() {
        assert!(check_range(ValueRange::new(12.0, 0.0)).is_ok());
        assert!(check_range(ValueRange::new(5.0, 5.0)).is_ok());
        assert!(check_range(ValueRange::new(0.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let settings = DialSettings {
            animation_duration: Duration::ZERO,
            ..DialSettings::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroDuration));
    }
}
