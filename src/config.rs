use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use directories::{BaseDirs, ProjectDirs};
use egui::{Color32, Stroke};
use serde::Deserialize;
use tracing::{info, warn};

use crate::controller::{DEFAULT_ANIMATION_DURATION, DEFAULT_DAMPING, DialSettings};
use crate::dial::ValueRange;

const CONFIG_FILE_NAME: &str = "rotodial.toml";

fn alpha_to_u8(alpha: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: [u8; 3],
    pub alpha: f32,
    pub thickness: f32,
}

impl StrokeStyle {
    pub fn color32(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(
            self.color[0],
            self.color[1],
            self.color[2],
            alpha_to_u8(self.alpha),
        )
    }

    pub fn stroke(&self) -> Stroke {
        Stroke {
            width: self.thickness.max(0.1),
            color: self.color32(),
        }
    }
}

/// Stroke fields as written in the file; missing ones keep the base style.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct StrokeOverride {
    color: Option<[u8; 3]>,
    alpha: Option<f32>,
    thickness: Option<f32>,
}

impl StrokeOverride {
    fn apply_to(self, base: StrokeStyle) -> StrokeStyle {
        StrokeStyle {
            color: self.color.unwrap_or(base.color),
            alpha: self.alpha.unwrap_or(base.alpha),
            thickness: self.thickness.unwrap_or(base.thickness),
        }
    }
}

/// Dial behavior as written in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DialSection {
    pub lower_value: f64,
    pub upper_value: f64,
    pub damping: f64,
    pub animation_secs: f64,
}

impl Default for DialSection {
    fn default() -> Self {
        // Clock face: twelve at the top, decreasing clockwise.
        Self {
            lower_value: 12.0,
            upper_value: 0.0,
            damping: DEFAULT_DAMPING,
            animation_secs: DEFAULT_ANIMATION_DURATION.as_secs_f64(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "FaceOverride")]
pub struct FaceStyle {
    pub radius: f32,
    pub rim: StrokeStyle,
    pub ticks: StrokeStyle,
    pub pointer: StrokeStyle,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            radius: 140.0,
            rim: StrokeStyle {
                color: [120, 120, 120],
                alpha: 1.0,
                thickness: 3.0,
            },
            ticks: StrokeStyle {
                color: [180, 180, 180],
                alpha: 0.9,
                thickness: 2.0,
            },
            pointer: StrokeStyle {
                color: [220, 70, 70],
                alpha: 1.0,
                thickness: 4.0,
            },
        }
    }
}

impl FaceStyle {
    pub const fn radius(&self) -> f32 {
        self.radius.clamp(40.0, 600.0)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FaceOverride {
    radius: Option<f32>,
    rim: StrokeOverride,
    ticks: StrokeOverride,
    pointer: StrokeOverride,
}

impl From<FaceOverride> for FaceStyle {
    fn from(raw: FaceOverride) -> Self {
        let base = Self::default();
        Self {
            radius: raw.radius.unwrap_or(base.radius),
            rim: raw.rim.apply_to(base.rim),
            ticks: raw.ticks.apply_to(base.ticks),
            pointer: raw.pointer.apply_to(base.pointer),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dial: DialSection,
    pub face: FaceStyle,
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if !path.is_file() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(cfg) => {
                    info!("loaded config from {}", path.display());
                    return cfg;
                }
                Err(err) => warn!("{err:#}"),
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str::<Self>(contents)?)
    }

    /// Dial settings with out-of-range values pulled back into bounds.
    pub fn dial_settings(&self) -> DialSettings {
        let defaults = DialSection::default();
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        let damping = finite_or(self.dial.damping, DEFAULT_DAMPING).clamp(0.01, 1.0);
        let secs = finite_or(self.dial.animation_secs, defaults.animation_secs).clamp(0.05, 10.0);
        DialSettings {
            range: ValueRange::new(
                finite_or(self.dial.lower_value, defaults.lower_value),
                finite_or(self.dial.upper_value, defaults.upper_value),
            ),
            damping,
            animation_duration: Duration::from_secs_f64(secs),
        }
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Rotodial", "Rotodial") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(base_dirs.config_dir().join("rotodial").join(CONFIG_FILE_NAME));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_clock_defaults() {
        let cfg = AppConfig::from_toml_str("").expect("empty toml");
        let settings = cfg.dial_settings();
        assert_eq!(settings.range, ValueRange::new(12.0, 0.0));
        assert_eq!(settings.damping, DEFAULT_DAMPING);
        assert_eq!(settings.animation_duration, DEFAULT_ANIMATION_DURATION);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml_str(
            "[dial]\nupper_value = 100.0\n\n[face.pointer]\ncolor = [1, 2, 3]\n",
        )
        .expect("valid toml");
        assert_eq!(cfg.dial.upper_value, 100.0);
        assert_eq!(cfg.dial.lower_value, 12.0);
        assert_eq!(cfg.face.pointer.color, [1, 2, 3]);
        assert_eq!(cfg.face.pointer.thickness, 4.0);
    }

    #[test]
    fn stroke_override_keeps_its_own_defaults() {
        let cfg = AppConfig::from_toml_str("[face.pointer]\nalpha = 0.5\n\n[face.rim]\nthickness = 6.0\n")
            .expect("valid toml");
        let defaults = FaceStyle::default();
        assert_eq!(cfg.face.pointer.color, defaults.pointer.color);
        assert_eq!(cfg.face.pointer.thickness, defaults.pointer.thickness);
        assert_eq!(cfg.face.pointer.alpha, 0.5);
        assert_eq!(cfg.face.rim.color, defaults.rim.color);
        assert_eq!(cfg.face.rim.thickness, 6.0);
        assert_eq!(cfg.face.ticks, defaults.ticks);
        assert_eq!(cfg.face.radius, defaults.radius);
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let cfg = AppConfig::from_toml_str("[dial]\ndamping = 4.0\nanimation_secs = 0.0\n")
            .expect("valid toml");
        let settings = cfg.dial_settings();
        assert_eq!(settings.damping, 1.0);
        assert!((settings.animation_duration.as_secs_f64() - 0.05).abs() < 1e-6);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = std::env::temp_dir().join(format!("rotodial_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, "[dial\n").expect("write config");

        let err = AppConfig::load_from(&path).expect_err("malformed toml");
        assert!(format!("{err:#}").contains("Failed to parse config"));

        let _ = fs::remove_dir_all(&dir);
    }
}
