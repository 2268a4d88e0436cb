//! User-adjustable simulation settings.
//!
//! These are the values a control panel exposes as sliders and toggles.
//! They can be saved to and loaded from JSON.

use crate::error::ConfigResult;
use crate::visuals::VisualConfig;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

pub const MAX_PARTICLES_RANGE: RangeInclusive<usize> = 10..=1000;
pub const GENERATOR_RADIUS_RANGE: RangeInclusive<f64> = 10.0..=350.0;
pub const SPAWN_INTERVAL_RANGE: RangeInclusive<f64> = 0.0..=5.0;
pub const SPAWN_INTERVAL_STEP: f64 = 0.5;
pub const SPEED_BASE_RANGE: RangeInclusive<f64> = 50.0..=500.0;
pub const BLOOM_INTENSITY_RANGE: RangeInclusive<f64> = 1.0..=3.0;

/// Complete set of simulation parameters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Upper bound on live particles; bursts that would exceed it are skipped.
    pub max_particles: usize,
    pub generator_radius: f64,
    /// Seconds between bursts.
    pub spawn_interval: f64,
    /// Fastest initial particle speed; the slowest is half of it.
    pub speed_base: f64,
    pub bloom_intensity: f64,
    pub rgb_mode: bool,
    pub bloom: bool,
    pub trails: bool,
    /// Fixed for a session; only read when a simulation is created.
    pub generator_position: DVec2,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_particles: 315,
            generator_radius: 110.0,
            spawn_interval: 1.5,
            speed_base: 185.0,
            bloom_intensity: 1.0,
            rgb_mode: false,
            bloom: false,
            trails: true,
            // Centre of a 1280x720 screen, shifted right past the control panel
            generator_position: DVec2::new(740.0, 360.0),
        }
    }
}

impl Settings {
    /// Save the settings to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Copy with every value clamped to its slider range and the spawn
    /// interval snapped to its step.
    pub fn sanitized(&self) -> Self {
        let interval = clamp_f64(self.spawn_interval, &SPAWN_INTERVAL_RANGE, 1.5);
        let interval = (interval / SPAWN_INTERVAL_STEP).round() * SPAWN_INTERVAL_STEP;

        let position = if self.generator_position.is_finite() {
            self.generator_position
        } else {
            Settings::default().generator_position
        };

        Self {
            max_particles: self
                .max_particles
                .clamp(*MAX_PARTICLES_RANGE.start(), *MAX_PARTICLES_RANGE.end()),
            generator_radius: clamp_f64(self.generator_radius, &GENERATOR_RADIUS_RANGE, 110.0),
            spawn_interval: interval,
            speed_base: clamp_f64(self.speed_base, &SPEED_BASE_RANGE, 185.0),
            bloom_intensity: clamp_f64(self.bloom_intensity, &BLOOM_INTENSITY_RANGE, 1.0),
            generator_position: position,
            ..self.clone()
        }
    }

    /// Visual toggles carried by the generator.
    pub fn visuals(&self) -> VisualConfig {
        VisualConfig {
            rgb_mode: self.rgb_mode,
            bloom: self.bloom,
            bloom_intensity: self.bloom_intensity,
            trails: self.trails,
        }
    }
}

/// Clamp into `range`, replacing NaN with `fallback`.
fn clamp_f64(value: f64, range: &RangeInclusive<f64>, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let settings = Settings::default();
        assert_eq!(settings.sanitized(), settings);
    }

    #[test]
    fn test_sanitized_clamps() {
        let settings = Settings {
            max_particles: 5_000,
            generator_radius: 1.0,
            spawn_interval: 9.0,
            speed_base: f64::NAN,
            bloom_intensity: 0.2,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(settings.max_particles, 1000);
        assert_eq!(settings.generator_radius, 10.0);
        assert_eq!(settings.spawn_interval, 5.0);
        assert_eq!(settings.speed_base, 185.0);
        assert_eq!(settings.bloom_intensity, 1.0);
    }

    #[test]
    fn test_spawn_interval_snaps_to_step() {
        let snap = |v: f64| {
            Settings {
                spawn_interval: v,
                ..Default::default()
            }
            .sanitized()
            .spawn_interval
        };
        assert_eq!(snap(1.2), 1.0);
        assert_eq!(snap(1.3), 1.5);
        assert_eq!(snap(0.1), 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "max_particles": 500, "rgb_mode": true }"#).unwrap();
        assert_eq!(settings.max_particles, 500);
        assert!(settings.rgb_mode);
        assert_eq!(settings.generator_radius, 110.0);
        assert!(settings.trails);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("sparkring-settings-{}.json", std::process::id()));
        let settings = Settings {
            max_particles: 640,
            bloom: true,
            generator_position: DVec2::new(10.0, 20.0),
            ..Default::default()
        };

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_visuals_mirror_toggles() {
        let settings = Settings {
            rgb_mode: true,
            bloom: true,
            bloom_intensity: 2.5,
            trails: false,
            ..Default::default()
        };
        let visuals = settings.visuals();
        assert!(visuals.rgb_mode && visuals.bloom && !visuals.trails);
        assert_eq!(visuals.bloom_intensity, 2.5);
    }
}
