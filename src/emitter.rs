//! Per-spawn randomization for generator bursts.
//!
//! Every particle in a burst is built from an [`Emission`], which bounds the
//! random draws:
//!
//! | Parameter | Default | Notes |
//! |-----------|---------|-------|
//! | burst size | 1..=4 | particles per spawn event |
//! | speed | `0.5 * speed_base ..= speed_base` | scaled by the UI speed |
//! | direction | uniform over `[0, 2π)` | |
//! | size | 2..4 | |
//! | lifespan | 2..4 s | |
//! | acceleration | `(0, 98.1)` | ambient gravity |
//!
//! Colour comes from [`ColorMode`]: plain white, or a uniform pick from
//! [`PALETTE`].

use crate::particle::{DEFAULT_MAGNETIC_STRENGTH, GRAVITY};
use glam::DVec2;
use std::ops::{Range, RangeInclusive};

/// Colours available in RGB mode: two shades each of blue, green, yellow,
/// pink, purple, red and orange.
pub const PALETTE: [[u8; 3]; 14] = [
    [66, 135, 245],
    [0, 191, 255],
    [50, 205, 50],
    [0, 255, 128],
    [255, 255, 0],
    [255, 215, 0],
    [255, 105, 180],
    [255, 20, 147],
    [138, 43, 226],
    [186, 85, 211],
    [255, 0, 0],
    [220, 20, 60],
    [255, 140, 0],
    [255, 69, 0],
];

/// Colour used when RGB mode is off.
pub const WHITE: [u8; 3] = [255, 255, 255];

/// How spawned particles are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Every particle is white.
    #[default]
    White,
    /// Each particle gets a random [`PALETTE`] entry.
    Palette,
}

impl ColorMode {
    /// `Palette` when `rgb` is set, `White` otherwise.
    pub fn from_rgb_flag(rgb: bool) -> Self {
        if rgb {
            ColorMode::Palette
        } else {
            ColorMode::White
        }
    }
}

/// Random ranges used to build each particle of a burst.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    /// Particles per burst.
    pub burst_size: RangeInclusive<usize>,
    /// Fraction of `speed_base` for the slowest particle; the fastest gets
    /// the full `speed_base`.
    pub min_speed_factor: f64,
    pub size: Range<f64>,
    /// Seconds.
    pub lifespan: Range<f64>,
    pub acceleration: DVec2,
    pub magnetic_strength: f64,
}

impl Default for Emission {
    fn default() -> Self {
        Self {
            burst_size: 1..=4,
            min_speed_factor: 0.5,
            size: 2.0..4.0,
            lifespan: 2.0..4.0,
            acceleration: GRAVITY,
            magnetic_strength: DEFAULT_MAGNETIC_STRENGTH,
        }
    }
}

impl Emission {
    /// Speed range for a given UI speed. Negative or non-finite speeds
    /// become zero.
    pub fn speed_range(&self, speed_base: f64) -> RangeInclusive<f64> {
        let speed_base = if speed_base.is_finite() {
            speed_base.max(0.0)
        } else {
            0.0
        };
        (speed_base * self.min_speed_factor)..=speed_base
    }
}
