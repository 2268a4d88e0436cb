//! Spawn context for particle initialization.
//!
//! Wraps the generator's RNG with the draws needed to build a burst, so the
//! generator itself never touches raw random numbers.

use crate::emitter::{ColorMode, Emission, PALETTE, WHITE};
use crate::particle::ParticleDesc;
use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use std::ops::{Range, RangeInclusive};

/// Random source and helpers for building spawned particles.
///
/// Seed it with [`SpawnContext::seeded`] for reproducible runs (tests,
/// benchmarks); [`SpawnContext::new`] seeds from OS entropy.
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a deterministic context.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // ========== Random primitives ==========

    /// Random f64 in a half-open range. An empty or unbounded range yields
    /// its start.
    pub fn random_range(&mut self, range: Range<f64>) -> f64 {
        if range.start < range.end && (range.end - range.start).is_finite() {
            self.rng.gen_range(range)
        } else {
            range.start
        }
    }

    /// Random f64 in a closed range. An empty or unbounded range yields its
    /// start.
    pub fn random_range_inclusive(&mut self, range: RangeInclusive<f64>) -> f64 {
        if range.start() <= range.end() && (range.end() - range.start()).is_finite() {
            self.rng.gen_range(range)
        } else {
            *range.start()
        }
    }

    /// Random burst size from an inclusive range. An empty range yields its start.
    pub fn burst_size(&mut self, range: &RangeInclusive<usize>) -> usize {
        if range.start() <= range.end() {
            self.rng.gen_range(range.clone())
        } else {
            *range.start()
        }
    }

    // ========== Direction helpers ==========

    /// Random angle in `[0, 2π)`.
    #[inline]
    pub fn random_angle(&mut self) -> f64 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Random unit vector, uniform over the circle.
    pub fn random_direction(&mut self) -> DVec2 {
        DVec2::from_angle(self.random_angle())
    }

    // ========== Colour helpers ==========

    /// Colour for a new particle under `mode`.
    pub fn color(&mut self, mode: ColorMode) -> [u8; 3] {
        match mode {
            ColorMode::White => WHITE,
            ColorMode::Palette => PALETTE[self.rng.gen_range(0..PALETTE.len())],
        }
    }

    // ========== Particle construction ==========

    /// Draw one particle description at `origin` from `emission`.
    pub fn particle_desc(
        &mut self,
        emission: &Emission,
        origin: DVec2,
        speed_base: f64,
        color_mode: ColorMode,
    ) -> ParticleDesc {
        let direction = self.random_direction();
        let speed = self.random_range_inclusive(emission.speed_range(speed_base));

        ParticleDesc {
            position: origin,
            velocity: direction * speed,
            acceleration: emission.acceleration,
            rotation: 0.0,
            size: self.random_range(emission.size.clone()),
            color: self.color(color_mode),
            alpha: 255.0,
            lifespan: self.random_range(emission.lifespan.clone()),
            magnetic_strength: emission.magnetic_strength,
        }
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}
