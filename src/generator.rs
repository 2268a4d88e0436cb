//! The particle generator: when to spawn, how many, and where particles may live.
//!
//! A generator sits at a fixed position and owns a circular boundary. It
//! spawns bursts of 1–4 particles from its centre whenever its cooldown has
//! elapsed, and particles leaving the circle are culled.
//!
//! # Spawn timer
//!
//! The timer has two states, derived from the clock rather than stored:
//!
//! | State | Condition |
//! |-------|-----------|
//! | [`SpawnState::ReadyToSpawn`] | `now - last_spawn_time >= spawn_interval` |
//! | [`SpawnState::CoolingDown`] | otherwise |
//!
//! # Capacity
//!
//! Bursts are atomic. If a burst would push the live count past the limit it
//! is dropped whole, and the timer is left alone so the next tick retries.

use crate::collection::ParticleCollection;
use crate::emitter::{ColorMode, Emission};
use crate::error::ParticleError;
use crate::particle::Particle;
use crate::spawn::SpawnContext;
use crate::visuals::{GeneratorView, VisualConfig};
use glam::DVec2;

/// Whether the generator may spawn at a given time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnState {
    /// The cooldown has elapsed.
    ReadyToSpawn,
    /// Waiting; `remaining` seconds until ready.
    CoolingDown { remaining: f64 },
}

/// Result of a spawn attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum BurstOutcome {
    /// This many particles were added.
    Spawned(usize),
    /// The burst would have exceeded the particle limit; nothing was added.
    Rejected {
        /// Burst size that was drawn.
        requested: usize,
        /// Live count at the time of the attempt.
        live: usize,
        /// Limit in force.
        max_particles: usize,
    },
    /// The emission settings produced an invalid particle; nothing was added.
    Invalid(ParticleError),
}

impl BurstOutcome {
    /// Number of particles actually added.
    pub fn spawned(&self) -> usize {
        match self {
            BurstOutcome::Spawned(n) => *n,
            _ => 0,
        }
    }
}

/// Spawns particles and defines the circle they live in.
#[derive(Debug, Clone)]
pub struct Generator {
    position: DVec2,
    radius: f64,
    spawn_interval: f64,
    last_spawn_time: f64,
    current_particle_count: usize,
    visuals: VisualConfig,
    emission: Emission,
    spawn: SpawnContext,
}

impl Generator {
    /// Create a generator at `position`. The clock starts at zero, so the
    /// first burst happens once `now >= spawn_interval`.
    pub fn new(position: DVec2, radius: f64, spawn_interval: f64) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
            spawn_interval: spawn_interval.max(0.0),
            last_spawn_time: 0.0,
            current_particle_count: 0,
            visuals: VisualConfig::default(),
            emission: Emission::default(),
            spawn: SpawnContext::new(),
        }
    }

    /// Use a deterministic random sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.spawn = SpawnContext::seeded(seed);
        self
    }

    /// Replace the per-particle random ranges.
    pub fn with_emission(mut self, emission: Emission) -> Self {
        self.emission = emission;
        self
    }

    // =========================================================================
    // Spawn policy
    // =========================================================================

    /// Timer state at `now`.
    pub fn spawn_state(&self, now: f64) -> SpawnState {
        let waited = now - self.last_spawn_time;
        if waited >= self.spawn_interval {
            SpawnState::ReadyToSpawn
        } else {
            SpawnState::CoolingDown {
                remaining: self.spawn_interval - waited,
            }
        }
    }

    /// Whether a burst may be spawned at `now`.
    pub fn can_spawn(&self, now: f64) -> bool {
        self.spawn_state(now) == SpawnState::ReadyToSpawn
    }

    /// Spawn a burst of random size from the emission's burst range.
    pub fn spawn_burst(
        &mut self,
        collection: &mut ParticleCollection,
        max_particles: usize,
        speed_base: f64,
        now: f64,
    ) -> BurstOutcome {
        let burst_size = self.spawn.burst_size(&self.emission.burst_size);
        self.spawn_burst_sized(collection, burst_size, max_particles, speed_base, now)
    }

    /// Spawn exactly `burst_size` particles at the generator's centre, or
    /// none at all if that would exceed `max_particles`.
    ///
    /// On success the live count grows by `burst_size` and the cooldown
    /// restarts at `now`.
    pub fn spawn_burst_sized(
        &mut self,
        collection: &mut ParticleCollection,
        burst_size: usize,
        max_particles: usize,
        speed_base: f64,
        now: f64,
    ) -> BurstOutcome {
        if self.current_particle_count.saturating_add(burst_size) > max_particles {
            tracing::debug!(
                requested = burst_size,
                live = self.current_particle_count,
                max_particles,
                "burst rejected"
            );
            return BurstOutcome::Rejected {
                requested: burst_size,
                live: self.current_particle_count,
                max_particles,
            };
        }

        let color_mode = ColorMode::from_rgb_flag(self.visuals.rgb_mode);
        let burst: Result<Vec<Particle>, ParticleError> = (0..burst_size)
            .map(|_| {
                let desc =
                    self.spawn
                        .particle_desc(&self.emission, self.position, speed_base, color_mode);
                Particle::new(desc)
            })
            .collect();

        let burst = match burst {
            Ok(burst) => burst,
            Err(e) => {
                tracing::warn!(error = %e, "emission produced an invalid particle");
                return BurstOutcome::Invalid(e);
            }
        };

        collection.extend(burst);
        self.current_particle_count += burst_size;
        self.last_spawn_time = now;
        tracing::debug!(spawned = burst_size, live = self.current_particle_count, "burst spawned");

        BurstOutcome::Spawned(burst_size)
    }

    /// Reset the live count to the number of particles inside the radius.
    pub fn recompute_live_count(&mut self, collection: &ParticleCollection) {
        self.current_particle_count = collection.count_within(self.position, self.radius);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Negative values are treated as zero.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius.max(0.0);
    }

    #[inline]
    pub fn spawn_interval(&self) -> f64 {
        self.spawn_interval
    }

    /// Negative values are treated as zero.
    pub fn set_spawn_interval(&mut self, interval: f64) {
        self.spawn_interval = interval.max(0.0);
    }

    #[inline]
    pub fn last_spawn_time(&self) -> f64 {
        self.last_spawn_time
    }

    /// Live particles inside the radius as of the last recompute, plus any
    /// spawned since.
    #[inline]
    pub fn current_particle_count(&self) -> usize {
        self.current_particle_count
    }

    #[inline]
    pub fn visuals(&self) -> &VisualConfig {
        &self.visuals
    }

    pub fn set_visuals(&mut self, visuals: VisualConfig) {
        self.visuals = visuals;
    }

    #[inline]
    pub fn emission(&self) -> &Emission {
        &self.emission
    }

    /// Read-only state for renderers and HUDs.
    pub fn view(&self) -> GeneratorView {
        GeneratorView {
            position: self.position,
            radius: self.radius,
            spawn_interval: self.spawn_interval,
            live_count: self.current_particle_count,
            visuals: self.visuals,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_current_particle_count(&mut self, count: usize) {
        self.current_particle_count = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{PALETTE, WHITE};
    use crate::particle::ParticleDesc;

    fn test_generator() -> Generator {
        Generator::new(DVec2::new(100.0, 100.0), 50.0, 1.5).with_seed(11)
    }

    #[test]
    fn test_spawn_state_transitions() {
        let generator = test_generator();

        assert!(!generator.can_spawn(1.0));
        match generator.spawn_state(1.0) {
            SpawnState::CoolingDown { remaining } => assert!((remaining - 0.5).abs() < 1e-12),
            other => panic!("expected cooldown, got {other:?}"),
        }

        assert!(generator.can_spawn(1.5));
        assert_eq!(generator.spawn_state(2.0), SpawnState::ReadyToSpawn);
    }

    #[test]
    fn test_zero_interval_always_ready() {
        let generator = Generator::new(DVec2::ZERO, 10.0, 0.0);
        assert!(generator.can_spawn(0.0));
    }

    #[test]
    fn test_spawn_burst_updates_state() {
        let mut generator = test_generator();
        let mut collection = ParticleCollection::new();

        let outcome = generator.spawn_burst_sized(&mut collection, 3, 100, 185.0, 2.0);

        assert_eq!(outcome, BurstOutcome::Spawned(3));
        assert_eq!(collection.len(), 3);
        assert_eq!(generator.current_particle_count(), 3);
        assert_eq!(generator.last_spawn_time(), 2.0);
        assert!(!generator.can_spawn(3.0));
        assert!(collection.iter().all(|p| p.position() == generator.position()));
    }

    #[test]
    fn test_over_capacity_burst_is_rejected_whole() {
        let mut generator = test_generator();
        let mut collection = ParticleCollection::new();
        generator.set_current_particle_count(998);

        let outcome = generator.spawn_burst_sized(&mut collection, 4, 1000, 185.0, 5.0);

        assert_eq!(
            outcome,
            BurstOutcome::Rejected {
                requested: 4,
                live: 998,
                max_particles: 1000
            }
        );
        assert!(collection.is_empty());
        assert_eq!(generator.current_particle_count(), 998);
        // Timer untouched, so the next tick may retry
        assert_eq!(generator.last_spawn_time(), 0.0);
    }

    #[test]
    fn test_burst_filling_capacity_exactly_is_allowed() {
        let mut generator = test_generator();
        let mut collection = ParticleCollection::new();
        generator.set_current_particle_count(998);

        let outcome = generator.spawn_burst_sized(&mut collection, 2, 1000, 185.0, 5.0);

        assert_eq!(outcome.spawned(), 2);
        assert_eq!(generator.current_particle_count(), 1000);
    }

    #[test]
    fn test_huge_burst_is_rejected_without_overflow() {
        let mut generator = test_generator();
        let mut collection = ParticleCollection::new();
        generator.set_current_particle_count(1);

        let outcome = generator.spawn_burst_sized(&mut collection, usize::MAX, usize::MAX, 185.0, 5.0);

        assert!(matches!(outcome, BurstOutcome::Rejected { live: 1, .. }));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_non_finite_speed_spawns_at_rest() {
        let mut generator = test_generator();
        let mut collection = ParticleCollection::new();

        for speed in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let outcome = generator.spawn_burst_sized(&mut collection, 2, 100, speed, 5.0);
            assert_eq!(outcome, BurstOutcome::Spawned(2));
        }
        assert_eq!(collection.len(), 6);
        assert!(collection.iter().all(|p| p.velocity() == DVec2::ZERO));
    }

    #[test]
    fn test_random_burst_sizes() {
        let mut generator = Generator::new(DVec2::ZERO, 1000.0, 0.0).with_seed(5);
        let mut collection = ParticleCollection::new();

        for i in 0..10_000 {
            let outcome = generator.spawn_burst(&mut collection, usize::MAX, 100.0, i as f64);
            assert!((1..=4).contains(&outcome.spawned()));
            collection.clear();
            generator.recompute_live_count(&collection);
        }
    }

    #[test]
    fn test_rgb_mode_picks_palette() {
        let mut generator = test_generator();
        let mut collection = ParticleCollection::new();

        generator.spawn_burst_sized(&mut collection, 4, 100, 100.0, 2.0);
        assert!(collection.iter().all(|p| p.color() == WHITE));

        generator.set_visuals(VisualConfig {
            rgb_mode: true,
            ..Default::default()
        });
        collection.clear();
        generator.spawn_burst_sized(&mut collection, 4, 100, 100.0, 4.0);
        assert!(collection.iter().all(|p| PALETTE.contains(&p.color())));
    }

    #[test]
    fn test_invalid_emission_adds_nothing() {
        let mut generator = test_generator().with_emission(Emission {
            lifespan: 0.0..0.0,
            ..Default::default()
        });
        let mut collection = ParticleCollection::new();

        let outcome = generator.spawn_burst_sized(&mut collection, 2, 100, 100.0, 2.0);

        assert_eq!(outcome, BurstOutcome::Invalid(ParticleError::NonPositiveLifespan(0.0)));
        assert!(collection.is_empty());
        assert_eq!(generator.current_particle_count(), 0);
    }

    #[test]
    fn test_recompute_live_count_counts_inside_radius() {
        let mut generator = test_generator();
        let mut collection = ParticleCollection::new();
        for x in [100.0, 120.0, 149.0, 151.0, 300.0] {
            collection.push(
                Particle::new(ParticleDesc {
                    position: DVec2::new(x, 100.0),
                    ..Default::default()
                })
                .unwrap(),
            );
        }
        generator.set_current_particle_count(42);

        generator.recompute_live_count(&collection);

        assert_eq!(generator.current_particle_count(), 3);
    }

    #[test]
    fn test_setters_clamp_negative() {
        let mut generator = test_generator();
        generator.set_radius(-1.0);
        generator.set_spawn_interval(-3.0);
        assert_eq!(generator.radius(), 0.0);
        assert_eq!(generator.spawn_interval(), 0.0);
    }
}
