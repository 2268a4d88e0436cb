//! Per-frame orchestration of the generator and its particles.
//!
//! Each [`Simulation::tick`] runs these passes in order:
//!
//! 1. compute `dt` from the previous tick (clamped to `[0, max_delta]`)
//! 2. advance every particle, dropping the ones that died of age
//! 3. cull particles that left the generator's circle
//! 4. recount live particles inside the circle
//! 5. spawn a burst if the generator's cooldown has elapsed
//!
//! Recounting before spawning means the capacity check always sees the
//! population that actually survived this frame.

use crate::collection::ParticleCollection;
use crate::config::Settings;
use crate::emitter::Emission;
use crate::generator::{BurstOutcome, Generator};
use crate::input::PointerState;
use crate::particle::Particle;
use crate::visuals::{self, GeneratorView, ParticleInstance};

/// Default upper bound on a single tick's `dt`, in seconds.
pub const DEFAULT_MAX_DELTA: f64 = 1.0 / 30.0;

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Seconds actually integrated.
    pub dt: f64,
    /// Particles removed because they outlived their lifespan.
    pub aged_out: usize,
    /// Particles removed for leaving the generator's circle.
    pub culled: usize,
    /// Spawn attempt, if the generator was ready.
    pub burst: Option<BurstOutcome>,
    /// Live particles after the tick.
    pub live: usize,
}

impl TickReport {
    pub fn spawned(&self) -> usize {
        self.burst.as_ref().map_or(0, BurstOutcome::spawned)
    }
}

/// A generator, its particles and the settings driving them.
///
/// # Example
///
/// ```ignore
/// let mut sim = Simulation::new(Settings::default()).with_seed(7);
/// let mut time = Time::new();
///
/// loop {
///     time.update();
///     sim.tick(time.elapsed(), &input.pointer());
///     draw(sim.particles(), sim.generator_view());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    settings: Settings,
    generator: Generator,
    particles: ParticleCollection,
    last_tick_time: f64,
    max_delta: Option<f64>,
}

impl Simulation {
    /// Create a simulation from (sanitized) settings. The clock starts at zero.
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let mut generator = Generator::new(
            settings.generator_position,
            settings.generator_radius,
            settings.spawn_interval,
        );
        generator.set_visuals(settings.visuals());

        Self {
            settings,
            generator,
            particles: ParticleCollection::new(),
            last_tick_time: 0.0,
            max_delta: Some(DEFAULT_MAX_DELTA),
        }
    }

    /// Use a deterministic random sequence for spawning.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.generator = self.generator.with_seed(seed);
        self
    }

    /// Cap each tick's `dt`. `None` integrates whatever time has passed.
    pub fn with_max_delta(mut self, max_delta: Option<f64>) -> Self {
        self.max_delta = max_delta.map(|d| d.max(0.0));
        self
    }

    /// Replace the per-particle random ranges.
    pub fn with_emission(mut self, emission: Emission) -> Self {
        self.generator = self.generator.with_emission(emission);
        self
    }

    /// Run one frame at time `now` (seconds on the caller's clock).
    pub fn tick(&mut self, now: f64, pointer: &PointerState) -> TickReport {
        let dt = self.frame_delta(now);
        self.last_tick_time = now;

        let aged_out = self
            .particles
            .advance_all(dt, pointer.attract_target(), pointer.attract);
        let culled = self
            .particles
            .cull_outside_radius(self.generator.position(), self.generator.radius());
        self.generator.recompute_live_count(&self.particles);

        let burst = if self.generator.can_spawn(now) {
            Some(self.generator.spawn_burst(
                &mut self.particles,
                self.settings.max_particles,
                self.settings.speed_base,
                now,
            ))
        } else {
            None
        };

        let report = TickReport {
            dt,
            aged_out,
            culled,
            burst,
            live: self.generator.current_particle_count(),
        };
        tracing::trace!(
            dt = report.dt,
            aged_out = report.aged_out,
            culled = report.culled,
            spawned = report.spawned(),
            live = report.live,
            "tick"
        );
        report
    }

    fn frame_delta(&self, now: f64) -> f64 {
        let dt = (now - self.last_tick_time).max(0.0);
        match self.max_delta {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    // =========================================================================
    // Settings
    // =========================================================================

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply new settings. The generator position is fixed for the session
    /// and is not changed.
    pub fn set_settings(&mut self, settings: Settings) {
        let position = self.settings.generator_position;
        self.settings = Settings {
            generator_position: position,
            ..settings.sanitized()
        };
        self.generator.set_radius(self.settings.generator_radius);
        self.generator.set_spawn_interval(self.settings.spawn_interval);
        self.generator.set_visuals(self.settings.visuals());
    }

    // =========================================================================
    // Read-only state
    // =========================================================================

    /// Live particles, in no particular order.
    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    #[inline]
    pub fn collection(&self) -> &ParticleCollection {
        &self.particles
    }

    #[inline]
    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn generator_view(&self) -> GeneratorView {
        self.generator.view()
    }

    /// Particles packed for GPU upload.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        visuals::instances(&self.particles, self.generator.visuals())
    }

    /// Time passed to the most recent tick.
    #[inline]
    pub fn last_tick_time(&self) -> f64 {
        self.last_tick_time
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
