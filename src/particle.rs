//! A single point-like particle and its integration step.
//!
//! Particles are passive data apart from [`Particle::advance`], which ages
//! the particle, records its trail and performs one semi-implicit Euler step
//! under exactly one of two force regimes:
//!
//! | Regime | Velocity change per tick |
//! |--------|--------------------------|
//! | Ambient | `acceleration * dt` |
//! | Magnetic | `unit(pointer - position) * magnetic_strength * dt` |
//!
//! The regimes never stack. When magnetic mode is active with a pointer the
//! ambient acceleration is skipped for that tick.

use crate::error::ParticleError;
use crate::trail::Trail;
use glam::DVec2;

/// Downward ambient acceleration given to spawned particles (units/s²).
///
/// Screen space: +Y points down.
pub const GRAVITY: DVec2 = DVec2::new(0.0, 98.1);

/// Default pull toward the pointer in magnetic mode (units/s²).
pub const DEFAULT_MAGNETIC_STRENGTH: f64 = 500.0;

/// Raw values for building a [`Particle`].
///
/// ```ignore
/// let p = Particle::new(ParticleDesc {
///     velocity: DVec2::new(10.0, 0.0),
///     lifespan: 3.0,
///     ..Default::default()
/// })?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleDesc {
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    /// Degrees. Kept for renderers, ignored by physics.
    pub rotation: f64,
    pub size: f64,
    pub color: [u8; 3],
    pub alpha: f64,
    /// Seconds.
    pub lifespan: f64,
    pub magnetic_strength: f64,
}

impl Default for ParticleDesc {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            acceleration: GRAVITY,
            rotation: 0.0,
            size: 1.0,
            color: [255, 255, 255],
            alpha: 255.0,
            lifespan: 1.0,
            magnetic_strength: DEFAULT_MAGNETIC_STRENGTH,
        }
    }
}

/// A live particle.
///
/// Construct with [`Particle::new`], which validates the description once so
/// the integration step never has to.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: DVec2,
    velocity: DVec2,
    acceleration: DVec2,
    rotation: f64,
    size: f64,
    color: [u8; 3],
    alpha: f64,
    lifespan: f64,
    age: f64,
    magnetic_strength: f64,
    trail: Trail,
}

impl Particle {
    /// Build a particle with `age = 0` and an empty trail.
    ///
    /// # Errors
    ///
    /// Rejects non-finite vectors or scalars, `size <= 0`, `lifespan <= 0`
    /// and alpha outside `[0, 255]`.
    pub fn new(desc: ParticleDesc) -> Result<Self, ParticleError> {
        let vectors = [
            ("position", desc.position),
            ("velocity", desc.velocity),
            ("acceleration", desc.acceleration),
        ];
        for (name, v) in vectors {
            if !v.is_finite() {
                return Err(ParticleError::NonFinite(name));
            }
        }
        let scalars = [
            ("rotation", desc.rotation),
            ("size", desc.size),
            ("alpha", desc.alpha),
            ("lifespan", desc.lifespan),
            ("magnetic_strength", desc.magnetic_strength),
        ];
        for (name, s) in scalars {
            if !s.is_finite() {
                return Err(ParticleError::NonFinite(name));
            }
        }
        if desc.size <= 0.0 {
            return Err(ParticleError::NonPositiveSize(desc.size));
        }
        if desc.lifespan <= 0.0 {
            return Err(ParticleError::NonPositiveLifespan(desc.lifespan));
        }
        if !(0.0..=255.0).contains(&desc.alpha) {
            return Err(ParticleError::AlphaOutOfRange(desc.alpha));
        }

        Ok(Self {
            position: desc.position,
            velocity: desc.velocity,
            acceleration: desc.acceleration,
            rotation: desc.rotation,
            size: desc.size,
            color: desc.color,
            alpha: desc.alpha,
            lifespan: desc.lifespan,
            age: 0.0,
            magnetic_strength: desc.magnetic_strength,
            trail: Trail::new(),
        })
    }

    /// Age the particle by `dt` and integrate one step.
    ///
    /// Returns `false` once `age >= lifespan`; in that case nothing but the
    /// age has changed and the caller must drop the particle. Negative `dt`
    /// is treated as zero.
    ///
    /// `pointer` only matters when `magnetic` is set. A pointer sitting
    /// exactly on the particle contributes no force that tick.
    pub fn advance(&mut self, dt: f64, pointer: Option<DVec2>, magnetic: bool) -> bool {
        let dt = dt.max(0.0);
        self.age += dt;
        if self.is_dead() {
            return false;
        }

        self.trail.push(self.position);

        match pointer {
            Some(target) if magnetic => {
                let offset = target - self.position;
                let distance = offset.length();
                if distance > 0.0 {
                    self.velocity += offset / distance * self.magnetic_strength * dt;
                }
            }
            _ => self.velocity += self.acceleration * dt,
        }

        self.position += self.velocity * dt;
        true
    }

    /// Whether the particle has outlived its lifespan.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.age >= self.lifespan
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    #[inline]
    pub fn acceleration(&self) -> DVec2 {
        self.acceleration
    }

    /// Rotation in degrees.
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[inline]
    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    pub fn lifespan(&self) -> f64 {
        self.lifespan
    }

    #[inline]
    pub fn age(&self) -> f64 {
        self.age
    }

    #[inline]
    pub fn magnetic_strength(&self) -> f64 {
        self.magnetic_strength
    }

    /// Past positions, oldest first.
    #[inline]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }
}
