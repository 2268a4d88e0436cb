//! Unordered storage for live particles.
//!
//! Both removal passes use an in-place retain, so every particle is visited
//! exactly once and removal never skips a neighbour.

use crate::particle::Particle;
use glam::DVec2;

/// The set of live particles.
///
/// Order carries no meaning for the simulation. Capacity is not enforced
/// here; the [`Generator`](crate::Generator) refuses bursts that would
/// overflow.
#[derive(Debug, Clone, Default)]
pub struct ParticleCollection {
    particles: Vec<Particle>,
}

impl ParticleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every particle and drop the ones that died of age.
    ///
    /// Returns the number removed.
    pub fn advance_all(&mut self, dt: f64, pointer: Option<DVec2>, magnetic: bool) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(|p| p.advance(dt, pointer, magnetic));
        before - self.particles.len()
    }

    /// Drop every particle farther than `radius` from `center`.
    ///
    /// A particle exactly on the boundary is kept. Returns the number removed.
    pub fn cull_outside_radius(&mut self, center: DVec2, radius: f64) -> usize {
        let before = self.particles.len();
        self.particles
            .retain(|p| p.position().distance(center) <= radius);
        before - self.particles.len()
    }

    /// Number of particles within `radius` of `center` (boundary inclusive).
    pub fn count_within(&self, center: DVec2, radius: f64) -> usize {
        self.particles
            .iter()
            .filter(|p| p.position().distance(center) <= radius)
            .count()
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Read-only view of all particles.
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Extend<Particle> for ParticleCollection {
    fn extend<T: IntoIterator<Item = Particle>>(&mut self, iter: T) {
        self.particles.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ParticleCollection {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
