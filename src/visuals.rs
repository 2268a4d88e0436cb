//! Read-only render data derived from simulation state.
//!
//! Nothing here feeds back into physics. A renderer reads particles and the
//! generator through these helpers and draws however it likes.
//!
//! # Usage
//!
//! ```ignore
//! let visuals = *sim.generator().visuals();
//! for p in sim.particles() {
//!     if draws_trail(p, &visuals) {
//!         draw_polyline(p.trail().iter(), p.color());
//!     }
//!     for layer in glow_layers(p, &visuals) {
//!         draw_circle(p.position(), layer.radius, p.color(), layer.alpha);
//!         draw_circle(p.position(), layer.radius, WHITE, layer.white_alpha);
//!     }
//! }
//! ```

use crate::particle::Particle;
use bytemuck::{Pod, Zeroable};
use glam::DVec2;

/// Number of concentric layers drawn per particle when bloom is on.
pub const GLOW_LAYERS: usize = 8;

/// Radius growth per glow layer, as a multiple of the base radius.
const GLOW_RADIUS_STEP: f64 = 1.2;

/// Alpha falloff per glow layer.
const GLOW_ALPHA_STEP: f64 = 0.15;

/// Visual toggles passed through the generator to renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualConfig {
    /// Spawn particles in palette colours instead of white.
    pub rgb_mode: bool,
    /// Draw glow layers around each particle.
    pub bloom: bool,
    /// Multiplier on drawn particle radius (1.0–3.0).
    pub bloom_intensity: f64,
    /// Draw each particle's trail.
    pub trails: bool,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            rgb_mode: false,
            bloom: false,
            bloom_intensity: 1.0,
            trails: true,
        }
    }
}

/// Snapshot of generator state for drawing the ring and a HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorView {
    pub position: DVec2,
    pub radius: f64,
    pub spawn_interval: f64,
    pub live_count: usize,
    pub visuals: VisualConfig,
}

/// One concentric circle of a particle sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowLayer {
    pub radius: f64,
    /// Alpha for the particle-coloured circle.
    pub alpha: u8,
    /// Alpha for the white halo drawn under it.
    pub white_alpha: u8,
}

/// Drawn radius of a particle before any glow.
pub fn sprite_radius(particle: &Particle, visuals: &VisualConfig) -> f64 {
    particle.size() * visuals.bloom_intensity
}

/// Circles to draw for a particle, innermost first.
///
/// Without bloom this is a single layer with no halo.
pub fn glow_layers(
    particle: &Particle,
    visuals: &VisualConfig,
) -> impl Iterator<Item = GlowLayer> {
    let base = sprite_radius(particle, visuals);
    let alpha = particle.alpha();
    let bloom = visuals.bloom;
    let layers = if bloom { GLOW_LAYERS } else { 1 };

    (0..layers).map(move |i| {
        if !bloom {
            return GlowLayer {
                radius: base,
                alpha: to_alpha(alpha),
                white_alpha: 0,
            };
        }
        let i = i as f64;
        let layer_alpha = to_alpha(alpha * (1.0 - i * GLOW_ALPHA_STEP));
        GlowLayer {
            radius: base * (1.0 + i * GLOW_RADIUS_STEP),
            alpha: layer_alpha,
            white_alpha: layer_alpha / 3,
        }
    })
}

/// Whether a particle's trail should be drawn.
pub fn draws_trail(particle: &Particle, visuals: &VisualConfig) -> bool {
    visuals.trails && particle.trail().len() > 1
}

fn to_alpha(value: f64) -> u8 {
    value.trunc().clamp(0.0, 255.0) as u8
}

/// GPU-ready per-particle instance data.
///
/// Colour and alpha are normalized to `0.0..=1.0`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub alpha: f32,
    pub color: [f32; 4],
}

impl ParticleInstance {
    pub fn new(particle: &Particle, visuals: &VisualConfig) -> Self {
        let p = particle.position();
        let [r, g, b] = particle.color();
        Self {
            position: [p.x as f32, p.y as f32],
            radius: sprite_radius(particle, visuals) as f32,
            alpha: (particle.alpha() / 255.0) as f32,
            color: [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0],
        }
    }
}

/// Pack particles for upload with `bytemuck::cast_slice`.
pub fn instances<'a>(
    particles: impl IntoIterator<Item = &'a Particle>,
    visuals: &VisualConfig,
) -> Vec<ParticleInstance> {
    particles
        .into_iter()
        .map(|p| ParticleInstance::new(p, visuals))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleDesc;

    fn particle(size: f64, alpha: f64) -> Particle {
        Particle::new(ParticleDesc {
            size,
            alpha,
            color: [255, 0, 0],
            lifespan: 10.0,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_plain_sprite() {
        let p = particle(3.0, 255.0);
        let visuals = VisualConfig {
            bloom_intensity: 2.0,
            ..Default::default()
        };

        let layers: Vec<_> = glow_layers(&p, &visuals).collect();
        assert_eq!(
            layers,
            vec![GlowLayer {
                radius: 6.0,
                alpha: 255,
                white_alpha: 0
            }]
        );
    }

    #[test]
    fn test_bloom_layers() {
        let p = particle(2.0, 255.0);
        let visuals = VisualConfig {
            bloom: true,
            ..Default::default()
        };

        let layers: Vec<_> = glow_layers(&p, &visuals).collect();
        assert_eq!(layers.len(), GLOW_LAYERS);

        assert_eq!(layers[0].radius, 2.0);
        assert_eq!(layers[0].alpha, 255);
        assert_eq!(layers[0].white_alpha, 85);

        // 255 * (1 - 0.15) = 216.75
        assert!((layers[1].radius - 4.4).abs() < 1e-9);
        assert_eq!(layers[1].alpha, 216);
        assert_eq!(layers[1].white_alpha, 72);

        // Last layer falls below zero and clamps
        assert_eq!(layers[7].alpha, 0);
        assert_eq!(layers[7].white_alpha, 0);
        assert!(layers.windows(2).all(|w| w[1].radius > w[0].radius));
    }

    #[test]
    fn test_draws_trail() {
        let mut p = particle(2.0, 255.0);
        let on = VisualConfig::default();
        let off = VisualConfig {
            trails: false,
            ..Default::default()
        };

        p.advance(0.01, None, false);
        assert!(!draws_trail(&p, &on), "a single point is not a line");

        p.advance(0.01, None, false);
        assert!(draws_trail(&p, &on));
        assert!(!draws_trail(&p, &off));
    }

    #[test]
    fn test_instance_packing() {
        let p = particle(4.0, 127.5);
        let visuals = VisualConfig::default();

        let packed = instances([&p], &visuals);
        assert_eq!(packed.len(), 1);
        assert_eq!(packed[0].radius, 4.0);
        assert_eq!(packed[0].alpha, 0.5);
        assert_eq!(packed[0].color, [1.0, 0.0, 0.0, 1.0]);

        let bytes: &[u8] = bytemuck::cast_slice(&packed);
        assert_eq!(bytes.len(), std::mem::size_of::<ParticleInstance>());
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
    }
}
