//! # sparkring - ring-bounded particle generator
//!
//! A real-time particle toy: a generator sits at a fixed point, spits out
//! small bursts of particles at a configurable interval, and culls anything
//! that drifts outside its circle. Particles fall under a constant gravity,
//! or are pulled toward the pointer while the attract button is held.
//!
//! The crate is the simulation core only. Windowing, widgets and drawing
//! belong to the host application, which feeds in time and pointer state and
//! reads particle state back out.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sparkring::prelude::*;
//!
//! let mut sim = Simulation::new(Settings::default());
//! let mut time = Time::new();
//! let mut input = Input::new();
//!
//! // Once per frame:
//! time.update();
//! let report = sim.tick(time.elapsed(), &input.pointer());
//! for p in sim.particles() {
//!     // draw p.position(), p.size(), p.color(), p.trail() ...
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] carries position, velocity, a constant acceleration, size,
//! colour, alpha, a lifespan and its age, plus a 30-point [`Trail`] of past
//! positions. Each tick it ages, records its trail and takes one
//! semi-implicit Euler step.
//!
//! ### Generator
//!
//! The [`Generator`] decides when to spawn (a cooldown timer), how many
//! (1–4 per burst, all or nothing against the particle limit) and where
//! particles may live (its radius).
//!
//! ### Simulation
//!
//! [`Simulation::tick`] advances, culls, recounts and spawns, in that order.
//!
//! | Concern | Type |
//! |---------|------|
//! | Parameters | [`Settings`] |
//! | Frame timing | [`time::Time`] |
//! | Pointer | [`input::Input`], [`PointerState`] |
//! | Drawing | [`visuals`] helpers, [`ParticleInstance`] |

mod collection;
pub mod config;
mod emitter;
pub mod error;
mod generator;
pub mod input;
mod particle;
mod simulation;
mod spawn;
pub mod time;
mod trail;
pub mod visuals;

pub use glam::DVec2;

pub use collection::ParticleCollection;
pub use config::Settings;
pub use emitter::{ColorMode, Emission, PALETTE, WHITE};
pub use error::{ConfigError, ParticleError};
pub use generator::{BurstOutcome, Generator, SpawnState};
pub use input::PointerState;
pub use particle::{Particle, ParticleDesc, DEFAULT_MAGNETIC_STRENGTH, GRAVITY};
pub use simulation::{Simulation, TickReport, DEFAULT_MAX_DELTA};
pub use spawn::SpawnContext;
pub use trail::{Trail, TRAIL_CAPACITY};
pub use visuals::{GeneratorView, GlowLayer, ParticleInstance, VisualConfig};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use sparkring::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::emitter::{ColorMode, Emission};
    pub use crate::generator::{BurstOutcome, Generator, SpawnState};
    pub use crate::input::{Input, MouseButton, PointerState};
    pub use crate::particle::{Particle, ParticleDesc};
    pub use crate::simulation::{Simulation, TickReport};
    pub use crate::time::Time;
    pub use crate::visuals::{GeneratorView, ParticleInstance, VisualConfig};
    pub use crate::DVec2;
}
