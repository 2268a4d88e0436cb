//! Error types for sparkring.
//!
//! The per-frame simulation path never fails: bad frame input is clamped
//! or ignored. Errors only surface when building particles from raw values
//! and when loading or saving settings.

use thiserror::Error;

/// Errors raised when constructing a [`Particle`](crate::Particle) from
/// invalid values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParticleError {
    /// A position, velocity or other component was NaN or infinite.
    #[error("Particle {0} must be finite")]
    NonFinite(&'static str),
    /// Size must be strictly positive.
    #[error("Particle size must be > 0, got {0}")]
    NonPositiveSize(f64),
    /// Lifespan must be strictly positive.
    #[error("Particle lifespan must be > 0, got {0}")]
    NonPositiveLifespan(f64),
    /// Alpha is outside `[0, 255]`.
    #[error("Particle alpha must be within 0..=255, got {0}")]
    AlphaOutOfRange(f64),
}

/// Errors that can occur when reading or writing [`Settings`](crate::Settings).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the settings file.
    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid JSON for [`Settings`](crate::Settings).
    #[error("Settings parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
