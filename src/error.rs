//! Configuration errors
//!
//! Gesture handling never fails; the only rejected input is a bad configuration,
//! caught before a session is created.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required_cuts must be at least 1 when the cutting stage is enabled")]
    NoRequiredCuts,

    #[error("required_cuts {got} cannot fit on the dough (at most {max})")]
    TooManyCuts { got: u32, max: u32 },

    #[error("max_rotation_progress must be positive (got {0})")]
    NonPositiveProgress(f32),

    #[error("rotation_speed must be positive (got {0})")]
    NonPositiveRotationSpeed(f32),

    #[error("{name} sensitivity must be positive (got {value})")]
    NonPositiveSensitivity { name: &'static str, value: f32 },

    #[error("min_cut_distance must be a finite, non-negative distance (got {0})")]
    InvalidCutDistance(f32),

    #[error("{name} must be positive (got {value})")]
    NonPositiveThreshold { name: &'static str, value: f32 },

    #[error("trail_length must be between 1 and {max} (got {got})")]
    TrailLength { got: usize, max: usize },

    #[error("dough size must be positive (got {width}x{height})")]
    InvalidDoughSize { width: f32, height: f32 },

    #[error("viewport must be positive (got {width}x{height})")]
    InvalidViewport { width: f32, height: f32 },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
