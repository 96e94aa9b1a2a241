//! Noodle Pull - a gesture-driven dough minigame core
//!
//! Core modules:
//! - `sim`: Stage machine, gesture tracking and shape subdivision
//! - `settings`: Validated game configuration and variant presets
//! - `hud`: Read-side view for the rendering host (text, layout, snapshot)
//! - `platform`: Browser bridge (wasm32 only)

pub mod error;
pub mod hud;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{GameConfig, PressPivot, Variant};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default viewport (portrait phone layout)
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 640.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 960.0;

    /// How much of the dough peeks in from the top edge at the start
    pub const DOUGH_PEEK: f32 = 50.0;

    /// Visual rotation (radians) per degree of pointer sweep
    pub const ROTATION_VISUAL_FACTOR: f32 = 0.01;
    /// Extra scale reached at full rotation progress
    pub const ROTATION_SCALE_GAIN: f32 = 0.5;

    /// Pending events kept for the host before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Upper bound on configurable gesture trail length
    pub const MAX_TRAIL_LENGTH: usize = 64;

    /// Hard cap on `required_cuts`, whatever the dough size
    pub const MAX_REQUIRED_CUTS: u32 = 64;
}

/// Normalize an angle in degrees to (-180, 180]
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

/// Angle (degrees) of the vector from `origin` to `point`
#[inline]
pub fn angle_of(origin: Vec2, point: Vec2) -> f32 {
    let d = point - origin;
    normalize_degrees(d.y.atan2(d.x).to_degrees())
}

/// Signed shortest sweep (degrees) from `from` to `to`, in (-180, 180]
#[inline]
pub fn angle_difference(from: f32, to: f32) -> f32 {
    normalize_degrees(to - from)
}

/// Convert polar (r, theta) to cartesian (x, y) around `center`
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}
