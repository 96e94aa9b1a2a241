//! Game configuration
//!
//! One struct covers both scene variants (with or without the cutting stage,
//! with or without the skip button). Validated before any session starts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_REQUIRED_CUTS, MAX_TRAIL_LENGTH, ROTATION_SCALE_GAIN};
use crate::error::ConfigError;
use crate::sim::ShapeKind;

/// Scene variant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Pull, spin, slice into noodles, push off-screen
    #[default]
    Noodles,
    /// Pull, spin, push off-screen; skip button available
    Classic,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Noodles => "Noodles",
            Variant::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "noodles" | "cutting" => Some(Variant::Noodles),
            "classic" | "simple" => Some(Variant::Classic),
            _ => None,
        }
    }
}

/// Point the pointer-down angle is measured around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PressPivot {
    /// Viewport centre, the same pivot rotation samples use
    #[default]
    Viewport,
    /// Current dough centre
    Dough,
}

/// Per-stage multipliers from raw pointer delta to game-state delta
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Sensitivities {
    /// Downward drag while pulling
    pub pull: f32,
    /// Circular sweep while rotating
    pub rotate: f32,
    /// Rightward drag while pushing to the finish
    pub finish: f32,
}

impl Default for Sensitivities {
    fn default() -> Self {
        Self {
            pull: 1.5,
            rotate: 0.7,
            finish: 1.5,
        }
    }
}

/// Dough footprint before any rotation scaling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoughConfig {
    pub shape: ShapeKind,
    pub width: f32,
    pub height: f32,
}

impl Default for DoughConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Rect,
            width: 160.0,
            height: 160.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Stage graph ===
    /// Insert the cutting stage between rotating and finishing
    pub enable_cutting_stage: bool,
    /// Accept the external "skip stage" command
    pub enable_skip_hatch: bool,

    // === Rotation ===
    pub max_rotation_progress: f32,
    /// Progress per degree of sweep (before sensitivity)
    pub rotation_speed: f32,
    /// Sweeps at or above this many degrees in one sample are ignored
    pub rotation_jump_guard_deg: f32,
    pub press_pivot: PressPivot,

    // === Cutting ===
    pub required_cuts: u32,
    /// Minimum horizontal spacing between two cuts
    pub min_cut_distance: f32,
    /// Vertical travel (pixels) one sample needs to count as a cut swipe
    pub cut_swipe_min_px: f32,
    /// Cosmetic spread applied to slices after every cut
    pub separation_offset: f32,

    pub sensitivities: Sensitivities,
    pub dough: DoughConfig,

    /// Gesture trail cap (points)
    pub trail_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl GameConfig {
    /// Create a config from a variant preset
    pub fn from_variant(variant: Variant) -> Self {
        let (cutting, skip) = match variant {
            Variant::Noodles => (true, false),
            Variant::Classic => (false, true),
        };
        Self {
            enable_cutting_stage: cutting,
            enable_skip_hatch: skip,
            max_rotation_progress: 100.0,
            rotation_speed: 0.5,
            rotation_jump_guard_deg: 30.0,
            press_pivot: PressPivot::Viewport,
            required_cuts: 5,
            min_cut_distance: 20.0,
            cut_swipe_min_px: 30.0,
            separation_offset: 5.0,
            sensitivities: Sensitivities::default(),
            dough: DoughConfig::default(),
            trail_length: 20,
        }
    }

    /// Reject configurations that would break the stage machine at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enable_cutting_stage && self.required_cuts == 0 {
            return Err(ConfigError::NoRequiredCuts);
        }
        if !(self.max_rotation_progress > 0.0) {
            return Err(ConfigError::NonPositiveProgress(self.max_rotation_progress));
        }
        if !(self.rotation_speed > 0.0) {
            return Err(ConfigError::NonPositiveRotationSpeed(self.rotation_speed));
        }
        for (name, value) in [
            ("pull", self.sensitivities.pull),
            ("rotate", self.sensitivities.rotate),
            ("finish", self.sensitivities.finish),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveSensitivity { name, value });
            }
        }
        if !self.min_cut_distance.is_finite() || self.min_cut_distance < 0.0 {
            return Err(ConfigError::InvalidCutDistance(self.min_cut_distance));
        }
        for (name, value) in [
            ("rotation_jump_guard_deg", self.rotation_jump_guard_deg),
            ("cut_swipe_min_px", self.cut_swipe_min_px),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveThreshold { name, value });
            }
        }
        if self.trail_length == 0 || self.trail_length > MAX_TRAIL_LENGTH {
            return Err(ConfigError::TrailLength {
                got: self.trail_length,
                max: MAX_TRAIL_LENGTH,
            });
        }
        if !(self.dough.width > 0.0 && self.dough.height > 0.0) {
            return Err(ConfigError::InvalidDoughSize {
                width: self.dough.width,
                height: self.dough.height,
            });
        }
        if self.enable_cutting_stage {
            let max = self.max_required_cuts();
            if self.required_cuts > max {
                return Err(ConfigError::TooManyCuts {
                    got: self.required_cuts,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Most cuts whose evenly spaced guides stay `min_cut_distance` apart on the
    /// fully spun dough, capped at `MAX_REQUIRED_CUTS`
    pub fn max_required_cuts(&self) -> u32 {
        if self.min_cut_distance <= 0.0 {
            return MAX_REQUIRED_CUTS;
        }
        let span = (1.0 + ROTATION_SCALE_GAIN) * self.dough.width;
        let fits = ((span / self.min_cut_distance).floor() as u32).saturating_sub(1);
        fits.min(MAX_REQUIRED_CUTS)
    }

    /// Parse and validate a JSON document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
