//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`. The host owns one
//! instance per session; there are no globals.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gesture::GestureTracker;
use super::session::SessionCounters;
use super::shape::{Bounds, ShapeSplitter};
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::{DoughConfig, GameConfig, PressPivot};

/// Current stage of the dough loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Drag down to bring the dough to the middle of the board
    PullingDough,
    /// Circular motions to knead/spin the dough
    RotatingDough,
    /// Vertical swipes slice the dough into noodles
    CuttingNoodles,
    /// Drag right to push the dough off-screen
    MovingToFinish,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PullingDough => "PULLING_DOUGH",
            Stage::RotatingDough => "ROTATING_DOUGH",
            Stage::CuttingNoodles => "CUTTING_NOODLES",
            Stage::MovingToFinish => "MOVING_TO_FINISH",
        }
    }

    /// Stage that follows this one, or `None` when finishing ends the session
    pub fn next(&self, cutting_enabled: bool) -> Option<Stage> {
        match self {
            Stage::PullingDough => Some(Stage::RotatingDough),
            Stage::RotatingDough if cutting_enabled => Some(Stage::CuttingNoodles),
            Stage::RotatingDough => Some(Stage::MovingToFinish),
            Stage::CuttingNoodles => Some(Stage::MovingToFinish),
            Stage::MovingToFinish => None,
        }
    }
}

/// Host viewport size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Stage targets, fixed when the session is created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Horizontal home of the dough
    pub home_x: f32,
    /// Resting y, mostly above the top edge
    pub start_y: f32,
    /// Pull target
    pub center_y: f32,
    /// Finish line for the dough's right edge
    pub end_x: f32,
}

impl Track {
    pub fn new(viewport: &Viewport, dough: &DoughConfig) -> Self {
        Self {
            home_x: viewport.width / 2.0,
            start_y: -dough.height / 2.0 + DOUGH_PEEK,
            center_y: viewport.height / 3.0,
            end_x: viewport.width + dough.width / 2.0,
        }
    }
}

/// Transform of the uncut dough
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dough {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    /// Visual spin (radians)
    pub rotation: f32,
}

impl Dough {
    pub fn at_home(track: &Track) -> Self {
        Self {
            x: track.home_x,
            y: track.start_y,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Scaled logical footprint
    pub fn bounds(&self, size: &DoughConfig) -> Bounds {
        Bounds::from_center(
            self.position(),
            size.width * self.scale,
            size.height * self.scale,
        )
    }
}

/// Accepted cut positions, in the order they were made
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CutRecord {
    cuts: Vec<f32>,
}

impl CutRecord {
    /// Existing cut closer than `min_distance` to `x`, if any
    pub fn conflict(&self, x: f32, min_distance: f32) -> Option<f32> {
        self.cuts
            .iter()
            .copied()
            .find(|c| (c - x).abs() < min_distance)
    }

    pub fn push(&mut self, x: f32) {
        self.cuts.push(x);
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    pub fn clear(&mut self) {
        self.cuts.clear();
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.cuts
    }
}

/// Why a gesture sample or command did not register
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rejection {
    /// Motion against the stage's direction (up while pulling, left while finishing)
    WrongDirection,
    /// Sweep too large for one sample (finger lifted and re-placed)
    AngleJump { degrees: f32 },
    /// Sample not a long enough vertical swipe to cut
    NotAVerticalSwipe,
    /// Cut too close to an earlier one
    TooCloseToCut { x: f32, existing: f32 },
    /// Cut outside the dough
    OutsideShape { x: f32 },
    /// Skip command while the skip hatch is disabled
    SkipDisabled,
    /// Pointer sample with a NaN or infinite coordinate
    NonFiniteSample,
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    StageChanged { from: Stage, to: Stage },
    GestureRejected { stage: Stage, reason: Rejection },
    CutAccepted { x: f32, cuts_made: u32 },
    StageSkipped { stage: Stage },
    /// One dough made it across the finish line
    DoughCompleted { completed_count: u64 },
    SessionReset,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub track: Track,
    /// Current stage
    pub stage: Stage,
    /// Uncut dough transform
    pub dough: Dough,
    /// Accumulated spin, in [0, max_rotation_progress]
    pub rotation_progress: f32,
    pub cuts: CutRecord,
    pub shape: ShapeSplitter,
    pub gesture: GestureTracker,
    pub counters: SessionCounters,
    events: VecDeque<GameEvent>,
}

impl GameState {
    /// Create a session. Fails only on an invalid config or viewport.
    pub fn new(config: GameConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        config.validate()?;
        let viewport = Viewport::new(viewport.width, viewport.height)?;

        let track = Track::new(&viewport, &config.dough);
        let dough = Dough::at_home(&track);
        let shape = ShapeSplitter::new(config.dough.shape, dough.bounds(&config.dough));
        let gesture = GestureTracker::new(config.trail_length);

        Ok(Self {
            config,
            viewport,
            track,
            stage: Stage::PullingDough,
            dough,
            rotation_progress: 0.0,
            cuts: CutRecord::default(),
            shape,
            gesture,
            counters: SessionCounters::default(),
            events: VecDeque::new(),
        })
    }

    pub fn cuts_made(&self) -> u32 {
        self.cuts.len() as u32
    }

    /// Rotation progress as a fraction of the maximum
    pub fn progress_fraction(&self) -> f32 {
        (self.rotation_progress / self.config.max_rotation_progress).clamp(0.0, 1.0)
    }

    /// Point rotation angles are measured around
    pub fn rotation_pivot(&self) -> Vec2 {
        self.viewport.center()
    }

    /// Point the angle recorded on pointer-down is measured around
    pub fn press_pivot(&self) -> Vec2 {
        match self.config.press_pivot {
            PressPivot::Viewport => self.rotation_pivot(),
            PressPivot::Dough => self.dough.position(),
        }
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub(crate) fn reject(&mut self, reason: Rejection) {
        log::debug!("{} ignored gesture: {:?}", self.stage.as_str(), reason);
        self.emit(GameEvent::GestureRejected {
            stage: self.stage,
            reason,
        });
    }

    /// Keep the uncut root region on the dough's current footprint
    pub(crate) fn sync_shape(&mut self) {
        let bounds = self.dough.bounds(&self.config.dough);
        self.shape.reshape_root(bounds);
    }
}
