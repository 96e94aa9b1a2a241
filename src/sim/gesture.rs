//! Pointer gesture tracking
//!
//! Turns raw pointer samples into per-sample deltas, and keeps a short decaying
//! trail for the renderer. The trail is cosmetic: nothing in the stage machine
//! reads it.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angle_of;

/// Raw pointer input delivered by the host, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    /// Release, or the pointer leaving the play area
    Up,
}

/// Dominant axis of a single movement sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dominant {
    Horizontal,
    Vertical,
    None,
}

/// Movement between two consecutive samples of one drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveDelta {
    pub from: Vec2,
    pub to: Vec2,
    pub dx: f32,
    pub dy: f32,
    pub dominant: Dominant,
}

impl MoveDelta {
    fn between(from: Vec2, to: Vec2) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let dominant = if dy.abs() > dx.abs() {
            Dominant::Vertical
        } else if dx.abs() > dy.abs() {
            Dominant::Horizontal
        } else {
            Dominant::None
        };
        Self {
            from,
            to,
            dx,
            dy,
            dominant,
        }
    }

    /// Mostly-vertical sample travelling more than `min_px`
    pub fn is_vertical_swipe(&self, min_px: f32) -> bool {
        self.dominant == Dominant::Vertical && self.dy.abs() > min_px
    }
}

/// Trail point for gesture rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Distance travelled from the previous sample
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    /// Oldest first
    trail: VecDeque<TrailPoint>,
    trail_cap: usize,
    active: bool,
    last_position: Option<Vec2>,
    /// Pointer angle (degrees) around the rotation pivot at the last sample
    last_angle: f32,
}

impl GestureTracker {
    pub fn new(trail_cap: usize) -> Self {
        Self {
            trail: VecDeque::with_capacity(trail_cap),
            trail_cap: trail_cap.max(1),
            active: false,
            last_position: None,
            last_angle: 0.0,
        }
    }

    /// Start a drag; `pivot` is the point rotation angles are measured around
    pub fn on_pointer_down(&mut self, pos: Vec2, pivot: Vec2) {
        self.trail.clear();
        self.push_trail(pos, 0.0);
        self.active = true;
        self.last_position = Some(pos);
        self.last_angle = angle_of(pivot, pos);
    }

    /// Record a drag sample. Returns `None` when no drag is in progress.
    pub fn on_pointer_move(&mut self, pos: Vec2) -> Option<MoveDelta> {
        if !self.active {
            return None;
        }
        let from = self.last_position.unwrap_or(pos);
        let delta = MoveDelta::between(from, pos);
        self.push_trail(pos, from.distance(pos));
        self.last_position = Some(pos);
        Some(delta)
    }

    /// End the drag; the trail is left to fade out
    pub fn on_pointer_up(&mut self) {
        self.active = false;
        self.last_position = None;
    }

    /// Drop the oldest trail point while no drag is active.
    /// Returns true if a point was removed.
    pub fn decay_tick(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.trail.pop_front().is_some()
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_position(&self) -> Option<Vec2> {
        self.last_position
    }

    pub fn last_angle(&self) -> f32 {
        self.last_angle
    }

    pub fn set_last_angle(&mut self, angle: f32) {
        self.last_angle = angle;
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Trail points with fade weight in [0, 1) (oldest faintest)
    pub fn trail(&self) -> impl Iterator<Item = (TrailPoint, f32)> + '_ {
        let n = self.trail.len() as f32;
        self.trail
            .iter()
            .enumerate()
            .map(move |(i, p)| (*p, i as f32 / n))
    }

    fn push_trail(&mut self, pos: Vec2, speed: f32) {
        self.trail.push_back(TrailPoint { pos, speed });
        while self.trail.len() > self.trail_cap {
            self.trail.pop_front();
        }
    }
}
