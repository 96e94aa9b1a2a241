//! HUD view
//!
//! Everything the rendering host needs to draw a frame: stage instructions,
//! progress indicator, cut guides, layout anchors and a serializable snapshot.
//! Read-only; nothing here mutates the session.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Bounds, Dough, GameState, Side, Stage, Viewport, cut_guides};

pub const PROGRESS_BAR_WIDTH: f32 = 300.0;
pub const PROGRESS_BAR_HEIGHT: f32 = 40.0;
/// Keeps the bar clear of home indicators and notches
pub const SAFE_BOTTOM_PADDING: f32 = 80.0;
/// Points per edge when sampling disc outlines
pub const OUTLINE_SAMPLES: usize = 24;

/// Instruction and subtitle text for a stage
pub fn instruction(stage: Stage) -> (&'static str, &'static str) {
    match stage {
        Stage::PullingDough => (
            "Drag DOWN anywhere to pull dough!",
            "(You can drag anywhere on screen)",
        ),
        Stage::RotatingDough => (
            "Make CIRCULAR motions to rotate dough!",
            "(Rotate anywhere on screen)",
        ),
        Stage::CuttingNoodles => ("Cut the dough!", "(Swipe UP or DOWN anywhere on screen)"),
        Stage::MovingToFinish => (
            "Drag RIGHT to finish the dough!",
            "(Swipe right anywhere on screen)",
        ),
    }
}

/// Gesture trail colour (0xRRGGBB) per stage
pub fn trail_color(stage: Stage) -> u32 {
    match stage {
        Stage::PullingDough => 0x00ff00,
        Stage::RotatingDough => 0x0000ff,
        Stage::CuttingNoodles => 0xff0000,
        Stage::MovingToFinish => 0xff00ff,
    }
}

/// Progress bar fill: cuts while cutting, rotation otherwise
pub fn progress_fraction(state: &GameState) -> f32 {
    if state.stage == Stage::CuttingNoodles {
        state.cuts_made() as f32 / state.config.required_cuts.max(1) as f32
    } else {
        state.progress_fraction()
    }
}

pub fn progress_label(state: &GameState) -> String {
    if state.stage == Stage::CuttingNoodles {
        format!("{}/{} cuts", state.cuts_made(), state.config.required_cuts)
    } else {
        format!("{}%", (state.progress_fraction() * 100.0).floor() as u32)
    }
}

/// Debug overlay lines
pub fn debug_lines(state: &GameState) -> Vec<String> {
    let progress = match state.stage {
        Stage::CuttingNoodles => {
            format!("Cuts: {}/{}", state.cuts_made(), state.config.required_cuts)
        }
        _ => format!(
            "Progress: {:.1}/{}",
            state.rotation_progress, state.config.max_rotation_progress
        ),
    };
    vec![
        format!("State: {}", state.stage.as_str()),
        format!(
            "Dough Position: X:{}, Y:{}",
            state.dough.x.round(),
            state.dough.y.round()
        ),
        progress,
    ]
}

/// Screen anchors for HUD widgets
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudLayout {
    /// Centre of the progress bar
    pub progress_bar: Vec2,
    /// Left edge of the bar fill
    pub progress_fill_x: f32,
    /// Completed-count box (top-right)
    pub counter_box: Bounds,
    pub instruction: Vec2,
    pub subtitle: Vec2,
}

impl HudLayout {
    pub fn new(viewport: &Viewport, center_y: f32) -> Self {
        let (w, h) = (viewport.width, viewport.height);
        let bar_y = h - SAFE_BOTTOM_PADDING;
        Self {
            progress_bar: Vec2::new(w / 2.0, bar_y),
            progress_fill_x: w / 2.0 - PROGRESS_BAR_WIDTH / 2.0,
            counter_box: Bounds {
                left: w - 150.0,
                right: w - 20.0,
                top: 20.0,
                bottom: 80.0,
            },
            instruction: Vec2::new(w / 2.0, center_y + 150.0),
            subtitle: Vec2::new(w / 2.0, center_y + 180.0),
        }
    }
}

/// Recomputes the layout only when the viewport actually changes
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    viewport: Option<Viewport>,
    layout: Option<HudLayout>,
}

impl LayoutCache {
    /// New layout if the viewport changed since the last call
    pub fn update(&mut self, state: &GameState) -> Option<HudLayout> {
        if self.viewport == Some(state.viewport) {
            return None;
        }
        let layout = HudLayout::new(&state.viewport, state.track.center_y);
        self.viewport = Some(state.viewport);
        self.layout = Some(layout);
        Some(layout)
    }

    pub fn current(&self) -> Option<&HudLayout> {
        self.layout.as_ref()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionView {
    pub id: u32,
    pub bounds: Bounds,
    pub render_center: Vec2,
    pub side: Side,
    pub outline: Vec<Vec2>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrailView {
    pub pos: Vec2,
    pub weight: f32,
}

/// Per-frame view of a session
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub stage: Stage,
    pub instruction: &'static str,
    pub subtitle: &'static str,
    pub progress: f32,
    pub progress_label: String,
    pub rotation_progress: f32,
    pub cuts_made: u32,
    pub required_cuts: u32,
    pub completed_count: u64,
    pub dough: Dough,
    /// False once the dough has been cut into regions
    pub dough_visible: bool,
    pub regions: Vec<RegionView>,
    pub cut_lines: Vec<f32>,
    /// Dashed guide positions (cutting stage only)
    pub guides: Vec<f32>,
    pub trail: Vec<TrailView>,
    pub trail_color: u32,
    pub layout: HudLayout,
}

pub fn snapshot(state: &GameState) -> Snapshot {
    let (instruction, subtitle) = instruction(state.stage);
    let regions = state
        .shape
        .visible_regions()
        .map(|r| RegionView {
            id: r.id,
            bounds: r.bounds,
            render_center: r.render_center(),
            side: r.side,
            outline: r.outline(OUTLINE_SAMPLES),
        })
        .collect();
    let guides = if state.stage == Stage::CuttingNoodles {
        cut_guides(state)
    } else {
        Vec::new()
    };

    Snapshot {
        stage: state.stage,
        instruction,
        subtitle,
        progress: progress_fraction(state),
        progress_label: progress_label(state),
        rotation_progress: state.rotation_progress,
        cuts_made: state.cuts_made(),
        required_cuts: state.config.required_cuts,
        completed_count: state.counters.completed_count,
        dough: state.dough,
        dough_visible: !state.shape.is_split(),
        regions,
        cut_lines: state.cuts.as_slice().to_vec(),
        guides,
        trail: state
            .gesture
            .trail()
            .map(|(p, weight)| TrailView { pos: p.pos, weight })
            .collect(),
        trail_color: trail_color(state.stage),
        layout: HudLayout::new(&state.viewport, state.track.center_y),
    }
}
