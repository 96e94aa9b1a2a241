//! Stage machine
//!
//! Interprets each pointer sample for the current stage, advances the stage
//! when its goal is reached, and applies the once-per-frame tick. Nothing here
//! can fail: input that does not count is recorded as a `Rejection` event and
//! otherwise ignored.

use glam::Vec2;

use super::gesture::{MoveDelta, PointerEvent};
use super::session;
use super::state::{GameEvent, GameState, Rejection, Stage, Viewport};
use crate::consts::*;
use crate::{angle_difference, angle_of};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Force the current stage to complete (skip button)
    pub skip_stage: bool,
    /// Viewport size reported by the host this frame
    pub viewport: Option<(f32, f32)>,
}

/// Advance one frame: apply resize and skip commands, fade the gesture trail
pub fn tick(state: &mut GameState, input: &TickInput) {
    if let Some((width, height)) = input.viewport {
        resize(state, width, height);
    }

    if input.skip_stage {
        skip_stage(state);
    }

    state.gesture.decay_tick();
}

/// Dispatch a raw pointer event
pub fn handle_pointer(state: &mut GameState, event: PointerEvent) {
    match event {
        PointerEvent::Down { x, y } => pointer_down(state, Vec2::new(x, y)),
        PointerEvent::Move { x, y } => pointer_move(state, Vec2::new(x, y)),
        PointerEvent::Up => pointer_up(state),
    }
}

/// Start a drag. Non-finite positions are rejected and start nothing.
pub fn pointer_down(state: &mut GameState, pos: Vec2) {
    if !pos.is_finite() {
        state.reject(Rejection::NonFiniteSample);
        return;
    }
    let pivot = state.press_pivot();
    state.gesture.on_pointer_down(pos, pivot);
}

/// Feed one drag sample to the current stage (ignored when not dragging)
pub fn pointer_move(state: &mut GameState, pos: Vec2) {
    if !pos.is_finite() {
        if state.gesture.is_active() {
            state.reject(Rejection::NonFiniteSample);
        }
        return;
    }
    let Some(delta) = state.gesture.on_pointer_move(pos) else {
        return;
    };

    match state.stage {
        Stage::PullingDough => pull_dough(state, &delta),
        Stage::RotatingDough => rotate_dough(state, &delta),
        Stage::CuttingNoodles => cut_noodles(state, &delta),
        Stage::MovingToFinish => move_to_finish(state, &delta),
    }
}

pub fn pointer_up(state: &mut GameState) {
    state.gesture.on_pointer_up();
}

/// Apply a host viewport change. Returns true if anything changed.
///
/// Only the rotation pivot and HUD layout follow the viewport; stage targets
/// are fixed for the session.
pub fn resize(state: &mut GameState, width: f32, height: f32) -> bool {
    let viewport = match Viewport::new(width, height) {
        Ok(viewport) => viewport,
        Err(e) => {
            log::warn!("Ignoring resize: {e}");
            return false;
        }
    };
    if viewport == state.viewport {
        return false;
    }
    log::debug!("Viewport resized to {width}x{height}");
    state.viewport = viewport;
    true
}

/// Force the current stage's goal and transition as if it were reached
pub fn skip_stage(state: &mut GameState) {
    if !state.config.enable_skip_hatch {
        state.reject(Rejection::SkipDisabled);
        return;
    }

    let stage = state.stage;
    log::info!("Skipping {}", stage.as_str());
    state.emit(GameEvent::StageSkipped { stage });

    match stage {
        Stage::PullingDough => {
            state.dough.y = state.track.center_y;
            state.sync_shape();
            advance(state);
        }
        Stage::RotatingDough => {
            state.rotation_progress = state.config.max_rotation_progress;
            apply_rotation_scale(state);
            advance(state);
        }
        Stage::CuttingNoodles => skip_cutting(state),
        Stage::MovingToFinish => {
            let gap = (state.track.end_x - state.shape.rightmost_edge()).max(0.0);
            translate_dough(state, gap);
            advance(state);
        }
    }
}

/// Evenly spaced cut positions across the current dough
pub fn cut_guides(state: &GameState) -> Vec<f32> {
    let extent = state.shape.extent();
    let n = state.config.required_cuts;
    (1..=n)
        .map(|i| extent.left + i as f32 * extent.width() / (n as f32 + 1.0))
        .collect()
}

fn pull_dough(state: &mut GameState, delta: &MoveDelta) {
    if delta.dy < 0.0 {
        state.reject(Rejection::WrongDirection);
        return;
    }
    if delta.dy == 0.0 {
        return;
    }

    let track = state.track;
    let step = delta.dy * state.config.sensitivities.pull;
    state.dough.y = (state.dough.y + step).clamp(track.start_y, track.center_y);

    let arrived = state.dough.y >= track.center_y;
    if arrived {
        state.dough.y = track.center_y;
    }
    state.sync_shape();

    if arrived {
        advance(state);
    }
}

fn rotate_dough(state: &mut GameState, delta: &MoveDelta) {
    let current = angle_of(state.rotation_pivot(), delta.to);
    let diff = angle_difference(state.gesture.last_angle(), current);
    state.gesture.set_last_angle(current);

    if diff.abs() >= state.config.rotation_jump_guard_deg {
        state.reject(Rejection::AngleJump { degrees: diff });
        return;
    }

    let config = &state.config;
    let gained = diff.abs() * config.rotation_speed * config.sensitivities.rotate;
    let max = config.max_rotation_progress;
    state.rotation_progress = (state.rotation_progress + gained).min(max);
    state.dough.rotation += diff * ROTATION_VISUAL_FACTOR;
    apply_rotation_scale(state);

    if state.rotation_progress >= max {
        advance(state);
    }
}

fn apply_rotation_scale(state: &mut GameState) {
    state.dough.scale = 1.0 + state.progress_fraction() * ROTATION_SCALE_GAIN;
    state.sync_shape();
}

fn cut_noodles(state: &mut GameState, delta: &MoveDelta) {
    if !delta.is_vertical_swipe(state.config.cut_swipe_min_px) {
        state.reject(Rejection::NotAVerticalSwipe);
        return;
    }

    let x = delta.to.x;
    match check_cut(state, x) {
        Ok(region) => apply_cut(state, region, x),
        Err(reason) => state.reject(reason),
    }
}

/// Region a cut at `x` would split, or why it cannot be made
fn check_cut(state: &GameState, x: f32) -> Result<u32, Rejection> {
    if let Some(existing) = state.cuts.conflict(x, state.config.min_cut_distance) {
        return Err(Rejection::TooCloseToCut { x, existing });
    }
    state
        .shape
        .find_region_containing(x)
        .filter(|&id| {
            state
                .shape
                .region(id)
                .is_some_and(|r| r.bounds.strictly_contains_x(x))
        })
        .ok_or(Rejection::OutsideShape { x })
}

fn apply_cut(state: &mut GameState, region: u32, x: f32) {
    if state.shape.split(region, x).is_none() {
        state.reject(Rejection::OutsideShape { x });
        return;
    }
    state.cuts.push(x);
    state
        .shape
        .apply_cosmetic_separation(state.config.separation_offset);

    let cuts_made = state.cuts_made();
    log::debug!("Cut made! {}/{}", cuts_made, state.config.required_cuts);
    state.emit(GameEvent::CutAccepted { x, cuts_made });

    if cuts_made >= state.config.required_cuts {
        advance(state);
    }
}

/// Cut along the guides, then through the widest pieces, until enough cuts exist
fn skip_cutting(state: &mut GameState) {
    for x in cut_guides(state) {
        if state.stage != Stage::CuttingNoodles {
            return;
        }
        if let Ok(region) = check_cut(state, x) {
            apply_cut(state, region, x);
        }
    }

    while state.stage == Stage::CuttingNoodles {
        let widest = state
            .shape
            .visible_regions()
            .map(|r| r.bounds)
            .max_by(|a, b| a.width().total_cmp(&b.width()));
        let Some(bounds) = widest else { break };

        let x = bounds.center_x();
        match check_cut(state, x) {
            Ok(region) => apply_cut(state, region, x),
            Err(_) => break,
        }
    }

    // Pieces too narrow to cut again; finish the stage anyway
    if state.stage == Stage::CuttingNoodles {
        log::warn!("No room for more cuts, leaving cutting stage early");
        advance(state);
    }
}

fn move_to_finish(state: &mut GameState, delta: &MoveDelta) {
    if delta.dx < 0.0 {
        state.reject(Rejection::WrongDirection);
        return;
    }
    if delta.dx == 0.0 {
        return;
    }

    translate_dough(state, delta.dx * state.config.sensitivities.finish);
    if state.shape.rightmost_edge() >= state.track.end_x {
        advance(state);
    }
}

fn translate_dough(state: &mut GameState, dx: f32) {
    state.dough.x += dx;
    state.shape.translate_all(dx);
}

/// Move to the next stage, or finish the dough after the last one
fn advance(state: &mut GameState) {
    let from = state.stage;
    match from.next(state.config.enable_cutting_stage) {
        Some(to) => {
            state.stage = to;
            if to == Stage::RotatingDough {
                state.rotation_progress = 0.0;
            }
            log::info!("State changed to {}", to.as_str());
            state.emit(GameEvent::StageChanged { from, to });
        }
        None => session::complete(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameConfig, PressPivot, Variant};
    use proptest::prelude::*;

    const PIVOT: Vec2 = Vec2::new(320.0, 480.0);

    fn fresh(variant: Variant) -> GameState {
        GameState::new(GameConfig::from_variant(variant), Viewport::default()).unwrap()
    }

    fn with_skip(variant: Variant) -> GameState {
        let mut config = GameConfig::from_variant(variant);
        config.enable_skip_hatch = true;
        GameState::new(config, Viewport::default()).unwrap()
    }

    fn on_circle(degrees: f32) -> Vec2 {
        let theta = degrees.to_radians();
        PIVOT + Vec2::new(theta.cos(), theta.sin()) * 200.0
    }

    fn pull_to_center(state: &mut GameState) {
        let mut pos = Vec2::new(320.0, 100.0);
        pointer_down(state, pos);
        for _ in 0..100 {
            if state.stage != Stage::PullingDough {
                break;
            }
            pos.y += 10.0;
            pointer_move(state, pos);
        }
        pointer_up(state);
    }

    fn rotate_full(state: &mut GameState) {
        let mut degrees = 0.0;
        pointer_down(state, on_circle(degrees));
        for _ in 0..200 {
            if state.stage != Stage::RotatingDough {
                break;
            }
            degrees += 10.0;
            pointer_move(state, on_circle(degrees));
        }
        pointer_up(state);
    }

    fn swipe_cut(state: &mut GameState, x: f32) {
        pointer_down(state, Vec2::new(x, 250.0));
        pointer_move(state, Vec2::new(x, 300.0));
        pointer_up(state);
    }

    fn push_off(state: &mut GameState) {
        let completed = state.counters.completed_count;
        let mut pos = Vec2::new(100.0, 500.0);
        pointer_down(state, pos);
        for _ in 0..200 {
            if state.counters.completed_count != completed {
                break;
            }
            pos.x += 20.0;
            pointer_move(state, pos);
        }
        pointer_up(state);
    }

    fn stage_changes(events: &[GameEvent]) -> Vec<(Stage, Stage)> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::StageChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    fn widths(state: &GameState) -> Vec<f32> {
        state
            .shape
            .visible_regions()
            .map(|r| r.bounds.width())
            .collect()
    }

    #[test]
    fn test_pull_moves_down_only() {
        let mut state = fresh(Variant::Noodles);
        pointer_down(&mut state, Vec2::new(300.0, 200.0));
        pointer_move(&mut state, Vec2::new(300.0, 210.0));
        assert_eq!(state.dough.y, -15.0);
        assert_eq!(state.shape.root().bounds.center_y(), -15.0);

        pointer_move(&mut state, Vec2::new(300.0, 150.0));
        assert_eq!(state.dough.y, -15.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GestureRejected {
                stage: Stage::PullingDough,
                reason: Rejection::WrongDirection
            }]
        );
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut state = fresh(Variant::Noodles);
        pointer_move(&mut state, Vec2::new(300.0, 900.0));
        assert_eq!(state.dough.y, state.track.start_y);
        assert_eq!(state.pending_events(), 0);
    }

    #[test]
    fn test_pull_snaps_to_center_and_advances() {
        let mut state = fresh(Variant::Noodles);
        pointer_down(&mut state, Vec2::new(300.0, 0.0));
        pointer_move(&mut state, Vec2::new(300.0, 900.0));

        assert_eq!(state.dough.y, state.track.center_y);
        assert_eq!(state.stage, Stage::RotatingDough);
        assert_eq!(state.rotation_progress, 0.0);
        assert_eq!(
            stage_changes(&state.drain_events()),
            vec![(Stage::PullingDough, Stage::RotatingDough)]
        );
    }

    #[test]
    fn test_rotation_guard_ignores_jumps_but_tracks_angle() {
        let mut state = fresh(Variant::Noodles);
        pull_to_center(&mut state);
        state.drain_events();

        pointer_down(&mut state, on_circle(0.0));
        pointer_move(&mut state, on_circle(90.0));
        assert_eq!(state.rotation_progress, 0.0);
        let events = state.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::GestureRejected {
                reason: Rejection::AngleJump { .. },
                ..
            }]
        ));

        // Next sample measures from 90 degrees, not from 0
        pointer_move(&mut state, on_circle(100.0));
        let expected = 10.0 * 0.5 * 0.7;
        assert!((state.rotation_progress - expected).abs() < 1e-3);
        assert!(state.dough.scale > 1.0);
        assert!((state.dough.rotation - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_crosses_the_seam() {
        let mut state = fresh(Variant::Noodles);
        pull_to_center(&mut state);

        pointer_down(&mut state, on_circle(170.0));
        pointer_move(&mut state, on_circle(190.0));
        let expected = 20.0 * 0.5 * 0.7;
        assert!((state.rotation_progress - expected).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_clamps_and_advances() {
        let mut state = fresh(Variant::Noodles);
        pull_to_center(&mut state);
        rotate_full(&mut state);

        assert_eq!(state.stage, Stage::CuttingNoodles);
        assert_eq!(state.rotation_progress, state.config.max_rotation_progress);
        assert_eq!(state.dough.scale, 1.5);
        assert_eq!(state.shape.root().bounds.width(), 240.0);
    }

    #[test]
    fn test_cut_rejections_leave_tree_untouched() {
        let mut state = fresh(Variant::Noodles);
        pull_to_center(&mut state);
        rotate_full(&mut state);
        state.drain_events();

        swipe_cut(&mut state, 280.0);
        assert_eq!(state.cuts_made(), 1);
        assert_eq!(widths(&state), vec![80.0, 160.0]);
        state.drain_events();

        // Too close to the first cut
        swipe_cut(&mut state, 290.0);
        // Outside the dough
        swipe_cut(&mut state, 150.0);
        // Too short to count as a swipe
        pointer_down(&mut state, Vec2::new(360.0, 250.0));
        pointer_move(&mut state, Vec2::new(360.0, 270.0));
        pointer_up(&mut state);
        // Mostly sideways
        pointer_down(&mut state, Vec2::new(360.0, 250.0));
        pointer_move(&mut state, Vec2::new(420.0, 290.0));
        pointer_up(&mut state);

        assert_eq!(state.cuts_made(), 1);
        assert_eq!(widths(&state), vec![80.0, 160.0]);
        let reasons: Vec<Rejection> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::GestureRejected { reason, .. } => Some(reason),
                _ => None,
            })
            .collect();
        assert_eq!(
            reasons,
            vec![
                Rejection::TooCloseToCut {
                    x: 290.0,
                    existing: 280.0
                },
                Rejection::OutsideShape { x: 150.0 },
                Rejection::NotAVerticalSwipe,
                Rejection::NotAVerticalSwipe,
            ]
        );
    }

    #[test]
    fn test_full_cycle_with_cutting() {
        let mut state = fresh(Variant::Noodles);
        pull_to_center(&mut state);
        rotate_full(&mut state);
        for x in cut_guides(&state) {
            swipe_cut(&mut state, x);
        }
        assert_eq!(state.stage, Stage::MovingToFinish);
        assert_eq!(state.shape.visible_count(), 6);
        let total: f32 = widths(&state).iter().sum();
        assert!((total - 240.0).abs() < 1e-3);

        push_off(&mut state);

        assert_eq!(state.counters.completed_count, 1);
        assert_eq!(state.stage, Stage::PullingDough);
        assert_eq!(state.rotation_progress, 0.0);
        assert!(state.cuts.is_empty());
        assert!(!state.shape.is_split());
        assert_eq!(state.shape.visible_count(), 1);
        assert_eq!(state.shape.root().bounds, state.shape.home());

        let events = state.drain_events();
        assert_eq!(
            stage_changes(&events),
            vec![
                (Stage::PullingDough, Stage::RotatingDough),
                (Stage::RotatingDough, Stage::CuttingNoodles),
                (Stage::CuttingNoodles, Stage::MovingToFinish),
            ]
        );
        assert_eq!(
            events[events.len() - 2..],
            [
                GameEvent::DoughCompleted { completed_count: 1 },
                GameEvent::SessionReset
            ]
        );
    }

    #[test]
    fn test_full_cycle_without_cutting() {
        let mut state = fresh(Variant::Classic);
        pull_to_center(&mut state);
        rotate_full(&mut state);
        assert_eq!(state.stage, Stage::MovingToFinish);

        push_off(&mut state);
        assert_eq!(state.counters.completed_count, 1);
        assert_eq!(state.stage, Stage::PullingDough);

        // Second lap counts again
        pull_to_center(&mut state);
        rotate_full(&mut state);
        push_off(&mut state);
        assert_eq!(state.counters.completed_count, 2);
    }

    #[test]
    fn test_finish_ignores_leftward_drag() {
        let mut state = with_skip(Variant::Classic);
        skip_stage(&mut state);
        skip_stage(&mut state);
        assert_eq!(state.stage, Stage::MovingToFinish);
        let before = state.shape.rightmost_edge();

        pointer_down(&mut state, Vec2::new(300.0, 500.0));
        pointer_move(&mut state, Vec2::new(250.0, 500.0));
        assert_eq!(state.shape.rightmost_edge(), before);

        pointer_move(&mut state, Vec2::new(270.0, 500.0));
        assert_eq!(state.shape.rightmost_edge(), before + 30.0);
        assert_eq!(state.dough.x, state.track.home_x + 30.0);
    }

    #[test]
    fn test_skip_matches_natural_completion() {
        let mut natural = fresh(Variant::Noodles);
        pull_to_center(&mut natural);

        let mut skipped = with_skip(Variant::Noodles);
        skip_stage(&mut skipped);

        // Already at the pull target: same outcome again
        let mut at_goal = with_skip(Variant::Noodles);
        at_goal.dough.y = at_goal.track.center_y;
        skip_stage(&mut at_goal);

        for state in [&skipped, &at_goal] {
            assert_eq!(state.stage, natural.stage);
            assert_eq!(state.dough, natural.dough);
            assert_eq!(state.rotation_progress, natural.rotation_progress);
            assert_eq!(state.shape.root().bounds, natural.shape.root().bounds);
        }

        rotate_full(&mut natural);
        skip_stage(&mut skipped);
        assert_eq!(skipped.stage, natural.stage);
        assert_eq!(skipped.rotation_progress, natural.rotation_progress);
        assert_eq!(skipped.dough.scale, natural.dough.scale);
        assert_eq!(skipped.shape.root().bounds, natural.shape.root().bounds);
    }

    #[test]
    fn test_skip_disabled_is_rejected() {
        let mut state = fresh(Variant::Noodles);
        assert!(!state.config.enable_skip_hatch);
        tick(
            &mut state,
            &TickInput {
                skip_stage: true,
                ..Default::default()
            },
        );
        assert_eq!(state.stage, Stage::PullingDough);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GestureRejected {
                stage: Stage::PullingDough,
                reason: Rejection::SkipDisabled
            }]
        );
    }

    #[test]
    fn test_skip_cutting_makes_the_remaining_cuts() {
        let mut state = with_skip(Variant::Noodles);
        skip_stage(&mut state);
        skip_stage(&mut state);
        assert_eq!(state.stage, Stage::CuttingNoodles);

        swipe_cut(&mut state, 282.0);
        skip_stage(&mut state);

        assert_eq!(state.stage, Stage::MovingToFinish);
        assert_eq!(state.cuts.as_slice(), &[282.0, 240.0, 320.0, 360.0, 400.0]);
        assert_eq!(state.shape.visible_count(), 6);
        let total: f32 = widths(&state).iter().sum();
        assert!((total - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_skip_cutting_falls_back_to_widest_piece() {
        let mut config = GameConfig::from_variant(Variant::Noodles);
        config.enable_skip_hatch = true;
        config.required_cuts = 2;
        let mut state = GameState::new(config, Viewport::default()).unwrap();
        skip_stage(&mut state);
        skip_stage(&mut state);

        // Guides sit at 280 and 360; block both
        swipe_cut(&mut state, 270.0);
        assert_eq!(state.cuts_made(), 1);
        state.cuts.push(375.0);
        skip_stage(&mut state);

        // Widest piece is 270..440
        assert_eq!(state.stage, Stage::MovingToFinish);
        assert_eq!(state.cuts.as_slice(), &[270.0, 375.0, 355.0]);
    }

    #[test]
    fn test_skip_finish_completes_session() {
        let mut state = with_skip(Variant::Noodles);
        for _ in 0..4 {
            skip_stage(&mut state);
        }
        assert_eq!(state.counters.completed_count, 1);
        assert_eq!(state.stage, Stage::PullingDough);
        assert!(!state.shape.is_split());
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut state = fresh(Variant::Noodles);
        let track = state.track;
        assert!(!resize(&mut state, 640.0, 960.0));
        assert!(resize(&mut state, 800.0, 600.0));
        assert!(!resize(&mut state, 800.0, 600.0));
        assert!(!resize(&mut state, -1.0, 600.0));

        assert_eq!(state.rotation_pivot(), Vec2::new(400.0, 300.0));
        assert_eq!(state.track, track);
    }

    #[test]
    fn test_tick_fades_trail_after_release() {
        let mut state = fresh(Variant::Noodles);
        handle_pointer(&mut state, PointerEvent::Down { x: 10.0, y: 10.0 });
        handle_pointer(&mut state, PointerEvent::Move { x: 10.0, y: 20.0 });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.gesture.trail_len(), 2);

        handle_pointer(&mut state, PointerEvent::Up);
        tick(
            &mut state,
            &TickInput {
                viewport: Some((700.0, 900.0)),
                ..Default::default()
            },
        );
        assert_eq!(state.gesture.trail_len(), 1);
        assert_eq!(state.viewport.width, 700.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.gesture.trail_len(), 0);
    }

    fn rejections(state: &mut GameState) -> Vec<Rejection> {
        state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::GestureRejected { reason, .. } => Some(reason),
                _ => None,
            })
            .collect()
    }

    const BAD_SAMPLES: [Vec2; 3] = [
        Vec2::new(300.0, f32::NAN),
        Vec2::new(f32::NAN, 480.0),
        Vec2::new(f32::INFINITY, 300.0),
    ];

    #[test]
    fn test_non_finite_down_starts_nothing() {
        let mut state = fresh(Variant::Noodles);
        pointer_down(&mut state, Vec2::new(f32::NAN, f32::NAN));
        assert!(!state.gesture.is_active());
        assert_eq!(state.gesture.trail_len(), 0);
        assert_eq!(rejections(&mut state), vec![Rejection::NonFiniteSample]);

        // Not dragging: dropped without an event
        pointer_move(&mut state, Vec2::new(300.0, f32::NAN));
        assert_eq!(state.pending_events(), 0);
    }

    #[test]
    fn test_non_finite_samples_ignored_while_pulling() {
        let mut state = fresh(Variant::Noodles);
        pointer_down(&mut state, Vec2::new(300.0, 200.0));
        for p in BAD_SAMPLES {
            pointer_move(&mut state, p);
        }
        assert_eq!(state.dough.y, state.track.start_y);
        assert_eq!(rejections(&mut state), vec![Rejection::NonFiniteSample; 3]);

        // Deltas still measure from the last good sample
        pointer_move(&mut state, Vec2::new(300.0, 210.0));
        assert_eq!(state.dough.y, -15.0);
        pointer_move(&mut state, Vec2::new(300.0, 900.0));
        assert_eq!(state.dough.y, state.track.center_y);
        assert_eq!(state.stage, Stage::RotatingDough);
    }

    #[test]
    fn test_non_finite_samples_ignored_while_rotating() {
        let mut state = with_skip(Variant::Noodles);
        skip_stage(&mut state);
        state.drain_events();

        pointer_down(&mut state, on_circle(0.0));
        for p in BAD_SAMPLES {
            pointer_move(&mut state, p);
        }
        assert_eq!(state.stage, Stage::RotatingDough);
        assert_eq!(state.rotation_progress, 0.0);
        assert_eq!(state.dough.rotation, 0.0);
        assert_eq!(rejections(&mut state), vec![Rejection::NonFiniteSample; 3]);

        pointer_move(&mut state, on_circle(10.0));
        assert!((state.rotation_progress - 3.5).abs() < 1e-3);
        assert!(state.dough.rotation.is_finite());
    }

    #[test]
    fn test_non_finite_samples_ignored_while_cutting() {
        let mut state = with_skip(Variant::Noodles);
        skip_stage(&mut state);
        skip_stage(&mut state);
        state.drain_events();

        pointer_down(&mut state, Vec2::new(280.0, 250.0));
        pointer_move(&mut state, Vec2::new(f32::NAN, 300.0));
        pointer_move(&mut state, Vec2::new(280.0, f32::INFINITY));
        assert_eq!(state.cuts_made(), 0);
        assert!(!state.shape.is_split());
        assert_eq!(rejections(&mut state), vec![Rejection::NonFiniteSample; 2]);

        pointer_move(&mut state, Vec2::new(280.0, 300.0));
        assert_eq!(state.cuts.as_slice(), &[280.0]);
    }

    #[test]
    fn test_non_finite_samples_ignored_while_finishing() {
        let mut state = with_skip(Variant::Classic);
        skip_stage(&mut state);
        skip_stage(&mut state);
        assert_eq!(state.stage, Stage::MovingToFinish);
        state.drain_events();
        let edge = state.shape.rightmost_edge();

        pointer_down(&mut state, Vec2::new(100.0, 500.0));
        pointer_move(&mut state, Vec2::new(f32::INFINITY, 500.0));
        pointer_move(&mut state, Vec2::new(f32::NAN, 500.0));
        assert_eq!(state.stage, Stage::MovingToFinish);
        assert_eq!(state.shape.rightmost_edge(), edge);
        assert_eq!(state.dough.x, state.track.home_x);
        assert_eq!(state.counters.completed_count, 0);
        assert_eq!(rejections(&mut state), vec![Rejection::NonFiniteSample; 2]);
    }

    #[test]
    fn test_press_pivot_can_follow_the_dough() {
        let touch = Vec2::new(320.0, 70.0);

        let mut state = fresh(Variant::Noodles);
        pointer_down(&mut state, touch);
        assert!((state.gesture.last_angle() + 90.0).abs() < 1e-4);

        let mut config = GameConfig::from_variant(Variant::Noodles);
        config.press_pivot = PressPivot::Dough;
        let mut state = GameState::new(config, Viewport::default()).unwrap();
        // Dough rests at (320, -30)
        pointer_down(&mut state, touch);
        assert!((state.gesture.last_angle() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_most_cuts_that_fit_can_all_be_made() {
        let mut config = GameConfig::from_variant(Variant::Noodles);
        config.required_cuts = config.max_required_cuts();
        let mut state = GameState::new(config, Viewport::default()).unwrap();
        pull_to_center(&mut state);
        rotate_full(&mut state);
        for x in cut_guides(&state) {
            swipe_cut(&mut state, x);
        }
        assert_eq!(state.cuts_made(), 11);
        assert_eq!(state.stage, Stage::MovingToFinish);
    }

    proptest! {
        #[test]
        fn pull_stays_between_start_and_center(steps in proptest::collection::vec(-60.0f32..80.0, 1..60)) {
            let mut state = fresh(Variant::Noodles);
            let track = state.track;
            let mut pos = Vec2::new(320.0, 400.0);
            pointer_down(&mut state, pos);
            for dy in steps {
                pos.y += dy;
                pointer_move(&mut state, pos);
                prop_assert!(state.dough.y >= track.start_y && state.dough.y <= track.center_y);
            }
        }

        #[test]
        fn rotation_progress_is_monotonic_and_bounded(steps in proptest::collection::vec(-29.0f32..29.0, 1..80)) {
            let mut state = with_skip(Variant::Noodles);
            skip_stage(&mut state);
            let max = state.config.max_rotation_progress;

            let mut degrees = 0.0f32;
            pointer_down(&mut state, on_circle(degrees));
            let mut last = state.rotation_progress;
            for step in steps {
                degrees += step;
                pointer_move(&mut state, on_circle(degrees));
                if state.stage != Stage::RotatingDough {
                    break;
                }
                prop_assert!(state.rotation_progress >= last);
                prop_assert!(state.rotation_progress <= max);
                last = state.rotation_progress;
            }
        }
    }
}
