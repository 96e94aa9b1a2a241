//! Autoplay driver
//!
//! Synthesises plausible strokes for whatever stage the dough is in, so the
//! loop can run unattended (demo binary, attract screen, soak tests). Seeded,
//! so a given seed always plays the same game.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::gesture::PointerEvent;
use super::state::{GameState, Stage};
use super::tick::{TickInput, cut_guides, handle_pointer, tick};

#[derive(Debug, Clone)]
pub struct Autoplay {
    rng: Pcg32,
    /// Where the next circular stroke starts (degrees)
    sweep: f32,
}

impl Autoplay {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            sweep: 0.0,
        }
    }

    /// One full stroke (down, moves, up) suited to the current stage
    pub fn next_stroke(&mut self, state: &GameState) -> Vec<PointerEvent> {
        let points = match state.stage {
            Stage::PullingDough => self.pull_stroke(state),
            Stage::RotatingDough => self.circle_stroke(state),
            Stage::CuttingNoodles => self.cut_stroke(state),
            Stage::MovingToFinish => self.push_stroke(state),
        };

        let mut stroke = Vec::with_capacity(points.len() + 1);
        let mut points = points.into_iter();
        if let Some(first) = points.next() {
            stroke.push(PointerEvent::Down {
                x: first.x,
                y: first.y,
            });
        }
        stroke.extend(points.map(|p| PointerEvent::Move { x: p.x, y: p.y }));
        stroke.push(PointerEvent::Up);
        stroke
    }

    /// Play strokes until one more dough is completed.
    /// Returns the number of strokes used, or `None` if `max_strokes` ran out.
    pub fn play_round(&mut self, state: &mut GameState, max_strokes: usize) -> Option<usize> {
        let target = state.counters.completed_count + 1;
        for strokes in 1..=max_strokes {
            for event in self.next_stroke(state) {
                handle_pointer(state, event);
            }
            tick(state, &TickInput::default());
            if state.counters.completed_count >= target {
                return Some(strokes);
            }
        }
        log::warn!(
            "Autoplay gave up after {max_strokes} strokes in {}",
            state.stage.as_str()
        );
        None
    }

    fn pull_stroke(&mut self, state: &GameState) -> Vec<Vec2> {
        let mut p = Vec2::new(
            state.track.home_x + self.rng.random_range(-40.0f32..40.0),
            self.rng.random_range(80.0f32..200.0),
        );
        let mut points = vec![p];
        for _ in 0..12 {
            p.x += self.rng.random_range(-2.0f32..2.0);
            p.y += self.rng.random_range(6.0f32..14.0);
            points.push(p);
        }
        points
    }

    fn circle_stroke(&mut self, state: &GameState) -> Vec<Vec2> {
        let pivot = state.rotation_pivot();
        let radius = self.rng.random_range(120.0f32..220.0);
        let mut points = Vec::with_capacity(25);
        for i in 0..25 {
            if i > 0 {
                self.sweep += self.rng.random_range(8.0f32..16.0);
            }
            let theta = self.sweep.to_radians();
            points.push(pivot + Vec2::new(theta.cos(), theta.sin()) * radius);
        }
        points
    }

    fn cut_stroke(&mut self, state: &GameState) -> Vec<Vec2> {
        let min_distance = state.config.min_cut_distance;
        let x = cut_guides(state)
            .into_iter()
            .find(|&g| state.cuts.conflict(g, min_distance).is_none())
            .unwrap_or_else(|| {
                state
                    .shape
                    .visible_regions()
                    .map(|r| r.bounds)
                    .max_by(|a, b| a.width().total_cmp(&b.width()))
                    .map(|b| b.center_x())
                    .unwrap_or(state.dough.x)
            });
        let x = x + self.rng.random_range(-3.0f32..3.0);

        let top = state.shape.extent().top - 20.0;
        let length = self.rng.random_range(40.0f32..80.0);
        vec![Vec2::new(x, top), Vec2::new(x, top + length)]
    }

    fn push_stroke(&mut self, state: &GameState) -> Vec<Vec2> {
        let mut p = Vec2::new(
            self.rng.random_range(40.0f32..120.0),
            self.rng.random_range(0.3f32..0.7) * state.viewport.height,
        );
        let mut points = vec![p];
        for _ in 0..10 {
            p.x += self.rng.random_range(15.0f32..30.0);
            p.y += self.rng.random_range(-3.0f32..3.0);
            points.push(p);
        }
        points
    }
}
