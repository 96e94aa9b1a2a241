//! Session lifecycle: completion bookkeeping and resets

use serde::{Deserialize, Serialize};

use super::state::{Dough, GameEvent, GameState, Stage};

/// Counters that live for the whole process (never persisted)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    /// Doughs pushed across the finish line
    pub completed_count: u64,
}

/// Count a finished dough and start the next one
pub fn complete(state: &mut GameState) {
    state.counters.completed_count += 1;
    let completed_count = state.counters.completed_count;
    log::info!("Dough completed! Count: {completed_count}");
    state.emit(GameEvent::DoughCompleted { completed_count });
    reset(state);
}

/// Put a fresh dough at the top of the board.
///
/// Completed count is left alone. An ongoing drag keeps going; only its trail
/// is cleared.
pub fn reset(state: &mut GameState) {
    state.stage = Stage::PullingDough;
    state.rotation_progress = 0.0;
    state.cuts.clear();
    state.dough = Dough::at_home(&state.track);
    state.shape.reset();
    state.gesture.clear_trail();

    log::info!("State reset to {}", state.stage.as_str());
    state.emit(GameEvent::SessionReset);
}
