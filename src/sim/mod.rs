//! Dough simulation
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Driven only by pointer events and the per-frame tick
//! - No wall-clock time; progress comes from accumulated gestures
//! - No rendering; the host reads state each frame and draws it

pub mod autoplay;
pub mod gesture;
pub mod session;
pub mod shape;
pub mod state;
pub mod tick;

pub use autoplay::Autoplay;
pub use gesture::{Dominant, GestureTracker, MoveDelta, PointerEvent, TrailPoint};
pub use session::SessionCounters;
pub use shape::{Bounds, Disc, Region, ShapeKind, ShapeSplitter, Side};
pub use state::{
    CutRecord, Dough, GameEvent, GameState, Rejection, Stage, Track, Viewport,
};
pub use tick::{
    TickInput, cut_guides, handle_pointer, pointer_down, pointer_move, pointer_up, resize,
    skip_stage, tick,
};
