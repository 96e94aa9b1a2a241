//! Platform bridge
//!
//! The core is platform-free; hosts drive it through this layer.
//! - `web`: wasm-bindgen session handle for a browser host (wasm32 only)
//!
//! Native hosts use `sim` directly.

#[cfg(target_arch = "wasm32")]
pub mod web;
