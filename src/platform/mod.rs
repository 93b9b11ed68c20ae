//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Debounced timers (window resize, toast auto-hide)
//! - JavaScript bindings for the host page (wasm only)

pub mod timer;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use timer::Debouncer;
