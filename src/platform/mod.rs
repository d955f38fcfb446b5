//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (raw key/mouse state to per-frame edges)
//! - Frame timing (host timestamps to clamped dt)

pub mod input;
pub mod time;

pub use input::InputState;
pub use time::FrameClock;
