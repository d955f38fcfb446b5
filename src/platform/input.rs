//! Raw input accumulation
//!
//! Event listeners write into `InputState` as events arrive; once per frame
//! `snapshot` turns it into a `FrameInput` with one-shot edges.

use std::collections::BTreeSet;

use glam::Vec2;

use crate::sim::FrameInput;

/// Keys whose browser default (scrolling) should be suppressed
pub const CAPTURED_KEYS: [&str; 6] = [" ", "arrowup", "arrowdown", "arrowleft", "arrowright", "`"];

/// Live input state fed by host events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeSet<String>,
    prev_held: BTreeSet<String>,
    pointer: Vec2,
    left_down: bool,
    prev_left_down: bool,
}

/// Normalise a `KeyboardEvent.key` value
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(normalize_key(key));
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&normalize_key(key));
    }

    /// Pointer position in canvas pixels
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Left button state change
    pub fn button(&mut self, down: bool) {
        self.left_down = down;
    }

    /// Drop all held keys (focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.left_down = false;
    }

    /// Build this frame's input and remember the current state for the next edge
    pub fn snapshot(&mut self) -> FrameInput {
        let just_pressed = self.held.difference(&self.prev_held).cloned().collect();
        let just_clicked = self.left_down && !self.prev_left_down;
        self.prev_held = self.held.clone();
        self.prev_left_down = self.left_down;
        FrameInput {
            held: self.held.clone(),
            just_pressed,
            pointer: self.pointer,
            left_down: self.left_down,
            just_clicked,
        }
    }
}
