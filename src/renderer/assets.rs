//! Sprite table
//!
//! Images load asynchronously on the host; until one reports success the
//! scene draws a flat-colored rectangle in its place.

use std::collections::BTreeMap;

use super::Surface;
use crate::sim::Rect;

/// Sprite names and their image paths
pub const SPRITES: [(&str, &str); 4] = [
    ("player", "assets/player.png"),
    ("enemy", "assets/enemy.png"),
    ("rusher", "assets/rusher.png"),
    ("elite", "assets/elite.png"),
];

/// One image slot
#[derive(Debug, Clone)]
pub struct Sprite<I> {
    pub handle: I,
    pub loaded: bool,
}

/// Sprite name → image
#[derive(Debug, Clone)]
pub struct Assets<I> {
    sprites: BTreeMap<&'static str, Sprite<I>>,
}

impl<I> Default for Assets<I> {
    fn default() -> Self {
        Self {
            sprites: BTreeMap::new(),
        }
    }
}

impl<I> Assets<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle whose load is still pending
    pub fn insert(&mut self, name: &'static str, handle: I) {
        self.sprites.insert(
            name,
            Sprite {
                handle,
                loaded: false,
            },
        );
    }

    /// Record a load result. Unknown names are ignored.
    pub fn mark(&mut self, name: &str, loaded: bool) {
        if let Some(sprite) = self.sprites.get_mut(name) {
            sprite.loaded = loaded;
            if !loaded {
                log::warn!("Sprite '{name}' failed to load, using fallback color");
            }
        }
    }

    /// Loaded image for `name`
    pub fn get(&self, name: &str) -> Option<&I> {
        self.sprites
            .get(name)
            .filter(|s| s.loaded)
            .map(|s| &s.handle)
    }

    /// Draw `name` into `rect`, or a `fallback` rectangle if it is not loaded
    pub fn draw<S: Surface<Image = I>>(
        &self,
        surface: &mut S,
        name: &str,
        rect: Rect,
        fallback: &str,
    ) {
        match self.get(name) {
            Some(image) => surface.draw_image(image, rect.x, rect.y, rect.w, rect.h),
            None => surface.fill_rect(rect.x, rect.y, rect.w, rect.h, fallback),
        }
    }
}
