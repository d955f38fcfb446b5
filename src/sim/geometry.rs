//! Axis-aligned rectangles and overlap tests
//!
//! Every collision in the game is a rectangle-vs-rectangle test. Circular
//! bullets are approximated by their bounding square.

use glam::Vec2;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size with its top-left corner at `pos`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Bounding square of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        let d = radius * 2.0;
        Self::new(center.x - radius, center.y - radius, d, d)
    }

    /// Rectangle of the given size centered horizontally on `cx`, vertically on `cy`
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        aabb(self, other)
    }

    /// Inclusive point containment, used for menu hover tests
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Axis-aligned bounding box intersection
#[inline]
pub fn aabb(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Index of the first rectangle containing `p`, if any
pub fn rect_index_at_point(rects: &[Rect], p: Vec2) -> Option<usize> {
    rects.iter().position(|r| r.contains_point(p))
}
