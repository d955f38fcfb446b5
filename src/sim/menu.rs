//! Menu option layout, highlight cursor and hit testing
//!
//! Layouts are shared by the state machine (hover/click) and the renderer
//! (text rows) so the two never disagree about where an option sits.

use glam::Vec2;

use super::geometry::{Rect, rect_index_at_point};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

pub const INTRO_OPTIONS: [&str; 2] = ["Start", "Help"];
pub const PAUSE_OPTIONS: [&str; 3] = ["Continue", "Restart", "End Game"];
pub const CONFIRM_OPTIONS: [&str; 2] = ["Yes", "No"];

/// Vertical list of options centered on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuLayout {
    pub options: &'static [&'static str],
    /// Row spacing (px)
    pub spacing: f32,
    /// Hit-box size
    pub width: f32,
    pub height: f32,
}

pub const INTRO_MENU: MenuLayout = MenuLayout {
    options: &INTRO_OPTIONS,
    spacing: 28.0,
    width: 220.0,
    height: 24.0,
};

pub const PAUSE_MENU: MenuLayout = MenuLayout {
    options: &PAUSE_OPTIONS,
    spacing: 26.0,
    width: 240.0,
    height: 24.0,
};

pub const CONFIRM_MENU: MenuLayout = MenuLayout {
    options: &CONFIRM_OPTIONS,
    spacing: 26.0,
    width: 220.0,
    height: 24.0,
};

impl MenuLayout {
    /// Y of the first row
    fn first_row() -> f32 {
        CANVAS_HEIGHT / 2.0 - 10.0
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Text row for option `i`
    pub fn row_y(&self, i: usize) -> f32 {
        Self::first_row() + i as f32 * self.spacing
    }

    /// Hit boxes, one per option, centered on their rows
    pub fn option_rects(&self) -> Vec<Rect> {
        (0..self.len())
            .map(|i| Rect::centered(CANVAS_WIDTH / 2.0, self.row_y(i), self.width, self.height))
            .collect()
    }

    /// Option under the pointer, if any
    pub fn hit(&self, pointer: Vec2) -> Option<usize> {
        rect_index_at_point(&self.option_rects(), pointer)
    }
}

/// Highlighted option index, clamped to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuCursor {
    pub index: usize,
}

impl MenuCursor {
    pub fn at(index: usize) -> Self {
        Self { index }
    }

    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn down(&mut self, layout: &MenuLayout) {
        self.index = (self.index + 1).min(layout.len().saturating_sub(1));
    }

    /// Follow the pointer when it is over an option
    pub fn hover(&mut self, layout: &MenuLayout, pointer: Vec2) {
        if let Some(i) = layout.hit(pointer) {
            self.index = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rects_are_centered_on_rows() {
        let rects = PAUSE_MENU.option_rects();
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0], Rect::new(120.0, 298.0, 240.0, 24.0));
        assert_eq!(rects[2].center().y, PAUSE_MENU.row_y(2));
    }

    #[test]
    fn test_cursor_clamps() {
        let mut c = MenuCursor::default();
        c.up();
        assert_eq!(c.index, 0);
        c.down(&INTRO_MENU);
        c.down(&INTRO_MENU);
        assert_eq!(c.index, 1);
    }

    #[test]
    fn test_hover_selects_but_miss_keeps() {
        let mut c = MenuCursor::at(0);
        let row = Vec2::new(CANVAS_WIDTH / 2.0, CONFIRM_MENU.row_y(1));
        c.hover(&CONFIRM_MENU, row);
        assert_eq!(c.index, 1);
        c.hover(&CONFIRM_MENU, Vec2::new(5.0, 5.0));
        assert_eq!(c.index, 1);
    }
}
