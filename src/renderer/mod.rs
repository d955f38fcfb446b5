//! Rendering module
//!
//! The scene is drawn through the `Surface` trait so the same drawing code
//! runs against a browser canvas or a test recorder. Rendering only reads
//! `GameState`.

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

pub use assets::{Assets, SPRITES, Sprite};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::Renderer;

use glam::Vec2;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font, fill color and alignment for one text draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand
    pub font: &'static str,
    /// CSS color
    pub color: &'static str,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(font: &'static str, color: &'static str, align: TextAlign) -> Self {
        Self { font, color, align }
    }

    pub const fn with_color(self, color: &'static str) -> Self {
        Self { color, ..self }
    }
}

/// Immediate-mode 2D drawing target.
///
/// Colors are CSS strings. `save`/`restore` scope translation, alpha and shadow.
pub trait Surface {
    /// Drawable image handle
    type Image;

    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
    fn draw_image(&mut self, image: &Self::Image, x: f32, y: f32, w: f32, h: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn set_alpha(&mut self, alpha: f32);
    /// Glow around subsequent fills; blur 0 disables it
    fn set_shadow(&mut self, color: &str, blur: f32);
}

/// Test double that records every call
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Clear,
        FillRect {
            x: f32,
            y: f32,
            w: f32,
            h: f32,
            color: String,
        },
        FillCircle {
            center: Vec2,
            radius: f32,
            color: String,
        },
        StrokeCircle {
            center: Vec2,
            radius: f32,
        },
        Text {
            text: String,
            x: f32,
            y: f32,
            style: TextStyle,
        },
        Image {
            id: u32,
            x: f32,
            y: f32,
        },
        Save,
        Restore,
        Translate(f32, f32),
        Alpha(f32),
        Shadow(f32),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
    }

    impl RecordingSurface {
        pub fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn has_text(&self, needle: &str) -> bool {
            self.texts().iter().any(|t| t.contains(needle))
        }

        pub fn text_style(&self, exact: &str) -> Option<TextStyle> {
            self.calls.iter().find_map(|c| match c {
                Call::Text { text, style, .. } if text == exact => Some(*style),
                _ => None,
            })
        }

        pub fn rects_with_color(&self, wanted: &str) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::FillRect { color, .. } if color == wanted))
                .count()
        }

        pub fn translations(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Translate(..)))
                .count()
        }
    }

    impl Surface for RecordingSurface {
        type Image = u32;

        fn clear(&mut self, _width: f32, _height: f32) {
            self.calls.push(Call::Clear);
        }

        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
            self.calls.push(Call::FillRect {
                x,
                y,
                w,
                h,
                color: color.to_string(),
            });
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
            self.calls.push(Call::FillCircle {
                center,
                radius,
                color: color.to_string(),
            });
        }

        fn stroke_circle(&mut self, center: Vec2, radius: f32, _line_width: f32, _color: &str) {
            self.calls.push(Call::StrokeCircle { center, radius });
        }

        fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
            self.calls.push(Call::Text {
                text: text.to_string(),
                x,
                y,
                style: *style,
            });
        }

        fn draw_image(&mut self, image: &u32, x: f32, y: f32, _w: f32, _h: f32) {
            self.calls.push(Call::Image { id: *image, x, y });
        }

        fn save(&mut self) {
            self.calls.push(Call::Save);
        }

        fn restore(&mut self) {
            self.calls.push(Call::Restore);
        }

        fn translate(&mut self, dx: f32, dy: f32) {
            self.calls.push(Call::Translate(dx, dy));
        }

        fn set_alpha(&mut self, alpha: f32) {
            self.calls.push(Call::Alpha(alpha));
        }

        fn set_shadow(&mut self, _color: &str, blur: f32) {
            self.calls.push(Call::Shadow(blur));
        }
    }
}
