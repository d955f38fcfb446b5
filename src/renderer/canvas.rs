//! Canvas 2D surface (wasm32)

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::{Surface, TextStyle};

/// `Surface` over a browser 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        // arc only fails on a negative radius
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            TAU,
        );
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.ctx.set_font(style.font);
        self.ctx.set_fill_style_str(style.color);
        self.ctx.set_text_align(style.align.as_str());
        if let Err(err) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::debug!("fill_text failed: {err:?}");
        }
    }

    fn draw_image(&mut self, image: &HtmlImageElement, x: f32, y: f32, w: f32, h: f32) {
        if let Err(err) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image, x as f64, y as f64, w as f64, h as f64,
        ) {
            log::debug!("draw_image failed: {err:?}");
        }
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        let _ = self.ctx.translate(dx as f64, dy as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_shadow(&mut self, color: &str, blur: f32) {
        self.ctx.set_shadow_color(color);
        self.ctx.set_shadow_blur(blur as f64);
    }
}
