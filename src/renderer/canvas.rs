//! Canvas 2D backend (browser only)

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Glow, Renderer};
use crate::sim::Rect;

/// Draws onto an HTML canvas via its 2D context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn set_glow(&self, glow: Option<Glow>) {
        match glow {
            Some(glow) => {
                self.ctx.set_shadow_blur(glow.blur as f64);
                self.ctx.set_shadow_color(glow.color);
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }

    /// Trace a rounded rectangle as the current path
    fn rounded_path(&self, rect: Rect, radius: f32) {
        let (x, y, w, h) = (rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        let r = (radius as f64).min(w / 2.0).min(h / 2.0).max(0.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        // arc_to only fails on a negative radius
        let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = ctx.arc_to(x, y + h, x, y, r);
        let _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: f32, fill: &'static str, glow: Option<Glow>) {
        self.set_glow(glow);
        self.ctx.set_fill_style_str(fill);
        self.rounded_path(rect, radius);
        self.ctx.fill();
        self.set_glow(None);
    }

    fn draw_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        fill: &'static str,
        alpha: f32,
        glow: Option<Glow>,
    ) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.set_glow(glow);
        ctx.set_fill_style_str(fill);
        ctx.begin_path();
        let _ = ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
        ctx.restore();
    }

    fn draw_gradient_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        stops: (&'static str, &'static str),
        outline: Option<&'static str>,
    ) {
        let ctx = &self.ctx;
        let gradient = ctx.create_linear_gradient(
            rect.x as f64,
            rect.y as f64,
            rect.x as f64,
            rect.bottom() as f64,
        );
        if gradient.add_color_stop(0.0, stops.0).is_err()
            || gradient.add_color_stop(1.0, stops.1).is_err()
        {
            log::warn!("Bad gradient stops {:?}", stops);
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        self.rounded_path(rect, radius);
        ctx.fill();

        if let Some(stroke) = outline {
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(1.0);
            ctx.stroke();
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, fill: &'static str) {
        let ctx = &self.ctx;
        ctx.set_font(&format!("bold {}px sans-serif", size.round()));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str(fill);
        let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
