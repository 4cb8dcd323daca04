//! Rendering
//!
//! The sim never draws. `draw_frame` is a pure function of `GameState` that
//! emits calls against the `Renderer` capability, so a round can run headless
//! or be recorded in tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::ball::BALL_COLOR;
use crate::sim::paddle::PADDLE_COLOR;
use crate::sim::{GameState, Rect};

/// Brick bevel stroke
pub const BRICK_OUTLINE: &str = "rgba(255,255,255,0.2)";
/// Glyph color on power-up pills
pub const POWER_UP_TEXT: &str = "#0a0a1a";

pub const PADDLE_CORNER: f32 = 8.0;
pub const BRICK_CORNER: f32 = 4.0;

/// Soft shadow around a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: &'static str,
    pub blur: f32,
}

/// 2D drawing capability provided by the host
pub trait Renderer {
    fn clear(&mut self);
    fn draw_rounded_rect(&mut self, rect: Rect, radius: f32, fill: &'static str, glow: Option<Glow>);
    fn draw_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        fill: &'static str,
        alpha: f32,
        glow: Option<Glow>,
    );
    /// Vertical two-stop gradient, optionally stroked
    fn draw_gradient_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        stops: (&'static str, &'static str),
        outline: Option<&'static str>,
    );
    /// Text centered on `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, fill: &'static str);
}

/// Draw one frame: paddle, balls, bricks, power-ups, particles
pub fn draw_frame(state: &GameState, settings: &Settings, renderer: &mut impl Renderer) {
    let glow = |color: &'static str, blur: f32| settings.effective_glow().then_some(Glow { color, blur });

    renderer.clear();

    renderer.draw_rounded_rect(
        state.paddle.rect(),
        PADDLE_CORNER,
        PADDLE_COLOR,
        glow(PADDLE_COLOR, 15.0),
    );

    for ball in &state.balls {
        renderer.draw_circle(ball.pos, ball.radius, BALL_COLOR, 1.0, glow(BALL_COLOR, 20.0));
    }

    for brick in state.bricks.iter().filter(|b| b.is_alive()) {
        renderer.draw_gradient_rect(brick.rect, BRICK_CORNER, brick.colors(), Some(BRICK_OUTLINE));
    }

    for power_up in &state.power_ups {
        let color = power_up.kind.color();
        renderer.draw_rounded_rect(power_up.bounds(), power_up.size / 2.0, color, glow(color, 10.0));
        renderer.draw_text(power_up.kind.label(), power_up.pos, power_up.size * 0.65, POWER_UP_TEXT);
    }

    for particle in state.particles.iter() {
        renderer.draw_circle(particle.pos, particle.size, particle.color, particle.alpha, None);
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    RoundedRect {
        rect: Rect,
        radius: f32,
        fill: &'static str,
        glow: Option<Glow>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: &'static str,
        alpha: f32,
        glow: Option<Glow>,
    },
    GradientRect {
        rect: Rect,
        radius: f32,
        stops: (&'static str, &'static str),
        outline: Option<&'static str>,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        fill: &'static str,
    },
}

/// Renderer that records the current frame's calls; `clear` starts a new frame
#[derive(Debug, Default)]
pub struct DrawList {
    pub calls: Vec<DrawCall>,
    /// Number of `clear` calls seen
    pub frames: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DrawList {
    fn clear(&mut self) {
        self.calls.clear();
        self.frames += 1;
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: f32, fill: &'static str, glow: Option<Glow>) {
        self.calls.push(DrawCall::RoundedRect {
            rect,
            radius,
            fill,
            glow,
        });
    }

    fn draw_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        fill: &'static str,
        alpha: f32,
        glow: Option<Glow>,
    ) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            fill,
            alpha,
            glow,
        });
    }

    fn draw_gradient_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        stops: (&'static str, &'static str),
        outline: Option<&'static str>,
    ) {
        self.calls.push(DrawCall::GradientRect {
            rect,
            radius,
            stops,
            outline,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, fill: &'static str) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            size,
            fill,
        });
    }
}
