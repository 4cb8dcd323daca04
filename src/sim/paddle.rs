//! The player's paddle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::tuning::Tuning;

pub const PADDLE_COLOR: &str = "#ffffff";

/// Horizontal bar at a fixed height; `x` is its left edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    /// Current width (base or expanded)
    pub width: f32,
    pub base_width: f32,
    pub height: f32,
    /// Keyboard movement per tick
    pub speed: f32,
    /// Ticks left on the expand modifier (0 = inactive)
    pub expand_ticks: u32,
    expand_factor: f32,
    expand_duration: u32,
    field_width: f32,
}

impl Paddle {
    /// Centered paddle at its resting height
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: (tuning.field_width - tuning.paddle_width) / 2.0,
            y: tuning.field_height - tuning.paddle_bottom_offset,
            width: tuning.paddle_width,
            base_width: tuning.paddle_width,
            height: tuning.paddle_height,
            speed: tuning.paddle_speed,
            expand_ticks: 0,
            expand_factor: tuning.expand_factor,
            expand_duration: tuning.expand_ticks,
            field_width: tuning.field_width,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Point on the paddle's top edge, horizontally centered
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.y)
    }

    pub fn is_expanded(&self) -> bool {
        self.expand_ticks > 0
    }

    /// Center the paddle on `target_x`, clamped to the playfield
    pub fn move_to(&mut self, target_x: f32) {
        self.x = target_x - self.width / 2.0;
        self.clamp();
    }

    /// Move one tick's worth toward the held direction(s)
    pub fn apply_direction(&mut self, left: bool, right: bool) {
        let dir = (right as i8 - left as i8) as f32;
        self.x += dir * self.speed;
        self.clamp();
    }

    /// Widen the paddle and (re)start the expand timer. Does not stack.
    pub fn expand(&mut self) {
        let center = self.center_x();
        self.width = self.base_width * self.expand_factor;
        self.expand_ticks = self.expand_duration;
        self.x = center - self.width / 2.0;
        self.clamp();
    }

    /// Count down the expand timer; revert to base width when it runs out.
    /// Returns true on the tick the modifier expires.
    pub fn tick(&mut self) -> bool {
        if self.expand_ticks == 0 {
            return false;
        }
        self.expand_ticks -= 1;
        if self.expand_ticks > 0 {
            return false;
        }
        let center = self.center_x();
        self.width = self.base_width;
        self.x = center - self.width / 2.0;
        self.clamp();
        true
    }

    /// Enforce x in [0, field_width - width]
    fn clamp(&mut self) {
        self.x = self.x.clamp(0.0, (self.field_width - self.width).max(0.0));
    }
}
