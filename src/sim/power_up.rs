//! Falling power-up pickups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Temporarily widens the paddle
    Expand,
    /// Adds one ball at the paddle
    ExtraBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Expand, PowerUpKind::ExtraBall];

    /// One-glyph label drawn on the pickup
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Expand => "E",
            PowerUpKind::ExtraBall => "+",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PowerUpKind::Expand => "#39ff14",
            PowerUpKind::ExtraBall => "#ffd700",
        }
    }
}

/// A pickup entity; `pos` is its center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub fall_speed: f32,
    pub size: f32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, fall_speed: f32, size: f32) -> Self {
        Self {
            kind,
            pos,
            fall_speed,
            size,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.fall_speed;
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Entirely below the playfield
    pub fn is_expired(&self, field_height: f32) -> bool {
        self.pos.y - self.size / 2.0 > field_height
    }
}
