//! Destructible bricks and the grid layout

use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::tuning::Tuning;

/// Two-stop gradients by remaining health (index 0 = 1 hit left)
pub const TIER_COLORS: [(&str, &str); 3] = [
    ("#00f2ff", "#0097a7"), // Cyan - 1 hit
    ("#7000ff", "#4a00aa"), // Purple - 2 hits
    ("#ff007a", "#aa0051"), // Pink - 3 hits
];

/// Gradient for a health tier; anything unmapped falls back to tier 1
pub fn tier_colors(health: u8) -> (&'static str, &'static str) {
    match health {
        1..=3 => TIER_COLORS[health as usize - 1],
        _ => TIER_COLORS[0],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Alive,
    /// Terminal: inert for collision and drawing
    Destroyed,
}

/// Result of a successful hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickHit {
    /// Points awarded (per-hit plus destruction bonus if destroyed)
    pub points: u64,
    pub destroyed: bool,
    /// Particle color for the burst
    pub burst_color: &'static str,
}

/// A brick entity. Destroyed bricks stay in the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub health: u8,
    pub status: BrickStatus,
}

impl Brick {
    pub fn new(rect: Rect, health: u8) -> Self {
        Self {
            rect,
            health,
            status: BrickStatus::Alive,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    /// Gradient for the current health
    pub fn colors(&self) -> (&'static str, &'static str) {
        tier_colors(self.health)
    }

    /// Take one hit. Returns `None` for an already destroyed brick.
    ///
    /// The burst takes the color of the tier the brick drops to, or of the
    /// last tier it held when the hit destroys it.
    pub fn hit(&mut self, tuning: &Tuning) -> Option<BrickHit> {
        if !self.is_alive() {
            return None;
        }
        self.health = self.health.saturating_sub(1);
        let mut points = tuning.score_hit;

        let destroyed = self.health == 0;
        let burst_color = if destroyed {
            self.status = BrickStatus::Destroyed;
            points += tuning.score_destroyed;
            tier_colors(1).0
        } else {
            tier_colors(self.health).0
        };

        Some(BrickHit {
            points,
            destroyed,
            burst_color,
        })
    }
}

/// Build the starting grid, row-major from the top-left
pub fn layout(tuning: &Tuning) -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(tuning.brick_count());
    for (row, &health) in tuning.row_health.iter().enumerate() {
        for col in 0..tuning.brick_cols {
            let x = col as f32 * (tuning.brick_width + tuning.brick_padding) + tuning.brick_offset_left;
            let y = row as f32 * (tuning.brick_height + tuning.brick_padding) + tuning.brick_offset_top;
            bricks.push(Brick::new(
                Rect::new(x, y, tuning.brick_width, tuning.brick_height),
                health,
            ));
        }
    }
    bricks
}
