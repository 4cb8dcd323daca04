//! Ball movement and collision response

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::paddle::Paddle;
use crate::tuning::Tuning;

pub const BALL_COLOR: &str = "#ffffff";

/// A ball entity. Velocity is in pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Ball at `pos` with the default upward launch and a random horizontal spread
    pub fn launch(pos: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let spread = (rng.random::<f32>() - 0.5) * tuning.launch_spread;
        Self::new(pos, Vec2::new(spread, -tuning.launch_speed_y), tuning.ball_radius)
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    /// Advance by one tick and resolve side/top walls.
    ///
    /// On contact the ball is put back exactly onto the wall and the velocity
    /// component is forced away from it, so a ball that is still touching on
    /// the next tick cannot be flipped back into the wall. Returns true if a
    /// wall was hit.
    pub fn update(&mut self, field: Vec2) -> bool {
        self.pos += self.vel;
        let mut bounced = false;

        if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = self.vel.x.abs();
            bounced = true;
        } else if self.pos.x + self.radius > field.x {
            self.pos.x = field.x - self.radius;
            self.vel.x = -self.vel.x.abs();
            bounced = true;
        }

        if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            self.vel.y = self.vel.y.abs();
            bounced = true;
        }

        bounced
    }

    /// Fell out of the bottom of the playfield
    pub fn is_lost(&self, field_height: f32) -> bool {
        self.pos.y + self.radius > field_height
    }

    /// Vertical extent overlaps the paddle band and the center is strictly
    /// inside the paddle's horizontal extent
    pub fn touches_paddle(&self, paddle: &Paddle) -> bool {
        self.pos.y + self.radius > paddle.y
            && self.pos.y - self.radius < paddle.y + paddle.height
            && self.pos.x > paddle.x
            && self.pos.x < paddle.x + paddle.width
    }

    /// Deflect off the paddle by impact offset and seat the ball on top of it.
    ///
    /// Offset from the paddle center maps linearly to a bounce angle of at most
    /// `max_bounce_angle`; vertical speed is sped up (capped at `max_speed_y`)
    /// and always points up.
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle, tuning: &Tuning) {
        let half = paddle.width / 2.0;
        let offset = ((self.pos.x - paddle.center_x()) / half).clamp(-1.0, 1.0);
        let angle = offset * tuning.max_bounce_angle;

        self.vel.y = -(self.vel.y.abs() * tuning.paddle_speedup).min(tuning.max_speed_y);
        self.vel.x = angle.sin() * tuning.bounce_speed;
        self.pos.y = paddle.y - self.radius;
    }

    /// Simplified brick response: vertical direction flips regardless of
    /// which brick face was struck
    pub fn bounce_off_brick(&mut self) {
        self.vel.y = -self.vel.y;
    }
}
