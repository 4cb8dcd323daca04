//! Round state and entity collections
//!
//! `GameState` exclusively owns every entity. Nothing outside the sim mutates
//! it except through `tick` and the round lifecycle methods here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::ball::Ball;
use super::brick::{self, Brick};
use super::paddle::Paddle;
use super::particle::Particles;
use super::power_up::{PowerUp, PowerUpKind};
use crate::tuning::{ConfigError, Tuning};

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// No round active, waiting for start
    Idle,
    /// Frame loop active
    Running,
    /// Every brick destroyed
    Won,
    /// Out of lives
    Lost,
}

impl GamePhase {
    /// Won or lost
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    WallBounce { pos: Vec2 },
    PaddleHit { pos: Vec2 },
    BrickHit { index: usize, health: u8 },
    BrickDestroyed { index: usize },
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    ExpandEnded,
    BallLost,
    LifeLost { lives: u8 },
    Won,
    Lost,
}

/// Complete game state (deterministic)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Ticks simulated this round
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    /// Fixed grid; destroyed bricks are never removed
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Particles,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state in `Idle`, laid out for a round but not running.
    ///
    /// Fails if `tuning` does not pass `Tuning::validate`.
    pub fn new(seed: u64, tuning: Tuning, particle_cap: usize) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            paddle: Paddle::new(&tuning),
            bricks: brick::layout(&tuning),
            lives: tuning.starting_lives,
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            time_ticks: 0,
            balls: Vec::new(),
            power_ups: Vec::new(),
            particles: Particles::new(particle_cap),
            events: Vec::new(),
        };
        state.spawn_ball_at_start();
        Ok(state)
    }

    /// Reinitialize every entity and enter `Running`
    pub fn start_round(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.time_ticks = 0;
        self.paddle = Paddle::new(&self.tuning);
        self.bricks = brick::layout(&self.tuning);
        self.balls.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.events.clear();
        self.spawn_ball_at_start();
        self.phase = GamePhase::Running;
    }

    /// Default ball spawn point
    pub fn ball_start_pos(&self) -> Vec2 {
        Vec2::new(
            self.tuning.field_width / 2.0,
            self.tuning.field_height - self.tuning.ball_start_offset,
        )
    }

    pub fn spawn_ball_at_start(&mut self) {
        let pos = self.ball_start_pos();
        self.spawn_ball(pos);
    }

    /// Spawn a ball at `pos` with the default launch velocity
    pub fn spawn_ball(&mut self, pos: Vec2) {
        let ball = Ball::launch(pos, &self.tuning, &mut self.rng);
        self.balls.push(ball);
    }

    pub fn field(&self) -> Vec2 {
        Vec2::new(self.tuning.field_width, self.tuning.field_height)
    }

    pub fn all_bricks_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_alive())
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }

    /// Deterministic per-tick seed for cosmetic scatter
    pub(crate) fn particle_seed(&self, salt: u32) -> u32 {
        (self.time_ticks as u32).wrapping_mul(31337).wrapping_add(salt)
    }

    /// Resolve a hit on brick `index`: score, particles and the power-up roll
    pub fn hit_brick(&mut self, index: usize) {
        let Some(hit) = self.bricks[index].hit(&self.tuning) else {
            return;
        };
        let brick = &self.bricks[index];
        let center = brick.rect.center();
        let health = brick.health;

        self.score += hit.points;
        let seed = self.particle_seed(index as u32);
        self.particles.burst(
            center,
            hit.burst_color,
            self.tuning.particles_brick,
            seed,
            self.tuning.particle_spread,
        );
        self.events.push(GameEvent::BrickHit { index, health });

        if hit.destroyed {
            self.events.push(GameEvent::BrickDestroyed { index });
            // Plain compare so an out-of-range chance saturates instead of panicking
            if self.rng.random::<f64>() < self.tuning.drop_chance {
                let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
                self.power_ups.push(PowerUp::new(
                    kind,
                    center,
                    self.tuning.power_up_fall_speed,
                    self.tuning.power_up_size,
                ));
                self.events.push(GameEvent::PowerUpSpawned { kind });
                log::debug!("Power-up {:?} dropped at ({:.0}, {:.0})", kind, center.x, center.y);
            }
        }
    }

    /// Apply a collected power-up's effect and award its bonus
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Expand => self.paddle.expand(),
            PowerUpKind::ExtraBall => {
                let pos = self.paddle.top_center() - Vec2::new(0.0, self.tuning.ball_radius);
                self.spawn_ball(pos);
            }
        }
        self.score += self.tuning.score_power_up;
        self.events.push(GameEvent::PowerUpCollected { kind });
        log::debug!("Power-up {:?} collected", kind);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::brick::BrickStatus;

    fn state() -> GameState {
        GameState::new(12345, Tuning::default(), 100).unwrap()
    }

    #[test]
    fn test_new_is_idle_with_layout() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Idle);
        assert_eq!(s.lives, 3);
        assert_eq!(s.balls.len(), 1);
        assert_eq!(s.balls[0].pos, Vec2::new(400.0, 540.0));
        assert_eq!(s.bricks.len(), 45);
    }

    #[test]
    fn test_start_round_resets() {
        let mut s = state();
        s.start_round();
        s.score = 900;
        s.lives = 1;
        s.balls.clear();
        s.bricks[0].status = BrickStatus::Destroyed;
        s.start_round();
        assert_eq!(s.phase, GamePhase::Running);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);
        assert_eq!(s.balls.len(), 1);
        assert_eq!(s.bricks_remaining(), 45);
    }

    #[test]
    fn test_destroying_one_hit_brick_scores_600() {
        let mut s = state();
        s.tuning.drop_chance = 1.0;
        s.bricks[40].health = 1;
        s.hit_brick(40);
        assert_eq!(s.score, 600);
        assert_eq!(s.bricks[40].status, BrickStatus::Destroyed);
        assert_eq!(s.power_ups.len(), 1);
        assert_eq!(s.power_ups[0].pos, s.bricks[40].rect.center());
        assert!(!s.particles.is_empty());
    }

    #[test]
    fn test_no_drop_when_chance_is_zero() {
        let mut s = state();
        s.tuning.drop_chance = 0.0;
        for i in 36..45 {
            s.hit_brick(i);
        }
        assert!(s.power_ups.is_empty());
        assert_eq!(s.score, 9 * 600);
    }

    #[test]
    fn test_hit_on_destroyed_brick_is_inert() {
        let mut s = state();
        s.hit_brick(44);
        let score = s.score;
        s.hit_brick(44);
        assert_eq!(s.score, score);
    }

    #[test]
    fn test_drop_rate_is_roughly_fifteen_percent() {
        let mut s = GameState::new(2024, Tuning::default(), 0).unwrap();
        let mut drops = 0;
        for _ in 0..2000 {
            s.bricks[44].status = BrickStatus::Alive;
            s.bricks[44].health = 1;
            s.power_ups.clear();
            s.hit_brick(44);
            drops += s.power_ups.len();
        }
        assert!((200..400).contains(&drops), "drops = {drops}");
    }

    #[test]
    fn test_extra_ball_spawns_at_paddle() {
        let mut s = state();
        s.apply_power_up(PowerUpKind::ExtraBall);
        assert_eq!(s.balls.len(), 2);
        assert_eq!(s.balls[1].pos.x, s.paddle.center_x());
        assert_eq!(s.balls[1].pos.y, s.paddle.y - s.tuning.ball_radius);
        assert_eq!(s.score, 200);
    }

    #[test]
    fn test_rejects_invalid_tuning() {
        let tuning = Tuning {
            drop_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(1, tuning, 0),
            Err(ConfigError::Invalid { field: "drop_chance", .. })
        ));
    }

    #[test]
    fn test_out_of_range_drop_chance_saturates() {
        let mut s = state();
        s.tuning.drop_chance = 1.5;
        s.bricks[44].health = 1;
        s.hit_brick(44);
        assert_eq!(s.power_ups.len(), 1);

        s.tuning.drop_chance = f64::NAN;
        s.bricks[43].health = 1;
        s.hit_brick(43);
        assert_eq!(s.power_ups.len(), 1);
    }
}
