//! Neon Breaker - A brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, round state)
//! - `game`: Round controller driving the sim against host capabilities
//! - `renderer`: Draw-call capability and the state-to-draw-call pass
//! - `ui`: Score/lives/overlay capability
//! - `platform`: Input snapshot and frame scheduling
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Config, ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame gap fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Distance from the playfield bottom to the paddle's top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 40.0;
    /// Keyboard movement (pixels per tick)
    pub const PADDLE_SPEED: f32 = 9.0;
    pub const PADDLE_EXPAND_FACTOR: f32 = 1.6;
    /// ~10 seconds at 60 ticks per second
    pub const PADDLE_EXPAND_TICKS: u32 = 600;

    /// Ball defaults (velocities in pixels per tick)
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_LAUNCH_SPEED_Y: f32 = 6.0;
    /// Launch speedX is uniform in [-spread/2, spread/2)
    pub const BALL_LAUNCH_SPREAD: f32 = 10.0;
    /// Horizontal magnitude imparted by a paddle bounce
    pub const BALL_BOUNCE_SPEED: f32 = 10.0;
    /// 60 degrees
    pub const BALL_MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    pub const BALL_PADDLE_SPEEDUP: f32 = 1.05;
    pub const BALL_MAX_SPEED_Y: f32 = 14.0;
    /// Ball spawn height above the playfield bottom
    pub const BALL_START_OFFSET: f32 = 60.0;

    /// Brick grid defaults
    pub const BRICK_COLS: usize = 9;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 80.0;
    pub const BRICK_OFFSET_LEFT: f32 = 45.0;

    /// Scoring
    pub const SCORE_BRICK_HIT: u64 = 100;
    pub const SCORE_BRICK_DESTROYED: u64 = 500;
    pub const SCORE_POWER_UP: u64 = 200;

    pub const STARTING_LIVES: u8 = 3;

    /// Power-up defaults
    pub const POWER_UP_DROP_CHANCE: f64 = 0.15;
    pub const POWER_UP_FALL_SPEED: f32 = 3.0;
    pub const POWER_UP_SIZE: f32 = 22.0;

    /// Particle bursts
    pub const PARTICLES_WALL: u32 = 5;
    pub const PARTICLES_PADDLE: u32 = 8;
    pub const PARTICLES_BRICK: u32 = 15;
    pub const PARTICLE_FADE: f32 = 0.02;
    /// Per-axis particle velocity is uniform in [-spread/2, spread/2)
    pub const PARTICLE_SPREAD: f32 = 8.0;
}
