//! Data-driven game balance
//!
//! Every magnitude the simulation uses lives here so balancing never touches
//! logic. Loaded from JSON; absent keys fall back to the `consts` defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::settings::Settings;

/// Errors produced while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_bottom_offset: f32,
    pub paddle_speed: f32,
    pub expand_factor: f32,
    pub expand_ticks: u32,

    // === Ball ===
    pub ball_radius: f32,
    pub launch_speed_y: f32,
    pub launch_spread: f32,
    pub bounce_speed: f32,
    pub max_bounce_angle: f32,
    pub paddle_speedup: f32,
    pub max_speed_y: f32,
    pub ball_start_offset: f32,

    // === Bricks ===
    /// Health of each row, top to bottom. Row count is its length.
    pub row_health: Vec<u8>,
    pub brick_cols: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,

    // === Scoring ===
    pub score_hit: u64,
    pub score_destroyed: u64,
    pub score_power_up: u64,
    pub starting_lives: u8,

    // === Power-ups ===
    pub drop_chance: f64,
    pub power_up_fall_speed: f32,
    pub power_up_size: f32,

    // === Particles ===
    pub particles_wall: u32,
    pub particles_paddle: u32,
    pub particles_brick: u32,
    pub particle_fade: f32,
    pub particle_spread: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: PLAYFIELD_WIDTH,
            field_height: PLAYFIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_speed: PADDLE_SPEED,
            expand_factor: PADDLE_EXPAND_FACTOR,
            expand_ticks: PADDLE_EXPAND_TICKS,

            ball_radius: BALL_RADIUS,
            launch_speed_y: BALL_LAUNCH_SPEED_Y,
            launch_spread: BALL_LAUNCH_SPREAD,
            bounce_speed: BALL_BOUNCE_SPEED,
            max_bounce_angle: BALL_MAX_BOUNCE_ANGLE,
            paddle_speedup: BALL_PADDLE_SPEEDUP,
            max_speed_y: BALL_MAX_SPEED_Y,
            ball_start_offset: BALL_START_OFFSET,

            // Two rows of 3 hits, two of 2, one of 1
            row_health: vec![3, 3, 2, 2, 1],
            brick_cols: BRICK_COLS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,
            brick_offset_left: BRICK_OFFSET_LEFT,

            score_hit: SCORE_BRICK_HIT,
            score_destroyed: SCORE_BRICK_DESTROYED,
            score_power_up: SCORE_POWER_UP,
            starting_lives: STARTING_LIVES,

            drop_chance: POWER_UP_DROP_CHANCE,
            power_up_fall_speed: POWER_UP_FALL_SPEED,
            power_up_size: POWER_UP_SIZE,

            particles_wall: PARTICLES_WALL,
            particles_paddle: PARTICLES_PADDLE,
            particles_brick: PARTICLES_BRICK,
            particle_fade: PARTICLE_FADE,
            particle_spread: PARTICLE_SPREAD,
        }
    }
}

impl Tuning {
    /// Total number of bricks in the grid
    pub fn brick_count(&self) -> usize {
        self.row_health.len() * self.brick_cols
    }

    /// Right edge of the last brick column
    fn grid_right(&self) -> f32 {
        let cols = self.brick_cols as f32;
        self.brick_offset_left + cols * self.brick_width + (cols - 1.0).max(0.0) * self.brick_padding
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("launch_speed_y", self.launch_speed_y),
            ("bounce_speed", self.bounce_speed),
            ("max_speed_y", self.max_speed_y),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("power_up_fall_speed", self.power_up_fall_speed),
            ("power_up_size", self.power_up_size),
            ("particle_fade", self.particle_fade),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        if !(0.0..=1.0).contains(&self.drop_chance) {
            return Err(invalid("drop_chance", format!("must be within [0, 1], got {}", self.drop_chance)));
        }
        if self.paddle_speedup < 1.0 {
            return Err(invalid("paddle_speedup", "must be at least 1.0"));
        }
        if self.expand_factor < 1.0 {
            return Err(invalid("expand_factor", "must be at least 1.0"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }
        if self.row_health.is_empty() || self.brick_cols == 0 {
            return Err(invalid("row_health", "brick grid must not be empty"));
        }
        if self.row_health.contains(&0) {
            return Err(invalid("row_health", "every row needs at least 1 health"));
        }
        if self.paddle_width * self.expand_factor > self.field_width {
            return Err(invalid("paddle_width", "expanded paddle is wider than the playfield"));
        }
        if self.ball_radius * 2.0 > self.field_width {
            return Err(invalid("ball_radius", "ball is wider than the playfield"));
        }
        if self.grid_right() > self.field_width {
            return Err(invalid("brick_cols", "brick grid is wider than the playfield"));
        }
        Ok(())
    }
}

/// Full configuration: gameplay tuning plus display settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tuning: Tuning,
    pub settings: Settings,
}

impl Config {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.tuning.validate()?;
        Ok(config)
    }

    /// Read a JSON config from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
