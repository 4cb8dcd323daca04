//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod ball;
pub mod brick;
pub mod geom;
pub mod paddle;
pub mod particle;
pub mod power_up;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use brick::{Brick, BrickHit, BrickStatus, tier_colors};
pub use geom::Rect;
pub use paddle::Paddle;
pub use particle::{Particle, Particles};
pub use power_up::{PowerUp, PowerUpKind};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
