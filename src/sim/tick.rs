//! Fixed timestep simulation tick
//!
//! Advances a running round by one frame. Update order:
//! paddle (input, expand timer) → balls (walls, paddle, bricks, loss) →
//! win check → life loss → power-ups → particles.

use super::ball::BALL_COLOR;
use super::paddle::PADDLE_COLOR;
use super::state::{GameEvent, GamePhase, GameState};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Pointer x in playfield coordinates
    pub target_x: Option<f32>,
    /// Held directional keys
    pub left: bool,
    pub right: bool,
    /// Demo mode - the paddle plays itself
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_ticks += 1;

    // Paddle
    let target_x = if input.autopilot {
        autopilot_target(state)
    } else {
        input.target_x
    };
    if let Some(x) = target_x {
        state.paddle.move_to(x);
    }
    if input.left || input.right {
        state.paddle.apply_direction(input.left, input.right);
    }
    if state.paddle.tick() {
        state.events.push(GameEvent::ExpandEnded);
        log::debug!("Paddle expand expired");
    }

    let out_of_balls = update_balls(state);

    // Evaluated after every brick hit this tick, so the final hit ends the round
    // now, even if the ball that made it was lost on the same tick
    if state.all_bricks_destroyed() {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        return;
    }

    if out_of_balls {
        lose_life(state);
        if state.phase != GamePhase::Running {
            return;
        }
    }

    update_power_ups(state);

    let fade = state.tuning.particle_fade;
    state.particles.update(fade);
}

/// Move and collide every ball; reverse iteration keeps removal safe.
/// Returns true if the last ball was lost this tick.
fn update_balls(state: &mut GameState) -> bool {
    let field = state.field();
    let mut lost_any = false;

    for i in (0..state.balls.len()).rev() {
        let mut ball = state.balls[i];

        if ball.update(field) {
            let seed = state.particle_seed(0x1000 + i as u32);
            state.particles.burst(
                ball.pos,
                BALL_COLOR,
                state.tuning.particles_wall,
                seed,
                state.tuning.particle_spread,
            );
            state.events.push(GameEvent::WallBounce { pos: ball.pos });
        }

        if ball.touches_paddle(&state.paddle) {
            ball.bounce_off_paddle(&state.paddle, &state.tuning);
            let seed = state.particle_seed(0x2000 + i as u32);
            state.particles.burst(
                ball.pos,
                PADDLE_COLOR,
                state.tuning.particles_paddle,
                seed,
                state.tuning.particle_spread,
            );
            state.events.push(GameEvent::PaddleHit { pos: ball.pos });
        }

        // At most one brick per ball per tick
        let bounds = ball.bounds();
        if let Some(index) = state
            .bricks
            .iter()
            .position(|b| b.is_alive() && b.rect.overlaps(&bounds))
        {
            state.hit_brick(index);
            ball.bounce_off_brick();
        }

        if ball.is_lost(field.y) {
            state.balls.remove(i);
            state.events.push(GameEvent::BallLost);
            lost_any = true;
            continue;
        }
        state.balls[i] = ball;
    }

    lost_any && state.balls.is_empty()
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost { lives: state.lives });
    log::debug!("Life lost, {} remaining", state.lives);

    if state.lives == 0 {
        state.phase = GamePhase::Lost;
        state.events.push(GameEvent::Lost);
    } else {
        state.spawn_ball_at_start();
    }
}

/// Fall, collect on paddle contact, expire below the playfield
fn update_power_ups(state: &mut GameState) {
    let paddle_rect = state.paddle.rect();
    let field_height = state.tuning.field_height;
    let mut collected = Vec::new();

    for i in (0..state.power_ups.len()).rev() {
        let power_up = &mut state.power_ups[i];
        power_up.update();
        let caught = power_up.bounds().overlaps(&paddle_rect);
        let expired = power_up.is_expired(field_height);

        if caught {
            collected.push(state.power_ups.remove(i).kind);
        } else if expired {
            let kind = state.power_ups.remove(i).kind;
            state.events.push(GameEvent::PowerUpExpired { kind });
        }
    }

    // Collected back-to-front; apply in spawn order
    for kind in collected.into_iter().rev() {
        state.apply_power_up(kind);
    }
}

/// Reflect `x` into [lo, hi] as if bouncing between walls
fn fold_into(x: f32, lo: f32, hi: f32) -> f32 {
    let span = hi - lo;
    if span <= 0.0 {
        return lo;
    }
    let mut t = (x - lo).rem_euclid(2.0 * span);
    if t > span {
        t = 2.0 * span - t;
    }
    lo + t
}

/// Where the demo paddle wants to be this tick
fn autopilot_target(state: &GameState) -> Option<f32> {
    let paddle = &state.paddle;

    // Most urgent threat: the lowest descending ball
    let threat = state
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(ball) = threat {
        // Lead the ball to the paddle line, folding in wall bounces
        let ticks = ((paddle.y - ball.radius - ball.pos.y) / ball.vel.y).max(0.0);
        let landing = fold_into(
            ball.pos.x + ball.vel.x * ticks,
            ball.radius,
            state.tuning.field_width - ball.radius,
        );
        // Oscillating offset so returns aren't all straight up
        let phase = state.time_ticks as f32 * 0.05;
        let offset = (phase.sin() * 0.7 + (phase * 0.37).sin() * 0.3) * paddle.width * 0.3;
        return Some(landing + offset);
    }

    // Nothing incoming: go for the lowest falling power-up
    state
        .power_ups
        .iter()
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.pos.x)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::ball::Ball;
    use crate::sim::brick::BrickStatus;
    use crate::sim::geom::Rect;
    use crate::sim::power_up::{PowerUp, PowerUpKind};
    use crate::tuning::Tuning;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default(), 256).unwrap();
        state.start_round();
        state
    }

    /// A ball that will fall out of the field this tick
    fn doomed_ball() -> Ball {
        Ball::new(Vec2::new(50.0, 595.0), Vec2::new(0.0, 6.0), 8.0)
    }

    fn destroy_all_but(state: &mut GameState, keep: usize) {
        for (i, brick) in state.bricks.iter_mut().enumerate() {
            if i != keep {
                brick.health = 0;
                brick.status = BrickStatus::Destroyed;
            }
        }
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut state = GameState::new(1, Tuning::default(), 0).unwrap();
        let before = state.balls[0];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.balls[0], before);
    }

    #[test]
    fn test_last_ball_lost_with_one_life_ends_round() {
        let mut state = running(5);
        state.lives = 1;
        state.balls = vec![doomed_ball()];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.lives, 0);
        assert!(state.balls.is_empty());
        assert!(state.events.contains(&GameEvent::Lost));

        // Halted: further ticks change nothing
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_last_ball_lost_respawns_when_lives_remain() {
        let mut state = running(5);
        state.balls = vec![doomed_ball()];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.lives, 2);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, state.ball_start_pos());
    }

    #[test]
    fn test_losing_one_of_several_balls_costs_nothing() {
        let mut state = running(5);
        state.balls = vec![
            Ball::new(Vec2::new(400.0, 300.0), Vec2::new(1.0, -6.0), 8.0),
            doomed_ball(),
        ];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 3);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(401.0, 294.0));
        assert!(state.events.contains(&GameEvent::BallLost));
    }

    #[test]
    fn test_two_balls_lost_same_tick_costs_one_life() {
        let mut state = running(5);
        state.balls = vec![doomed_ball(), doomed_ball()];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_extra_ball_pickup() {
        let mut state = running(9);
        let paddle_top = state.paddle.top_center();
        state.balls = vec![Ball::new(Vec2::new(400.0, 300.0), Vec2::new(0.0, -6.0), 8.0)];
        state.power_ups.push(PowerUp::new(
            PowerUpKind::ExtraBall,
            paddle_top - Vec2::new(0.0, 10.0),
            3.0,
            22.0,
        ));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.balls.len(), 2);
        assert_eq!(state.balls[1].pos.x, state.paddle.center_x());
        assert_eq!(state.score, 200);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_expand_pickup_widens_paddle() {
        let mut state = running(9);
        let paddle_top = state.paddle.top_center();
        state.power_ups.push(PowerUp::new(
            PowerUpKind::Expand,
            paddle_top - Vec2::new(0.0, 10.0),
            3.0,
            22.0,
        ));
        tick(&mut state, &TickInput::default());
        assert!(state.paddle.is_expanded());
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_missed_power_up_expires_without_score() {
        let mut state = running(9);
        state.power_ups.push(PowerUp::new(PowerUpKind::Expand, Vec2::new(20.0, 610.0), 3.0, 22.0));
        tick(&mut state, &TickInput::default());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.score, 0);
        assert!(!state.paddle.is_expanded());
    }

    #[test]
    fn test_final_brick_wins_same_tick() {
        let mut state = running(3);
        state.tuning.drop_chance = 0.0;
        let last = 44;
        destroy_all_but(&mut state, last);
        state.bricks[last].health = 1;
        let target = state.bricks[last].rect;
        // Moving up into the brick's bottom edge this tick
        state.balls = vec![Ball::new(
            Vec2::new(target.center().x, target.bottom() + 10.0),
            Vec2::new(0.0, -6.0),
            8.0,
        )];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bricks[last].status, BrickStatus::Destroyed);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.score, 600);
        assert!(state.events.contains(&GameEvent::Won));
    }

    #[test]
    fn test_one_brick_per_ball_per_tick() {
        let mut state = running(3);
        state.tuning.drop_chance = 0.0;
        // Straddle the gap between the first two bricks of the bottom row
        let left = state.bricks[36].rect;
        let x = left.right() + 5.0;
        state.balls = vec![Ball::new(Vec2::new(x, left.bottom() + 6.0), Vec2::new(0.0, -6.0), 8.0)];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bricks_remaining(), 44);
        assert_eq!(state.balls[0].vel.y, 6.0);
    }

    #[test]
    fn test_paddle_bounce_in_tick() {
        let mut state = running(3);
        let cx = state.paddle.center_x();
        state.balls = vec![Ball::new(Vec2::new(cx, 548.0), Vec2::new(0.0, 6.0), 8.0)];
        tick(&mut state, &TickInput::default());
        let ball = state.balls[0];
        assert!(ball.vel.y < 0.0);
        assert_eq!(ball.pos.y, state.paddle.y - 8.0);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::PaddleHit { .. })));
    }

    #[test]
    fn test_pointer_input_moves_paddle() {
        let mut state = running(3);
        let input = TickInput {
            target_x: Some(100.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, 40.0);
    }

    #[test]
    fn test_fold_into() {
        assert_eq!(fold_into(50.0, 0.0, 100.0), 50.0);
        assert_eq!(fold_into(120.0, 0.0, 100.0), 80.0);
        assert_eq!(fold_into(-30.0, 0.0, 100.0), 30.0);
    }

    #[test]
    fn test_autopilot_finishes_round() {
        let mut state = running(77);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..200_000 {
            tick(&mut state, &input);
            state.events.clear();
            if state.phase != GamePhase::Running {
                break;
            }
        }
        assert!(state.phase.is_over());
        assert!(state.score > 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = running(99999);
        let mut state2 = running(99999);
        let inputs = [
            TickInput {
                target_x: Some(120.0),
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                autopilot: true,
                ..Default::default()
            },
        ];
        for _ in 0..500 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.balls, state2.balls);
        assert_eq!(state1.paddle.x, state2.paddle.x);
    }

    #[test]
    fn test_final_brick_and_last_ball_on_same_tick_wins() {
        let mut state = running(8);
        state.lives = 1;
        state.tuning.drop_chance = 0.0;
        destroy_all_but(&mut state, 44);
        // Final brick sits on the bottom edge, below the paddle band
        state.bricks[44].rect = Rect::new(300.0, 580.0, 70.0, 25.0);
        state.bricks[44].health = 1;
        state.balls = vec![Ball::new(Vec2::new(335.0, 590.0), Vec2::new(0.0, 6.0), 8.0)];

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.all_bricks_destroyed());
        assert!(state.balls.is_empty());
        assert_eq!(state.lives, 1);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::BallLost));
        assert!(events.contains(&GameEvent::Won));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::LifeLost { .. })));
    }
}
