//! Whole rounds driven through the round controller, headless

use neon_breaker::platform::ManualScheduler;
use neon_breaker::renderer::DrawList;
use neon_breaker::sim::{GameEvent, GamePhase};
use neon_breaker::ui::{UiLog, UiUpdate};
use neon_breaker::{Config, Game, Settings};

type HeadlessGame = Game<DrawList, UiLog, ManualScheduler>;

fn headless(seed: u64, config: Config) -> HeadlessGame {
    Game::new(config, seed, DrawList::new(), UiLog::new(), ManualScheduler::new()).unwrap()
}

/// Fire scheduled frames at 60 Hz until the loop stops; returns frames run
fn run_to_end(game: &mut HeadlessGame, max_frames: u64) -> u64 {
    let mut frames = 0;
    while frames < max_frames && game.scheduler_mut().fire().is_some() {
        frames += 1;
        game.frame(frames as f64 * 1000.0 / 60.0);
    }
    frames
}

#[test]
fn autopilot_round_finishes_and_halts() {
    let mut game = headless(7, Config::default());
    game.input_mut().set_autopilot(true);
    game.start();

    let frames = run_to_end(&mut game, 200_000);
    assert!(frames < 200_000, "round never ended");
    assert!(game.phase().is_over());
    assert!(!game.scheduler().has_pending());
    assert_eq!(game.pending_frame(), None);

    let title = game.ui().overlay().expect("overlay shown");
    match game.phase() {
        GamePhase::Won => assert_eq!(title, "VICTORY!"),
        GamePhase::Lost => assert_eq!(title, "GAME OVER"),
        phase => panic!("unexpected phase {phase:?}"),
    }
    assert_eq!(game.ui().last_score(), Some(game.state().score));
    assert_eq!(game.ui().last_lives(), Some(game.state().lives));
}

#[test]
fn same_seed_same_round() {
    let play = |seed| {
        let mut game = headless(seed, Config::default());
        game.input_mut().set_autopilot(true);
        game.start();
        run_to_end(&mut game, 20_000);
        serde_json::to_string(game.state()).unwrap()
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn evading_paddle_loses_the_round() {
    let config =
        Config::from_json(r#"{ "tuning": { "starting_lives": 1, "drop_chance": 0.0 } }"#).unwrap();
    let mut game = headless(3, config);
    game.start();

    // Park the paddle on the far side of the field from the ball every frame
    let mut frames = 0;
    let mut events = Vec::new();
    while frames < 10_000 && game.scheduler_mut().fire().is_some() {
        let ball_x = game.state().balls[0].pos.x;
        game.set_paddle_target(if ball_x < 400.0 { 800.0 } else { 0.0 });
        frames += 1;
        game.frame(frames as f64 * 1000.0 / 60.0);
        events.extend(game.take_events());
    }

    assert_eq!(game.phase(), GamePhase::Lost);
    assert_eq!(game.state().lives, 0);
    assert_eq!(game.ui().overlay(), Some("GAME OVER"));
    assert_eq!(game.ui().last_lives(), Some(0));
    assert!(events.contains(&GameEvent::Lost));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::PaddleHit { .. })));
    assert!(!game.scheduler().has_pending());
}

#[test]
fn invalid_hand_built_config_is_rejected() {
    let config = Config {
        tuning: neon_breaker::Tuning {
            drop_chance: 1.5,
            ..Default::default()
        },
        ..Default::default()
    };
    let result = Game::new(config, 1, DrawList::new(), UiLog::new(), ManualScheduler::new());
    assert!(matches!(
        result,
        Err(neon_breaker::ConfigError::Invalid { field: "drop_chance", .. })
    ));
}

#[test]
fn restart_mid_round_resets_everything() {
    let mut game = headless(11, Config::default());
    game.input_mut().set_autopilot(true);
    game.start();
    run_to_end(&mut game, 600);
    assert!(game.state().time_ticks > 0);

    game.start();
    let state = game.state();
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.score, 0);
    assert_eq!(state.time_ticks, 0);
    assert_eq!(state.bricks_remaining(), 45);
    assert_eq!(state.balls.len(), 1);
    assert!(state.power_ups.is_empty());
    assert_eq!(game.scheduler().pending().len(), 1);
    assert!(matches!(game.ui().updates.last(), Some(UiUpdate::Lives(3))));
}

#[test]
fn particles_off_draws_no_particles() {
    let config = Config {
        settings: Settings {
            particles: false,
            ..Settings::default()
        },
        ..Default::default()
    };
    let mut game = headless(5, config);
    game.input_mut().set_autopilot(true);
    game.start();
    run_to_end(&mut game, 2_000);
    assert!(game.state().particles.is_empty());
}
