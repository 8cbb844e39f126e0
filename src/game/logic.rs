//! Game logic for Flappy Heads: input processing, fixed-step ticking,
//! collision handling and restart.

use super::physics::{collides, determine_velocity, flap, move_obstacle, move_player};
use super::spawner::maybe_spawn;
use super::types::{CrashCause, FlappyGame, Player};
use crate::core::constants::*;
use rand::Rng;
use std::time::{Duration, Instant};

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlappyInput {
    /// Tap: Space/Up/Enter or a left click.
    Flap,
    /// Restart control on the game-over screen.
    Restart,
    /// Pause or resume a live run.
    TogglePause,
    /// Anything else.
    Other,
}

/// Process player input.
pub fn process_input(game: &mut FlappyGame, input: FlappyInput) {
    match input {
        FlappyInput::Flap => {
            if game.is_over() {
                return;
            }
            if game.waiting_to_start {
                game.waiting_to_start = false;
                log::info!("Run started");
            }
            if game.paused {
                game.paused = false;
            }
            flap(&mut game.player);
        }
        FlappyInput::Restart => {
            if game.is_over() {
                restart(game);
            }
        }
        FlappyInput::TogglePause => {
            if !game.waiting_to_start && !game.is_over() {
                game.paused = !game.paused;
            }
        }
        FlappyInput::Other => {}
    }
}

/// Advance the simulation by `dt_ms` of wall-clock time.
///
/// Steps physics in fixed `tick_ms` increments. Returns true if any step ran.
pub fn tick<R: Rng>(game: &mut FlappyGame, dt_ms: u64, rng: &mut R) -> bool {
    if !game.is_running() {
        return false;
    }

    // Clamp so a stall does not replay a burst of ticks
    let dt_ms = dt_ms.min(MAX_FRAME_DELTA_MS);
    game.accumulated_time_ms += dt_ms;

    let mut changed = false;
    while game.accumulated_time_ms >= game.tick_ms {
        game.accumulated_time_ms -= game.tick_ms;
        step(game, rng);
        changed = true;

        if game.is_over() {
            game.accumulated_time_ms = 0;
            break;
        }
    }

    changed
}

/// Turns wall-clock frame times into whole milliseconds for `tick`.
///
/// Only the milliseconds handed out are consumed; the sub-millisecond rest
/// carries over to the next frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Whole milliseconds elapsed since the last call.
    pub fn elapsed_ms(&mut self, now: Instant) -> u64 {
        let dt_ms = now.saturating_duration_since(self.last).as_millis() as u64;
        self.last += Duration::from_millis(dt_ms);
        dt_ms
    }

    /// Drop any time that built up, e.g. while the game sat on a menu.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }
}

/// Single simulation tick.
pub fn step<R: Rng>(game: &mut FlappyGame, rng: &mut R) {
    if game.is_over() {
        return;
    }
    game.tick_count += 1;

    // 1. Player physics
    determine_velocity(&mut game.player);
    let ceiling = game.ceiling();
    move_player(&mut game.player, ceiling);

    if game.player.position.y < 0.0 {
        end_run(game, CrashCause::Ground);
        return;
    }

    // 2. Spawn
    maybe_spawn(game, rng);

    // 3. Collide, then drift each obstacle left
    let mut crashed = false;
    for obstacle in &mut game.obstacles {
        if collides(&game.player, obstacle) {
            crashed = true;
        }
        move_obstacle(obstacle);
    }
    if crashed {
        end_run(game, CrashCause::Obstacle);
        return;
    }

    // 4. Credit dodged obstacles
    let player_left = game.player.position.x;
    for obstacle in &mut game.obstacles {
        if !obstacle.passed && obstacle.bounds().right() < player_left {
            obstacle.passed = true;
            game.score += 1;
        }
    }

    // 5. Drop obstacles that left the screen
    game.obstacles.retain(|o| o.bounds().right() >= 0.0);
}

fn end_run(game: &mut FlappyGame, cause: CrashCause) {
    game.game_result = Some(cause);
    log::info!(
        "Run ended ({:?}) after {} ticks with score {}",
        cause,
        game.tick_count,
        game.score
    );
}

/// Reset the world after a crash and resume ticking immediately.
pub fn restart(game: &mut FlappyGame) {
    game.obstacles.clear();
    game.player = Player::new(
        FlappyGame::player_start(game.world_width, game.world_height),
        game.sprite_size(),
    );
    game.spawn_threshold = SPAWN_THRESHOLD_START;
    game.score = 0;
    game.tick_count = 0;
    game.accumulated_time_ms = 0;
    game.paused = false;
    game.waiting_to_start = false;
    game.game_result = None;
    log::info!("Run restarted");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Obstacle, Vec2};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn started_game() -> FlappyGame {
        let mut game = FlappyGame::default();
        game.waiting_to_start = false;
        // Keep the world empty unless a test adds obstacles
        game.spawn_threshold = SPAWN_ROLL_MAX;
        game
    }

    fn obstacle_at(x: f64, y: f64) -> Obstacle {
        Obstacle {
            position: Vec2::new(x, y),
            velocity: Vec2::new(OBSTACLE_SPEED, 0.0),
            size: 40.0,
            variant: 2,
            passed: false,
        }
    }

    #[test]
    fn test_flap_starts_game() {
        let mut game = FlappyGame::default();
        assert!(game.waiting_to_start);
        process_input(&mut game, FlappyInput::Flap);
        assert!(!game.waiting_to_start);
        assert!(game.is_running());
    }

    #[test]
    fn test_flap_restores_impulse() {
        let mut game = started_game();
        game.player.impulse = 0.2;
        game.player.gravity = -3.0;
        process_input(&mut game, FlappyInput::Flap);
        assert_eq!(game.player.impulse, FLAP_IMPULSE);
        assert_eq!(game.player.gravity, BASE_GRAVITY);
    }

    #[test]
    fn test_flap_ignored_after_crash() {
        let mut game = started_game();
        game.game_result = Some(CrashCause::Obstacle);
        game.player.impulse = 0.5;
        process_input(&mut game, FlappyInput::Flap);
        assert_eq!(game.player.impulse, 0.5);
    }

    #[test]
    fn test_no_tick_while_waiting() {
        let mut game = FlappyGame::default();
        let start = game.player.position;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(!tick(&mut game, 100, &mut rng));
        assert_eq!(game.player.position, start);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut game = started_game();
        process_input(&mut game, FlappyInput::TogglePause);
        assert!(game.paused);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(!tick(&mut game, 100, &mut rng));
        assert_eq!(game.tick_count, 0);

        process_input(&mut game, FlappyInput::TogglePause);
        assert!(!game.paused);
        assert!(tick(&mut game, 16, &mut rng));
    }

    #[test]
    fn test_tick_accumulates_partial_frames() {
        let mut game = started_game();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(!tick(&mut game, 10, &mut rng));
        assert_eq!(game.tick_count, 0);
        assert!(tick(&mut game, 10, &mut rng));
        assert_eq!(game.tick_count, 1);
        assert_eq!(game.accumulated_time_ms, 4);
    }

    #[test]
    fn test_tick_clamps_large_delta() {
        let mut game = started_game();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tick(&mut game, 10_000, &mut rng);
        assert_eq!(game.tick_count, MAX_FRAME_DELTA_MS / TICK_INTERVAL_MS);
    }

    #[test]
    fn test_player_rises_after_flap() {
        let mut game = started_game();
        let start_y = game.player.position.y;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        step(&mut game, &mut rng);
        assert!(game.player.position.y > start_y);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut game = started_game();
        let p = game.player.position;
        game.obstacles.push(obstacle_at(p.x + 10.0, p.y));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        step(&mut game, &mut rng);
        assert_eq!(game.game_result, Some(CrashCause::Obstacle));
        assert!(!game.is_running());
    }

    #[test]
    fn test_crash_stops_timer() {
        let mut game = started_game();
        game.game_result = Some(CrashCause::Obstacle);
        let snapshot = game.player.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(!tick(&mut game, 50, &mut rng));
        assert_eq!(game.player, snapshot);
    }

    #[test]
    fn test_falling_off_bottom_ends_run() {
        let mut game = started_game();
        game.player.position.y = 1.0;
        game.player.impulse = 0.0;
        game.player.gravity = TERMINAL_GRAVITY;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        step(&mut game, &mut rng);
        assert_eq!(game.game_result, Some(CrashCause::Ground));
    }

    #[test]
    fn test_dodged_obstacle_scores_once() {
        let mut game = started_game();
        let p = game.player.position;
        // Far below the player so it never touches
        game.obstacles.push(obstacle_at(p.x - 40.5, 0.0));
        game.player.position.y = 400.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        step(&mut game, &mut rng);
        assert_eq!(game.score, 1);
        step(&mut game, &mut rng);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn test_offscreen_obstacles_removed() {
        let mut game = started_game();
        game.obstacles.push(obstacle_at(-40.5, 0.0));
        game.obstacles.push(obstacle_at(600.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        step(&mut game, &mut rng);
        assert_eq!(game.obstacles.len(), 1);
        assert_eq!(game.obstacles[0].position.x, 599.0);
    }

    #[test]
    fn test_restart_resets_world() {
        let mut game = started_game();
        game.obstacles.push(obstacle_at(300.0, 50.0));
        game.spawn_threshold = 1400;
        game.score = 12;
        game.tick_count = 900;
        game.player.position = Vec2::new(200.0, -5.0);
        game.game_result = Some(CrashCause::Ground);

        process_input(&mut game, FlappyInput::Restart);

        assert!(game.obstacles.is_empty());
        assert_eq!(game.spawn_threshold, SPAWN_THRESHOLD_START);
        assert_eq!(game.score, 0);
        assert_eq!(game.tick_count, 0);
        assert_eq!(game.player.position, Vec2::new(200.0, 300.0));
        assert!(game.game_result.is_none());
        assert!(game.is_running());
    }

    #[test]
    fn test_restart_ignored_mid_run() {
        let mut game = started_game();
        game.score = 3;
        process_input(&mut game, FlappyInput::Restart);
        assert_eq!(game.score, 3);
    }
}
