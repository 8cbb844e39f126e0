//! Obstacle spawning.
//!
//! Every tick rolls `1..=SPAWN_ROLL_MAX`; a roll above the spawn threshold
//! adds an obstacle at the right edge. Each spawn lowers the threshold by one
//! (never below the floor), so obstacles get more frequent as a run goes on.

use super::types::{FlappyGame, Obstacle, Vec2};
use crate::core::constants::*;
use rand::Rng;

/// Roll for a spawn this tick. Returns true if an obstacle was added.
pub fn maybe_spawn<R: Rng>(game: &mut FlappyGame, rng: &mut R) -> bool {
    let roll = rng.gen_range(1..=SPAWN_ROLL_MAX);
    if roll <= game.spawn_threshold {
        return false;
    }

    spawn_obstacle(game, rng);
    game.spawn_threshold = next_threshold(game.spawn_threshold);
    true
}

/// Threshold after a spawn: clamp up to the floor, then step down by one.
pub fn next_threshold(threshold: u32) -> u32 {
    threshold.max(SPAWN_THRESHOLD_FLOOR) - 1
}

/// Place a new obstacle just inside the right edge in one of the low lanes.
pub fn spawn_obstacle<R: Rng>(game: &mut FlappyGame, rng: &mut R) {
    let lane = rng.gen_range(1..=OBSTACLE_LANES);
    let variant = rng.gen_range(1..=OBSTACLE_VARIANTS);

    let obstacle = Obstacle {
        position: Vec2::new(
            game.world_width * OBSTACLE_SPAWN_X_FRACTION,
            lane as f64 * game.world_height * OBSTACLE_LANE_FRACTION,
        ),
        velocity: Vec2::new(OBSTACLE_SPEED, 0.0),
        size: game.sprite_size(),
        variant,
        passed: false,
    };

    log::debug!(
        "Spawned obstacle variant {} at ({:.1}, {:.1})",
        obstacle.variant,
        obstacle.position.x,
        obstacle.position.y
    );
    game.obstacles.push(obstacle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_next_threshold_steps_down() {
        assert_eq!(next_threshold(1700), 1699);
        assert_eq!(next_threshold(1301), 1300);
    }

    #[test]
    fn test_next_threshold_holds_at_floor() {
        assert_eq!(next_threshold(1300), 1299);
        assert_eq!(next_threshold(1299), 1299);
    }

    #[test]
    fn test_spawn_obstacle_placement() {
        let mut game = FlappyGame::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..50 {
            spawn_obstacle(&mut game, &mut rng);
        }

        assert_eq!(game.obstacles.len(), 50);
        let lanes: Vec<f64> = (1..=OBSTACLE_LANES)
            .map(|k| k as f64 * game.world_height * OBSTACLE_LANE_FRACTION)
            .collect();
        for o in &game.obstacles {
            assert!((o.position.x - 792.0).abs() < 1e-9);
            assert!(lanes.iter().any(|y| (o.position.y - y).abs() < 1e-9));
            assert_eq!(o.velocity, Vec2::new(OBSTACLE_SPEED, 0.0));
            assert!((1..=OBSTACLE_VARIANTS).contains(&o.variant));
            assert_eq!(o.size, game.sprite_size());
            assert!(!o.passed);
        }
    }

    #[test]
    fn test_threshold_never_rises_and_respects_floor() {
        let mut game = FlappyGame::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let mut previous = game.spawn_threshold;
        let mut spawned = 0;

        for _ in 0..100_000 {
            if maybe_spawn(&mut game, &mut rng) {
                spawned += 1;
            }
            assert!(game.spawn_threshold <= previous);
            assert!(game.spawn_threshold >= SPAWN_THRESHOLD_FLOOR - 1);
            previous = game.spawn_threshold;
        }

        assert_eq!(game.obstacles.len(), spawned);
        assert_eq!(game.spawn_threshold, SPAWN_THRESHOLD_FLOOR - 1);
    }

    #[test]
    fn test_no_spawn_when_threshold_unreachable() {
        let mut game = FlappyGame::default();
        game.spawn_threshold = SPAWN_ROLL_MAX;
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..1000 {
            assert!(!maybe_spawn(&mut game, &mut rng));
        }
        assert!(game.obstacles.is_empty());
    }
}
