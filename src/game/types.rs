//! Flappy Heads data structures.
//!
//! World coordinates are logical pixels with the origin at the bottom-left
//! corner and `y` growing upward.

use crate::core::config::GameConfig;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// A 2D float pair used for positions and velocities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Axis-aligned bounding box anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    pub fn new(pos: Vec2, width: f64, height: f64) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive overlap test: boxes sharing only an edge still collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.top() < other.y
            || self.y > other.top())
    }
}

/// The player-controlled head.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Upward thrust, restored on every flap and decayed every tick.
    pub impulse: f64,
    /// Downward pull, grows each tick until it reaches terminal gravity.
    pub gravity: f64,
    pub size: f64,
}

impl Player {
    pub fn new(position: Vec2, size: f64) -> Self {
        Self {
            position,
            velocity: Vec2::default(),
            impulse: FLAP_IMPULSE,
            gravity: BASE_GRAVITY,
            size,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size, self.size)
    }
}

/// A drifting obstacle head.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f64,
    /// Sprite variant in `1..=OBSTACLE_VARIANTS`.
    pub variant: u8,
    /// Whether the player has already been credited for dodging it.
    pub passed: bool,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size, self.size)
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Obstacle,
    Ground,
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct FlappyGame {
    pub world_width: f64,
    pub world_height: f64,
    pub tick_ms: u64,

    pub player: Player,
    pub obstacles: Vec<Obstacle>,

    /// A spawn roll must exceed this to add an obstacle.
    pub spawn_threshold: u32,

    /// Obstacles dodged this run.
    pub score: u32,
    /// Total simulation ticks this run.
    pub tick_count: u64,
    /// Sub-tick time accumulator (milliseconds).
    pub accumulated_time_ms: u64,

    /// True until the first flap. Physics paused while waiting.
    pub waiting_to_start: bool,
    pub paused: bool,
    /// `Some` once the run has ended; ticking stops until restart.
    pub game_result: Option<CrashCause>,
}

impl FlappyGame {
    pub fn new(world_width: f64, world_height: f64, tick_ms: u64) -> Self {
        Self {
            world_width,
            world_height,
            tick_ms,
            player: Player::new(
                Self::player_start(world_width, world_height),
                world_width * SPRITE_SCALE,
            ),
            obstacles: Vec::new(),
            spawn_threshold: SPAWN_THRESHOLD_START,
            score: 0,
            tick_count: 0,
            accumulated_time_ms: 0,
            waiting_to_start: true,
            paused: false,
            game_result: None,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.world_width, config.world_height, config.tick_ms)
    }

    /// Where the player starts: a quarter across, half way up.
    pub fn player_start(world_width: f64, world_height: f64) -> Vec2 {
        Vec2::new(world_width / 4.0, world_height / 2.0)
    }

    /// Side length of every sprite.
    pub fn sprite_size(&self) -> f64 {
        self.world_width * SPRITE_SCALE
    }

    /// Highest `y` the player's bottom edge may reach.
    pub fn ceiling(&self) -> f64 {
        self.world_height * CEILING_FRACTION - self.player.size
    }

    pub fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    /// True while ticks should advance the world.
    pub fn is_running(&self) -> bool {
        !self.waiting_to_start && !self.paused && self.game_result.is_none()
    }
}

impl Default for FlappyGame {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT, TICK_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(x: f64, y: f64, size: f64) -> Aabb {
        Aabb::new(Vec2::new(x, y), size, size)
    }

    #[test]
    fn test_new_game_defaults() {
        let game = FlappyGame::default();
        assert!(game.waiting_to_start);
        assert!(!game.paused);
        assert!(game.game_result.is_none());
        assert!(game.obstacles.is_empty());
        assert_eq!(game.score, 0);
        assert_eq!(game.spawn_threshold, SPAWN_THRESHOLD_START);
        assert_eq!(game.player.position, Vec2::new(200.0, 300.0));
        assert_eq!(game.player.size, 40.0);
        assert_eq!(game.player.impulse, FLAP_IMPULSE);
        assert_eq!(game.player.gravity, BASE_GRAVITY);
    }

    #[test]
    fn test_from_config() {
        let config = GameConfig {
            world_width: 400.0,
            world_height: 300.0,
            tick_ms: 20,
            ..Default::default()
        };
        let game = FlappyGame::from_config(&config);
        assert_eq!(game.tick_ms, 20);
        assert_eq!(game.player.position, Vec2::new(100.0, 150.0));
        assert_eq!(game.sprite_size(), 20.0);
    }

    #[test]
    fn test_ceiling_accounts_for_player_size() {
        let game = FlappyGame::default();
        assert!((game.ceiling() - (570.0 - 40.0)).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_separate_boxes() {
        let a = boxed(0.0, 0.0, 10.0);
        assert!(!a.overlaps(&boxed(20.0, 0.0, 10.0)));
        assert!(!a.overlaps(&boxed(0.0, 20.0, 10.0)));
        assert!(!a.overlaps(&boxed(-20.0, -20.0, 10.0)));
    }

    #[test]
    fn test_overlap_intersecting_boxes() {
        let a = boxed(0.0, 0.0, 10.0);
        assert!(a.overlaps(&boxed(5.0, 5.0, 10.0)));
        assert!(a.overlaps(&boxed(2.0, 2.0, 2.0)));
        assert!(boxed(2.0, 2.0, 2.0).overlaps(&a));
    }

    #[test]
    fn test_touching_edges_collide() {
        let a = boxed(0.0, 0.0, 10.0);
        assert!(a.overlaps(&boxed(10.0, 0.0, 10.0)));
        assert!(a.overlaps(&boxed(0.0, 10.0, 10.0)));
        assert!(a.overlaps(&boxed(10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_vec2_add_assign() {
        let mut v = Vec2::new(1.0, 2.0);
        v += Vec2::new(-0.5, 3.0);
        assert_eq!(v, Vec2::new(0.5, 5.0));
    }
}
