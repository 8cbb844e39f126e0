// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 16;
pub const MAX_FRAME_DELTA_MS: u64 = 100;
pub const INPUT_POLL_MS: u64 = 8;

// World (logical pixels, origin bottom-left)
pub const DEFAULT_WORLD_WIDTH: f64 = 800.0;
pub const DEFAULT_WORLD_HEIGHT: f64 = 600.0;
pub const SPRITE_SCALE: f64 = 0.05;
pub const CEILING_FRACTION: f64 = 0.95;
pub const TITLE_HEIGHT_FRACTION: f64 = 0.8;

// Player physics (per tick)
pub const FLAP_IMPULSE: f64 = 3.0;
pub const CEILING_IMPULSE: f64 = -3.0;
pub const BASE_GRAVITY: f64 = -0.1;
pub const GRAVITY_GROWTH: f64 = 1.05;
pub const TERMINAL_GRAVITY: f64 = -4.0;
pub const IMPULSE_DECAY: f64 = 0.95;

// Obstacles
pub const OBSTACLE_SPEED: f64 = -1.0;
pub const OBSTACLE_SPAWN_X_FRACTION: f64 = 0.99;
pub const OBSTACLE_LANE_FRACTION: f64 = 0.0625;
pub const OBSTACLE_LANES: u32 = 4;
pub const OBSTACLE_VARIANTS: u8 = 4;

// Spawn roll: an obstacle appears when 1..=SPAWN_ROLL_MAX exceeds the threshold
pub const SPAWN_ROLL_MAX: u32 = 1800;
pub const SPAWN_THRESHOLD_START: u32 = 1700;
pub const SPAWN_THRESHOLD_FLOOR: u32 = 1300;

// Restart button, as fractions of world width
pub const RESTART_BUTTON_WIDTH_FRACTION: f64 = 0.3;
pub const RESTART_BUTTON_HEIGHT_FRACTION: f64 = 0.1;

// Leaderboard
pub const DEFAULT_MAX_HIGH_SCORES: usize = 10;
pub const SCORES_VERSION_MAGIC: u64 = 0x464C_4150_5059_0001;

pub const GAME_TITLE: &str = "Flappy Heads";
pub const APP_NAME: &str = "flappy-heads";
