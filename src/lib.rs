//! Flappy Heads - terminal tap-to-fly arcade game.
//!
//! The simulation (`game`) is UI-agnostic and deterministic for a given RNG,
//! so it can be driven from tests as easily as from the terminal front end.

pub mod build_info;
pub mod core;
pub mod game;
pub mod input;
pub mod scores;
pub mod ui;
pub mod utils;

pub use crate::core::config::GameConfig;
pub use crate::core::constants::*;
pub use game::{CrashCause, FlappyGame, FlappyInput};
pub use scores::{HighScores, ScoreStore};

/// Record a finished run on the leaderboard. Returns the rank if it placed.
pub fn record_run(scores: &mut HighScores, game: &FlappyGame, timestamp: i64) -> Option<usize> {
    if !game.is_over() {
        return None;
    }
    let rank = scores.add_score(game.score, game.tick_count, timestamp);
    if let Some(rank) = rank {
        log::info!("Score {} placed #{} on the leaderboard", game.score, rank);
    }
    rank
}
