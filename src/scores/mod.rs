//! High score tracking and its on-disk store.

pub mod persistence;
pub mod types;

pub use persistence::ScoreStore;
pub use types::{HighScoreEntry, HighScores};
