//! High score leaderboard.

use serde::{Deserialize, Serialize};

/// A single leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Obstacles dodged
    pub score: u32,
    /// Ticks survived
    pub ticks: u64,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: i64,
}

/// Top-N leaderboard, sorted by score descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    pub capacity: usize,
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the leaderboard.
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 || self.capacity == 0 {
            return false;
        }
        if self.entries.len() < self.capacity {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed), if it qualifies.
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score. Returns the rank achieved, or None if it didn't qualify.
    pub fn add_score(&mut self, score: u32, ticks: u64, timestamp: i64) -> Option<usize> {
        let rank = self.potential_rank(score)?;

        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                ticks,
                timestamp,
            },
        );
        self.entries.truncate(self.capacity);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
