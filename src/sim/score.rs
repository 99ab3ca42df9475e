//! Session score
//!
//! Grows with every collected star and only goes back to zero on an
//! explicit restart.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
    awards: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `points` and return the new total
    pub fn award(&mut self, points: u64) -> u64 {
        self.score = self.score.saturating_add(points);
        self.awards += 1;
        self.score
    }

    pub fn current(&self) -> u64 {
        self.score
    }

    /// Number of awards this session (one per collected star)
    pub fn awards(&self) -> u64 {
        self.awards
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
