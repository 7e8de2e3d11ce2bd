//! Difficulty curve
//!
//! Maps the running score to a difficulty tier. The table is a fixed list of
//! `(threshold, tier)` rows sorted by threshold; each row applies to the
//! half-open range `[threshold, next_threshold)` and the last row covers every
//! higher score, so the curve plateaus instead of extrapolating.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, check_score};

/// Difficulty parameters valid for a contiguous range of scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    /// 1-indexed level shown to the player
    pub level: u32,
    /// Mean seconds between obstacle spawns
    pub spawn_interval: f32,
    /// Seconds for an obstacle to cross the play field (smaller = faster)
    pub obstacle_speed: f32,
    /// Multiplier applied to the base per-tick score increment
    pub score_multiplier: f32,
}

const fn tier(level: u32, spawn_interval: f32, obstacle_speed: f32, score_multiplier: f32) -> DifficultyTier {
    DifficultyTier {
        level,
        spawn_interval,
        obstacle_speed,
        score_multiplier,
    }
}

/// Score threshold → tier, ascending by threshold
pub const DIFFICULTY_TABLE: [(u64, DifficultyTier); 6] = [
    (0, tier(1, 1.2, 3.5, 1.0)),
    (10, tier(2, 1.0, 3.0, 1.2)),
    (25, tier(3, 0.8, 2.5, 1.5)),
    (50, tier(4, 0.6, 2.0, 2.0)),
    (100, tier(5, 0.5, 1.5, 2.5)),
    (200, tier(6, 0.4, 1.2, 3.0)),
];

fn row_index(score: u64) -> usize {
    // First row has threshold 0, so some row always matches
    DIFFICULTY_TABLE
        .iter()
        .rposition(|(threshold, _)| *threshold <= score)
        .unwrap_or(0)
}

/// Tier for a score
pub fn evaluate(score: u64) -> DifficultyTier {
    DIFFICULTY_TABLE[row_index(score)].1
}

/// Level number for a score (same table, projected)
pub fn level_of(score: u64) -> u32 {
    evaluate(score).level
}

/// Tier for the very start of a run
pub fn starting_tier() -> DifficultyTier {
    DIFFICULTY_TABLE[0].1
}

/// Highest level the curve reaches
pub fn max_level() -> u32 {
    DIFFICULTY_TABLE[DIFFICULTY_TABLE.len() - 1].1.level
}

/// Score at which the next level starts, `None` once on the plateau
pub fn next_threshold(score: u64) -> Option<u64> {
    DIFFICULTY_TABLE
        .get(row_index(score) + 1)
        .map(|(threshold, _)| *threshold)
}

/// [`evaluate`] for signed input; negative scores are rejected, not clamped
pub fn try_evaluate(score: i64) -> Result<DifficultyTier, GameError> {
    check_score(score).map(evaluate)
}

/// [`level_of`] for signed input
pub fn try_level_of(score: i64) -> Result<u32, GameError> {
    check_score(score).map(level_of)
}
