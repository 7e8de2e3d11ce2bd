//! Game settings
//!
//! Persisted next to the high scores in the same key-value store.

use serde::{Deserialize, Serialize};

use crate::consts::MIN_SCORE_TICK_INTERVAL;
use crate::error::StorageError;
use crate::persistence::{KeyValueStore, load_json, save_json};

/// How a score equal to the lowest kept entry is treated once the board is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualifyRule {
    /// Must beat the lowest kept entry; a tie does not qualify
    #[default]
    StrictlyGreater,
    /// Tying the lowest kept entry is enough
    GreaterOrEqual,
}

impl QualifyRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualifyRule::StrictlyGreater => "strict",
            QualifyRule::GreaterOrEqual => "tie",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" | "gt" => Some(QualifyRule::StrictlyGreater),
            "tie" | "ge" => Some(QualifyRule::GreaterOrEqual),
            _ => None,
        }
    }

    /// Does `score` beat `lowest` under this rule
    pub fn beats(&self, score: u64, lowest: u64) -> bool {
        match self {
            QualifyRule::StrictlyGreater => score > lowest,
            QualifyRule::GreaterOrEqual => score >= lowest,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === High scores ===
    /// Entries kept on the score board
    pub high_score_capacity: usize,
    /// Storage key for the score board
    pub high_score_key: String,
    /// Tie handling against the lowest kept entry
    pub qualify_rule: QualifyRule,

    // === Scoring ===
    /// Seconds between score timer ticks
    pub score_tick_interval: f32,
    /// Points per score tick before the tier multiplier
    pub base_points_per_tick: u32,

    // === Play field ===
    /// Horizontal extent of the play field (player and spawn x in `0..=width`)
    pub play_field_width: f32,
    /// Spawn interval jitter (0.25 = ±25% around the tier's mean)
    pub spawn_jitter: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_capacity: 10,
            high_score_key: "AvoidObstaclesHighScores".to_string(),
            qualify_rule: QualifyRule::StrictlyGreater,

            score_tick_interval: 0.1,
            base_points_per_tick: 1,

            play_field_width: 400.0,
            spawn_jitter: 0.25,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "AvoidObstaclesSettings";

    /// Load settings, falling back to defaults when absent or corrupt
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_json::<Settings, _>(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.high_score_capacity == 0 {
            self.high_score_capacity = defaults.high_score_capacity;
        }
        if self.high_score_key.is_empty() {
            self.high_score_key = defaults.high_score_key;
        }
        if !(self.score_tick_interval > 0.0) || !self.score_tick_interval.is_finite() {
            self.score_tick_interval = defaults.score_tick_interval;
        }
        self.score_tick_interval = self.score_tick_interval.max(MIN_SCORE_TICK_INTERVAL);
        if !(self.play_field_width > 0.0) {
            self.play_field_width = defaults.play_field_width;
        }
        self.spawn_jitter = if self.spawn_jitter.is_finite() {
            self.spawn_jitter.clamp(0.0, 0.9)
        } else {
            defaults.spawn_jitter
        };
        self
    }
}
