//! Avoid Obstacles - game core for a vertical obstacle-dodging game
//!
//! Core modules:
//! - `difficulty`: Score → difficulty tier curve
//! - `highscores`: Persisted top-N score board
//! - `persistence`: Durable key-value storage backends
//! - `sim`: Deterministic run loop (score timer, level ups, spawning, game over)
//! - `settings`: Tunable game settings
//! - `platform`: Browser/native platform abstraction

pub mod difficulty;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use difficulty::{DifficultyTier, evaluate, level_of};
pub use error::{GameError, StorageError};
pub use highscores::{HighScoreConfig, HighScoreStore, SharedHighScoreStore};
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
pub use settings::{QualifyRule, Settings};

/// Directory name under the platform data dir
pub const APP_DIR_NAME: &str = "avoid-obstacles";

/// Game configuration constants
pub mod consts {
    /// Longest frame the run loop will simulate; longer stalls are dropped
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Shortest score timer interval settings may request
    pub const MIN_SCORE_TICK_INTERVAL: f32 = 0.01;
}
