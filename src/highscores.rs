//! High score board
//!
//! Persisted through a [`KeyValueStore`], tracks the top N scores (10 by
//! default) sorted descending.

use std::cell::OnceCell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{GameError, check_score};
use crate::persistence::{KeyValueStore, load_json, save_json};
use crate::settings::{QualifyRule, Settings};

/// Default number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Default storage key
pub const HIGH_SCORES_KEY: &str = "AvoidObstaclesHighScores";

/// Board shape and tie handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreConfig {
    pub capacity: usize,
    pub storage_key: String,
    pub qualify_rule: QualifyRule,
}

impl Default for HighScoreConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_HIGH_SCORES,
            storage_key: HIGH_SCORES_KEY.to_string(),
            qualify_rule: QualifyRule::default(),
        }
    }
}

impl From<&Settings> for HighScoreConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            capacity: settings.high_score_capacity.max(1),
            storage_key: settings.high_score_key.clone(),
            qualify_rule: settings.qualify_rule,
        }
    }
}

/// Score board bound to a storage backend
///
/// Entries are read from the backend on first access and cached; every
/// [`record`](Self::record) rewrites the whole list to the backend.
#[derive(Debug)]
pub struct HighScoreStore<S> {
    store: S,
    config: HighScoreConfig,
    entries: OnceCell<Vec<u64>>,
}

/// Board shared between threads; one lock around each read-modify-write
pub type SharedHighScoreStore<S> = Arc<Mutex<HighScoreStore<S>>>;

/// Lock a shared board, recovering from a poisoned lock
pub fn lock_shared<S>(shared: &SharedHighScoreStore<S>) -> MutexGuard<'_, HighScoreStore<S>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: KeyValueStore> HighScoreStore<S> {
    /// Board over `store`; a zero capacity is raised to 1
    pub fn new(store: S, mut config: HighScoreConfig) -> Self {
        config.capacity = config.capacity.max(1);
        Self {
            store,
            config,
            entries: OnceCell::new(),
        }
    }

    /// Board with the default shape (top 10, strict qualify rule)
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, HighScoreConfig::default())
    }

    pub fn into_shared(self) -> SharedHighScoreStore<S> {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &HighScoreConfig {
        &self.config
    }

    /// Underlying storage backend
    pub fn backend(&self) -> &S {
        &self.store
    }

    fn entries(&self) -> &[u64] {
        self.entries.get_or_init(|| self.load())
    }

    fn load(&self) -> Vec<u64> {
        let Some(mut entries) = load_json::<Vec<u64>, _>(&self.store, &self.config.storage_key) else {
            log::info!("No high scores found, starting fresh");
            return Vec::new();
        };

        if !entries.is_sorted_by(|a, b| a >= b) || entries.len() > self.config.capacity {
            log::warn!("Stored high scores out of shape, re-sorting ({} entries)", entries.len());
            entries.sort_unstable_by(|a, b| b.cmp(a));
            entries.truncate(self.config.capacity);
        }

        log::info!("Loaded {} high scores", entries.len());
        entries
    }

    /// All kept scores, highest first
    pub fn all_scores(&self) -> &[u64] {
        self.entries()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Top score, 0 if the board is empty
    pub fn highest(&self) -> u64 {
        self.entries().first().copied().unwrap_or(0)
    }

    /// Would recording `score` place it on the board
    pub fn would_qualify(&self, score: u64) -> bool {
        let entries = self.entries();
        if entries.len() < self.config.capacity {
            return true;
        }
        entries
            .last()
            .is_none_or(|&lowest| self.config.qualify_rule.beats(score, lowest))
    }

    /// Rank a score would achieve (1-indexed), `None` if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.would_qualify(score) {
            return None;
        }
        let entries = self.entries();
        let rank = entries.iter().position(|&e| score > e).unwrap_or(entries.len()) + 1;
        Some(rank.min(self.config.capacity))
    }

    /// Add a score, keep the top N and persist the result.
    ///
    /// Returns whether `score` is on the board afterwards. The list is written
    /// back on every call, including when `score` does not make the cut. On a
    /// write failure the board keeps its previous contents.
    pub fn record(&mut self, score: u64) -> Result<bool, GameError> {
        let mut entries = self.entries().to_vec();
        entries.push(score);
        entries.sort_unstable_by(|a, b| b.cmp(a));
        entries.truncate(self.config.capacity);

        save_json(&mut self.store, &self.config.storage_key, &entries)?;
        log::info!("High scores saved ({} entries)", entries.len());

        let made_cut = entries.contains(&score);
        self.entries = OnceCell::from(entries);
        Ok(made_cut)
    }

    /// [`record`](Self::record) for signed input; negative scores are rejected
    pub fn try_record(&mut self, score: i64) -> Result<bool, GameError> {
        self.record(check_score(score)?)
    }

    /// Remove every stored score
    pub fn clear(&mut self) -> Result<(), GameError> {
        self.store.remove_item(&self.config.storage_key)?;
        self.entries = OnceCell::from(Vec::new());
        log::info!("High scores cleared");
        Ok(())
    }
}
