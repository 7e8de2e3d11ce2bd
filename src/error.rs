//! Error types
//!
//! Nothing in the game core fails on bad persisted data (that is recovered as
//! an empty board). Errors only surface for negative scores handed in by a host
//! and for writes the storage backend refused.

use thiserror::Error;

/// Failure reported by a [`KeyValueStore`](crate::persistence::KeyValueStore) backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode stored value: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend missing on this platform (no `window.localStorage`, no data dir)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced to callers of the game core
#[derive(Debug, Error)]
pub enum GameError {
    /// Scores are never negative
    #[error("invalid score {0}: scores must be non-negative")]
    InvalidScore(i64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Validate a signed score coming from outside the crate
pub fn check_score(score: i64) -> Result<u64, GameError> {
    u64::try_from(score).map_err(|_| GameError::InvalidScore(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_score_is_rejected() {
        assert!(matches!(check_score(-1), Err(GameError::InvalidScore(-1))));
        assert_eq!(check_score(0).unwrap(), 0);
        assert_eq!(check_score(42).unwrap(), 42);
    }

    #[test]
    fn storage_error_message() {
        let err = GameError::from(StorageError::Unavailable("no window".into()));
        assert_eq!(err.to_string(), "storage unavailable: no window");
    }
}
