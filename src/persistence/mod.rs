//! Key/value persistence for the high score and settings
//!
//! Backends:
//! - `MemoryStore` (tests, headless runs)
//! - `FileStore` (native: one JSON file per key)
//! - `LocalStorageStore` (wasm32: browser LocalStorage)

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Storage key for the high score record
pub const HIGH_SCORE_KEY: &str = "shoot_em_up_high_score";

/// Raw string storage
pub trait Storage {
    /// Stored value, or `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Decode a JSON value stored under `key`
pub fn load_json<T: DeserializeOwned>(
    store: &impl Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|err| StorageError::Parse {
            key: key.to_string(),
            reason: err.to_string(),
        })
}

/// Encode `value` as JSON under `key`
pub fn save_json<T: Serialize>(
    store: &mut impl Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|err| StorageError::Parse {
        key: key.to_string(),
        reason: err.to_string(),
    })?;
    store.set(key, &json)
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
}

/// Where the best score lives between sessions
pub trait HighScoreStore {
    /// Persisted best score, `None` if nothing was saved yet
    fn load_high_score(&self) -> Result<Option<u64>, StorageError>;
    fn save_high_score(&mut self, score: u64) -> Result<(), StorageError>;
}

impl<S: Storage> HighScoreStore for S {
    fn load_high_score(&self) -> Result<Option<u64>, StorageError> {
        Ok(load_json::<HighScoreRecord>(self, HIGH_SCORE_KEY)?.map(|r| r.high_score))
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), StorageError> {
        save_json(self, HIGH_SCORE_KEY, &HighScoreRecord { high_score: score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_score_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_high_score().unwrap(), None);
        store.save_high_score(321).unwrap();
        assert_eq!(store.load_high_score().unwrap(), Some(321));
        assert_eq!(
            store.get(HIGH_SCORE_KEY).unwrap().as_deref(),
            Some(r#"{"high_score":321}"#)
        );
    }

    #[test]
    fn test_malformed_record_is_parse_error() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "not json").unwrap();
        match store.load_high_score() {
            Err(StorageError::Parse { key, .. }) => assert_eq!(key, HIGH_SCORE_KEY),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unavailable_store_propagates() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(
            store.load_high_score(),
            Err(StorageError::Unavailable)
        ));
        assert!(store.save_high_score(1).is_err());
    }
}
