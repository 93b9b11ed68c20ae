//! Key-value persistence
//!
//! Each piece of scoreboard state lives under its own key as a JSON string.
//! Stores report failures as [`StorageError`]; deciding whether a failure
//! matters is left to the caller.

mod memory;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;

use serde::Serialize;
use thiserror::Error;

/// Team order, e.g. `["a","b"]`
pub const TEAM_ORDER_KEY: &str = "score-keeper-team-order";
/// Scores by team id
pub const SCORES_KEY: &str = "score-keeper-scores";
/// Display names by team id
pub const TEAM_NAMES_KEY: &str = "score-keeper-team-names";
/// Colors by team id
pub const TEAM_COLORS_KEY: &str = "score-keeper-team-colors";
/// Sidebar open flag, `"true"` or `"false"`
pub const SIDEBAR_OPEN_KEY: &str = "score-keeper-sidebar-open";

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by a store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No backing storage (private browsing, disabled storage, no window).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Reading a key failed.
    #[error("failed to read `{key}`: {message}")]
    Read { key: String, message: String },
    /// Writing a key failed (quota exceeded, security error).
    #[error("failed to write `{key}`: {message}")]
    Write { key: String, message: String },
    /// A value could not be encoded as JSON.
    #[error("failed to encode `{key}`")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed store with best-effort semantics
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Serialize `value` as JSON and store it under `key`.
pub fn save_json<S, T>(store: &mut S, key: &str, value: &T) -> StorageResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Read a raw value, logging and swallowing read errors.
pub fn read_or_absent<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Could not load {} from storage: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_json_writes_string() {
        let mut store = MemoryStore::new();
        save_json(&mut store, TEAM_ORDER_KEY, &["a", "b"]).unwrap();
        assert_eq!(
            store.get(TEAM_ORDER_KEY).unwrap().as_deref(),
            Some(r#"["a","b"]"#)
        );
    }

    #[test]
    fn test_read_or_absent_swallows_errors() {
        let mut store = MemoryStore::new();
        store.set(SCORES_KEY, "{}").unwrap();
        store.set_unavailable(true);
        assert!(read_or_absent(&store, SCORES_KEY).is_none());
        store.set_unavailable(false);
        assert_eq!(read_or_absent(&store, SCORES_KEY).as_deref(), Some("{}"));
    }
}
