use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use tracker_core::model::{CompletionSet, ResourceId};

use crate::kv::KeyValueStore;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the persisted completion set.
///
/// Every call round-trips through the backing store; implementations keep no
/// cached copy between calls.
pub trait CompletionRepository {
    /// Read the current completion set.
    ///
    /// An absent or malformed entry yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the store itself cannot be read.
    fn load(&self) -> Result<CompletionSet, StorageError>;

    /// Replace the stored completion set with `completed`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be serialized or written.
    fn save(&self, completed: &CompletionSet) -> Result<(), StorageError>;

    /// Remove the stored entry entirely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be modified.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Completion set kept as one JSON value under a single store key.
#[derive(Clone)]
pub struct CompletionStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CompletionStore<S> {
    #[must_use]
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> CompletionRepository for CompletionStore<S> {
    fn load(&self) -> Result<CompletionSet, StorageError> {
        let Some(raw) = self.store.get_item(&self.key)? else {
            return Ok(CompletionSet::new());
        };
        match serde_json::from_str::<BTreeMap<String, Value>>(&raw) {
            Ok(entries) => Ok(completed_entries(&self.key, entries)),
            Err(err) => {
                warn!(key = %self.key, error = %err, "discarding malformed completion data");
                Ok(CompletionSet::new())
            }
        }
    }

    fn save(&self, completed: &CompletionSet) -> Result<(), StorageError> {
        let raw = serde_json::to_string(completed)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set_item(&self.key, &raw)?;
        debug!(key = %self.key, completed = completed.len(), "saved completion set");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.store.remove_item(&self.key)?;
        debug!(key = %self.key, "cleared completion set");
        Ok(())
    }
}

/// Keep entries whose key is a valid resource id and whose value is `true`.
/// Anything else is dropped on its own, without touching its neighbours.
fn completed_entries(key: &str, entries: BTreeMap<String, Value>) -> CompletionSet {
    let total = entries.len();
    let completed: CompletionSet = entries
        .into_iter()
        .filter(|(_, value)| *value == Value::Bool(true))
        .filter_map(|(id, _)| ResourceId::new(id).ok())
        .collect();
    let dropped = total - completed.len();
    if dropped > 0 {
        debug!(key, dropped, "ignored unusable completion entries");
    }
    completed
}
