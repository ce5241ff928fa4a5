//! String-valued key-value storage.
//!
//! Every piece of screen state that survives a restart goes through the
//! [`KeyValueStore`] trait. Values are plain text; lists are JSON arrays.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::database::{Database, DatabaseError};

/// Storage keys shared with earlier builds of the app.
pub mod keys {
    /// Selected gender index.
    pub const GENDER: &str = "genderValue";
    /// Age in years.
    pub const AGE: &str = "ageValue";
    /// Height, feet component.
    pub const HEIGHT_FEET: &str = "heightInFeetValue";
    /// Height, inches component.
    pub const HEIGHT_INCHES: &str = "inches";
    /// Weight in pounds.
    pub const WEIGHT_POUNDS: &str = "weightInPounds";
    /// Selected activity level index.
    pub const ACTIVITY_LEVEL: &str = "activityLevelValue";
    /// Key older builds wrote the activity level under.
    pub const LEGACY_ACTIVITY_LEVEL: &str = "activityLevel";
    /// Selected weight goal index.
    pub const WEIGHT_GOAL: &str = "weightGoalValue";
    /// Last computed daily calorie goal, rounded.
    pub const DAILY_GOAL: &str = "calculateDailyCalories";
    /// Serialized workout list.
    pub const WORKOUTS: &str = "workouts";
    /// Serialized goal list.
    pub const GOALS: &str = "goals";
    /// Next goal id to hand out.
    pub const GOALS_NEXT_ID: &str = "goalsNextId";
}

/// A string-valued key-value store.
///
/// Implementations are moved onto the persistence worker thread, hence `Send`.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// SQLite-backed store using the `kv_store` table.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open (or create) the store at the given database path.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    /// Open an in-memory store.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.db.kv_get(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(self.db.kv_set(key, value)?)
    }
}

/// In-memory store. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Storage rejected write: {0}")]
    Rejected(String),
}
