//! Storage module for database, key-value persistence and configuration.

pub mod config;
pub mod database;
pub mod kv;
pub mod persister;
pub mod schema;

pub use config::{AppConfig, AuthSettings, ConfigError, StorageSettings, UiSettings};
pub use database::{AccountRow, Database, DatabaseError};
pub use kv::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use persister::{backup_key, wait_all, PendingWrite, PersistenceError, Persister};
