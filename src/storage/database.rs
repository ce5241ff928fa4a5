//! Database operations using rusqlite.
//!
//! Holds the key-value table used by the screens' persisted state and the
//! account/session tables used by the local identity provider.

use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// How long a connection waits on a lock held by another connection.
const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

/// An account row as stored in the `accounts` table.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRow {
    /// Account identifier
    pub id: Uuid,
    /// Login email
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::IoError(e.to_string()))?;
            }
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        // The storage worker and the identity provider hold separate connections.
        self.conn
            .busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        // Create schema version table
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        Ok(())
    }

    // ========== Key-value operations ==========

    /// Read a value from the key-value table.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Insert or replace a value in the key-value table.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    // ========== Account operations ==========

    /// Insert a new account.
    ///
    /// Returns `ConstraintViolation` when the email is already registered.
    pub fn insert_account(&self, account: &AccountRow) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO accounts (id, email, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    account.id.to_string(),
                    account.email,
                    account.password_hash,
                    account.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(err, _)
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    DatabaseError::ConstraintViolation(format!(
                        "account already exists: {}",
                        account.email
                    ))
                }
                other => DatabaseError::QueryFailed(other.to_string()),
            })?;
        Ok(())
    }

    /// Look up an account by email (case-insensitive).
    pub fn get_account_by_email(&self, email: &str) -> Result<Option<AccountRow>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, email, password_hash, created_at FROM accounts WHERE email = ?1",
                params![email],
                parse_account_row,
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Look up an account by id.
    pub fn get_account(&self, id: Uuid) -> Result<Option<AccountRow>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, email, password_hash, created_at FROM accounts WHERE id = ?1",
                params![id.to_string()],
                parse_account_row,
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Record that an account signed in and make it the active session.
    pub fn set_session(&self, account_id: Uuid) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "UPDATE accounts SET last_sign_in_at = ?1 WHERE id = ?2",
                params![now, account_id.to_string()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn
            .execute(
                "INSERT INTO auth_session (slot, account_id, signed_in_at) VALUES (1, ?1, ?2)
                 ON CONFLICT(slot) DO UPDATE SET account_id = excluded.account_id,
                                                 signed_in_at = excluded.signed_in_at",
                params![account_id.to_string(), now],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    /// Get the account id of the active session, if any.
    pub fn get_session(&self) -> Result<Option<Uuid>, DatabaseError> {
        let id: Option<String> = self
            .conn
            .query_row(
                "SELECT account_id FROM auth_session WHERE slot = 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        id.map(|s| {
            Uuid::parse_str(&s).map_err(|e| DatabaseError::DeserializationError(e.to_string()))
        })
        .transpose()
    }

    /// Clear the active session.
    pub fn clear_session(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM auth_session", [])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }
}

fn parse_account_row(row: &rusqlite::Row<'_>) -> SqliteResult<AccountRow> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(3)?;

    Ok(AccountRow {
        id: Uuid::parse_str(&id).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
    })
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}
