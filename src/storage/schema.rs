//! Database schema definitions for FitTrack.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Key-value store backing the calorie wizard, workout log and goals
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Local accounts for the identity provider
CREATE TABLE IF NOT EXISTS accounts (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL,
    last_sign_in_at TEXT
);

-- Signed-in account, at most one row
CREATE TABLE IF NOT EXISTS auth_session (
    slot INTEGER PRIMARY KEY CHECK (slot = 1),
    account_id TEXT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    signed_in_at TEXT NOT NULL
);
"#;

/// SQL for creating the schema version table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;
