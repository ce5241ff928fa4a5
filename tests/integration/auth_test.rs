//! Integration tests for local accounts.

use fittrack::auth::{AuthError, IdentityProvider, LocalIdentityProvider};
use fittrack::storage::{AuthSettings, KeyValueStore, SqliteStore};

/// Cheapest cost bcrypt accepts.
const TEST_HASH_COST: u32 = 4;

fn open(path: &std::path::Path, settings: &AuthSettings) -> LocalIdentityProvider {
    LocalIdentityProvider::open(path, settings)
        .unwrap()
        .with_hash_cost(TEST_HASH_COST)
}

#[test]
fn test_accounts_share_database_with_user_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fittrack.db");
    let settings = AuthSettings::default();

    let store = SqliteStore::open(&path).unwrap();
    store.set("goals", "[]").unwrap();

    let mut auth = open(&path, &settings);
    let user = auth.create_account("lifter@example.com", "hunter22").unwrap();

    assert_eq!(store.get("goals").unwrap().as_deref(), Some("[]"));
    assert_eq!(auth.current_user(), Some(user));
}

#[test]
fn test_sign_out_is_remembered() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fittrack.db");
    let settings = AuthSettings::default();

    {
        let mut auth = open(&path, &settings);
        auth.create_account("runner@example.com", "marathon").unwrap();
        auth.sign_out().unwrap();
        auth.shutdown();
    }

    let mut auth = open(&path, &settings);
    assert_eq!(auth.current_user(), None);

    let user = auth.sign_in_with_password("runner@example.com", "marathon").unwrap();
    assert_eq!(user.email, "runner@example.com");
}

#[test]
fn test_configured_password_length() {
    let settings = AuthSettings {
        min_password_length: 10,
    };
    let mut auth = LocalIdentityProvider::open_in_memory(&settings)
        .unwrap()
        .with_hash_cost(TEST_HASH_COST);

    let result = auth.create_account("a@example.com", "short123");
    assert!(matches!(result, Err(AuthError::WeakPassword { min_length: 10 })));
    assert!(auth.create_account("a@example.com", "long-enough-1").is_ok());
}
