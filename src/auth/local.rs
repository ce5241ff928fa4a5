//! Local identity provider backed by the SQLite database.
//!
//! Passwords are stored as bcrypt hashes. The signed-in account is kept in
//! the `auth_session` table so a restart resumes the session.

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use super::{is_valid_email, AuthError, AuthListener, AuthSubscription, IdentityProvider, UserIdentity};
use crate::storage::{AccountRow, AuthSettings, Database, DatabaseError};

/// Identity provider storing accounts locally.
pub struct LocalIdentityProvider {
    db: Database,
    current: Option<UserIdentity>,
    listeners: Vec<(u64, AuthListener)>,
    next_listener_id: u64,
    min_password_length: usize,
    hash_cost: u32,
}

impl LocalIdentityProvider {
    /// Open the provider on the database at `path`, resuming any saved session.
    pub fn open(path: &Path, settings: &AuthSettings) -> Result<Self, AuthError> {
        Self::from_database(Database::open(path)?, settings)
    }

    /// Open the provider on an in-memory database.
    pub fn open_in_memory(settings: &AuthSettings) -> Result<Self, AuthError> {
        Self::from_database(Database::open_in_memory()?, settings)
    }

    fn from_database(db: Database, settings: &AuthSettings) -> Result<Self, AuthError> {
        let current = match db.get_session()? {
            Some(account_id) => db.get_account(account_id)?.map(|row| identity(&row)),
            None => None,
        };

        if let Some(user) = &current {
            tracing::info!(email = %user.email, "Resumed saved session");
        }

        Ok(Self {
            db,
            current,
            listeners: Vec::new(),
            next_listener_id: 1,
            min_password_length: settings.min_password_length,
            hash_cost: bcrypt::DEFAULT_COST,
        })
    }

    /// Use a different bcrypt cost (tests use the minimum).
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Drop all listeners. The saved session is kept for the next start.
    pub fn shutdown(mut self) {
        tracing::info!(listeners = self.listeners.len(), "Identity provider shutting down");
        self.listeners.clear();
    }

    fn set_current(&mut self, user: Option<UserIdentity>) {
        self.current = user;
        for (_, listener) in &self.listeners {
            listener(self.current.as_ref());
        }
    }
}

fn identity(row: &AccountRow) -> UserIdentity {
    UserIdentity {
        uid: row.id,
        email: row.email.clone(),
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn current_user(&self) -> Option<UserIdentity> {
        self.current.clone()
    }

    fn on_auth_change(&mut self, listener: AuthListener) -> AuthSubscription {
        let id = self.next_listener_id;
        self.next_listener_id += 1;

        listener(self.current.as_ref());
        self.listeners.push((id, listener));

        AuthSubscription(id)
    }

    fn unsubscribe(&mut self, subscription: AuthSubscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription.0);
        self.listeners.len() != before
    }

    fn sign_in_with_password(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, AuthError> {
        let email = email.trim();
        tracing::info!("Sign-in attempt for {}", email);

        let Some(account) = self.db.get_account_by_email(email)? else {
            tracing::warn!("Sign-in failed for {}: no such account", email);
            return Err(AuthError::InvalidCredentials);
        };

        if !bcrypt::verify(password, &account.password_hash)? {
            tracing::warn!("Sign-in failed for {}: wrong password", email);
            return Err(AuthError::InvalidCredentials);
        }

        self.db.set_session(account.id)?;
        let user = identity(&account);
        self.set_current(Some(user.clone()));

        tracing::info!("Signed in as {}", user.email);
        Ok(user)
    }

    fn create_account(&mut self, email: &str, password: &str) -> Result<UserIdentity, AuthError> {
        let email = email.trim();

        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }

        if password.chars().count() < self.min_password_length {
            return Err(AuthError::WeakPassword {
                min_length: self.min_password_length,
            });
        }

        let account = AccountRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: bcrypt::hash(password, self.hash_cost)?,
            created_at: Utc::now(),
        };

        self.db.insert_account(&account).map_err(|e| match e {
            DatabaseError::ConstraintViolation(_) => AuthError::AccountExists(email.to_string()),
            other => AuthError::Database(other),
        })?;

        self.db.set_session(account.id)?;
        let user = identity(&account);
        self.set_current(Some(user.clone()));

        tracing::info!("Created account {} ({})", user.email, user.uid);
        Ok(user)
    }

    fn sign_out(&mut self) -> Result<(), AuthError> {
        self.db.clear_session()?;
        if let Some(user) = &self.current {
            tracing::info!("Signed out {}", user.email);
        }
        self.set_current(None);
        Ok(())
    }
}
