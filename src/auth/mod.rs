//! Email/password identity.
//!
//! Screens only see the [`IdentityProvider`] trait. The provider is built
//! once at startup, handed to the app, and shut down on exit; there is no
//! global instance.

pub mod local;

use thiserror::Error;
use uuid::Uuid;

use crate::storage::DatabaseError;

pub use local::LocalIdentityProvider;

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Account identifier
    pub uid: Uuid,
    /// Login email
    pub email: String,
}

/// Callback invoked whenever the signed-in user changes.
pub type AuthListener = Box<dyn Fn(Option<&UserIdentity>) + Send>;

/// Handle returned by [`IdentityProvider::on_auth_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthSubscription(pub(crate) u64);

/// Identity provider used by the login screen and the logout button.
pub trait IdentityProvider {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<UserIdentity>;

    /// Register a listener. It is called immediately with the current user
    /// and again after every sign-in or sign-out.
    fn on_auth_change(&mut self, listener: AuthListener) -> AuthSubscription;

    /// Remove a listener. Returns whether it was registered.
    fn unsubscribe(&mut self, subscription: AuthSubscription) -> bool;

    /// Sign in with an existing account.
    fn sign_in_with_password(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, AuthError>;

    /// Create an account and sign in to it.
    fn create_account(&mut self, email: &str, password: &str) -> Result<UserIdentity, AuthError>;

    /// Sign out. Signing out while signed out is not an error.
    fn sign_out(&mut self) -> Result<(), AuthError>;
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account already exists for {0}")]
    AccountExists(String),

    #[error("Password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// Basic email shape check: something@domain.tld.
pub fn is_valid_email(email: &str) -> bool {
    let Some(at_pos) = email.find('@') else {
        return false;
    };
    if at_pos == 0 || at_pos == email.len() - 1 || email.contains(char::is_whitespace) {
        return false;
    }
    let domain_part = &email[at_pos + 1..];
    domain_part.contains('.') && !domain_part.starts_with('.') && !domain_part.ends_with('.')
}
