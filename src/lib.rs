//! FitTrack - personal fitness tracker
//!
//! Calorie goal wizard with daily intake tracking, a workout log with goals,
//! and local email/password accounts. All user data is kept in a local
//! SQLite key-value store written behind the UI.

pub mod auth;
pub mod calories;
pub mod error;
pub mod goals;
pub mod storage;
pub mod ui;
pub mod workouts;

// Re-export commonly used types
pub use auth::{IdentityProvider, LocalIdentityProvider, UserIdentity};
pub use calories::{compute_daily_goal, CalorieWizard, UserProfile};
pub use error::ValidationError;
pub use goals::GoalManager;
pub use storage::{AppConfig, Persister, SqliteStore};
pub use workouts::WorkoutLog;
