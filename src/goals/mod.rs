//! Training goals module.
//!
//! Free-text goals listed alongside the workout log.

pub mod manager;
pub mod types;

// Re-exports for convenience
pub use manager::GoalManager;
pub use types::GoalRecord;
