//! Goal type definitions.

use serde::{Deserialize, Serialize};

/// A free-text training goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    /// Identifier, never reused
    pub id: u64,
    /// What the user wants to achieve
    pub text: String,
}

impl GoalRecord {
    /// Create a goal.
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for GoalRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.id, self.text)
    }
}
