//! Input validation errors.
//!
//! These are always recovered locally: the screen stays where it is and
//! shows a message. Storage failures are reported separately through
//! [`crate::storage::PersistenceError`].

use thiserror::Error;
use uuid::Uuid;

/// Missing or malformed user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No gender selected")]
    MissingGender,

    #[error("Age must be a whole number of years, got '{0}'")]
    InvalidAge(String),

    #[error("Height must be whole feet and 0-11 inches, got '{feet}' ft '{inches}' in")]
    InvalidHeight { feet: String, inches: String },

    #[error("Weight must be a number of pounds, got '{0}'")]
    InvalidWeight(String),

    #[error("No activity level selected")]
    MissingActivityLevel,

    #[error("No weight goal selected")]
    MissingWeightGoal,

    #[error("Calorie tracking has already started")]
    AlreadyTracking,

    #[error("Workout name cannot be empty")]
    EmptyWorkoutName,

    #[error("No workout at position {0}")]
    WorkoutIndexOutOfRange(usize),

    #[error("No workout with id {0}")]
    UnknownWorkout(Uuid),

    #[error("Goal text cannot be empty")]
    EmptyGoalText,

    #[error("No goal with id {0}")]
    UnknownGoal(u64),

    #[error("No goal ids are left")]
    GoalIdsExhausted,
}
