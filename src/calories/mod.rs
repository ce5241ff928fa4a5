//! Calorie goal module.
//!
//! Covers the questionnaire that builds a user profile, the BMR/TDEE
//! calculation of a daily calorie goal, and the running intake tally
//! checked against that goal.

pub mod calculator;
pub mod intake;
pub mod profile;
pub mod steps;
pub mod wizard;

// Re-exports for convenience
pub use calculator::{breakdown, compute_daily_goal, CalorieBreakdown};
pub use intake::IntakeSession;
pub use profile::{ActivityLevel, Gender, UserProfile, WeightGoal};
pub use steps::{StepInput, WizardStep};
pub use wizard::{CalorieWizard, WizardAnswers};
