//! Daily calorie goal calculation.
//!
//! BMR uses the Mifflin-St Jeor form with the app's coefficients, scaled by
//! the activity multiplier (TDEE) and then by the weight-goal adjustment.

use serde::{Deserialize, Serialize};

use super::profile::UserProfile;

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Pounds per kilogram.
pub const LB_PER_KG: f64 = 2.205;

/// Intermediate values of the goal calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieBreakdown {
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Basal metabolic rate (kcal/day)
    pub bmr: f64,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: f64,
    /// Goal after the weight-goal adjustment (kcal/day)
    pub daily_goal: f64,
}

impl CalorieBreakdown {
    /// Daily goal rounded to the nearest whole calorie.
    pub fn rounded_goal(&self) -> i64 {
        self.daily_goal.round() as i64
    }
}

/// Compute every step of the calculation.
pub fn breakdown(profile: &UserProfile) -> CalorieBreakdown {
    let height_cm = f64::from(profile.total_height_inches()) * CM_PER_INCH;
    let weight_kg = profile.weight_pounds / LB_PER_KG;
    let age = f64::from(profile.age_years);

    let bmr = 9.99 * weight_kg + 6.25 * height_cm - 4.92 * age + profile.gender.bmr_offset();
    let tdee = bmr * profile.activity_level.multiplier();
    let daily_goal = tdee * (1.0 + profile.weight_goal.adjustment());

    tracing::debug!(height_cm, weight_kg, bmr, tdee, daily_goal, "Computed calorie goal");

    CalorieBreakdown {
        height_cm,
        weight_kg,
        bmr,
        tdee,
        daily_goal,
    }
}

/// Daily calorie goal (unrounded).
pub fn compute_daily_goal(profile: &UserProfile) -> f64 {
    breakdown(profile).daily_goal
}
