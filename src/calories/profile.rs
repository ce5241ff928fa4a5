//! Physiological profile used for the daily calorie goal.

use serde::{Deserialize, Serialize};

/// Biological sex used by the BMR equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All options, in the order they are presented and stored.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Stored index of this option.
    pub fn index(self) -> usize {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }

    /// Option for a stored index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Constant term of the BMR equation.
    pub fn bmr_offset(self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        }
    }
}

/// Typical weekly activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    /// All options, in the order they are presented and stored.
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// Stored index of this option.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|l| *l == self).unwrap_or(0)
    }

    /// Option for a stored index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// BMR multiplier giving total daily energy expenditure.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary: little to no exercise with desk job",
            ActivityLevel::LightlyActive => "Lightly Active: light exercise 1-3 times per week",
            ActivityLevel::ModeratelyActive => {
                "Moderately Active: moderate exercise 3-5 times per week"
            }
            ActivityLevel::VeryActive => "Very Active: hard exercise 6-7 times per week",
            ActivityLevel::ExtremelyActive => {
                "Extremely Active: hard daily exercise and a physical job"
            }
        }
    }
}

/// Desired weight change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightGoal {
    Lose,
    SlowlyLose,
    Maintain,
    SlowlyGain,
    Gain,
}

impl WeightGoal {
    /// All options, in the order they are presented and stored.
    pub const ALL: [WeightGoal; 5] = [
        WeightGoal::Lose,
        WeightGoal::SlowlyLose,
        WeightGoal::Maintain,
        WeightGoal::SlowlyGain,
        WeightGoal::Gain,
    ];

    /// Stored index of this option.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|g| *g == self).unwrap_or(0)
    }

    /// Option for a stored index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Fractional adjustment applied to TDEE.
    pub fn adjustment(self) -> f64 {
        match self {
            WeightGoal::Lose => -0.20,
            WeightGoal::SlowlyLose => -0.10,
            WeightGoal::Maintain => 0.0,
            WeightGoal::SlowlyGain => 0.10,
            WeightGoal::Gain => 0.20,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            WeightGoal::Lose => "-20%: Lose weight",
            WeightGoal::SlowlyLose => "-10%: Slowly lose weight",
            WeightGoal::Maintain => "0%: Maintain weight",
            WeightGoal::SlowlyGain => "+10%: Slowly gain weight",
            WeightGoal::Gain => "+20%: Gain weight",
        }
    }
}

/// A complete, validated set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    /// Age in whole years
    pub age_years: u32,
    /// Height, feet component
    pub height_feet: u32,
    /// Height, inches component (0-11)
    pub height_inches: u32,
    /// Body weight in pounds
    pub weight_pounds: f64,
    pub activity_level: ActivityLevel,
    pub weight_goal: WeightGoal,
}

impl UserProfile {
    /// Total height in inches.
    pub fn total_height_inches(&self) -> u32 {
        12 * self.height_feet + self.height_inches
    }
}
