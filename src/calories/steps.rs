//! Calorie wizard steps.

use serde::{Deserialize, Serialize};

/// Steps of the calorie goal wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WizardStep {
    /// Gender selection
    #[default]
    Gender,
    /// Age in years
    Age,
    /// Height in feet and inches
    Height,
    /// Weight in pounds
    Weight,
    /// Activity level selection
    ActivityLevel,
    /// Weight goal selection
    WeightGoal,
    /// Computed goal shown before tracking starts
    Result,
    /// Daily intake tracking
    Tracking,
}

/// How a step collects its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepInput {
    /// Pick one of a fixed list of options
    Choice,
    /// Free numeric text fields
    Numeric,
    /// Nothing to enter, just confirm
    Confirm,
    /// Repeated calorie entries
    Entry,
}

impl WizardStep {
    /// Get all steps in order.
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::Gender,
            WizardStep::Age,
            WizardStep::Height,
            WizardStep::Weight,
            WizardStep::ActivityLevel,
            WizardStep::WeightGoal,
            WizardStep::Result,
            WizardStep::Tracking,
        ]
    }

    /// Get the step index (0-based).
    pub fn index(&self) -> usize {
        Self::all().iter().position(|s| s == self).unwrap_or(0)
    }

    /// Step entered after this one validates. `Tracking` is terminal.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Gender => Some(WizardStep::Age),
            WizardStep::Age => Some(WizardStep::Height),
            WizardStep::Height => Some(WizardStep::Weight),
            WizardStep::Weight => Some(WizardStep::ActivityLevel),
            WizardStep::ActivityLevel => Some(WizardStep::WeightGoal),
            WizardStep::WeightGoal => Some(WizardStep::Result),
            WizardStep::Result => Some(WizardStep::Tracking),
            WizardStep::Tracking => None,
        }
    }

    /// Step reached by going back. Neither the first question nor tracking can go back.
    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Gender | WizardStep::Tracking => None,
            WizardStep::Age => Some(WizardStep::Gender),
            WizardStep::Height => Some(WizardStep::Age),
            WizardStep::Weight => Some(WizardStep::Height),
            WizardStep::ActivityLevel => Some(WizardStep::Weight),
            WizardStep::WeightGoal => Some(WizardStep::ActivityLevel),
            WizardStep::Result => Some(WizardStep::WeightGoal),
        }
    }

    /// Kind of input the step renders.
    pub fn input(&self) -> StepInput {
        match self {
            WizardStep::Gender | WizardStep::ActivityLevel | WizardStep::WeightGoal => {
                StepInput::Choice
            }
            WizardStep::Age | WizardStep::Height | WizardStep::Weight => StepInput::Numeric,
            WizardStep::Result => StepInput::Confirm,
            WizardStep::Tracking => StepInput::Entry,
        }
    }

    /// Short name of the step.
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Gender => "Gender",
            WizardStep::Age => "Age",
            WizardStep::Height => "Height",
            WizardStep::Weight => "Weight",
            WizardStep::ActivityLevel => "Activity level",
            WizardStep::WeightGoal => "Weight goal",
            WizardStep::Result => "Result",
            WizardStep::Tracking => "Tracking",
        }
    }

    /// Question shown for this step.
    pub fn prompt(&self) -> &'static str {
        match self {
            WizardStep::Gender => "What is your gender?",
            WizardStep::Age => "How old are you?",
            WizardStep::Height => "How tall are you?",
            WizardStep::Weight => "How much do you weigh (lbs)?",
            WizardStep::ActivityLevel => "What is your activity level?",
            WizardStep::WeightGoal => "What is your weight goal?",
            WizardStep::Result => "Your daily calorie goal",
            WizardStep::Tracking => "Enter calories as you eat throughout the day",
        }
    }

    /// Message shown when the step's answer is missing or invalid.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            WizardStep::Gender | WizardStep::ActivityLevel | WizardStep::WeightGoal => {
                Some("Please select an option")
            }
            WizardStep::Age | WizardStep::Weight => Some("Please enter a valid number"),
            WizardStep::Height => Some("Please enter feet and inches (0-11)"),
            WizardStep::Result | WizardStep::Tracking => None,
        }
    }

    /// Check if this step is one of the questions.
    pub fn is_question(&self) -> bool {
        self.index() < WizardStep::Result.index()
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prompt())
    }
}
