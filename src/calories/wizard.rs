//! Calorie goal wizard.
//!
//! A linear questionnaire: each step validates its answer before the wizard
//! moves on, confirmed answers are persisted one key at a time, and the last
//! step computes the daily goal and opens an [`IntakeSession`].

use serde::{Deserialize, Serialize};

use super::calculator::{self, CalorieBreakdown};
use super::intake::IntakeSession;
use super::profile::{ActivityLevel, Gender, UserProfile, WeightGoal};
use super::steps::WizardStep;
use crate::error::ValidationError;
use crate::storage::kv::keys;
use crate::storage::{PendingWrite, PersistenceError, Persister};

/// Raw answers as entered. Text fields keep exactly what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardAnswers {
    pub gender: Option<Gender>,
    pub age: String,
    pub height_feet: String,
    pub height_inches: String,
    pub weight_pounds: String,
    pub activity_level: Option<ActivityLevel>,
    pub weight_goal: Option<WeightGoal>,
}

impl WizardAnswers {
    /// Validate every answer and build the typed profile.
    pub fn to_profile(&self) -> Result<UserProfile, ValidationError> {
        let gender = self.gender.ok_or(ValidationError::MissingGender)?;
        let age_years = parse_age(&self.age)?;
        let (height_feet, height_inches) = parse_height(&self.height_feet, &self.height_inches)?;
        let weight_pounds = parse_weight(&self.weight_pounds)?;
        let activity_level = self
            .activity_level
            .ok_or(ValidationError::MissingActivityLevel)?;
        let weight_goal = self.weight_goal.ok_or(ValidationError::MissingWeightGoal)?;

        Ok(UserProfile {
            gender,
            age_years,
            height_feet,
            height_inches,
            weight_pounds,
            activity_level,
            weight_goal,
        })
    }
}

/// Parse an age in whole years.
pub fn parse_age(text: &str) -> Result<u32, ValidationError> {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|age| *age > 0)
        .ok_or_else(|| ValidationError::InvalidAge(text.to_string()))
}

/// Parse a height given as whole feet plus 0-11 inches.
pub fn parse_height(feet: &str, inches: &str) -> Result<(u32, u32), ValidationError> {
    let invalid = || ValidationError::InvalidHeight {
        feet: feet.to_string(),
        inches: inches.to_string(),
    };

    let feet_value = feet.trim().parse::<u32>().map_err(|_| invalid())?;
    let inches_value = inches.trim().parse::<u32>().map_err(|_| invalid())?;

    if inches_value > 11 {
        return Err(invalid());
    }

    Ok((feet_value, inches_value))
}

/// Parse a positive weight in pounds.
pub fn parse_weight(text: &str) -> Result<f64, ValidationError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w > 0.0)
        .ok_or_else(|| ValidationError::InvalidWeight(text.to_string()))
}

/// Calorie goal wizard state.
pub struct CalorieWizard {
    step: WizardStep,
    answers: WizardAnswers,
    error_visible: bool,
    intake: Option<IntakeSession>,
    saved_daily_goal: Option<i64>,
    persister: Persister,
}

impl CalorieWizard {
    /// Create an empty wizard.
    pub fn new(persister: Persister) -> Self {
        Self {
            step: WizardStep::default(),
            answers: WizardAnswers::default(),
            error_visible: false,
            intake: None,
            saved_daily_goal: None,
            persister,
        }
    }

    /// Create a wizard pre-filled from storage. Read failures are logged and skipped.
    pub fn load(persister: Persister) -> Self {
        let mut wizard = Self::new(persister);
        for error in wizard.hydrate() {
            tracing::warn!(error = %error, "Could not restore calorie wizard answer");
        }
        wizard
    }

    /// Restore previously confirmed answers from storage.
    ///
    /// Every key is read independently; the returned errors are the reads that failed.
    /// The wizard always restarts at the first question with the answers filled in.
    pub fn hydrate(&mut self) -> Vec<PersistenceError> {
        let mut errors = Vec::new();
        let mut read = |key: &str| match self.persister.get(key) {
            Ok(value) => value,
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let gender = read(keys::GENDER);
        let age = read(keys::AGE);
        let height_feet = read(keys::HEIGHT_FEET);
        let height_inches = read(keys::HEIGHT_INCHES);
        let weight = read(keys::WEIGHT_POUNDS);
        let activity = read(keys::ACTIVITY_LEVEL).or_else(|| {
            let legacy = read(keys::LEGACY_ACTIVITY_LEVEL);
            if legacy.is_some() {
                tracing::warn!(
                    "Using activity level stored under legacy key '{}'",
                    keys::LEGACY_ACTIVITY_LEVEL
                );
            }
            legacy
        });
        let weight_goal = read(keys::WEIGHT_GOAL);
        let daily_goal = read(keys::DAILY_GOAL);

        if let Some(raw) = gender {
            self.answers.gender = parse_index(keys::GENDER, &raw).and_then(Gender::from_index);
        }
        if let Some(raw) = age {
            self.answers.age = raw;
        }
        if let Some(raw) = height_feet {
            self.answers.height_feet = raw;
        }
        if let Some(raw) = height_inches {
            self.answers.height_inches = raw;
        }
        if let Some(raw) = weight {
            self.answers.weight_pounds = raw;
        }
        if let Some(raw) = activity {
            self.answers.activity_level =
                parse_index(keys::ACTIVITY_LEVEL, &raw).and_then(ActivityLevel::from_index);
        }
        if let Some(raw) = weight_goal {
            self.answers.weight_goal =
                parse_index(keys::WEIGHT_GOAL, &raw).and_then(WeightGoal::from_index);
        }
        if let Some(raw) = daily_goal {
            self.saved_daily_goal = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|g| g.is_finite())
                .map(|g| g.round() as i64);
        }

        tracing::info!(
            complete = self.answers.to_profile().is_ok(),
            "Restored calorie wizard answers"
        );

        errors
    }

    /// Current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Answers entered so far.
    pub fn answers(&self) -> &WizardAnswers {
        &self.answers
    }

    /// Whether the current step's error message should be shown.
    pub fn error_visible(&self) -> bool {
        self.error_visible
    }

    /// Error message for the current step, if it is visible.
    pub fn error_message(&self) -> Option<&'static str> {
        if self.error_visible {
            self.step.error_message()
        } else {
            None
        }
    }

    // ========== Field edits ==========

    /// Select a gender.
    pub fn select_gender(&mut self, gender: Gender) {
        self.answers.gender = Some(gender);
        self.after_edit();
    }

    /// Edit the age text.
    pub fn set_age(&mut self, text: impl Into<String>) {
        self.answers.age = text.into();
        self.after_edit();
    }

    /// Edit the feet text.
    pub fn set_height_feet(&mut self, text: impl Into<String>) {
        self.answers.height_feet = text.into();
        self.after_edit();
    }

    /// Edit the inches text.
    pub fn set_height_inches(&mut self, text: impl Into<String>) {
        self.answers.height_inches = text.into();
        self.after_edit();
    }

    /// Edit the weight text.
    pub fn set_weight(&mut self, text: impl Into<String>) {
        self.answers.weight_pounds = text.into();
        self.after_edit();
    }

    /// Select an activity level.
    pub fn select_activity_level(&mut self, level: ActivityLevel) {
        self.answers.activity_level = Some(level);
        self.after_edit();
    }

    /// Select a weight goal.
    pub fn select_weight_goal(&mut self, goal: WeightGoal) {
        self.answers.weight_goal = Some(goal);
        self.after_edit();
    }

    fn after_edit(&mut self) {
        self.error_visible = false;

        // Tracking follows the profile, but a reached goal stays reached.
        let goal = self.daily_goal_from_answers();
        if let (Some(intake), Some(goal)) = (self.intake.as_mut(), goal) {
            intake.set_daily_goal(goal);
        }
    }

    // ========== Navigation ==========

    /// Validate the current step and move to the next one.
    ///
    /// On success returns the receipts for the values persisted by this step.
    /// On failure the step is unchanged, the error becomes visible, and no
    /// answer is discarded.
    pub fn advance(&mut self) -> Result<Vec<PendingWrite>, ValidationError> {
        match self.confirm_step() {
            Ok(writes) => {
                let from = self.step;
                if let Some(next) = self.step.next() {
                    self.step = next;
                }
                self.error_visible = false;
                tracing::debug!(from = ?from, to = ?self.step, "Calorie wizard advanced");
                Ok(writes)
            }
            Err(ValidationError::AlreadyTracking) => Err(ValidationError::AlreadyTracking),
            Err(e) => {
                self.error_visible = true;
                tracing::debug!(step = ?self.step, error = %e, "Calorie wizard step rejected");
                Err(e)
            }
        }
    }

    /// Validate the current step's answer and queue its writes.
    fn confirm_step(&mut self) -> Result<Vec<PendingWrite>, ValidationError> {
        let p = &self.persister;

        let writes = match self.step {
            WizardStep::Gender => {
                let gender = self.answers.gender.ok_or(ValidationError::MissingGender)?;
                vec![p.set(keys::GENDER, gender.index().to_string())]
            }
            WizardStep::Age => {
                let age = parse_age(&self.answers.age)?;
                vec![p.set(keys::AGE, age.to_string())]
            }
            WizardStep::Height => {
                let (feet, inches) =
                    parse_height(&self.answers.height_feet, &self.answers.height_inches)?;
                vec![
                    p.set(keys::HEIGHT_FEET, feet.to_string()),
                    p.set(keys::HEIGHT_INCHES, inches.to_string()),
                ]
            }
            WizardStep::Weight => {
                let weight = parse_weight(&self.answers.weight_pounds)?;
                vec![p.set(keys::WEIGHT_POUNDS, weight.to_string())]
            }
            WizardStep::ActivityLevel => {
                let level = self
                    .answers
                    .activity_level
                    .ok_or(ValidationError::MissingActivityLevel)?;
                vec![p.set(keys::ACTIVITY_LEVEL, level.index().to_string())]
            }
            WizardStep::WeightGoal => {
                let goal = self
                    .answers
                    .weight_goal
                    .ok_or(ValidationError::MissingWeightGoal)?;
                vec![p.set(keys::WEIGHT_GOAL, goal.index().to_string())]
            }
            WizardStep::Result => {
                let goal = calculator::breakdown(&self.answers.to_profile()?).rounded_goal();
                self.saved_daily_goal = Some(goal);
                self.intake = Some(IntakeSession::new(goal));
                tracing::info!(daily_goal = goal, "Daily calorie goal set");
                vec![p.set(keys::DAILY_GOAL, goal.to_string())]
            }
            WizardStep::Tracking => return Err(ValidationError::AlreadyTracking),
        };

        Ok(writes)
    }

    /// Go back one question. Returns whether the step changed.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(prev) => {
                self.step = prev;
                self.error_visible = false;
                true
            }
            None => false,
        }
    }

    /// Return to the first question, keeping the answers and ending tracking.
    pub fn restart(&mut self) {
        self.step = WizardStep::default();
        self.error_visible = false;
        self.intake = None;
    }

    // ========== Derived values ==========

    /// The typed profile, if every answer is valid.
    pub fn profile(&self) -> Result<UserProfile, ValidationError> {
        self.answers.to_profile()
    }

    /// Calculation details, if every answer is valid.
    pub fn breakdown(&self) -> Option<CalorieBreakdown> {
        self.profile().ok().map(|p| calculator::breakdown(&p))
    }

    fn daily_goal_from_answers(&self) -> Option<i64> {
        self.breakdown().map(|b| b.rounded_goal())
    }

    /// Rounded daily goal from the current answers.
    pub fn daily_goal(&self) -> Option<i64> {
        self.daily_goal_from_answers()
    }

    /// Goal persisted by the last completed wizard run.
    pub fn saved_daily_goal(&self) -> Option<i64> {
        self.saved_daily_goal
    }

    // ========== Tracking ==========

    /// Intake session, once tracking has started.
    pub fn intake(&self) -> Option<&IntakeSession> {
        self.intake.as_ref()
    }

    /// Add a meal while tracking. Ignored outside tracking or for non-numeric text.
    pub fn add_calories(&mut self, amount: &str) -> bool {
        match self.intake.as_mut() {
            Some(intake) => intake.add_calories(amount),
            None => false,
        }
    }
}

fn parse_index(key: &str, raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(index) => Some(index),
        Err(_) => {
            tracing::warn!(key, value = raw, "Ignoring malformed stored selection");
            None
        }
    }
}
