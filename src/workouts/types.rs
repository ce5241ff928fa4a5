//! Workout types.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::error::ValidationError;

/// Format used for the date shown on (and stored with) each workout, e.g. "Mon, Oct 19".
pub const DISPLAY_DATE_FORMAT: &str = "%a, %b %-d";

/// Leap year used to place yearless display dates on a calendar.
const REFERENCE_YEAR: i32 = 2000;

/// A logged workout.
///
/// Field names match the stored JSON of earlier builds; `id` is filled in
/// for records saved before ids existed, and `created_on` is absent on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    /// Stable identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Exercise name
    #[serde(rename = "workoutName")]
    pub name: String,
    /// Whether the exercise uses weights
    pub requires_weights: bool,
    /// Weight in pounds, only when `requires_weights`
    #[serde(default)]
    pub weight: Option<String>,
    /// Repetitions per set
    pub reps: String,
    /// Number of sets
    pub sets: String,
    /// Creation date as displayed
    pub date: String,
    /// Full creation date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<NaiveDate>,
}

impl WorkoutRecord {
    /// Date used for ordering.
    ///
    /// Records without `created_on` fall back to the display date, read back
    /// in a fixed leap year, so they count as older than any dated record.
    pub fn date_key(&self) -> Option<NaiveDate> {
        self.created_on.or_else(|| parse_display_date(&self.date))
    }

    /// Whether the workout was logged on `day`. Undated records match on month and day.
    pub fn falls_on(&self, day: NaiveDate) -> bool {
        match self.created_on {
            Some(created) => created == day,
            None => parse_display_date(&self.date)
                .is_some_and(|key| key.month() == day.month() && key.day() == day.day()),
        }
    }

    /// Key for alphabetical order.
    ///
    /// Names compare ignoring case and accents first ("Élan" next to "Elan");
    /// the decomposed lowercase name then puts unaccented before accented.
    pub fn name_key(&self) -> (String, String) {
        let decomposed: String = self.name.to_lowercase().nfd().collect();
        let base = decomposed.chars().filter(|c| !is_combining_mark(*c)).collect();
        (base, decomposed)
    }

    /// One-line summary, e.g. "3 x 10 @ 135 lbs".
    pub fn summary(&self) -> String {
        match (&self.weight, self.requires_weights) {
            (Some(weight), true) if !weight.is_empty() => {
                format!("{} x {} @ {} lbs", self.sets, self.reps, weight)
            }
            _ => format!("{} x {}", self.sets, self.reps),
        }
    }
}

/// Format a date the way it is shown on a workout.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Read back a display date ("Mon, Oct 19" or "Oct 19").
///
/// The result is placed in a fixed leap year so month/day ordering holds.
pub fn parse_display_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let month_day = match text.split_once(',') {
        Some((_weekday, rest)) => rest.trim(),
        None => text,
    };

    NaiveDate::parse_from_str(&format!("{month_day} {REFERENCE_YEAR}"), "%b %d %Y").ok()
}

/// Whether `text` is acceptable (possibly partial) numeric input: digits with at most one dot.
pub fn is_numeric_input(text: &str) -> bool {
    let mut seen_dot = false;
    text.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_dot => {
            seen_dot = true;
            true
        }
        _ => false,
    })
}

/// Inputs for a workout that has not been added yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutDraft {
    name: String,
    requires_weights: bool,
    weight: String,
    reps: String,
    sets: String,
}

impl WorkoutDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exercise name as typed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the weight field applies.
    pub fn requires_weights(&self) -> bool {
        self.requires_weights
    }

    /// Weight text.
    pub fn weight(&self) -> &str {
        &self.weight
    }

    /// Reps text.
    pub fn reps(&self) -> &str {
        &self.reps
    }

    /// Sets text.
    pub fn sets(&self) -> &str {
        &self.sets
    }

    /// Edit the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Toggle whether weights are used.
    pub fn set_requires_weights(&mut self, requires_weights: bool) {
        self.requires_weights = requires_weights;
    }

    /// Edit the weight. Non-numeric text is rejected and `false` returned.
    pub fn set_weight(&mut self, text: &str) -> bool {
        Self::accept_numeric(&mut self.weight, text)
    }

    /// Edit the reps. Non-numeric text is rejected and `false` returned.
    pub fn set_reps(&mut self, text: &str) -> bool {
        Self::accept_numeric(&mut self.reps, text)
    }

    /// Edit the sets. Non-numeric text is rejected and `false` returned.
    pub fn set_sets(&mut self, text: &str) -> bool {
        Self::accept_numeric(&mut self.sets, text)
    }

    fn accept_numeric(field: &mut String, text: &str) -> bool {
        if is_numeric_input(text) {
            *field = text.to_string();
            true
        } else {
            false
        }
    }

    /// Reset every input.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build a record dated `date`.
    pub fn to_record(&self, date: NaiveDate) -> Result<WorkoutRecord, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyWorkoutName);
        }

        Ok(WorkoutRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            requires_weights: self.requires_weights,
            weight: self.requires_weights.then(|| self.weight.clone()),
            reps: self.reps.clone(),
            sets: self.sets.clone(),
            date: format_display_date(date),
            created_on: Some(date),
        })
    }
}
