//! Running calorie intake for the current session.
//!
//! Intake is not persisted: each session starts from zero.

/// Calories eaten so far against the daily goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeSession {
    daily_goal: i64,
    total_consumed: i64,
    goal_reached: bool,
}

impl IntakeSession {
    /// Start a session against a rounded daily goal.
    pub fn new(daily_goal: i64) -> Self {
        Self {
            daily_goal,
            total_consumed: 0,
            goal_reached: false,
        }
    }

    /// Add a meal entered as text.
    ///
    /// Text that is not a whole number is ignored and `false` is returned.
    pub fn add_calories(&mut self, amount: &str) -> bool {
        let Ok(calories) = amount.trim().parse::<i64>() else {
            tracing::debug!(amount, "Ignoring non-numeric calorie entry");
            return false;
        };

        self.total_consumed = self.total_consumed.saturating_add(calories);
        self.check_goal();
        true
    }

    /// Replace the goal, e.g. after the profile was recalculated.
    ///
    /// `goal_reached` never goes back to false within a session.
    pub fn set_daily_goal(&mut self, daily_goal: i64) {
        self.daily_goal = daily_goal;
        self.check_goal();
    }

    fn check_goal(&mut self) {
        if !self.goal_reached && self.total_consumed >= self.daily_goal {
            self.goal_reached = true;
            tracing::info!(
                total = self.total_consumed,
                goal = self.daily_goal,
                "Daily calorie goal reached"
            );
        }
    }

    /// Goal for the day.
    pub fn daily_goal(&self) -> i64 {
        self.daily_goal
    }

    /// Calories entered so far.
    pub fn total_consumed(&self) -> i64 {
        self.total_consumed
    }

    /// Calories left before the goal (zero once reached).
    pub fn remaining(&self) -> i64 {
        (self.daily_goal - self.total_consumed).max(0)
    }

    /// Whether the goal has been reached at any point this session.
    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }
}
