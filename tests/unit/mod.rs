//! Unit test modules.

mod calorie_goal_test;
mod intake_test;
mod wizard_test;
mod workout_sort_test;
