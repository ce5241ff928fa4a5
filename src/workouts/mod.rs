//! Workout module: logged exercises and their display order.

pub mod log;
pub mod types;

pub use log::{SortOrder, WorkoutLog};
pub use types::{
    format_display_date, is_numeric_input, parse_display_date, WorkoutDraft, WorkoutRecord,
};
