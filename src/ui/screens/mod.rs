//! UI screens for the application.

pub mod calendar;
pub mod calorie_counter;
pub mod login;
pub mod workout_creator;

pub use calendar::CalendarScreen;
pub use calorie_counter::CalorieCounterScreen;
pub use login::{LoginAction, LoginMode, LoginScreen};
pub use workout_creator::WorkoutCreatorScreen;

/// Screen navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Sign in / create account
    #[default]
    Login,
    /// Month calendar
    Calendar,
    /// Calorie wizard and intake tracking
    CalorieCounter,
    /// Workout log and goals
    Workouts,
}

impl Screen {
    /// Screens reachable from the tab bar once signed in.
    pub const TABS: [Screen; 3] = [Screen::Calendar, Screen::CalorieCounter, Screen::Workouts];

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Calendar => "Calendar",
            Screen::CalorieCounter => "Calorie Counter",
            Screen::Workouts => "Workouts",
        }
    }

    /// Check if the screen requires a signed-in user.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Screen::Login)
    }
}
