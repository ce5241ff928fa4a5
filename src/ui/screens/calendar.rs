//! Calendar screen: month grid with day selection.
//!
//! Workouts only carry a month and day, so a day cell matches every logged
//! workout with the same month/day regardless of year.

use chrono::{Datelike, Duration, Local, NaiveDate};
use egui::{Align, Color32, Layout, RichText, Ui, Vec2};

use crate::workouts::{WorkoutLog, WorkoutRecord};

use super::Screen;

const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Calendar screen state.
#[derive(Debug, Clone)]
pub struct CalendarScreen {
    /// First day of the displayed month
    month: NaiveDate,
    /// Selected day
    selected: NaiveDate,
}

impl Default for CalendarScreen {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl CalendarScreen {
    /// Create a calendar showing the month of `today` with `today` selected.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: first_of_month(today),
            selected: today,
        }
    }

    /// First day of the displayed month.
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    /// Selected day.
    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Select a day, moving the grid to its month.
    pub fn select(&mut self, day: NaiveDate) {
        self.selected = day;
        self.month = first_of_month(day);
    }

    /// Move the grid by whole months.
    pub fn shift_month(&mut self, delta: i32) {
        self.month = shift_month(self.month, delta);
    }

    /// Render the calendar. Returns the Workouts screen when the user asks
    /// to log a workout.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        workouts: &WorkoutLog,
        today: NaiveDate,
        accent: Color32,
    ) -> Option<Screen> {
        let mut next_screen = None;

        ui.horizontal(|ui| {
            if ui.button("<").clicked() {
                self.shift_month(-1);
            }
            ui.heading(self.month.format("%B %Y").to_string());
            if ui.button(">").clicked() {
                self.shift_month(1);
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Today").clicked() {
                    self.select(today);
                }
            });
        });

        ui.add_space(8.0);

        let cell = Vec2::new(48.0, 36.0);
        egui::Grid::new("calendar_grid")
            .spacing(Vec2::new(4.0, 4.0))
            .show(ui, |ui| {
                for header in WEEKDAY_HEADERS {
                    ui.add_sized(cell, egui::Label::new(RichText::new(header).strong()));
                }
                ui.end_row();

                for week in month_grid(self.month) {
                    for day in week {
                        match day {
                            Some(date) => {
                                let mut text = RichText::new(date.day().to_string());
                                if date == today {
                                    text = text.color(accent).strong();
                                }
                                if !workouts_on(workouts, date).is_empty() {
                                    text = text.underline();
                                }
                                let button = egui::Button::new(text).selected(date == self.selected);
                                if ui.add_sized(cell, button).clicked() {
                                    self.selected = date;
                                }
                            }
                            None => {
                                ui.add_sized(cell, egui::Label::new(""));
                            }
                        }
                    }
                    ui.end_row();
                }
            });

        ui.add_space(12.0);
        ui.separator();
        ui.label(RichText::new(self.selected.format("%A, %B %-d").to_string()).strong());

        let logged = workouts_on(workouts, self.selected);
        if logged.is_empty() {
            ui.label(RichText::new("No workouts logged").weak());
        } else {
            for record in logged {
                ui.label(record.summary());
            }
        }

        ui.add_space(8.0);
        if ui.button("Log a workout").clicked() {
            next_screen = Some(Screen::Workouts);
        }

        next_screen
    }
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `delta` months away from `month`.
pub fn shift_month(month: NaiveDate, delta: i32) -> NaiveDate {
    let index = month.year() * 12 + month.month0() as i32 + delta;
    let (year, month0) = (index.div_euclid(12), index.rem_euclid(12) as u32);
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(month)
}

/// Weeks of the month starting on Sunday. Cells outside the month are `None`.
pub fn month_grid(month: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let first = first_of_month(month);
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = leading;
    let mut day = first;

    while day.month() == first.month() {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
        day += Duration::days(1);
    }
    if slot > 0 {
        weeks.push(week);
    }

    weeks
}

/// Workouts logged on the same month and day as `date`.
pub fn workouts_on(log: &WorkoutLog, date: NaiveDate) -> Vec<&WorkoutRecord> {
    log.records()
        .iter()
        .filter(|record| record.falls_on(date))
        .collect()
}
