//! Workout creator screen.
//!
//! Draft form, the sorted workout list with delete buttons, and the goal
//! list with its add form.

use egui::{Align, Color32, Layout, RichText, ScrollArea, TextEdit, Ui};
use uuid::Uuid;

use crate::goals::GoalManager;
use crate::ui::status::WriteTracker;
use crate::workouts::{SortOrder, WorkoutDraft, WorkoutLog};

/// Workout creator screen state.
#[derive(Debug, Default)]
pub struct WorkoutCreatorScreen {
    /// Workout being entered
    pub draft: WorkoutDraft,
    /// Goal text being entered
    pub goal_input: String,
    /// Validation message for the last submit
    error: Option<String>,
}

impl WorkoutCreatorScreen {
    /// Create a new workout creator screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validation message for the last submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Add the draft to the log, dated today.
    pub fn submit_workout(&mut self, log: &mut WorkoutLog, writes: &mut WriteTracker) {
        match log.add_workout(&mut self.draft) {
            Ok(pending) => {
                writes.track(pending);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Add the typed goal.
    pub fn submit_goal(&mut self, goals: &mut GoalManager, writes: &mut WriteTracker) {
        match goals.add_goal(&self.goal_input) {
            Ok(pending) => {
                writes.track_all(pending);
                self.goal_input.clear();
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Render the workout creator.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        log: &mut WorkoutLog,
        goals: &mut GoalManager,
        writes: &mut WriteTracker,
        error_color: Color32,
    ) {
        ui.heading("Workouts");
        ui.add_space(8.0);

        self.show_draft_form(ui, log, writes);

        if let Some(error) = &self.error {
            ui.colored_label(error_color, error);
        }

        ui.add_space(12.0);
        ui.separator();

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Logged ({})", log.len())).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let mut order = log.sort_order();
                egui::ComboBox::from_id_salt("workout_sort")
                    .selected_text(format!("Sort: {}", order.label()))
                    .show_ui(ui, |ui| {
                        for option in SortOrder::ALL {
                            ui.selectable_value(&mut order, option, option.label());
                        }
                    });
                if order != log.sort_order() {
                    log.set_sort_order(order);
                }
            });
        });

        let mut delete_workout: Option<Uuid> = None;
        ScrollArea::vertical()
            .id_salt("workout_list")
            .max_height(260.0)
            .show(ui, |ui| {
                if log.is_empty() {
                    ui.label(RichText::new("No workouts yet").weak());
                }
                for record in log.view() {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&record.name).strong());
                        ui.label(record.summary());
                        ui.label(RichText::new(&record.date).weak());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.small_button("Delete").clicked() {
                                delete_workout = Some(record.id);
                            }
                        });
                    });
                }
            });

        if let Some(id) = delete_workout {
            match log.remove_by_id(id) {
                Ok((_, pending)) => writes.track(pending),
                Err(e) => tracing::warn!("Could not delete workout: {}", e),
            }
        }

        ui.add_space(12.0);
        ui.separator();
        self.show_goals(ui, goals, writes);
    }

    fn show_draft_form(&mut self, ui: &mut Ui, log: &mut WorkoutLog, writes: &mut WriteTracker) {
        egui::Grid::new("workout_draft").num_columns(2).show(ui, |ui| {
            ui.label("Exercise");
            let mut name = self.draft.name().to_string();
            if ui
                .add(TextEdit::singleline(&mut name).hint_text("e.g. Bench press"))
                .changed()
            {
                self.draft.set_name(name);
            }
            ui.end_row();

            ui.label("Uses weights");
            let mut requires_weights = self.draft.requires_weights();
            if ui.checkbox(&mut requires_weights, "").changed() {
                self.draft.set_requires_weights(requires_weights);
            }
            ui.end_row();

            if self.draft.requires_weights() {
                ui.label("Weight (lbs)");
                let mut weight = self.draft.weight().to_string();
                if numeric_field(ui, &mut weight).changed() {
                    self.draft.set_weight(&weight);
                }
                ui.end_row();
            }

            ui.label("Reps");
            let mut reps = self.draft.reps().to_string();
            if numeric_field(ui, &mut reps).changed() {
                self.draft.set_reps(&reps);
            }
            ui.end_row();

            ui.label("Sets");
            let mut sets = self.draft.sets().to_string();
            if numeric_field(ui, &mut sets).changed() {
                self.draft.set_sets(&sets);
            }
            ui.end_row();
        });

        ui.add_space(4.0);
        if ui.button("Add workout").clicked() {
            self.submit_workout(log, writes);
        }
    }

    fn show_goals(&mut self, ui: &mut Ui, goals: &mut GoalManager, writes: &mut WriteTracker) {
        ui.label(RichText::new("Goals").strong());

        let mut delete_goal: Option<u64> = None;
        for goal in goals.goals() {
            ui.horizontal(|ui| {
                ui.label(format!("{}. {}", goal.id, goal.text));
                if ui.small_button("Remove").clicked() {
                    delete_goal = Some(goal.id);
                }
            });
        }

        if let Some(id) = delete_goal {
            match goals.remove_goal(id) {
                Ok((_, pending)) => writes.track_all(pending),
                Err(e) => tracing::warn!("Could not remove goal: {}", e),
            }
        }

        ui.horizontal(|ui| {
            let input = ui.add(
                TextEdit::singleline(&mut self.goal_input)
                    .hint_text("New goal")
                    .desired_width(240.0),
            );
            let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Add goal").clicked() || entered {
                self.submit_goal(goals, writes);
            }
        });
    }
}

fn numeric_field(ui: &mut Ui, text: &mut String) -> egui::Response {
    ui.add(TextEdit::singleline(text).desired_width(80.0))
}
