//! Calorie counter screen.
//!
//! Renders whichever wizard step is current, then the intake tracker once
//! the goal is confirmed.

use egui::{Color32, RichText, TextEdit, Ui};

use crate::calories::{ActivityLevel, CalorieWizard, Gender, StepInput, WeightGoal, WizardStep};
use crate::ui::status::WriteTracker;

/// Colors the screen needs from the active theme.
#[derive(Debug, Clone, Copy)]
pub struct CounterColors {
    pub error: Color32,
    pub success: Color32,
}

/// Calorie counter screen state.
#[derive(Debug, Default)]
pub struct CalorieCounterScreen {
    /// Calories typed into the tracker
    pub calories_input: String,
}

impl CalorieCounterScreen {
    /// Create a new calorie counter screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the current step.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        wizard: &mut CalorieWizard,
        writes: &mut WriteTracker,
        colors: CounterColors,
    ) {
        let step = wizard.step();

        ui.vertical(|ui| {
            ui.heading("Calorie Counter");
            if step.is_question() {
                ui.label(
                    RichText::new(format!(
                        "Step {} of {}: {}",
                        step.index() + 1,
                        WizardStep::Result.index(),
                        step.title()
                    ))
                    .weak(),
                );
                if let Some(saved) = wizard.saved_daily_goal() {
                    ui.label(
                        RichText::new(format!("Last saved goal: {} calories", saved)).weak(),
                    );
                }
            }
            ui.add_space(12.0);
            ui.label(RichText::new(step.prompt()).size(20.0).strong());
            ui.add_space(8.0);

            match step.input() {
                StepInput::Choice => Self::show_choice(ui, wizard, step),
                StepInput::Numeric => Self::show_numeric(ui, wizard, step),
                StepInput::Confirm => Self::show_result(ui, wizard),
                StepInput::Entry => self.show_tracking(ui, wizard, colors),
            }

            if let Some(message) = wizard.error_message() {
                ui.add_space(4.0);
                ui.colored_label(colors.error, message);
            }

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if step.previous().is_some() && ui.button("Back").clicked() {
                    wizard.back();
                }

                match step {
                    WizardStep::Tracking => {
                        if ui.button("Recalculate").clicked() {
                            wizard.restart();
                            self.calories_input.clear();
                        }
                    }
                    _ => {
                        let label = if step == WizardStep::Result {
                            "Start tracking"
                        } else {
                            "Next"
                        };
                        if ui.button(label).clicked() {
                            match wizard.advance() {
                                Ok(pending) => writes.track_all(pending),
                                Err(e) => tracing::debug!("Step {:?} not accepted: {}", step, e),
                            }
                        }
                    }
                }
            });
        });
    }

    fn show_choice(ui: &mut Ui, wizard: &mut CalorieWizard, step: WizardStep) {
        let answers = wizard.answers().clone();
        match step {
            WizardStep::Gender => {
                for gender in Gender::ALL {
                    if ui.radio(answers.gender == Some(gender), gender.label()).clicked() {
                        wizard.select_gender(gender);
                    }
                }
            }
            WizardStep::ActivityLevel => {
                for level in ActivityLevel::ALL {
                    if ui
                        .radio(answers.activity_level == Some(level), level.label())
                        .clicked()
                    {
                        wizard.select_activity_level(level);
                    }
                }
            }
            WizardStep::WeightGoal => {
                for goal in WeightGoal::ALL {
                    if ui.radio(answers.weight_goal == Some(goal), goal.label()).clicked() {
                        wizard.select_weight_goal(goal);
                    }
                }
            }
            _ => {}
        }
    }

    fn show_numeric(ui: &mut Ui, wizard: &mut CalorieWizard, step: WizardStep) {
        let answers = wizard.answers().clone();
        match step {
            WizardStep::Age => {
                let mut age = answers.age;
                if numeric_field(ui, &mut age, "Age").changed() {
                    wizard.set_age(age);
                }
            }
            WizardStep::Height => {
                ui.horizontal(|ui| {
                    let mut feet = answers.height_feet;
                    if numeric_field(ui, &mut feet, "Feet").changed() {
                        wizard.set_height_feet(feet);
                    }
                    ui.label("ft");

                    let mut inches = answers.height_inches;
                    if numeric_field(ui, &mut inches, "Inches").changed() {
                        wizard.set_height_inches(inches);
                    }
                    ui.label("in");
                });
            }
            WizardStep::Weight => {
                let mut weight = answers.weight_pounds;
                if numeric_field(ui, &mut weight, "Pounds").changed() {
                    wizard.set_weight(weight);
                }
            }
            _ => {}
        }
    }

    fn show_result(ui: &mut Ui, wizard: &CalorieWizard) {
        let Some(result) = wizard.breakdown() else {
            return;
        };

        ui.label(
            RichText::new(format!("{} calories per day", result.rounded_goal()))
                .size(28.0)
                .strong(),
        );
        ui.add_space(8.0);

        egui::Grid::new("calorie_breakdown")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Height");
                ui.label(format!("{:.1} cm", result.height_cm));
                ui.end_row();

                ui.label("Weight");
                ui.label(format!("{:.1} kg", result.weight_kg));
                ui.end_row();

                ui.label("Resting (BMR)");
                ui.label(format!("{:.0} kcal", result.bmr));
                ui.end_row();

                ui.label("With activity");
                ui.label(format!("{:.0} kcal", result.tdee));
                ui.end_row();
            });
    }

    fn show_tracking(&mut self, ui: &mut Ui, wizard: &mut CalorieWizard, colors: CounterColors) {
        let Some(intake) = wizard.intake() else {
            return;
        };

        ui.label(format!("Daily goal: {}", intake.daily_goal()));
        ui.label(format!("Eaten so far: {}", intake.total_consumed()));
        ui.label(RichText::new(format!("Remaining: {}", intake.remaining())).strong());

        if intake.goal_reached() {
            ui.add_space(4.0);
            ui.colored_label(colors.success, "You've reached your goal for today!");
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let input = ui.add(
                TextEdit::singleline(&mut self.calories_input)
                    .hint_text("Calories")
                    .desired_width(120.0),
            );
            let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if ui.button("Add").clicked() || entered {
                if wizard.add_calories(&self.calories_input) {
                    self.calories_input.clear();
                } else {
                    tracing::debug!("Ignored calorie entry {:?}", self.calories_input);
                }
            }
        });
    }
}

fn numeric_field(ui: &mut Ui, text: &mut String, hint: &str) -> egui::Response {
    ui.add(TextEdit::singleline(text).hint_text(hint).desired_width(80.0))
}
