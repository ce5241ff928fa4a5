//! Login and sign-up screen.
//!
//! The screen only collects input; the app performs the identity call and
//! reports failures back through [`LoginScreen::set_error`].

use egui::{RichText, TextEdit, Ui, Vec2};

/// Which form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

impl LoginMode {
    /// The other form.
    pub fn toggled(self) -> Self {
        match self {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            LoginMode::SignIn => "Log in",
            LoginMode::SignUp => "Sign up",
        }
    }

    fn toggle_prompt(self) -> &'static str {
        match self {
            LoginMode::SignIn => "Don't have an account? Sign up",
            LoginMode::SignUp => "Already have an account? Log in",
        }
    }
}

/// Submitted credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    SignIn { email: String, password: String },
    CreateAccount { email: String, password: String },
}

/// Login screen state.
#[derive(Debug, Default)]
pub struct LoginScreen {
    pub email: String,
    pub password: String,
    pub mode: LoginMode,
    error: Option<String>,
}

impl LoginScreen {
    /// Create a new login screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an error under the form.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Current error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Forget the password and any error, e.g. after a successful sign-in.
    pub fn reset(&mut self) {
        self.password.clear();
        self.error = None;
    }

    /// Switch between log in and sign up.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }

    /// Build the action for the current form contents.
    pub fn submit(&self) -> LoginAction {
        let email = self.email.trim().to_string();
        let password = self.password.clone();
        match self.mode {
            LoginMode::SignIn => LoginAction::SignIn { email, password },
            LoginMode::SignUp => LoginAction::CreateAccount { email, password },
        }
    }

    /// Render the login screen.
    pub fn show(&mut self, ui: &mut Ui, error_color: egui::Color32) -> Option<LoginAction> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(RichText::new("FitTrack").size(40.0).strong());
            ui.add_space(8.0);
            ui.label(RichText::new(self.mode.submit_label()).size(18.0).weak());
            ui.add_space(32.0);

            let field_width = 280.0;

            ui.add(
                TextEdit::singleline(&mut self.email)
                    .hint_text("Email")
                    .desired_width(field_width),
            );
            ui.add_space(8.0);

            let password = ui.add(
                TextEdit::singleline(&mut self.password)
                    .hint_text("Password")
                    .password(true)
                    .desired_width(field_width),
            );
            let submitted_by_enter =
                password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.add_space(16.0);

            if let Some(error) = &self.error {
                ui.colored_label(error_color, error);
                ui.add_space(8.0);
            }

            if ui
                .add_sized(
                    Vec2::new(field_width, 40.0),
                    egui::Button::new(RichText::new(self.mode.submit_label()).size(16.0)),
                )
                .clicked()
                || submitted_by_enter
            {
                action = Some(self.submit());
            }

            ui.add_space(12.0);

            if ui.link(self.mode.toggle_prompt()).clicked() {
                self.toggle_mode();
            }
        });

        action
    }
}
