//! Main application state and egui integration.

use std::time::Duration;

use chrono::Local;
use crossbeam::channel::{unbounded, Receiver};
use eframe::egui;

use fittrack::auth::{AuthSubscription, IdentityProvider, LocalIdentityProvider, UserIdentity};
use fittrack::calories::CalorieWizard;
use fittrack::goals::GoalManager;
use fittrack::storage::{AppConfig, Persister};
use fittrack::ui::screens::calorie_counter::CounterColors;
use fittrack::ui::screens::{
    CalendarScreen, CalorieCounterScreen, LoginAction, LoginScreen, Screen, WorkoutCreatorScreen,
};
use fittrack::ui::{Theme, WriteTracker};
use fittrack::workouts::WorkoutLog;

/// Main application state.
pub struct FitTrackApp {
    /// Current screen
    current_screen: Screen,
    /// UI theme
    theme: Theme,
    /// Identity provider, taken on drop for shutdown
    auth: Option<LocalIdentityProvider>,
    /// Sign-in / sign-out notifications from the provider
    auth_events: Receiver<Option<UserIdentity>>,
    /// Listener registration, removed on drop
    auth_subscription: AuthSubscription,
    /// Signed-in user
    user: Option<UserIdentity>,
    /// Storage worker handle shared by the models
    persister: Persister,
    /// Calorie wizard model
    wizard: CalorieWizard,
    /// Workout log model
    workouts: WorkoutLog,
    /// Goal list model
    goals: GoalManager,
    /// Writes awaiting completion
    writes: WriteTracker,
    /// Login screen state
    login_screen: LoginScreen,
    /// Calendar screen state
    calendar_screen: CalendarScreen,
    /// Calorie counter screen state
    calorie_screen: CalorieCounterScreen,
    /// Workout creator screen state
    workout_screen: WorkoutCreatorScreen,
}

impl FitTrackApp {
    /// Create a new application instance.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        persister: Persister,
        mut auth: LocalIdentityProvider,
    ) -> Self {
        let theme = Theme::Dark;
        cc.egui_ctx.set_visuals(theme.visuals());
        cc.egui_ctx.set_zoom_factor(config.ui.font_scale);

        // Listener fires right away with the restored session, if any
        let (tx, auth_events) = unbounded();
        let auth_subscription = auth.on_auth_change(Box::new(move |user| {
            let _ = tx.send(user.cloned());
        }));

        let wizard = CalorieWizard::load(persister.clone());
        let mut workouts = WorkoutLog::load(persister.clone());
        workouts.set_sort_order(config.ui.default_sort);
        let goals = GoalManager::load(persister.clone());

        tracing::info!(
            workouts = workouts.len(),
            goals = goals.len(),
            "Loaded saved data"
        );

        Self {
            current_screen: Screen::Login,
            theme,
            auth: Some(auth),
            auth_events,
            auth_subscription,
            user: None,
            persister,
            wizard,
            workouts,
            goals,
            writes: WriteTracker::new(),
            login_screen: LoginScreen::new(),
            calendar_screen: CalendarScreen::default(),
            calorie_screen: CalorieCounterScreen::new(),
            workout_screen: WorkoutCreatorScreen::new(),
        }
    }

    /// Apply sign-in / sign-out notifications.
    fn process_auth_events(&mut self) {
        while let Ok(user) = self.auth_events.try_recv() {
            match &user {
                Some(identity) => {
                    tracing::info!("Session active for {}", identity.email);
                    self.login_screen.reset();
                    if !self.current_screen.requires_auth() {
                        self.current_screen = Screen::Calendar;
                    }
                }
                None => {
                    self.current_screen = Screen::Login;
                }
            }
            self.user = user;
        }
    }

    /// Navigate to a screen. Tabs are unreachable while signed out.
    fn navigate(&mut self, screen: Screen) {
        if screen.requires_auth() && self.user.is_none() {
            tracing::debug!("Ignoring navigation to {:?} while signed out", screen);
            return;
        }
        tracing::debug!("Navigating from {:?} to {:?}", self.current_screen, screen);
        self.current_screen = screen;
    }

    fn handle_login(&mut self, action: LoginAction) {
        let Some(auth) = self.auth.as_mut() else {
            return;
        };

        let result = match action {
            LoginAction::SignIn { email, password } => {
                auth.sign_in_with_password(&email, &password)
            }
            LoginAction::CreateAccount { email, password } => {
                auth.create_account(&email, &password)
            }
        };

        if let Err(e) = result {
            tracing::warn!("Authentication failed: {}", e);
            self.login_screen.set_error(e.to_string());
        }
    }

    fn log_out(&mut self) {
        let Some(auth) = self.auth.as_mut() else {
            return;
        };
        if let Err(e) = auth.sign_out() {
            tracing::error!("Sign-out failed: {}", e);
        }
    }
}

impl eframe::App for FitTrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_auth_events();
        self.writes.poll();

        // Keep polling while writes are outstanding
        if self.writes.in_flight() > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // Top panel with tab bar
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("FitTrack");

                if self.user.is_some() {
                    ui.separator();
                    for tab in Screen::TABS {
                        if ui
                            .selectable_label(self.current_screen == tab, tab.label())
                            .clicked()
                        {
                            self.navigate(tab);
                        }
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.user.is_some() && ui.button("Log out").clicked() {
                        self.log_out();
                    }

                    if ui.button(self.theme.toggle_label()).clicked() {
                        self.theme = self.theme.toggled();
                        ctx.set_visuals(self.theme.visuals());
                    }

                    if let Some(user) = &self.user {
                        ui.label(&user.email);
                    }
                });
            });
        });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                if self.writes.last_failure().is_some() {
                    ui.colored_label(self.theme.error_color(), self.writes.status_text());
                    if ui.small_button("Dismiss").clicked() {
                        self.writes.dismiss_failure();
                    }
                } else {
                    ui.label(self.writes.status_text());
                }
            });
        });

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| match self.current_screen {
            Screen::Login => {
                if let Some(action) = self.login_screen.show(ui, self.theme.error_color()) {
                    self.handle_login(action);
                }
            }
            Screen::Calendar => {
                let today = Local::now().date_naive();
                if let Some(next) = self.calendar_screen.show(
                    ui,
                    &self.workouts,
                    today,
                    self.theme.accent_color(),
                ) {
                    self.navigate(next);
                }
            }
            Screen::CalorieCounter => {
                let colors = CounterColors {
                    error: self.theme.error_color(),
                    success: self.theme.success_color(),
                };
                self.calorie_screen
                    .show(ui, &mut self.wizard, &mut self.writes, colors);
            }
            Screen::Workouts => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.workout_screen.show(
                        ui,
                        &mut self.workouts,
                        &mut self.goals,
                        &mut self.writes,
                        self.theme.error_color(),
                    );
                });
            }
        });
    }
}

impl Drop for FitTrackApp {
    fn drop(&mut self) {
        if let Err(e) = self.persister.flush() {
            tracing::warn!("Pending writes may be lost: {}", e);
        }
        for failure in self.writes.poll() {
            tracing::warn!("Unsaved on exit: {}", failure.key());
        }

        if let Some(mut auth) = self.auth.take() {
            auth.unsubscribe(self.auth_subscription);
            auth.shutdown();
        }
    }
}
