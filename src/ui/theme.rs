//! UI theme definitions.

use egui::{Color32, Visuals};

/// Theme configuration for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Get the egui Visuals for this theme.
    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => dark_visuals(),
            Theme::Light => light_visuals(),
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Label for the toggle button.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light mode",
            Theme::Light => "Dark mode",
        }
    }

    /// Color for validation and persistence errors.
    pub fn error_color(self) -> Color32 {
        match self {
            Theme::Dark => Palette::ERROR_DARK,
            Theme::Light => Palette::ERROR_LIGHT,
        }
    }

    /// Color for the "goal reached" banner.
    pub fn success_color(self) -> Color32 {
        match self {
            Theme::Dark => Palette::SUCCESS_DARK,
            Theme::Light => Palette::SUCCESS_LIGHT,
        }
    }

    /// Highlight for today's cell in the calendar.
    pub fn accent_color(self) -> Color32 {
        match self {
            Theme::Dark => Palette::ACCENT_DARK,
            Theme::Light => Palette::ACCENT_LIGHT,
        }
    }
}

/// Fixed colors used by both themes.
pub struct Palette;

impl Palette {
    pub const BACKGROUND_DARK: Color32 = Color32::from_rgb(20, 22, 26);
    pub const PANEL_DARK: Color32 = Color32::from_rgb(30, 33, 38);
    pub const CARD_DARK: Color32 = Color32::from_rgb(42, 46, 52);
    pub const TEXT_DARK: Color32 = Color32::from_rgb(236, 238, 240);
    pub const ACCENT_DARK: Color32 = Color32::from_rgb(255, 112, 67);
    pub const SUCCESS_DARK: Color32 = Color32::from_rgb(102, 187, 106);
    pub const ERROR_DARK: Color32 = Color32::from_rgb(239, 83, 80);

    pub const BACKGROUND_LIGHT: Color32 = Color32::from_rgb(248, 248, 250);
    pub const PANEL_LIGHT: Color32 = Color32::from_rgb(255, 255, 255);
    pub const CARD_LIGHT: Color32 = Color32::from_rgb(240, 241, 244);
    pub const TEXT_LIGHT: Color32 = Color32::from_rgb(33, 33, 38);
    pub const ACCENT_LIGHT: Color32 = Color32::from_rgb(230, 81, 0);
    pub const SUCCESS_LIGHT: Color32 = Color32::from_rgb(46, 125, 50);
    pub const ERROR_LIGHT: Color32 = Color32::from_rgb(198, 40, 40);
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.window_fill = Palette::PANEL_DARK;
    visuals.panel_fill = Palette::PANEL_DARK;
    visuals.faint_bg_color = Palette::CARD_DARK;
    visuals.extreme_bg_color = Palette::BACKGROUND_DARK;

    visuals.widgets.inactive.bg_fill = Palette::CARD_DARK;
    visuals.widgets.active.bg_fill = Palette::ACCENT_DARK;
    visuals.selection.bg_fill = Palette::ACCENT_DARK.linear_multiply(0.4);
    visuals.selection.stroke.color = Palette::ACCENT_DARK;
    visuals.widgets.noninteractive.fg_stroke.color = Palette::TEXT_DARK;

    visuals
}

fn light_visuals() -> Visuals {
    let mut visuals = Visuals::light();

    visuals.window_fill = Palette::PANEL_LIGHT;
    visuals.panel_fill = Palette::PANEL_LIGHT;
    visuals.faint_bg_color = Palette::CARD_LIGHT;
    visuals.extreme_bg_color = Palette::BACKGROUND_LIGHT;

    visuals.widgets.inactive.bg_fill = Palette::CARD_LIGHT;
    visuals.widgets.active.bg_fill = Palette::ACCENT_LIGHT;
    visuals.selection.bg_fill = Palette::ACCENT_LIGHT.linear_multiply(0.2);
    visuals.selection.stroke.color = Palette::ACCENT_LIGHT;
    visuals.widgets.noninteractive.fg_stroke.color = Palette::TEXT_LIGHT;

    visuals
}
