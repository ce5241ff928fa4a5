//! UI module for egui-based user interface.

pub mod screens;
pub mod status;
pub mod theme;

pub use screens::Screen;
pub use status::WriteTracker;
pub use theme::Theme;
