//! GUI module
//!
//! Provides the Slint windows (character, speech bubble, pomodoro panel) and
//! system tray integration, kept in sync with the companion controller.

pub mod gui_controller;
pub mod tray;

pub use gui_controller::GuiController;
