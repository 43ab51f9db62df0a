//! System tray integration
//!
//! The tray icon shows the character's face and a context menu mirroring the
//! companion's commands. Menu clicks arrive on the `tray-icon` channel and are
//! drained by the UI timer through [`TrayIcon::poll`].

use deskmate::controller::Command;
use image::RgbaImage;

#[cfg(windows)]
use deskmate::error::{DeskmateError, Result, StringError};
#[cfg(windows)]
use tray_icon::{
    Icon, TrayIconBuilder,
    menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
};

/// System tray icon with context menu
#[cfg(windows)]
pub struct TrayIcon {
    /// Keeps the icon registered while alive
    _tray: tray_icon::TrayIcon,
    say_item: MenuItem,
    collapse_item: MenuItem,
    pomodoro_item: MenuItem,
    exit_item: MenuItem,
}

/// Placeholder for non-Windows platforms
#[cfg(not(windows))]
pub struct TrayIcon;

#[cfg(windows)]
impl TrayIcon {
    /// Create the tray icon from a 32x32 rendering of the character
    pub fn new(icon_image: &RgbaImage) -> Result<Self> {
        use tracing::{debug, info};

        info!("Creating system tray icon");

        let tray_menu = Menu::new();
        let say_item = MenuItem::new("Say something", true, None);
        let collapse_item = MenuItem::new("Collapse", true, None);
        let pomodoro_item = MenuItem::new("Pomodoro timer", true, None);
        let separator = PredefinedMenuItem::separator();
        let exit_item = MenuItem::new("Exit", true, None);

        tray_menu
            .append_items(&[
                &say_item,
                &collapse_item,
                &pomodoro_item,
                &separator,
                &exit_item,
            ])
            .map_err(|e| {
                DeskmateError::ConfigError(StringError::new(format!(
                    "Failed to build tray menu: {e}"
                )))
            })?;

        debug!("Tray menu created with 5 items");

        let icon = Icon::from_rgba(
            icon_image.as_raw().clone(),
            icon_image.width(),
            icon_image.height(),
        )
        .map_err(|e| {
            DeskmateError::ConfigError(StringError::new(format!(
                "Failed to create icon from RGBA: {e}"
            )))
        })?;

        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(tray_menu))
            .with_icon(icon)
            .with_tooltip("Deskmate")
            .build()
            .map_err(|e| {
                DeskmateError::ConfigError(StringError::new(format!(
                    "Failed to build tray icon: {e}"
                )))
            })?;

        info!("System tray icon created successfully");

        Ok(Self {
            _tray: tray,
            say_item,
            collapse_item,
            pomodoro_item,
            exit_item,
        })
    }

    /// Next pending menu command, if any
    pub fn poll(&self) -> Option<Command> {
        let event = MenuEvent::receiver().try_recv().ok()?;
        self.command_for(&event.id)
    }

    /// Relabel the collapse item for the current pose
    pub fn set_collapsed(&self, collapsed: bool) {
        self.collapse_item
            .set_text(if collapsed { "Expand" } else { "Collapse" });
    }

    fn command_for(&self, id: &MenuId) -> Option<Command> {
        if id == self.say_item.id() {
            Some(Command::SaySomething)
        } else if id == self.collapse_item.id() {
            Some(Command::ToggleCollapse)
        } else if id == self.pomodoro_item.id() {
            Some(Command::TogglePomodoro)
        } else if id == self.exit_item.id() {
            Some(Command::Quit)
        } else {
            None
        }
    }
}

/// Stub implementation for non-Windows platforms
#[cfg(not(windows))]
impl TrayIcon {
    /// Create a new tray icon (stub for non-Windows)
    pub fn new(_icon_image: &RgbaImage) -> deskmate::error::Result<Self> {
        Ok(Self)
    }

    /// No menu on non-Windows platforms
    pub fn poll(&self) -> Option<Command> {
        None
    }

    /// No menu on non-Windows platforms
    pub fn set_collapsed(&self, _collapsed: bool) {}
}
