//! `Deskmate` - A desktop companion character for Windows
//!
//! Loads the sprite catalog, places the character in the screen's work area
//! and runs the Slint windows until the user quits.

// Set Windows subsystem to hide console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![expect(
    missing_docs,
    reason = "Slint-generated code from include_modules! lacks doc comments"
)]
#![allow(clippy::unwrap_used)] // Slint-generated code from include_modules! uses .unwrap() extensively

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use clap::Parser;
use deskmate::{
    assets::{AssetCatalog, CatalogOptions, RenderOptions, SpriteRenderer},
    config::{CliOptions, ConfigManager, resolve_asset_dir},
    controller::CompanionController,
    error::get_user_friendly_error,
    utils::{self, QuitHotkeyListener},
};
use gui::GuiController;
use std::time::Instant;
use tracing::{error, info};

// Include Slint-generated code
slint::include_modules!();

/// Main entry point for the application
///
/// Initializes logging, enforces a single instance, loads the config and the
/// sprite catalog, then hands control to the Slint event loop.
fn main() -> Result<()> {
    let started = Instant::now();

    utils::init_logging().context("Failed to initialize logging system")?;
    info!("Deskmate v{} starting...", env!("CARGO_PKG_VERSION"));

    // Enforce single instance before touching any windows
    let _single_instance_guard = match utils::SingleInstanceGuard::new() {
        Ok(guard) => guard,
        Err(e) => {
            error!("Single instance check failed: {}", e);
            show_error_and_exit(&get_user_friendly_error(&e));
            return Err(e.into());
        }
    };

    let mut config = ConfigManager::load().context("Failed to load application configuration")?;
    let cli = match CliOptions::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            error!("Invalid command line: {}", e);
            show_error_and_exit(&e.to_string());
            return Err(e.into());
        }
    };
    cli.apply(&mut config);

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(std::path::Path::to_path_buf));
    let asset_dir = resolve_asset_dir(&config.assets.directory, exe_dir.as_deref());

    let catalog = match AssetCatalog::load(&asset_dir, &CatalogOptions::from(&config.assets)) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load sprite catalog: {}", e);
            show_error_and_exit(&get_user_friendly_error(&e));
            return Err(e.into());
        }
    };
    info!(
        "Loaded {} sprites from {}",
        catalog.len(),
        catalog.root().display()
    );

    let mut renderer = SpriteRenderer::new(RenderOptions::from(&config.window));
    renderer.preload(&catalog);

    let screen = utils::work_area_or(config.window.fallback_screen);
    let controller = CompanionController::new(config, catalog, screen);
    let quit_bindings = controller.quit_bindings().to_vec();

    let gui_controller =
        GuiController::new(controller, renderer).context("Failed to create GUI controller")?;

    // The listener thread only asks the event loop to quit; it dies with the process
    let _hotkey_thread = QuitHotkeyListener::start(quit_bindings);

    info!("Startup completed in {:?}", started.elapsed());

    gui_controller
        .run()
        .context("GUI event loop terminated with error")?;

    info!("Deskmate shutting down");
    Ok(())
}

/// Shows an error dialog and exits the application.
#[cfg(windows)]
fn show_error_and_exit(message: &str) {
    use rfd::MessageDialog;

    MessageDialog::new()
        .set_title("Deskmate - Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Error)
        .show();

    std::process::exit(1);
}

/// Shows an error dialog and exits the application (non-Windows fallback).
#[cfg(not(windows))]
fn show_error_and_exit(message: &str) {
    eprintln!("ERROR: {message}");
    std::process::exit(1);
}
