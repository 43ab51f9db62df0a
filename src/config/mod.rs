//! Configuration management module
//!
//! This module handles loading, saving, and managing application configuration.
//! Configuration is stored in %APPDATA%\Deskmate\config.json with atomic writes
//! to prevent corruption.

pub mod cli;
pub mod manager;
pub mod models;

pub use cli::{CliOptions, resolve_asset_dir};
pub use manager::ConfigManager;
pub use models::{AppConfig, AssetSettings, DialogSettings, ExpressionSettings, WindowSettings};
