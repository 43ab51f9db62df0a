//! Error types for the `Deskmate` application
//!
//! This module defines all error types used throughout the application,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains so the log file
//! shows the full cause of a failure.

use std::path::PathBuf;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `Deskmate`
#[derive(Debug, Error)]
pub enum DeskmateError {
    /// The sprite asset directory does not exist
    #[error("Asset directory not found: {}", .0.display())]
    AssetDirectoryMissing(PathBuf),

    /// No base (expanded, default expression) sprite could be found
    ///
    /// Without it there is no character to show, so startup aborts.
    #[error("Base sprite missing in {}", .0.display())]
    MissingBaseAsset(PathBuf),

    /// The sprite manifest could not be parsed
    #[error("Invalid sprite manifest {}: {source}", path.display())]
    ManifestError {
        /// Path of the manifest file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A sprite image could not be decoded or processed
    #[error("Failed to render sprite {}: {source}", path.display())]
    SpriteRender {
        /// Path of the image that failed
        path: PathBuf,
        /// Underlying image error
        #[source]
        source: image::ImageError,
    },

    /// A hotkey description could not be parsed
    #[error("Invalid hotkey '{0}'")]
    InvalidHotkey(String),

    /// Hotkey registration failed
    /// Preserves the underlying error source for full error chain transparency
    #[error("Hotkey registration failed: {0}")]
    HotkeyRegistration(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Another instance is already running
    #[error("Another instance of Deskmate is already running")]
    AlreadyRunning,

    /// Windows API error
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] windows::core::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `Deskmate` operations
pub type Result<T> = std::result::Result<T, DeskmateError>;

/// Convert an error to a user-friendly message
///
/// Returns a message suitable for the fatal startup dialog, including a hint
/// on how to fix the most common problems.
pub fn get_user_friendly_error(error: &DeskmateError) -> String {
    match error {
        DeskmateError::AssetDirectoryMissing(dir) => format!(
            "The sprite folder could not be found:\n{}\n\n\
             Set \"assets.directory\" in config.json or start with --assets <folder>.",
            dir.display()
        ),
        DeskmateError::MissingBaseAsset(dir) => format!(
            "No base sprite was found in:\n{}\n\n\
             Add base.png (or a manifest.json entry with expression \"base\").",
            dir.display()
        ),
        DeskmateError::ManifestError { path, source } => format!(
            "The sprite manifest is not valid JSON:\n{}\n\n{source}",
            path.display()
        ),
        DeskmateError::SpriteRender { path, .. } => format!(
            "A sprite image could not be read:\n{}\n\n\
             The default image will be shown instead.",
            path.display()
        ),
        DeskmateError::InvalidHotkey(hotkey) => format!(
            "The hotkey \"{hotkey}\" is not recognised.\n\n\
             Use combinations such as \"ctrl+shift+x\" or \"alt+f4\"."
        ),
        DeskmateError::HotkeyRegistration(_) => "A quit hotkey could not be registered.\n\n\
             Another program may already be using it."
            .to_string(),
        DeskmateError::ConfigError(_) => "Failed to load or save configuration.\n\n\
             Your settings may not persist.\n\
             Check that you have write permissions to:\n\
             %APPDATA%\\Deskmate"
            .to_string(),
        DeskmateError::AlreadyRunning => "Deskmate is already running.\n\n\
             Close the existing character before starting a new one."
            .to_string(),
        #[cfg(windows)]
        DeskmateError::WindowsApiError(e) => {
            format!(
                "A Windows API error occurred:\n\n{e}\n\n\
                 Please ensure your Windows installation is up to date."
            )
        }
        DeskmateError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        DeskmateError::JsonError(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_base_display() {
        let error = DeskmateError::MissingBaseAsset(PathBuf::from("sprites"));
        assert_eq!(error.to_string(), "Base sprite missing in sprites");
    }

    #[test]
    fn test_missing_base_user_friendly() {
        let error = DeskmateError::MissingBaseAsset(PathBuf::from("sprites"));
        let message = get_user_friendly_error(&error);
        assert!(message.contains("No base sprite"));
        assert!(message.contains("base.png"));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: DeskmateError = io_error.into();
        assert!(matches!(error, DeskmateError::IoError(_)));
    }

    #[test]
    fn test_manifest_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = DeskmateError::ManifestError {
            path: PathBuf::from("manifest.json"),
            source,
        };
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().starts_with("Invalid sprite manifest manifest.json"));
    }

    #[test]
    fn test_invalid_hotkey_user_friendly() {
        let error = DeskmateError::InvalidHotkey("ctrl+".to_string());
        let message = get_user_friendly_error(&error);
        assert!(message.contains("ctrl+"));
        assert!(message.contains("ctrl+shift+x"));
    }

    #[test]
    fn test_config_error_display() {
        let error = DeskmateError::ConfigError(StringError::new("bad path"));
        assert_eq!(error.to_string(), "Configuration error: bad path");
    }
}
