//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to %APPDATA%\Deskmate\app.log
//! and rotation on application startup keeping 9 historical files.

use crate::config::ConfigManager;
use crate::error::{DeskmateError, Result, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (app.log.1 through app.log.9)
const MAX_LOG_FILES: u8 = 9;

/// Initialize the logging system
///
/// Log level defaults to INFO and can be changed with `RUST_LOG`, e.g.
/// `RUST_LOG=deskmate=debug`.
pub fn init_logging() -> Result<()> {
    let log_dir = ConfigManager::get_data_dir();
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("app.log");
    rotate_logs_on_startup(&log_path)?;

    // Rotation::NEVER: sessions are rotated above, not by date
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("app")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| DeskmateError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| DeskmateError::ConfigError(Box::new(e)))?;

    tracing::info!(
        "Deskmate v{} started, logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );

    Ok(())
}

/// Shift `app.log` → `app.log.1` → … → `app.log.9`, dropping the oldest
///
/// Runs on every startup regardless of file size so each session keeps its
/// own log.
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| DeskmateError::ConfigError(StringError::new("Invalid log path")))?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| DeskmateError::ConfigError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        if current_log.exists() {
            std::fs::rename(&current_log, log_dir.join(format!("{log_name}.{}", i + 1)))?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;
    use std::fs;

    fn session(dir: &Path, content: &str) {
        fs::write(dir.join("app.log"), content).unwrap();
        rotate_logs_on_startup(&dir.join("app.log")).unwrap();
    }

    #[test]
    fn test_rotation_moves_current_log() {
        let dir = create_test_dir();
        session(dir.path(), "Session 1");

        assert!(!dir.path().join("app.log").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("app.log.1")).unwrap(),
            "Session 1"
        );
    }

    #[test]
    fn test_rotation_keeps_newest_first() {
        let dir = create_test_dir();
        for i in 1..=5 {
            session(dir.path(), &format!("Session {i}"));
        }
        for i in 1..=5 {
            assert_eq!(
                fs::read_to_string(dir.path().join(format!("app.log.{i}"))).unwrap(),
                format!("Session {}", 6 - i)
            );
        }
    }

    #[test]
    fn test_rotation_respects_max_files() {
        let dir = create_test_dir();
        for i in 1..=12 {
            session(dir.path(), &format!("Session {i}"));
        }

        assert!(dir.path().join(format!("app.log.{MAX_LOG_FILES}")).exists());
        assert!(!dir.path().join("app.log.10").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("app.log.9")).unwrap(),
            "Session 4"
        );
    }

    #[test]
    fn test_rotation_without_existing_log() {
        let dir = create_test_dir();
        rotate_logs_on_startup(&dir.path().join("app.log")).unwrap();
        assert!(!dir.path().join("app.log.1").exists());
    }

    #[test]
    fn test_rotation_with_gaps_in_history() {
        let dir = create_test_dir();
        fs::write(dir.path().join("app.log.1"), "Previous").unwrap();
        fs::write(dir.path().join("app.log.5"), "Very old").unwrap();
        session(dir.path(), "Current");

        assert_eq!(fs::read_to_string(dir.path().join("app.log.1")).unwrap(), "Current");
        assert_eq!(fs::read_to_string(dir.path().join("app.log.2")).unwrap(), "Previous");
        assert_eq!(fs::read_to_string(dir.path().join("app.log.6")).unwrap(), "Very old");
    }
}
