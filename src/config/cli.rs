//! Command-line overrides
//!
//! `--assets <dir>` replaces the sprite directory from the config file for
//! this run.

use crate::config::models::AppConfig;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Options given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "deskmate")]
#[command(version, about = "Transparent always-on-top desktop companion character")]
#[command(long_about = None)]
pub struct CliOptions {
    /// Sprite directory, overriding `assets.directory` from config.json
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,
}

impl CliOptions {
    /// Apply the overrides to a loaded config
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.assets {
            config.assets.directory.clone_from(dir);
        }
    }
}

/// Resolve a relative sprite directory
///
/// Relative paths are tried against the working directory first and then
/// against the directory holding the executable.
pub fn resolve_asset_dir(dir: &Path, exe_dir: Option<&Path>) -> PathBuf {
    if dir.is_absolute() || dir.is_dir() {
        return dir.to_path_buf();
    }

    exe_dir
        .map(|base| base.join(dir))
        .filter(|candidate| candidate.is_dir())
        .unwrap_or_else(|| dir.to_path_buf())
}
