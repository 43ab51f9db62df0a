//! Configuration data models
//!
//! This module defines the data structures used for application configuration.
//! Every section carries `#[serde(default)]` so a partial or older config file
//! still loads, with missing fields taking their default values.

use crate::character::geometry::{Point, Rect, Size};
use crate::dialog::DialogScript;
use crate::pomodoro::PomodoroConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sprite asset location and naming
    pub assets: AssetSettings,
    /// Character window layout
    pub window: WindowSettings,
    /// Dialog bubble behaviour and lines
    pub dialog: DialogSettings,
    /// Expression ids used by interactions
    pub expressions: ExpressionSettings,
    /// Pomodoro durations
    pub pomodoro: PomodoroConfig,
    /// Quit hotkeys, e.g. `"ctrl+shift+x"`
    pub quit_hotkeys: Vec<String>,
    /// Hotkey toggling the pomodoro panel
    pub pomodoro_hotkey: String,
}

/// Where sprites live and how convention-named files are interpreted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory holding the PNG sprites (and optional `manifest.json`)
    pub directory: PathBuf,
    /// File stem of the base sprite (`{stem}.png`, `{stem}_{expr}.png`)
    pub sprite_stem: String,
    /// Treat convention-named expression files as overlays on the base sprite
    pub overlay_expressions: bool,
}

/// Character window layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Box the expanded sprite is fitted into
    pub sprite_size: Size,
    /// Share of the sprite height kept visible when collapsed (upper body)
    pub collapsed_fraction: f32,
    /// Pointer travel (Manhattan, px) before a press becomes a drag
    pub drag_threshold_px: u32,
    /// Work area used when the platform cannot report one
    pub fallback_screen: Rect,
    /// Initial position; `None` places the character at the bottom-right
    pub initial_position: Option<Point>,
}

/// Dialog bubble behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogSettings {
    /// How long a bubble stays visible once fully revealed
    pub display_ms: u64,
    /// Display time for pomodoro prompts
    pub prompt_display_ms: u64,
    /// Typewriter speed
    pub ms_per_char: u64,
    /// Cursor blink period
    pub cursor_blink_ms: u64,
    /// Bubble window size
    pub bubble_size: Size,
    /// Fixed RNG seed for reproducible line selection
    pub seed: Option<u64>,
    /// Lines shown by the character
    pub script: DialogScript,
}

/// Expression ids referenced by interactions
///
/// Ids are opaque; they only have to match the expression ids of the sprite
/// catalog. With a manifest an id can name a body + face overlay, e.g.
/// `"drag": "refuse"` for a deadpan face on the `negative` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionSettings {
    /// Shown while the character is being dragged
    pub drag: String,
    /// Candidates for a random line
    pub chat: Vec<String>,
    /// Shown when a work session finishes
    pub celebrate: Vec<String>,
    /// Shown when the timer asks to resume work
    pub encourage: Vec<String>,
    /// Shown when a snooze starts
    pub tease: Vec<String>,
    /// Delay before returning to the base expression
    pub reset_ms: u64,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("sprites"),
            sprite_stem: "base".to_string(),
            overlay_expressions: false,
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            sprite_size: Size::new(300, 500),
            collapsed_fraction: 0.33,
            drag_threshold_px: 10,
            fallback_screen: Rect::new(0, 0, 1920, 1080),
            initial_position: None,
        }
    }
}

impl Default for DialogSettings {
    fn default() -> Self {
        Self {
            display_ms: 6000,
            prompt_display_ms: 10_000,
            ms_per_char: 20,
            cursor_blink_ms: 500,
            bubble_size: Size::new(320, 140),
            seed: None,
            script: DialogScript::default(),
        }
    }
}

impl Default for ExpressionSettings {
    fn default() -> Self {
        Self {
            drag: "annoyed".to_string(),
            chat: [
                "base",
                "relieved",
                "pouting",
                "surprised",
                "curious",
                "blush",
                "eyes-closed",
                "annoyed",
            ]
            .map(String::from)
            .to_vec(),
            celebrate: ["relieved", "blush"].map(String::from).to_vec(),
            encourage: ["base", "curious", "eyes-closed"].map(String::from).to_vec(),
            tease: ["annoyed", "eyes-closed", "blush"].map(String::from).to_vec(),
            reset_ms: 6000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets: AssetSettings::default(),
            window: WindowSettings::default(),
            dialog: DialogSettings::default(),
            expressions: ExpressionSettings::default(),
            pomodoro: PomodoroConfig::default(),
            quit_hotkeys: vec!["ctrl+shift+x".to_string(), "alt+f4".to_string()],
            pomodoro_hotkey: "ctrl+shift+p".to_string(),
        }
    }
}
