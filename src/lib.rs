//! `Deskmate` - A desktop companion character for Windows
//!
//! Shows a frameless, always-on-top character sprite that can be dragged around,
//! collapsed against a screen edge, talks through a typewriter speech bubble and
//! keeps a pomodoro timer. `AssetCatalog` indexes the sprite PNGs, `CharacterState`
//! tracks pose/expression/position, and `CompanionController` turns input into
//! state transitions that the Slint windows in the binary draw.
//!
//! # Requirements
//!
//! - Windows 10 or later for global hotkeys, work-area detection and the tray icon
//! - A directory of PNG sprites containing at least the base sprite
//!
//! Other platforms run the same windows with those integrations stubbed out.

// Module declarations
pub mod assets;
pub mod character;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod pomodoro;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{DeskmateError, Result};
