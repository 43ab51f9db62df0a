//! Utility modules
//!
//! Provides logging, single instance enforcement, keyboard shortcuts and
//! screen work-area queries.

pub mod hotkey;
pub mod logging;
pub mod screen;
pub mod single_instance;

pub use hotkey::{HotkeyBinding, KeyCode, Modifiers, QuitHotkeyListener};
pub use logging::init_logging;
pub use screen::work_area_or;
pub use single_instance::SingleInstanceGuard;
