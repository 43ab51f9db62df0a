//! Input events and commands accepted by the companion controller

use crate::character::geometry::Point;
use crate::utils::hotkey::{KeyCode, Modifiers};

/// Mouse button of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
    /// Anything else
    Other,
}

impl PointerButton {
    /// Button from the integer code passed by the UI (0 left, 1 right)
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Left,
            1 => Self::Right,
            _ => Self::Other,
        }
    }
}

/// Raw input on the character or bubble window
///
/// Pointer positions are screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Button pressed over the character
    PointerDown {
        /// Button
        button: PointerButton,
        /// Pointer position
        at: Point,
    },
    /// Pointer moved over (or captured by) the character
    PointerMove {
        /// Pointer position
        at: Point,
    },
    /// Button released
    PointerUp {
        /// Button
        button: PointerButton,
        /// Pointer position
        at: Point,
    },
    /// Left double-click on the character
    DoubleClick,
    /// Key pressed while a companion window has focus
    Key {
        /// Held modifiers
        modifiers: Modifiers,
        /// Key
        key: KeyCode,
    },
    /// Click on the speech bubble
    BubbleClicked,
}

/// High-level actions from the tray menu and the pomodoro panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show a random line
    SaySomething,
    /// Collapse or expand the character
    ToggleCollapse,
    /// Show or hide the pomodoro panel
    TogglePomodoro,
    /// Pomodoro start / pause / resume / confirm
    PomodoroMain,
    /// Pomodoro snooze
    PomodoroSnooze,
    /// Pomodoro skip
    PomodoroSkip,
    /// Pomodoro reset
    PomodoroReset,
    /// Exit the application
    Quit,
}
