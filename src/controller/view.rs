//! Snapshot of everything the windows need to draw

use crate::assets::SpriteKey;
use crate::character::geometry::{Point, Rect, Size};
use crate::pomodoro::{PomodoroState, PomodoroTimer};

/// Size of the pomodoro panel window
pub const POMODORO_PANEL_SIZE: Size = Size::new(260, 180);

/// State of all companion windows at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct CompanionView {
    /// Sprite to show in the character window
    pub sprite: SpriteKey,
    /// Character window geometry
    pub window: Rect,
    /// Speech bubble, if shown
    pub dialog: Option<DialogView>,
    /// Pomodoro panel, if shown
    pub pomodoro: Option<PomodoroView>,
}

/// Speech bubble contents and placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    /// Revealed text including the cursor
    pub text: String,
    /// Bubble window geometry
    pub rect: Rect,
}

/// Pomodoro panel contents and placement
#[derive(Debug, Clone, PartialEq)]
pub struct PomodoroView {
    /// Panel window position
    pub origin: Point,
    /// State name
    pub state: String,
    /// Remaining time as `mm:ss`
    pub time: String,
    /// Elapsed share of the running session
    pub progress: f32,
    /// Cycle counter text
    pub cycles: String,
    /// Main button label
    pub main_label: String,
    /// Snooze button label, `None` hides the button
    pub snooze_label: Option<String>,
    /// Skip button label
    pub skip_label: String,
    /// Whether the countdown runs
    pub running: bool,
}

impl PomodoroView {
    /// Describe `timer` for a panel at `origin`
    pub fn describe(timer: &PomodoroTimer, origin: Point) -> Self {
        let state = timer.state();
        let secs = timer.remaining().as_secs();
        let snooze = timer.config().snooze_minutes;

        let main_label = match state {
            PomodoroState::Idle | PomodoroState::AwaitingWork => "Start work",
            PomodoroState::AwaitingShortBreak => "Start short break",
            PomodoroState::AwaitingLongBreak => "Start long break",
            _ if timer.is_running() => "Pause",
            _ => "Resume",
        };
        let snooze_label = match state {
            PomodoroState::AwaitingWork => Some(format!("Slack off {snooze} min")),
            PomodoroState::AwaitingShortBreak | PomodoroState::AwaitingLongBreak => {
                Some(format!("Work {snooze} more min"))
            }
            _ => None,
        };
        let skip_label = match state {
            PomodoroState::AwaitingWork => "Skip work",
            PomodoroState::AwaitingShortBreak => "Skip short break",
            PomodoroState::AwaitingLongBreak => "Skip long break",
            _ => "Skip",
        };

        Self {
            origin,
            state: state.label().to_string(),
            time: format!("{:02}:{:02}", secs / 60, secs % 60),
            progress: timer.progress(),
            cycles: format!(
                "This set: {}/{} (total {})",
                timer.cycles_in_set(),
                timer.config().cycles_per_long_break(),
                timer.cycles_completed()
            ),
            main_label: main_label.to_string(),
            snooze_label,
            skip_label: skip_label.to_string(),
            running: timer.is_running(),
        }
    }
}
