//! Pomodoro state machine
//!
//! Work sessions alternate with breaks; every `cycles_per_long_break`-th
//! break is a long one. Between sessions the timer waits for the user to
//! confirm, and a confirmation can be snoozed once per prompt.
//!
//! ```text
//! Idle ─main─▶ Work ─done─▶ AwaitingShortBreak ─main─▶ ShortBreak ─done─▶ AwaitingWork ─main─▶ Work
//!                    └─4th─▶ AwaitingLongBreak  ─main─▶ LongBreak  ─done─┘
//! Awaiting* ─snooze─▶ Snoozing ─done─▶ (same Awaiting*)
//! ```
//!
//! The timer is ticked with elapsed wall time from the UI timer and reports
//! what happened as [`PomodoroEvent`]s.

use crate::pomodoro::PomodoroConfig;
use smallvec::{SmallVec, smallvec};
use std::time::Duration;
use tracing::{debug, info};

/// Events from a single timer operation; at most two are produced
pub type PomodoroEvents = SmallVec<[PomodoroEvent; 2]>;

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PomodoroState {
    /// Not started
    Idle,
    /// Work session running or paused
    Work,
    /// Short break running or paused
    ShortBreak,
    /// Long break running or paused
    LongBreak,
    /// Waiting for the user to start work
    AwaitingWork,
    /// Waiting for the user to start a short break
    AwaitingShortBreak,
    /// Waiting for the user to start a long break
    AwaitingLongBreak,
    /// Postponing a confirmation
    Snoozing,
}

impl PomodoroState {
    /// Short human-readable state name
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Work => "Working",
            Self::ShortBreak => "Short break",
            Self::LongBreak => "Long break",
            Self::AwaitingWork => "Ready to work",
            Self::AwaitingShortBreak => "Ready for a short break",
            Self::AwaitingLongBreak => "Ready for a long break",
            Self::Snoozing => "Snoozing",
        }
    }

    /// Whether the state counts down
    pub const fn is_timed(self) -> bool {
        matches!(
            self,
            Self::Work | Self::ShortBreak | Self::LongBreak | Self::Snoozing
        )
    }

    /// Session waiting for confirmation, if any
    pub const fn awaiting(self) -> Option<Session> {
        match self {
            Self::AwaitingWork => Some(Session::Work),
            Self::AwaitingShortBreak => Some(Session::ShortBreak),
            Self::AwaitingLongBreak => Some(Session::LongBreak),
            _ => None,
        }
    }
}

/// A confirmable session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Session {
    /// Work session
    Work,
    /// Short break
    ShortBreak,
    /// Long break
    LongBreak,
}

impl Session {
    const fn running_state(self) -> PomodoroState {
        match self {
            Self::Work => PomodoroState::Work,
            Self::ShortBreak => PomodoroState::ShortBreak,
            Self::LongBreak => PomodoroState::LongBreak,
        }
    }

    const fn awaiting_state(self) -> PomodoroState {
        match self {
            Self::Work => PomodoroState::AwaitingWork,
            Self::ShortBreak => PomodoroState::AwaitingShortBreak,
            Self::LongBreak => PomodoroState::AwaitingLongBreak,
        }
    }
}

/// What a snooze postponed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnoozeTarget {
    /// Start of a work session ("a few more minutes of rest")
    Work,
    /// Start of a break ("a few more minutes of work")
    Break,
}

/// Notable timer transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PomodoroEvent {
    /// A work session or break ended (timed out or skipped)
    SessionFinished(Session),
    /// The timer waits for the user to start the session
    ConfirmationRequired(Session),
    /// A confirmation was postponed
    SnoozeActivated(SnoozeTarget),
}

/// The pomodoro timer
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    config: PomodoroConfig,
    state: PomodoroState,
    remaining: Duration,
    running: bool,
    cycles_completed: u32,
    snoozed: Option<Session>,
}

impl PomodoroTimer {
    /// Idle timer
    pub fn new(config: PomodoroConfig) -> Self {
        let remaining = config.work_duration();
        Self {
            config,
            state: PomodoroState::Idle,
            remaining,
            running: false,
            cycles_completed: 0,
            snoozed: None,
        }
    }

    /// Current state
    pub const fn state(&self) -> PomodoroState {
        self.state
    }

    /// Time left in the current (or next) session
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whether the countdown is advancing
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Work sessions completed since the last reset
    pub const fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Work sessions completed in the current long-break set
    pub fn cycles_in_set(&self) -> u32 {
        self.cycles_completed % self.config.cycles_per_long_break()
    }

    /// Durations in use
    pub const fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    /// Share of the running session already elapsed, `0.0` when not timed
    #[expect(
        clippy::cast_possible_truncation,
        reason = "progress ratio is within 0..=1"
    )]
    pub fn progress(&self) -> f32 {
        match self.duration_of(self.state) {
            Some(total) if self.state.is_timed() && !total.is_zero() => {
                let elapsed = total.saturating_sub(self.remaining);
                (elapsed.as_secs_f64() / total.as_secs_f64()) as f32
            }
            _ => 0.0,
        }
    }

    /// Start, pause, resume or confirm depending on the state
    pub fn main_action(&mut self) {
        match self.state {
            PomodoroState::Idle => self.enter(PomodoroState::Work, true),
            state if state.is_timed() => {
                self.running = !self.running;
                info!(
                    "Pomodoro {} {}",
                    state.label(),
                    if self.running { "resumed" } else { "paused" }
                );
            }
            state => {
                if let Some(session) = state.awaiting() {
                    self.enter(session.running_state(), true);
                }
            }
        }
    }

    /// Postpone the pending confirmation by the snooze duration
    ///
    /// Only valid while awaiting a confirmation; otherwise does nothing.
    pub fn snooze(&mut self) -> PomodoroEvents {
        let Some(session) = self.state.awaiting() else {
            return PomodoroEvents::new();
        };

        self.snoozed = Some(session);
        self.enter(PomodoroState::Snoozing, true);
        let target = match session {
            Session::Work => SnoozeTarget::Work,
            Session::ShortBreak | Session::LongBreak => SnoozeTarget::Break,
        };
        smallvec![PomodoroEvent::SnoozeActivated(target)]
    }

    /// Finish the current session now, or skip the pending one
    pub fn skip(&mut self) -> PomodoroEvents {
        match self.state {
            PomodoroState::Idle => PomodoroEvents::new(),
            state if state.is_timed() => self.complete(),
            PomodoroState::AwaitingWork => {
                let mut events = smallvec![PomodoroEvent::SessionFinished(Session::Work)];
                events.push(self.finish_work());
                events
            }
            state => {
                let finished = match state {
                    PomodoroState::AwaitingLongBreak => Session::LongBreak,
                    _ => Session::ShortBreak,
                };
                self.await_session(Session::Work);
                smallvec![
                    PomodoroEvent::SessionFinished(finished),
                    PomodoroEvent::ConfirmationRequired(Session::Work),
                ]
            }
        }
    }

    /// Back to idle with no completed cycles
    pub fn reset(&mut self) {
        self.cycles_completed = 0;
        self.snoozed = None;
        self.enter(PomodoroState::Idle, false);
    }

    /// Advance the countdown by `elapsed`
    pub fn tick(&mut self, elapsed: Duration) -> PomodoroEvents {
        if !self.running || !self.state.is_timed() {
            return PomodoroEvents::new();
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.complete()
        } else {
            PomodoroEvents::new()
        }
    }

    fn complete(&mut self) -> PomodoroEvents {
        match self.state {
            PomodoroState::Work => {
                let mut events = smallvec![PomodoroEvent::SessionFinished(Session::Work)];
                events.push(self.finish_work());
                events
            }
            PomodoroState::ShortBreak | PomodoroState::LongBreak => {
                let finished = if self.state == PomodoroState::LongBreak {
                    Session::LongBreak
                } else {
                    Session::ShortBreak
                };
                self.await_session(Session::Work);
                smallvec![
                    PomodoroEvent::SessionFinished(finished),
                    PomodoroEvent::ConfirmationRequired(Session::Work),
                ]
            }
            PomodoroState::Snoozing => {
                let session = self.snoozed.take().unwrap_or(Session::Work);
                self.await_session(session);
                smallvec![PomodoroEvent::ConfirmationRequired(session)]
            }
            _ => PomodoroEvents::new(),
        }
    }

    fn finish_work(&mut self) -> PomodoroEvent {
        self.cycles_completed += 1;
        let next = if self.cycles_completed % self.config.cycles_per_long_break() == 0 {
            Session::LongBreak
        } else {
            Session::ShortBreak
        };
        info!(
            "Work cycle {} complete, next: {:?}",
            self.cycles_completed, next
        );
        self.await_session(next);
        PomodoroEvent::ConfirmationRequired(next)
    }

    fn await_session(&mut self, session: Session) {
        self.enter(session.awaiting_state(), false);
    }

    fn enter(&mut self, state: PomodoroState, running: bool) {
        debug!("Pomodoro {:?} -> {:?}", self.state, state);
        self.state = state;
        self.running = running;
        self.remaining = self
            .duration_of(state)
            .unwrap_or_else(|| self.config.work_duration());
    }

    fn duration_of(&self, state: PomodoroState) -> Option<Duration> {
        match state {
            PomodoroState::Idle | PomodoroState::Work | PomodoroState::AwaitingWork => {
                Some(self.config.work_duration())
            }
            PomodoroState::ShortBreak | PomodoroState::AwaitingShortBreak => {
                Some(self.config.short_break_duration())
            }
            PomodoroState::LongBreak | PomodoroState::AwaitingLongBreak => {
                Some(self.config.long_break_duration())
            }
            PomodoroState::Snoozing => Some(self.config.snooze_duration()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> PomodoroTimer {
        PomodoroTimer::new(PomodoroConfig::default())
    }

    fn run_out(timer: &mut PomodoroTimer) -> PomodoroEvents {
        let remaining = timer.remaining();
        timer.tick(remaining)
    }

    #[test]
    fn test_idle_starts_work() {
        let mut timer = timer();
        assert_eq!(timer.remaining(), Duration::from_secs(25 * 60));
        timer.main_action();
        assert_eq!(timer.state(), PomodoroState::Work);
        assert!(timer.is_running());
    }

    #[test]
    fn test_main_action_pauses_and_resumes() {
        let mut timer = timer();
        timer.main_action();
        timer.tick(Duration::from_secs(60));
        timer.main_action();
        assert!(!timer.is_running());
        assert!(timer.tick(Duration::from_secs(60)).is_empty());
        assert_eq!(timer.remaining(), Duration::from_secs(24 * 60));
        timer.main_action();
        assert!(timer.is_running());
    }

    #[test]
    fn test_work_completion_requests_short_break() {
        let mut timer = timer();
        timer.main_action();
        let events = run_out(&mut timer);
        assert_eq!(
            events.as_slice(),
            &[
                PomodoroEvent::SessionFinished(Session::Work),
                PomodoroEvent::ConfirmationRequired(Session::ShortBreak),
            ]
        );
        assert_eq!(timer.state(), PomodoroState::AwaitingShortBreak);
        assert_eq!(timer.remaining(), Duration::from_secs(5 * 60));
        assert!(!timer.is_running());
    }

    #[test]
    fn test_fourth_cycle_requests_long_break() {
        let mut timer = timer();
        for cycle in 1..=4 {
            timer.main_action();
            assert_eq!(timer.state(), PomodoroState::Work);
            let events = run_out(&mut timer);
            if cycle < 4 {
                assert_eq!(timer.state(), PomodoroState::AwaitingShortBreak);
                timer.main_action();
                run_out(&mut timer);
            } else {
                assert_eq!(
                    events.last(),
                    Some(&PomodoroEvent::ConfirmationRequired(Session::LongBreak))
                );
            }
        }
        assert_eq!(timer.cycles_completed(), 4);
        assert_eq!(timer.cycles_in_set(), 0);
    }

    #[test]
    fn test_snooze_returns_to_same_confirmation() {
        let mut timer = timer();
        timer.main_action();
        run_out(&mut timer);

        let events = timer.snooze();
        assert_eq!(
            events.as_slice(),
            &[PomodoroEvent::SnoozeActivated(SnoozeTarget::Break)]
        );
        assert_eq!(timer.state(), PomodoroState::Snoozing);
        assert_eq!(timer.remaining(), Duration::from_secs(5 * 60));

        let events = run_out(&mut timer);
        assert_eq!(
            events.as_slice(),
            &[PomodoroEvent::ConfirmationRequired(Session::ShortBreak)]
        );
        assert_eq!(timer.state(), PomodoroState::AwaitingShortBreak);
    }

    #[test]
    fn test_snooze_outside_confirmation_is_ignored() {
        let mut timer = timer();
        assert!(timer.snooze().is_empty());
        timer.main_action();
        assert!(timer.snooze().is_empty());
        assert_eq!(timer.state(), PomodoroState::Work);
    }

    #[test]
    fn test_skip_pending_work_counts_cycle() {
        let mut timer = timer();
        timer.main_action();
        run_out(&mut timer);
        timer.main_action();
        run_out(&mut timer);
        assert_eq!(timer.state(), PomodoroState::AwaitingWork);

        let events = timer.skip();
        assert_eq!(events[0], PomodoroEvent::SessionFinished(Session::Work));
        assert_eq!(timer.cycles_completed(), 2);
        assert_eq!(timer.state(), PomodoroState::AwaitingShortBreak);
    }

    #[test]
    fn test_skip_pending_break_awaits_work() {
        let mut timer = timer();
        timer.main_action();
        run_out(&mut timer);
        let events = timer.skip();
        assert_eq!(
            events.as_slice(),
            &[
                PomodoroEvent::SessionFinished(Session::ShortBreak),
                PomodoroEvent::ConfirmationRequired(Session::Work),
            ]
        );
        assert_eq!(timer.state(), PomodoroState::AwaitingWork);
    }

    #[test]
    fn test_reset_clears_cycles() {
        let mut timer = timer();
        timer.main_action();
        run_out(&mut timer);
        timer.reset();
        assert_eq!(timer.state(), PomodoroState::Idle);
        assert_eq!(timer.cycles_completed(), 0);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), Duration::from_secs(25 * 60));
    }

    #[test]
    fn test_progress() {
        let mut timer = timer();
        assert!(timer.progress().abs() < f32::EPSILON);
        timer.main_action();
        timer.tick(Duration::from_secs(75 * 6));
        assert!((timer.progress() - 0.3).abs() < 1e-4);
    }
}
