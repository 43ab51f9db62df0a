//! Companion controller
//!
//! Owns the character state, dialog bubble and pomodoro timer and turns
//! input events, menu commands and timer ticks into state transitions. It is
//! UI-agnostic: the GUI feeds it events with the current `Instant` and draws
//! whatever [`CompanionView`] it returns.

use crate::assets::{AssetCatalog, BASE_EXPRESSION, SpriteKey};
use crate::character::geometry::{Point, Rect};
use crate::character::{CharacterState, DragTracker, DragUpdate, Layout, Pose};
use crate::config::AppConfig;
use crate::controller::input::{Command, InputEvent, PointerButton};
use crate::controller::view::{CompanionView, DialogView, POMODORO_PANEL_SIZE, PomodoroView};
use crate::dialog::placement::GAP;
use crate::dialog::{BubbleTiming, DialogBubble, DialogPicker, place_beside};
use crate::pomodoro::{PomodoroEvent, PomodoroEvents, PomodoroTimer, Session, SnoozeTarget};
use crate::utils::hotkey::HotkeyBinding;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a single click waits for a second click before it counts
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Which group of lines and expressions a reaction uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    Chat,
    WorkFinished,
    Confirm(Session),
    Snooze(SnoozeTarget),
}

/// The running companion
pub struct CompanionController {
    config: AppConfig,
    catalog: AssetCatalog,
    character: CharacterState,
    drag: DragTracker,
    picker: DialogPicker,
    bubble: DialogBubble,
    pomodoro: PomodoroTimer,
    pomodoro_visible: bool,
    quit_bindings: Vec<HotkeyBinding>,
    pomodoro_binding: Option<HotkeyBinding>,
    expression_before_drag: Option<String>,
    expression_reset_at: Option<Instant>,
    pending_click_at: Option<Instant>,
    last_tick: Option<Instant>,
    quit_requested: bool,
}

impl CompanionController {
    /// Create the controller for a loaded catalog on `screen`
    pub fn new(config: AppConfig, catalog: AssetCatalog, screen: Rect) -> Self {
        let layout = Layout::new(
            screen,
            config.window.sprite_size,
            config.window.collapsed_fraction,
        );
        let character = CharacterState::new(layout, config.window.initial_position);
        let quit_bindings = HotkeyBinding::parse_all(&config.quit_hotkeys);
        let pomodoro_binding = match config.pomodoro_hotkey.parse::<HotkeyBinding>() {
            Ok(binding) => Some(binding),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        info!(
            "Companion ready at ({}, {}) on a {}x{} work area",
            character.position().x,
            character.position().y,
            screen.width,
            screen.height
        );

        Self {
            drag: DragTracker::new(config.window.drag_threshold_px),
            picker: DialogPicker::new(config.dialog.seed),
            bubble: DialogBubble::new(BubbleTiming::from_millis(
                config.dialog.ms_per_char,
                config.dialog.cursor_blink_ms,
            )),
            pomodoro: PomodoroTimer::new(config.pomodoro.clone()),
            pomodoro_visible: false,
            quit_bindings,
            pomodoro_binding,
            expression_before_drag: None,
            expression_reset_at: None,
            pending_click_at: None,
            last_tick: None,
            quit_requested: false,
            config,
            catalog,
            character,
        }
    }

    /// The sprite catalog
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// The character state
    pub fn character(&self) -> &CharacterState {
        &self.character
    }

    /// The pomodoro timer
    pub fn pomodoro(&self) -> &PomodoroTimer {
        &self.pomodoro
    }

    /// Quit bindings parsed from the config
    pub fn quit_bindings(&self) -> &[HotkeyBinding] {
        &self.quit_bindings
    }

    /// Whether a quit was requested by a key or command
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Whether the speech bubble is shown
    pub fn is_dialog_visible(&self) -> bool {
        self.bubble.is_visible()
    }

    /// Apply one input event
    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::PointerDown {
                button: PointerButton::Left,
                at,
            } => self.drag.press(at, self.character.position()),
            InputEvent::PointerDown {
                button: PointerButton::Right,
                ..
            } => self.say(Reaction::Chat, now),
            InputEvent::PointerDown { .. } => {}
            InputEvent::PointerMove { at } => self.drag_to(at),
            InputEvent::PointerUp {
                button: PointerButton::Left,
                ..
            } => {
                if self.drag.release() {
                    self.end_drag();
                } else {
                    self.left_click(now);
                }
            }
            InputEvent::PointerUp { .. } => {}
            InputEvent::DoubleClick => {
                self.pending_click_at = None;
                self.drag.cancel();
                self.bubble.hide();
                self.character.toggle_collapse();
            }
            InputEvent::Key { modifiers, key } => {
                if self.quit_bindings.iter().any(|b| b.matches(modifiers, key)) {
                    self.handle_command(Command::Quit, now);
                } else if self
                    .pomodoro_binding
                    .is_some_and(|b| b.matches(modifiers, key))
                {
                    self.handle_command(Command::TogglePomodoro, now);
                }
            }
            InputEvent::BubbleClicked => {
                let outcome = self.bubble.click(now);
                debug!("Bubble click: {:?}", outcome);
            }
        }
    }

    /// Apply one menu or panel command
    pub fn handle_command(&mut self, command: Command, now: Instant) {
        debug!("Command {:?}", command);
        match command {
            Command::SaySomething => self.say(Reaction::Chat, now),
            Command::ToggleCollapse => {
                self.bubble.hide();
                self.character.toggle_collapse();
            }
            Command::TogglePomodoro => self.pomodoro_visible = !self.pomodoro_visible,
            Command::PomodoroMain => self.pomodoro.main_action(),
            Command::PomodoroSnooze => {
                let events = self.pomodoro.snooze();
                self.react_all(events, now);
            }
            Command::PomodoroSkip => {
                let events = self.pomodoro.skip();
                self.react_all(events, now);
            }
            Command::PomodoroReset => self.pomodoro.reset(),
            Command::Quit => {
                info!("Quit requested");
                self.quit_requested = true;
            }
        }
    }

    /// Advance timers to `now`
    pub fn tick(&mut self, now: Instant) {
        let elapsed = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);

        let events = self.pomodoro.tick(elapsed);
        self.react_all(events, now);

        self.bubble.tick(now);

        if self
            .pending_click_at
            .is_some_and(|at| now.saturating_duration_since(at) >= DOUBLE_CLICK_WINDOW)
        {
            self.pending_click_at = None;
            if self.character.is_collapsed() {
                self.character.toggle_collapse();
            } else {
                self.say(Reaction::Chat, now);
            }
        }

        if !self.drag.is_dragging() && self.expression_reset_at.is_some_and(|at| now >= at) {
            self.expression_reset_at = None;
            self.character.set_expression(BASE_EXPRESSION);
        }
    }

    /// Everything the windows should show at `now`
    pub fn view(&self, now: Instant) -> CompanionView {
        let window = self.character.rect();
        let screen = self.character.layout().screen;

        let dialog = self.bubble.display_text(now).map(|text| {
            let size = self.config.dialog.bubble_size;
            DialogView {
                text,
                rect: Rect::from_origin(place_beside(window, size, screen), size),
            }
        });

        let pomodoro = self.pomodoro_visible.then(|| {
            let origin = match &dialog {
                Some(dialog) => screen.clamp_origin(
                    Point::new(dialog.rect.x, dialog.rect.bottom() + GAP),
                    POMODORO_PANEL_SIZE,
                ),
                None => place_beside(window, POMODORO_PANEL_SIZE, screen),
            };
            PomodoroView::describe(&self.pomodoro, origin)
        });

        CompanionView {
            sprite: SpriteKey {
                pose: self.character.pose(),
                expression: self.character.expression().to_string(),
                edge: self.character.collapsed_edge(),
            },
            window,
            dialog,
            pomodoro,
        }
    }

    /// A click that was not a drag
    ///
    /// Clicks on a visible bubble advance it. Otherwise the click is held back
    /// for the double-click window and then expands a collapsed character or
    /// starts a chat line.
    fn left_click(&mut self, now: Instant) {
        if self.bubble.is_visible() {
            self.bubble.click(now);
        } else {
            self.pending_click_at = Some(now);
        }
    }

    fn drag_to(&mut self, at: Point) {
        match self.drag.update(at) {
            DragUpdate::Started(target) => {
                self.pending_click_at = None;
                self.expression_before_drag = Some(self.character.expression().to_string());
                let drag_expression = self.config.expressions.drag.clone();
                self.character.set_expression(drag_expression);
                self.character.move_to(target.x, target.y);
            }
            DragUpdate::Moved(target) => self.character.move_to(target.x, target.y),
            DragUpdate::Idle | DragUpdate::Pending => {}
        }
    }

    fn end_drag(&mut self) {
        let expression = self
            .expression_before_drag
            .take()
            .unwrap_or_else(|| BASE_EXPRESSION.to_string());
        self.character.set_expression(expression);
        let position = self.character.position();
        debug!("Drag ended at ({}, {})", position.x, position.y);
    }

    fn react_all(&mut self, events: PomodoroEvents, now: Instant) {
        for event in events {
            self.react(event, now);
        }
    }

    fn react(&mut self, event: PomodoroEvent, now: Instant) {
        info!("Pomodoro event {:?}", event);
        match event {
            PomodoroEvent::SessionFinished(Session::Work) => self.say(Reaction::WorkFinished, now),
            PomodoroEvent::SessionFinished(_) => {}
            PomodoroEvent::ConfirmationRequired(session) => {
                self.say(Reaction::Confirm(session), now);
            }
            PomodoroEvent::SnoozeActivated(target) => self.say(Reaction::Snooze(target), now),
        }
    }

    fn say(&mut self, reaction: Reaction, now: Instant) {
        let script = &self.config.dialog.script;
        let expressions = &self.config.expressions;
        let (lines, candidates, display_ms) = match reaction {
            Reaction::Chat => (&script.random, &expressions.chat, self.config.dialog.display_ms),
            Reaction::WorkFinished => (
                &script.work_finished,
                &expressions.celebrate,
                self.config.dialog.display_ms,
            ),
            Reaction::Confirm(Session::Work) => (
                &script.confirm_work,
                &expressions.encourage,
                self.config.dialog.prompt_display_ms,
            ),
            Reaction::Confirm(Session::ShortBreak) => (
                &script.confirm_short_break,
                &expressions.celebrate,
                self.config.dialog.prompt_display_ms,
            ),
            Reaction::Confirm(Session::LongBreak) => (
                &script.confirm_long_break,
                &expressions.celebrate,
                self.config.dialog.prompt_display_ms,
            ),
            Reaction::Snooze(SnoozeTarget::Work) => (
                &script.snooze_work,
                &expressions.tease,
                self.config.dialog.display_ms,
            ),
            Reaction::Snooze(SnoozeTarget::Break) => (
                &script.snooze_break,
                &expressions.encourage,
                self.config.dialog.display_ms,
            ),
        };

        let Some(line) = self.picker.pick(lines) else {
            debug!("No lines configured for {:?}", reaction);
            return;
        };

        let available: Vec<&String> = candidates
            .iter()
            .filter(|id| self.catalog.contains(Pose::Expanded, id))
            .collect();
        let expression = self
            .picker
            .pick_item(&available)
            .map_or(BASE_EXPRESSION, |id| id.as_str())
            .to_string();

        let display = Duration::from_millis(display_ms);
        debug!("Saying {:?} with expression '{}'", line, expression);
        self.bubble.show(line, display, now);

        if self.drag.is_dragging() {
            self.expression_before_drag = Some(expression);
        } else {
            self.character.set_expression(expression);
        }
        let reset = Duration::from_millis(self.config.expressions.reset_ms).max(display);
        self.expression_reset_at = Some(now + reset);
    }
}
