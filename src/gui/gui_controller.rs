//! GUI controller
//!
//! Bridges the Slint windows and the [`CompanionController`]. Slint callbacks
//! are converted into [`InputEvent`]s and [`Command`]s, a repeating UI timer
//! advances the controller and drains the tray menu, and after every change the
//! windows are redrawn from the controller's [`CompanionView`].
//!
//! All of this runs on the Slint event loop thread. The controller and sprite
//! renderer are shared between closures through `Rc<RefCell<_>>`.

use crate::gui::tray::TrayIcon;
use crate::{CharacterWindow, DialogWindow, PomodoroWindow};
use anyhow::{Context, Result};
use deskmate::assets::render::fit_into;
use deskmate::assets::{SpriteKey, SpriteRenderer};
use deskmate::character::geometry::{Point, Rect, Size};
use deskmate::controller::view::POMODORO_PANEL_SIZE;
use deskmate::controller::{Command, CompanionController, CompanionView, InputEvent, PointerButton};
use deskmate::utils::hotkey::{KeyCode, Modifiers};
use image::RgbaImage;
use slint::{
    CloseRequestResponse, ComponentHandle, PhysicalPosition, PhysicalSize, Rgba8Pixel,
    SharedPixelBuffer, Timer, TimerMode, Weak,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// UI timer period driving the typewriter, pomodoro and expression resets
const TICK_INTERVAL: Duration = Duration::from_millis(30);

const TRAY_ICON_SIZE: Size = Size::new(32, 32);

/// Weak handles to the three windows
#[derive(Clone)]
struct Handles {
    character: Weak<CharacterWindow>,
    dialog: Weak<DialogWindow>,
    pomodoro: Weak<PomodoroWindow>,
}

/// State shared by all Slint closures
struct Shared {
    controller: CompanionController,
    renderer: SpriteRenderer,
    tray: Option<TrayIcon>,
    shown_sprite: Option<SpriteKey>,
    shown_window: Option<Rect>,
    dialog_open: bool,
    pomodoro_open: bool,
    collapsed: bool,
}

/// Owns the windows and the UI timer
pub struct GuiController {
    character: CharacterWindow,
    dialog: DialogWindow,
    pomodoro: PomodoroWindow,
    shared: Rc<RefCell<Shared>>,
    timer: Timer,
}

impl GuiController {
    /// Create the windows and wire their callbacks to `controller`
    pub fn new(controller: CompanionController, mut renderer: SpriteRenderer) -> Result<Self> {
        let character = CharacterWindow::new().context("Failed to create character window")?;
        let dialog = DialogWindow::new().context("Failed to create dialog window")?;
        let pomodoro = PomodoroWindow::new().context("Failed to create pomodoro window")?;

        let base = renderer.render(controller.catalog(), &SpriteKey::base());
        let tray = match TrayIcon::new(&fit_into(&base, TRAY_ICON_SIZE)) {
            Ok(tray) => Some(tray),
            Err(e) => {
                warn!("Continuing without tray icon: {}", e);
                None
            }
        };

        let shared = Rc::new(RefCell::new(Shared {
            collapsed: controller.character().is_collapsed(),
            controller,
            renderer,
            tray,
            shown_sprite: None,
            shown_window: None,
            dialog_open: false,
            pomodoro_open: false,
        }));

        let gui = Self {
            character,
            dialog,
            pomodoro,
            shared,
            timer: Timer::default(),
        };
        gui.wire_character();
        gui.wire_dialog();
        gui.wire_pomodoro();

        debug!("GUI callbacks connected");
        Ok(gui)
    }

    /// Show the character and run the event loop until quit
    pub fn run(self) -> Result<()> {
        info!("Showing companion windows");
        self.character
            .show()
            .context("Failed to show character window")?;
        self.shared
            .borrow_mut()
            .present(&self.handles(), Instant::now());

        let shared = Rc::clone(&self.shared);
        let handles = self.handles();
        self.timer.start(TimerMode::Repeated, TICK_INTERVAL, move || {
            let now = Instant::now();
            let mut guard = shared.borrow_mut();
            let state = &mut *guard;
            while let Some(command) = state.tray.as_ref().and_then(TrayIcon::poll) {
                state.controller.handle_command(command, now);
            }
            state.controller.tick(now);
            state.present(&handles, now);
        });

        slint::run_event_loop_until_quit().context("Slint event loop failed")?;

        self.timer.stop();
        for result in [
            self.dialog.hide(),
            self.pomodoro.hide(),
            self.character.hide(),
        ] {
            if let Err(e) = result {
                debug!("Failed to hide window on shutdown: {}", e);
            }
        }
        info!("Event loop finished");
        Ok(())
    }

    fn handles(&self) -> Handles {
        Handles {
            character: self.character.as_weak(),
            dialog: self.dialog.as_weak(),
            pomodoro: self.pomodoro.as_weak(),
        }
    }

    fn wire_character(&self) {
        let window = &self.character;

        window.on_pointer_down(self.pointer_handler(|button, at| InputEvent::PointerDown {
            button: PointerButton::from_code(button),
            at,
        }));
        window.on_pointer_up(self.pointer_handler(|button, at| InputEvent::PointerUp {
            button: PointerButton::from_code(button),
            at,
        }));
        window.on_pointer_moved({
            let handler = self.pointer_handler(|_, at| InputEvent::PointerMove { at });
            move |x, y| handler(0, x, y)
        });

        window.on_double_clicked({
            let (shared, handles) = (Rc::clone(&self.shared), self.handles());
            move || dispatch_event(&shared, &handles, InputEvent::DoubleClick)
        });

        window.on_key_pressed({
            let (shared, handles) = (Rc::clone(&self.shared), self.handles());
            move |text, ctrl, shift, alt, meta| {
                let Some(key) = KeyCode::from_key_text(&text, ctrl) else {
                    return;
                };
                let modifiers = Modifiers {
                    ctrl,
                    shift,
                    alt,
                    win: meta,
                };
                dispatch_event(&shared, &handles, InputEvent::Key { modifiers, key });
            }
        });

        // Alt+F4 on the focused character window arrives as a close request
        window.window().on_close_requested({
            let (shared, handles) = (Rc::clone(&self.shared), self.handles());
            move || {
                dispatch_command(&shared, &handles, Command::Quit);
                CloseRequestResponse::KeepWindowShown
            }
        });
    }

    fn wire_dialog(&self) {
        self.dialog.on_clicked({
            let (shared, handles) = (Rc::clone(&self.shared), self.handles());
            move || dispatch_event(&shared, &handles, InputEvent::BubbleClicked)
        });
        self.dialog.window().on_close_requested(|| CloseRequestResponse::KeepWindowShown);
    }

    fn wire_pomodoro(&self) {
        let window = &self.pomodoro;
        window.on_main_action(self.command_handler(Command::PomodoroMain));
        window.on_snooze(self.command_handler(Command::PomodoroSnooze));
        window.on_skip(self.command_handler(Command::PomodoroSkip));
        window.on_reset(self.command_handler(Command::PomodoroReset));
        window.on_close(self.command_handler(Command::TogglePomodoro));

        let close = self.command_handler(Command::TogglePomodoro);
        window.window().on_close_requested(move || {
            close();
            CloseRequestResponse::KeepWindowShown
        });
    }

    fn command_handler(&self, command: Command) -> impl Fn() + use<> {
        let (shared, handles) = (Rc::clone(&self.shared), self.handles());
        move || dispatch_command(&shared, &handles, command)
    }

    /// Callback converting local pointer coordinates into a screen-space event
    fn pointer_handler(
        &self,
        make_event: fn(i32, Point) -> InputEvent,
    ) -> impl Fn(i32, f32, f32) + use<> {
        let (shared, handles) = (Rc::clone(&self.shared), self.handles());
        move |button, x, y| {
            let Some(window) = handles.character.upgrade() else {
                return;
            };
            let at = screen_point(window.window(), x, y);
            dispatch_event(&shared, &handles, make_event(button, at));
        }
    }
}

impl Shared {
    /// Push the current view to the windows
    fn present(&mut self, handles: &Handles, now: Instant) {
        if self.controller.quit_requested() {
            if let Err(e) = slint::quit_event_loop() {
                warn!("Failed to stop event loop: {}", e);
            }
            return;
        }

        let view = self.controller.view(now);
        self.present_character(handles, &view);
        self.present_dialog(handles, &view);
        self.present_pomodoro(handles, &view);

        let collapsed = self.controller.character().is_collapsed();
        if collapsed != self.collapsed {
            self.collapsed = collapsed;
            if let Some(tray) = &self.tray {
                tray.set_collapsed(collapsed);
            }
        }
    }

    fn present_character(&mut self, handles: &Handles, view: &CompanionView) {
        let Some(window) = handles.character.upgrade() else {
            return;
        };

        if self.shown_sprite.as_ref() != Some(&view.sprite) {
            let image = self.renderer.render(self.controller.catalog(), &view.sprite);
            debug!(
                "Showing sprite {:?}/{} ({}x{})",
                view.sprite.pose,
                view.sprite.expression,
                image.width(),
                image.height()
            );
            window.set_sprite(to_slint_image(&image));
            self.shown_sprite = Some(view.sprite.clone());
        }

        if self.shown_window != Some(view.window) {
            place_window(window.window(), view.window);
            self.shown_window = Some(view.window);
        }
    }

    fn present_dialog(&mut self, handles: &Handles, view: &CompanionView) {
        let Some(window) = handles.dialog.upgrade() else {
            return;
        };

        match &view.dialog {
            Some(dialog) => {
                window.set_text(dialog.text.as_str().into());
                place_window(window.window(), dialog.rect);
                if !self.dialog_open {
                    match window.show() {
                        Ok(()) => self.dialog_open = true,
                        Err(e) => warn!("Failed to show dialog window: {}", e),
                    }
                }
            }
            None if self.dialog_open => {
                if let Err(e) = window.hide() {
                    warn!("Failed to hide dialog window: {}", e);
                }
                self.dialog_open = false;
            }
            None => {}
        }
    }

    fn present_pomodoro(&mut self, handles: &Handles, view: &CompanionView) {
        let Some(window) = handles.pomodoro.upgrade() else {
            return;
        };

        match &view.pomodoro {
            Some(panel) => {
                window.set_state_text(panel.state.as_str().into());
                window.set_time_text(panel.time.as_str().into());
                window.set_progress(panel.progress);
                window.set_cycles_text(panel.cycles.as_str().into());
                window.set_main_label(panel.main_label.as_str().into());
                window.set_show_snooze(panel.snooze_label.is_some());
                window.set_snooze_label(panel.snooze_label.clone().unwrap_or_default().into());
                window.set_skip_label(panel.skip_label.as_str().into());
                place_window(
                    window.window(),
                    Rect::from_origin(panel.origin, POMODORO_PANEL_SIZE),
                );
                if !self.pomodoro_open {
                    match window.show() {
                        Ok(()) => self.pomodoro_open = true,
                        Err(e) => warn!("Failed to show pomodoro window: {}", e),
                    }
                }
            }
            None if self.pomodoro_open => {
                if let Err(e) = window.hide() {
                    warn!("Failed to hide pomodoro window: {}", e);
                }
                self.pomodoro_open = false;
            }
            None => {}
        }
    }
}

fn dispatch_event(shared: &Rc<RefCell<Shared>>, handles: &Handles, event: InputEvent) {
    let now = Instant::now();
    let mut state = shared.borrow_mut();
    state.controller.handle_event(event, now);
    state.present(handles, now);
}

fn dispatch_command(shared: &Rc<RefCell<Shared>>, handles: &Handles, command: Command) {
    let now = Instant::now();
    let mut state = shared.borrow_mut();
    state.controller.handle_command(command, now);
    state.present(handles, now);
}

/// Move and resize a window in physical pixels
fn place_window(window: &slint::Window, rect: Rect) {
    window.set_position(PhysicalPosition::new(rect.x, rect.y));
    window.set_size(PhysicalSize::new(rect.width, rect.height));
}

/// Screen position of a pointer reported in window-local logical pixels
#[expect(
    clippy::cast_possible_truncation,
    reason = "Pointer offsets within a window are far inside i32 range"
)]
fn screen_point(window: &slint::Window, x: f32, y: f32) -> Point {
    let origin = window.position();
    let scale = window.scale_factor();
    Point::new(
        origin.x + (x * scale).round() as i32,
        origin.y + (y * scale).round() as i32,
    )
}

fn to_slint_image(image: &RgbaImage) -> slint::Image {
    let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(
        image.as_raw(),
        image.width(),
        image.height(),
    );
    slint::Image::from_rgba8(buffer)
}
