//! Keyboard shortcuts
//!
//! Bindings are written as `"ctrl+shift+x"` in the config file. Quit bindings
//! are registered system-wide on Windows by a listener thread that only asks
//! the Slint event loop to quit; the same bindings (and the pomodoro toggle)
//! are also matched against key presses delivered to the character window.

use crate::error::{DeskmateError, Result};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Modifier keys held with a key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control
    pub ctrl: bool,
    /// Shift
    pub shift: bool,
    /// Alt
    pub alt: bool,
    /// Windows / Meta
    pub win: bool,
}

/// Non-modifier key of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Letter or digit, stored uppercase
    Char(char),
    /// Function key F1-F24
    F(u8),
    /// Escape
    Escape,
    /// Space bar
    Space,
}

/// First private-use code point Slint uses for function keys (F1)
const SLINT_F1: u32 = 0xF704;

impl KeyCode {
    /// Key from the text Slint reports in a key event
    ///
    /// With ctrl held some platforms report ASCII control characters, which
    /// map back to their letter.
    pub fn from_key_text(text: &str, ctrl: bool) -> Option<Self> {
        let mut chars = text.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        match c {
            '\u{1b}' => Some(Self::Escape),
            ' ' => Some(Self::Space),
            c if c.is_ascii_alphanumeric() => Some(Self::Char(c.to_ascii_uppercase())),
            c if ctrl && ('\u{1}'..='\u{1a}').contains(&c) => {
                char::from_u32(u32::from('A') + u32::from(c) - 1).map(Self::Char)
            }
            c => {
                let offset = u32::from(c).checked_sub(SLINT_F1)?;
                u8::try_from(offset + 1)
                    .ok()
                    .filter(|n| (1..=24).contains(n))
                    .map(Self::F)
            }
        }
    }

    /// Windows virtual-key code
    pub fn virtual_key(self) -> u32 {
        match self {
            Self::Char(c) => u32::from(c),
            Self::F(n) => 0x70 + u32::from(n) - 1,
            Self::Escape => 0x1B,
            Self::Space => 0x20,
        }
    }
}

/// A modifier + key combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyBinding {
    /// Required modifiers (exact match)
    pub modifiers: Modifiers,
    /// Key
    pub key: KeyCode,
}

impl HotkeyBinding {
    /// Whether a key press with `modifiers` + `key` triggers this binding
    pub fn matches(&self, modifiers: Modifiers, key: KeyCode) -> bool {
        self.modifiers == modifiers && self.key == key
    }

    /// Parse every entry of `specs`, skipping (and logging) invalid ones
    pub fn parse_all(specs: &[String]) -> Vec<Self> {
        specs
            .iter()
            .filter_map(|spec| match spec.parse() {
                Ok(binding) => Some(binding),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            })
            .collect()
    }
}

impl FromStr for HotkeyBinding {
    type Err = DeskmateError;

    fn from_str(spec: &str) -> Result<Self> {
        let invalid = || DeskmateError::InvalidHotkey(spec.to_string());
        let mut modifiers = Modifiers::default();
        let mut key = None;

        for token in spec.split('+').map(str::trim) {
            match token.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" => modifiers.alt = true,
                "win" | "super" | "meta" => modifiers.win = true,
                lower => {
                    if key.is_some() {
                        return Err(invalid());
                    }
                    key = Some(parse_key(lower).ok_or_else(invalid)?);
                }
            }
        }

        Ok(Self {
            modifiers,
            key: key.ok_or_else(invalid)?,
        })
    }
}

fn parse_key(token: &str) -> Option<KeyCode> {
    match token {
        "esc" | "escape" => return Some(KeyCode::Escape),
        "space" => return Some(KeyCode::Space),
        _ => {}
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Some(KeyCode::Char(c.to_ascii_uppercase())),
        (Some('f'), Some(_)) => token[1..]
            .parse::<u8>()
            .ok()
            .filter(|n| (1..=24).contains(n))
            .map(KeyCode::F),
        _ => None,
    }
}

impl fmt::Display for HotkeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers {
            ctrl,
            shift,
            alt,
            win,
        } = self.modifiers;
        for (held, name) in [(ctrl, "ctrl"), (shift, "shift"), (alt, "alt"), (win, "win")] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        match self.key {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_lowercase()),
            KeyCode::F(n) => write!(f, "f{n}"),
            KeyCode::Escape => f.write_str("esc"),
            KeyCode::Space => f.write_str("space"),
        }
    }
}

/// System-wide quit hotkeys
pub struct QuitHotkeyListener;

impl QuitHotkeyListener {
    /// Register `bindings` on a background thread
    ///
    /// The thread owns its own message queue and never touches character
    /// state; a hotkey press only calls `slint::quit_event_loop()`. Bindings
    /// that cannot be registered (e.g. taken by another program) are logged
    /// and skipped.
    pub fn start(bindings: Vec<HotkeyBinding>) -> std::thread::JoinHandle<()> {
        std::thread::spawn(move || {
            #[cfg(windows)]
            {
                info!("Starting quit hotkey listener");
                run_hotkey_loop(&bindings);
                info!("Quit hotkey listener exited");
            }

            #[cfg(not(windows))]
            {
                info!(
                    "Global hotkeys not supported on this platform; {} binding(s) only work while the character has focus",
                    bindings.len()
                );
            }
        })
    }
}

#[cfg(windows)]
#[allow(unsafe_code)] // Windows FFI for hotkey registration and message loop
fn run_hotkey_loop(bindings: &[HotkeyBinding]) {
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT, MOD_WIN, RegisterHotKey, UnregisterHotKey,
    };
    use windows::Win32::UI::WindowsAndMessaging::{GetMessageW, MSG, WM_HOTKEY};

    let mut registered = Vec::new();
    for (id, binding) in (1_i32..).zip(bindings) {
        let mut flags = MOD_NOREPEAT;
        if binding.modifiers.ctrl {
            flags |= MOD_CONTROL;
        }
        if binding.modifiers.shift {
            flags |= MOD_SHIFT;
        }
        if binding.modifiers.alt {
            flags |= MOD_ALT;
        }
        if binding.modifiers.win {
            flags |= MOD_WIN;
        }

        let result: windows::core::Result<()> = unsafe {
            RegisterHotKey(None, id, flags, binding.key.virtual_key())
        };
        match result {
            Ok(()) => {
                info!("Registered quit hotkey {}", binding);
                registered.push(id);
            }
            Err(e) => warn!(
                "Could not register hotkey {} (in use by another program?): {}",
                binding, e
            ),
        }
    }

    if registered.is_empty() {
        return;
    }

    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&raw mut msg, None, 0, 0).as_bool() {
            if msg.message == WM_HOTKEY {
                info!("Quit hotkey pressed, shutting down");
                if let Err(e) = slint::quit_event_loop() {
                    warn!("Failed to stop the event loop: {}", e);
                }
                break;
            }
        }

        for id in registered {
            let _ = UnregisterHotKey(None, id);
        }
    }
}
