//! Speech bubble with typewriter reveal
//!
//! The bubble is driven by explicit `Instant`s so it can be ticked from the UI
//! timer and tested without sleeping.

use std::time::{Duration, Instant};

/// Cursor appended to the text while it is being revealed
pub const CURSOR: char = '▌';

/// Typewriter and cursor speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleTiming {
    /// Delay between two revealed characters
    pub per_char: Duration,
    /// Cursor blink half-period
    pub cursor_blink: Duration,
}

impl BubbleTiming {
    /// Timing from millisecond settings
    pub fn from_millis(per_char_ms: u64, cursor_blink_ms: u64) -> Self {
        Self {
            per_char: Duration::from_millis(per_char_ms),
            cursor_blink: Duration::from_millis(cursor_blink_ms),
        }
    }
}

/// What a click on the bubble did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleClick {
    /// Nothing is shown
    Ignored,
    /// The remaining text was revealed at once
    Completed,
    /// The bubble was closed
    Dismissed,
}

#[derive(Debug, Clone)]
struct Message {
    chars: Vec<char>,
    shown_at: Instant,
    completed_at: Option<Instant>,
    display: Duration,
}

/// Transient speech bubble
#[derive(Debug, Clone)]
pub struct DialogBubble {
    timing: BubbleTiming,
    message: Option<Message>,
}

impl DialogBubble {
    /// Hidden bubble
    pub fn new(timing: BubbleTiming) -> Self {
        Self {
            timing,
            message: None,
        }
    }

    /// Start revealing `text`; it stays up for `display` after it is fully shown
    pub fn show(&mut self, text: &str, display: Duration, now: Instant) {
        self.message = Some(Message {
            chars: text.chars().collect(),
            shown_at: now,
            completed_at: None,
            display,
        });
    }

    /// Close the bubble
    pub fn hide(&mut self) {
        self.message = None;
    }

    /// Whether a message is shown
    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    /// Whether characters are still being revealed
    pub fn is_revealing(&self, now: Instant) -> bool {
        self.message
            .as_ref()
            .is_some_and(|message| self.revealed(message, now) < message.chars.len())
    }

    /// A click completes the reveal first, then dismisses
    pub fn click(&mut self, now: Instant) -> BubbleClick {
        if self.is_revealing(now) {
            if let Some(message) = self.message.as_mut() {
                message.completed_at = Some(now);
            }
            BubbleClick::Completed
        } else if self.message.take().is_some() {
            BubbleClick::Dismissed
        } else {
            BubbleClick::Ignored
        }
    }

    /// Hide the bubble once its display time is over
    ///
    /// Returns `true` if the bubble was hidden by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.message.as_ref().is_some_and(|message| {
            now >= self.reveal_end(message) + message.display
        });
        if expired {
            self.message = None;
        }
        expired
    }

    /// Text to draw at `now`, `None` while hidden
    ///
    /// The cursor follows the revealed text while typing and blinks once the
    /// whole line is shown.
    pub fn display_text(&self, now: Instant) -> Option<String> {
        let message = self.message.as_ref()?;
        let revealed = self.revealed(message, now);
        let mut text: String = message.chars[..revealed].iter().collect();

        let cursor_on = if revealed < message.chars.len() {
            true
        } else {
            let since = now.saturating_duration_since(self.reveal_end(message));
            self.timing.cursor_blink.is_zero()
                || (since.as_millis() / self.timing.cursor_blink.as_millis()) % 2 == 0
        };
        if cursor_on {
            text.push(CURSOR);
        }
        Some(text)
    }

    /// Full text of the current message
    pub fn full_text(&self) -> Option<String> {
        self.message
            .as_ref()
            .map(|message| message.chars.iter().collect())
    }

    fn revealed(&self, message: &Message, now: Instant) -> usize {
        if message.completed_at.is_some() || self.timing.per_char.is_zero() {
            return message.chars.len();
        }
        let elapsed = now.saturating_duration_since(message.shown_at);
        let count = elapsed.as_millis() / self.timing.per_char.as_millis();
        usize::try_from(count).map_or(message.chars.len(), |count| {
            count.min(message.chars.len())
        })
    }

    fn reveal_end(&self, message: &Message) -> Instant {
        if let Some(completed_at) = message.completed_at {
            return completed_at;
        }
        let count = u32::try_from(message.chars.len()).unwrap_or(u32::MAX);
        message.shown_at + self.timing.per_char.saturating_mul(count)
    }
}
