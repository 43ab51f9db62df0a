//! Dialog lines and random selection

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// All lines the character can say, grouped by occasion
///
/// Every group can be overridden from `config.json`; missing groups keep the
/// built-in lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogScript {
    /// Lines for a right-click or the tray "Say something" entry
    pub random: Vec<String>,
    /// A work session ran to completion
    pub work_finished: Vec<String>,
    /// Waiting for the user to start the next work session
    pub confirm_work: Vec<String>,
    /// Waiting for the user to start a short break
    pub confirm_short_break: Vec<String>,
    /// Waiting for the user to start a long break
    pub confirm_long_break: Vec<String>,
    /// The user postponed a work session
    pub snooze_work: Vec<String>,
    /// The user postponed a break
    pub snooze_break: Vec<String>,
}

fn lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
}

impl Default for DialogScript {
    fn default() -> Self {
        Self {
            random: lines(&[
                "Nice weather today. Want to take a walk later?",
                "I'm learning new things. Anything you want to teach me?",
                "Hmm... what does this piece of code do?",
                "Positive! I'll stay right here with you.",
                "You look a little tired. Maybe take a short break?",
                "I feel like having dessert... cake, maybe?",
                "That's an interesting problem. Still thinking...",
                "Anything I can help you with?",
                "Negative... I didn't quite get that instruction.",
                "Roger! Understood!",
                "Did you know? Programs dream too, sometimes.",
                "This program is complicated, but I'll figure it out!",
            ]),
            work_finished: lines(&[
                "That was some serious focus. Well done!",
                "Another work session finished. Feels good, right?",
                "Great job! Time to collect your break.",
            ]),
            confirm_work: lines(&[
                "Rested enough? The next task is waiting.",
                "Break's over. Ready to get back to it?",
                "Let's start the next round whenever you are.",
            ]),
            confirm_short_break: lines(&[
                "Nice work. Take a short break now?",
                "Give your eyes a rest for a few minutes.",
                "Good session! A quick breather is in order.",
            ]),
            confirm_long_break: lines(&[
                "Several rounds in a row! Time for a long break.",
                "Long break time. Go do something you enjoy.",
                "A longer rest now makes the next rounds easier.",
            ]),
            snooze_work: lines(&[
                "Five more minutes of slacking, then. I'll remind you.",
                "Snooze mode on. I'm keeping an eye on the clock.",
                "Alright, five extra minutes of rest.",
            ]),
            snooze_break: lines(&[
                "Pushing on for five more minutes? I'm cheering for you!",
                "One more sprint before the break. Go!",
                "Five more focused minutes, you've got this.",
            ]),
        }
    }
}

/// Random line and expression selection
///
/// With a seed the sequence of picks is reproducible.
#[derive(Debug, Clone)]
pub struct DialogPicker {
    rng: StdRng,
}

impl DialogPicker {
    /// Picker seeded with `seed`, or from OS entropy when `None`
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self { rng }
    }

    /// One line out of `lines`
    pub fn pick<'a>(&mut self, lines: &'a [String]) -> Option<&'a str> {
        lines.choose(&mut self.rng).map(String::as_str)
    }

    /// One item out of `items`
    pub fn pick_item<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}
