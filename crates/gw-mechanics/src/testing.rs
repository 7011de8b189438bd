//! Deterministic stand-ins for dice and players.
//!
//! - [`FixedRolls`] replays scripted die values
//! - [`ScriptedPrompter`] answers prompts from a script and records them

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::dice::DieSource;
use crate::ports::{Button, Prompter};

/// Replays a fixed sequence of die values.
///
/// Values are clamped to the die being rolled. Once the script runs out the
/// last value repeats.
#[derive(Debug, Clone, Default)]
pub struct FixedRolls {
    values: VecDeque<u32>,
    last: u32,
}

impl FixedRolls {
    /// Script the values to return, in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: 1,
        }
    }
}

impl DieSource for FixedRolls {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if let Some(v) = self.values.pop_front() {
            self.last = v;
        }
        self.last.clamp(1, sides.max(1))
    }
}

/// A prompt the engine showed, as seen by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    /// A button modal.
    Ask {
        /// Modal title.
        title: String,
        /// Button keys offered.
        buttons: Vec<String>,
    },
    /// A value input.
    AskValue {
        /// Modal title.
        title: String,
        /// Input field name.
        field: String,
    },
    /// An explanatory notice.
    Inform {
        /// Modal title.
        title: String,
        /// Notice text.
        body: String,
    },
}

/// Answers `ask` and `ask_value` from one shared script.
///
/// When the script is exhausted every prompt is dismissed. Notices never
/// consume an answer.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    shown: Mutex<Vec<Shown>>,
}

impl ScriptedPrompter {
    /// Script the answers, in the order prompts will appear.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// A player who dismisses everything.
    pub fn declining() -> Self {
        Self::default()
    }

    /// Every prompt shown so far.
    pub fn shown(&self) -> Vec<Shown> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Notices shown so far, as `(title, body)`.
    pub fn notices(&self) -> Vec<(String, String)> {
        self.shown()
            .into_iter()
            .filter_map(|s| match s {
                Shown::Inform { title, body } => Some((title, body)),
                _ => None,
            })
            .collect()
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn record(&self, shown: Shown) {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(shown);
    }

    fn next_answer(&self) -> Option<String> {
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&self, title: &str, _body: &str, buttons: &[Button]) -> Option<String> {
        self.record(Shown::Ask {
            title: title.to_string(),
            buttons: buttons.iter().map(|b| b.key.clone()).collect(),
        });
        self.next_answer()
    }

    async fn ask_value(&self, title: &str, _body: &str, field: &str) -> Option<String> {
        self.record(Shown::AskValue {
            title: title.to_string(),
            field: field.to_string(),
        });
        self.next_answer()
    }

    async fn inform(&self, title: &str, body: &str) {
        self.record(Shown::Inform {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}
