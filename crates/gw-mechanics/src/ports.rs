//! Host capability traits.
//!
//! The engine never touches host documents directly. Everything it needs
//! from the virtual tabletop (actor fields, selected targets, modal prompts,
//! the shared chat log) comes through these traits.

use async_trait::async_trait;

use crate::activity::ActivityRecord;
use crate::dice::Die;
use crate::error::MechResult;
use crate::sheet::{ActorId, FieldPath};

/// Read/write access to actor resource state.
///
/// Each `write` must be all-or-nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActorStore: Send + Sync {
    /// The actor's display name.
    async fn name(&self, actor: &ActorId) -> MechResult<String>;

    /// The die the actor adds on power strikes.
    async fn power_die(&self, actor: &ActorId) -> MechResult<Die>;

    /// Read a numeric field.
    async fn read(&self, actor: &ActorId, path: FieldPath) -> MechResult<i32>;

    /// Persist a numeric field.
    async fn write(&self, actor: &ActorId, path: FieldPath, value: i32) -> MechResult<()>;
}

/// The set of opposing actors the current user has selected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TargetSelector: Send + Sync {
    /// Defense ratings of every selected target.
    async fn current(&self) -> MechResult<Vec<i32>>;
}

/// A named button on a modal prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Key returned when the button is chosen.
    pub key: String,
    /// Text shown on the button.
    pub label: String,
}

impl Button {
    /// Create a button.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Modal interaction with the acting player.
///
/// Every method may wait indefinitely. `None` means the modal was dismissed.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Show a modal with buttons and return the chosen button's key.
    async fn ask(&self, title: &str, body: &str, buttons: &[Button]) -> Option<String>;

    /// Show a modal with one input field and return its raw text.
    ///
    /// The text is untrusted; callers parse and clamp it.
    async fn ask_value(&self, title: &str, body: &str, field: &str) -> Option<String>;

    /// Show an explanatory modal with a single dismiss button.
    async fn inform(&self, title: &str, body: &str) {
        let _ = self.ask(title, body, &[Button::new("ok", "OK")]).await;
    }
}

/// The shared activity log every participant sees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Append a display-ready record. Fire-and-forget.
    async fn post(&self, record: ActivityRecord);
}
