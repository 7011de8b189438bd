//! Renewable point pools.
//!
//! A track holds a `base` maximum and a `current` remaining value, clamped
//! between zero and the base.

use serde::{Deserialize, Serialize};

/// A renewable numeric resource with a maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Maximum value.
    pub base: i32,
    /// Remaining value.
    pub current: i32,
}

impl Track {
    /// Create a new track starting at its base value.
    pub fn new(base: i32) -> Self {
        let base = base.max(0);
        Self {
            base,
            current: base,
        }
    }

    /// Adjust the current value by a delta, clamping to bounds. Returns the
    /// new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta).clamp(0, self.base);
        self.current
    }

    /// Move base and current together, as shapeshifting does.
    pub fn shift(&mut self, delta: i32) {
        self.base = self.base.saturating_add(delta).max(0);
        self.current = self.current.saturating_add(delta).clamp(0, self.base);
    }

    /// Refill to the base value.
    pub fn reset(&mut self) {
        self.current = self.base;
    }

    /// Returns true if no points remain.
    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.base)
    }
}
