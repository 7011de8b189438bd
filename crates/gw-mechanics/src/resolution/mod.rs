//! Turning dice totals into outcomes.
//!
//! A Grimwood check is classified twice: once on the raw die, where only the
//! critical thresholds matter, and again after the player has had the chance
//! to add pool points, where the total is compared to the difficulty.

pub mod difficulty;

pub use difficulty::{net_modifier, resolve_target};

use serde::{Deserialize, Serialize};

/// The classification of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// The die met the crit threshold.
    CriticalSuccess,
    /// The die showed a 1.
    CriticalFailure,
    /// The total met the difficulty.
    Success,
    /// The total fell short of the difficulty.
    Failure,
    /// Not yet decided; the player may still spend points.
    Pending,
}

impl Classification {
    /// Critical results end the resolution immediately.
    pub fn is_critical(self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::CriticalFailure)
    }

    /// Whether the check counts as a success.
    pub fn is_success(self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::Success)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalSuccess => write!(f, "Critical Success"),
            Self::CriticalFailure => write!(f, "Critical Failure"),
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
            Self::Pending => write!(f, "Pending"),
        }
    }
}

/// Classify a freshly rolled die before any points are spent.
pub fn classify_roll(raw: u32, crit_threshold: u32) -> Classification {
    if raw >= crit_threshold {
        Classification::CriticalSuccess
    } else if raw == 1 {
        Classification::CriticalFailure
    } else {
        Classification::Pending
    }
}

/// Classify the running total after the spend decision.
///
/// The `== 1` arm can only fire when nothing was spent on a raw 1, which the
/// roll classification already caught; it is kept so the table stays whole.
pub fn classify_total(running: u32, target: u32, crit_threshold: u32) -> Classification {
    if running >= crit_threshold {
        Classification::CriticalSuccess
    } else if running == 1 {
        Classification::CriticalFailure
    } else if running >= target {
        Classification::Success
    } else {
        Classification::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_twelve_is_critical_success() {
        assert_eq!(classify_roll(12, 12), Classification::CriticalSuccess);
    }

    #[test]
    fn raw_one_is_critical_failure() {
        assert_eq!(classify_roll(1, 12), Classification::CriticalFailure);
    }

    #[test]
    fn everything_between_is_pending() {
        for raw in 2..12 {
            assert_eq!(classify_roll(raw, 12), Classification::Pending);
        }
    }

    #[test]
    fn lowered_threshold_widens_crits() {
        assert_eq!(classify_roll(11, 11), Classification::CriticalSuccess);
        assert_eq!(classify_roll(10, 11), Classification::Pending);
    }

    #[test]
    fn total_meeting_target_succeeds() {
        assert_eq!(classify_total(9, 9, 12), Classification::Success);
        assert_eq!(classify_total(8, 9, 12), Classification::Failure);
    }

    #[test]
    fn spending_up_to_threshold_crits() {
        assert_eq!(classify_total(12, 9, 12), Classification::CriticalSuccess);
        assert_eq!(classify_total(14, 9, 12), Classification::CriticalSuccess);
    }

    #[test]
    fn unspent_one_stays_critical_failure() {
        assert_eq!(classify_total(1, 1, 12), Classification::CriticalFailure);
    }

    #[test]
    fn display() {
        assert_eq!(Classification::CriticalSuccess.to_string(), "Critical Success");
        assert_eq!(Classification::Failure.to_string(), "Failure");
        assert!(Classification::CriticalFailure.is_critical());
        assert!(!Classification::Success.is_critical());
        assert!(Classification::Success.is_success());
        assert!(!Classification::Pending.is_success());
    }
}
