//! Activity record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resolution::Classification;

/// A display-ready entry for the shared activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActivityRecord {
    /// A resolved check, attack or cast.
    Check {
        /// Acting actor's name.
        actor: String,
        /// Action label, e.g. "Weapon Attack".
        action: String,
        /// Die transcript, including any points spent.
        transcript: String,
        /// Final total after spending.
        total: u32,
        /// Difficulty the check was made against.
        target: u32,
        /// Final classification.
        classification: Classification,
        /// Destiny dice spent on re-rolls.
        destiny_rerolls: u32,
        /// When resolved.
        timestamp: DateTime<Utc>,
    },
    /// A damage roll.
    Damage {
        /// Acting actor's name.
        actor: String,
        /// Label, e.g. "Damage" or "Wand Damage".
        action: String,
        /// Per-term transcript.
        transcript: String,
        /// Final total.
        total: i32,
        /// When rolled.
        timestamp: DateTime<Utc>,
    },
    /// An initiative roll.
    Initiative {
        /// Actor's name.
        actor: String,
        /// The die value.
        roll: u32,
        /// Movement bonus added.
        bonus: i32,
        /// Final initiative.
        total: i32,
        /// When rolled.
        timestamp: DateTime<Utc>,
    },
    /// A standalone destiny die.
    DestinyDie {
        /// Actor's name.
        actor: String,
        /// The die value.
        value: u32,
        /// Destiny dice left afterwards.
        remaining: i32,
        /// When rolled.
        timestamp: DateTime<Utc>,
    },
    /// A standalone power die.
    PowerDie {
        /// Actor's name.
        actor: String,
        /// Die notation, e.g. `1d6`.
        die: String,
        /// The die value.
        value: u32,
        /// When rolled.
        timestamp: DateTime<Utc>,
    },
}

impl ActivityRecord {
    /// Name of the actor the record is about.
    pub fn actor(&self) -> &str {
        match self {
            Self::Check { actor, .. }
            | Self::Damage { actor, .. }
            | Self::Initiative { actor, .. }
            | Self::DestinyDie { actor, .. }
            | Self::PowerDie { actor, .. } => actor,
        }
    }

    /// When the record was created.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Check { timestamp, .. }
            | Self::Damage { timestamp, .. }
            | Self::Initiative { timestamp, .. }
            | Self::DestinyDie { timestamp, .. }
            | Self::PowerDie { timestamp, .. } => *timestamp,
        }
    }

    /// Classification, for checks.
    pub fn classification(&self) -> Option<Classification> {
        match self {
            Self::Check { classification, .. } => Some(*classification),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Check {
                actor,
                action,
                transcript,
                target,
                classification,
                destiny_rerolls,
                ..
            } => {
                write!(
                    f,
                    "{actor} - {action}: {transcript} vs {target} => {classification}"
                )?;
                if *classification == Classification::CriticalSuccess {
                    write!(f, " CRITICAL!!")?;
                }
                if *destiny_rerolls > 0 {
                    write!(f, " (destiny x{destiny_rerolls})")?;
                }
                Ok(())
            }
            Self::Damage {
                actor,
                action,
                transcript,
                ..
            } => write!(f, "{actor} - {action}: {transcript}"),
            Self::Initiative {
                actor,
                roll,
                bonus,
                total,
                ..
            } => write!(f, "{actor} - Initiative: {roll} + {bonus} = {total}"),
            Self::DestinyDie {
                actor,
                value,
                remaining,
                ..
            } => write!(f, "{actor} - Destiny Die: {value} ({remaining} left)"),
            Self::PowerDie {
                actor, die, value, ..
            } => write!(f, "{actor} - Power Die Roll: {die} = {value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_display_flags_crits_and_destiny() {
        let record = ActivityRecord::Check {
            actor: "Wren".to_string(),
            action: "Weapon Attack".to_string(),
            transcript: "1d12 [12] = 12".to_string(),
            total: 12,
            target: 9,
            classification: Classification::CriticalSuccess,
            destiny_rerolls: 1,
            timestamp: Utc::now(),
        };
        assert_eq!(
            record.to_string(),
            "Wren - Weapon Attack: 1d12 [12] = 12 vs 9 => Critical Success CRITICAL!! (destiny x1)"
        );
        assert_eq!(record.actor(), "Wren");
        assert_eq!(
            record.classification(),
            Some(Classification::CriticalSuccess)
        );
    }

    #[test]
    fn initiative_display() {
        let record = ActivityRecord::Initiative {
            actor: "Wren".to_string(),
            roll: 7,
            bonus: 2,
            total: 9,
            timestamp: Utc::now(),
        };
        assert_eq!(record.to_string(), "Wren - Initiative: 7 + 2 = 9");
        assert_eq!(record.classification(), None);
    }
}
