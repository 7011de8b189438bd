//! Error types for the mechanics engine.

use crate::sheet::PoolKind;

/// Errors that can occur during mechanics operations.
///
/// Rule refusals (insufficient points, no destiny left) share this type with
/// host failures; callers treat them all as "the action does not proceed".
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A cast costs more points than the pool currently holds.
    #[error("not enough {pool} points: costs {cost}, {available} available")]
    InsufficientResource {
        /// The pool the cost is paid from.
        pool: PoolKind,
        /// Points required.
        cost: u32,
        /// Points currently in the pool.
        available: i32,
    },

    /// A damage formula is missing or malformed.
    #[error("invalid formula: {0}")]
    InvalidFormula(String),

    /// The player tried to spend more pool points than are available.
    #[error("cannot spend {requested} points, only {available} available")]
    OverspendAttempt {
        /// Points the player entered.
        requested: i64,
        /// Points currently in the pool.
        available: i32,
    },

    /// The player entered something that is not a number of points.
    #[error("'{0}' is not a number of points")]
    InvalidSpend(String),

    /// A re-roll was requested with an empty destiny counter.
    #[error("no destiny dice remaining")]
    NoDestinyAvailable,

    /// The host does not know the actor.
    #[error("unknown actor: {0}")]
    UnknownActor(String),

    /// A dotted field path does not name an actor field.
    #[error("invalid field path: {0}")]
    InvalidFieldPath(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_explain_the_refusal() {
        let err = MechError::InsufficientResource {
            pool: PoolKind::Arcane,
            cost: 6,
            available: 4,
        };
        assert_eq!(err.to_string(), "not enough arcane points: costs 6, 4 available");

        let err = MechError::OverspendAttempt {
            requested: 5,
            available: 2,
        };
        assert_eq!(err.to_string(), "cannot spend 5 points, only 2 available");
        assert_eq!(
            MechError::NoDestinyAvailable.to_string(),
            "no destiny dice remaining"
        );
    }

    #[test]
    fn host_side_failures_name_what_was_missing() {
        assert_eq!(
            MechError::UnknownActor("ghost".to_string()).to_string(),
            "unknown actor: ghost"
        );
        assert_eq!(
            MechError::InvalidFieldPath("system.nope".to_string()).to_string(),
            "invalid field path: system.nope"
        );
    }
}
