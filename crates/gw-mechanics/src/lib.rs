//! Dice roll resolution for the Grimwood tabletop system.
//!
//! A check rolls one d12 against a difficulty. Depleted pools add banes and
//! boons add dice the other way; the player may then spend pool points to
//! close the gap, and spend a destiny die to re-roll a plain failure. Every
//! resolution ends in exactly one activity log entry.
//!
//! The engine reaches the host only through the traits in [`ports`]. The
//! [`host`] module has in-memory adapters and [`testing`] has scripted
//! dice and players.

pub mod activity;
pub mod config;
pub mod dice;
pub mod engine;
pub mod error;
pub mod host;
pub mod ports;
pub mod resolution;
pub mod sheet;
pub mod testing;

pub use activity::{ActivityRecord, Journal};
pub use config::EngineConfig;
pub use dice::{DamageFormula, DamageRoll, DicePool, Die, DieSource, KeepRule, RollResult};
pub use engine::{
    ActionKind, ActionOutcome, Collaborators, DamageRequest, Outcome, RollEngine, RollRequest,
};
pub use error::{MechError, MechResult};
pub use resolution::Classification;
pub use sheet::{ActorId, ActorSheet, FieldPath, PoolKind, Track};
