//! The roll engine: drives one action from request to logged outcome.
//!
//! A check moves through these stages:
//!
//! ```text
//! Start -> DifficultyResolved -> Rolled -> CriticalTerminal ---------------> Logged
//!                                   |                                         ^
//!                                   +-> PendingSpend -> Classified -----------+
//!                                   ^                       |
//!                                   +---- DestinyReroll <---+ (plain failure, destiny left)
//! ```
//!
//! The only suspension points are prompts to the player. Each resolution
//! holds a per-actor lock, so two resolutions for one actor never interleave
//! their pool or destiny writes.

pub mod request;

mod actor_ops;
mod check;
mod damage;

pub use request::{ActionKind, DamageRequest, RollRequest};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::warn;

use crate::activity::ActivityRecord;
use crate::config::EngineConfig;
use crate::dice::{DamageRoll, DicePool, DieSource, RollResult};
use crate::error::{MechError, MechResult};
use crate::ports::{ActivityLog, ActorStore, Prompter, TargetSelector};
use crate::resolution::{Classification, classify_roll, classify_total};
use crate::sheet::{ActorId, FieldPath, PoolKind};

/// Title of the notice shown when an action is refused.
const REFUSED_TITLE: &str = "Cannot Proceed";

/// Stages of a check, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Request received.
    Start,
    /// Difficulty target chosen.
    DifficultyResolved,
    /// Dice rolled.
    Rolled,
    /// The roll was a critical; no spending.
    CriticalTerminal,
    /// Waiting for the spend decision.
    PendingSpend,
    /// Classified against the target.
    Classified,
    /// Spending a destiny die on a fresh roll.
    DestinyReroll,
    /// Posted to the activity log.
    Logged,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::DifficultyResolved => "difficulty_resolved",
            Self::Rolled => "rolled",
            Self::CriticalTerminal => "critical_terminal",
            Self::PendingSpend => "pending_spend",
            Self::Classified => "classified",
            Self::DestinyReroll => "destiny_reroll",
            Self::Logged => "logged",
        };
        f.write_str(name)
    }
}

/// The resolved result of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Action label.
    pub action: String,
    /// Notation of the pool that produced the final roll.
    pub notation: String,
    /// The final roll. Earlier rolls replaced by destiny are discarded.
    pub roll: RollResult,
    /// The kept die value.
    pub raw_total: u32,
    /// Pool points added to the die.
    pub spent: u32,
    /// `raw_total + spent`.
    pub running_total: u32,
    /// Difficulty the check was made against.
    pub target: u32,
    /// Final classification.
    pub classification: Classification,
    /// Destiny dice spent on re-rolls.
    pub destiny_rerolls: u32,
}

impl Outcome {
    fn rolled(action: &str, pool: &DicePool, roll: RollResult, target: u32, crit: u32) -> Self {
        let raw_total = roll.total();
        Self {
            action: action.to_string(),
            notation: pool.notation(),
            raw_total,
            spent: 0,
            running_total: raw_total,
            target,
            classification: classify_roll(raw_total, crit),
            destiny_rerolls: 0,
            roll,
        }
    }

    fn apply_spend(&mut self, spent: u32, crit: u32) {
        self.spent = spent;
        self.running_total = self.raw_total.saturating_add(spent);
        self.classification = classify_total(self.running_total, self.target, crit);
    }

    /// Human-readable roll transcript, e.g. `2d12kl [3, (9)] = 3 + 2 = 5`.
    pub fn transcript(&self) -> String {
        let mut text = format!("{} {}", self.notation, self.roll);
        if self.spent > 0 {
            text.push_str(&format!(" + {} = {}", self.spent, self.running_total));
        }
        text
    }

    fn record(&self, actor: String) -> ActivityRecord {
        ActivityRecord::Check {
            actor,
            action: self.action.clone(),
            transcript: self.transcript(),
            total: self.running_total,
            target: self.target,
            classification: self.classification,
            destiny_rerolls: self.destiny_rerolls,
            timestamp: Utc::now(),
        }
    }
}

/// What [`RollEngine::perform`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A check, attack or cast.
    Check(Outcome),
    /// A wand or scroll's damage.
    Damage(DamageRoll),
}

/// The host services an engine talks to.
#[derive(Clone)]
pub struct Collaborators {
    /// Actor resource state.
    pub actors: Arc<dyn ActorStore>,
    /// Currently selected opponents.
    pub targets: Arc<dyn TargetSelector>,
    /// Modal prompts to the acting player.
    pub prompter: Arc<dyn Prompter>,
    /// Shared activity log.
    pub log: Arc<dyn ActivityLog>,
}

/// Resolves checks, damage and the other Grimwood rolls.
pub struct RollEngine {
    config: EngineConfig,
    actors: Arc<dyn ActorStore>,
    targets: Arc<dyn TargetSelector>,
    prompter: Arc<dyn Prompter>,
    log: Arc<dyn ActivityLog>,
    dice: Mutex<Box<dyn DieSource>>,
    locks: Mutex<HashMap<ActorId, Arc<AsyncMutex<()>>>>,
}

impl RollEngine {
    /// Create an engine rolling with a `StdRng`, seeded from the config when
    /// a seed is set. Out-of-range config values are clamped.
    pub fn new(config: EngineConfig, host: Collaborators) -> Self {
        let config = config.normalized();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            actors: host.actors,
            targets: host.targets,
            prompter: host.prompter,
            log: host.log,
            dice: Mutex::new(Box::new(rng)),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the randomness source.
    pub fn with_dice(self, source: impl DieSource + 'static) -> Self {
        Self {
            dice: Mutex::new(Box::new(source)),
            ..self
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Wait for exclusive use of one actor's resources.
    async fn lock_actor(&self, actor: &ActorId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(actor.clone()).or_default())
        };
        lock.lock_owned().await
    }

    fn roll_with<T>(&self, f: impl FnOnce(&mut dyn DieSource) -> T) -> T {
        let mut dice = self.dice.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut **dice)
    }

    fn roll_pool(&self, pool: &DicePool) -> RollResult {
        self.roll_with(|dice| pool.roll(dice))
    }

    /// Tell the player why the action stops, and hand the error back.
    async fn refuse(&self, err: MechError) -> MechError {
        warn!(%err, "action refused");
        self.prompter.inform(REFUSED_TITLE, &err.to_string()).await;
        err
    }

    /// Check that a pool can pay `cost`, returning the stored value.
    async fn require_points(
        &self,
        actor: &ActorId,
        pool: PoolKind,
        cost: u32,
        seen: Option<i32>,
    ) -> MechResult<i32> {
        let available = self.actors.read(actor, FieldPath::PoolCurrent(pool)).await?;
        if let Some(seen) = seen.filter(|seen| *seen != available) {
            tracing::debug!(seen, available, %pool, "request carried a stale pool value");
        }
        if i64::from(cost) > i64::from(available) {
            let err = MechError::InsufficientResource {
                pool,
                cost,
                available,
            };
            return Err(self.refuse(err).await);
        }
        Ok(available)
    }
}
