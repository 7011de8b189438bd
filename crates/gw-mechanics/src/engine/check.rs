//! Checks: roll, optional spend, optional destiny re-roll, one log entry.

use tracing::{debug, info, instrument};

use super::{Outcome, RollEngine, RollRequest, Stage};
use crate::dice::DicePool;
use crate::error::{MechError, MechResult};
use crate::ports::Button;
use crate::resolution::{Classification, net_modifier, resolve_target};
use crate::sheet::{ActorId, FieldPath, PoolKind};

const SPEND: &str = "spend";
const DECLINE: &str = "decline";
const REROLL: &str = "reroll";
const KEEP: &str = "keep";

pub(super) const SPEND_TITLE: &str = "Do you want to use Power Points?";
const SPEND_FIELD: &str = "poolPoints";
pub(super) const DESTINY_TITLE: &str = "Destiny Die";
pub(super) const NO_DESTINY_TITLE: &str = "No Destiny Dice";

impl RollEngine {
    /// Resolve a check, attack or cast for one actor.
    ///
    /// Holds the actor's lock from the first read to the log post. Refused
    /// casts show a notice and return
    /// [`MechError::InsufficientResource`] without rolling.
    #[instrument(skip(self, request), fields(actor = %request.actor, kind = %request.kind))]
    pub async fn resolve_check(&self, request: &RollRequest) -> MechResult<Outcome> {
        let _guard = self.lock_actor(&request.actor).await;
        self.check_locked(request).await
    }

    async fn check_locked(&self, request: &RollRequest) -> MechResult<Outcome> {
        let actor = &request.actor;
        debug!(stage = %Stage::Start, "resolving check");

        // Casting only checks affordability; the cost itself is paid by spending.
        if let Some(cost) = request.point_cost {
            self.require_points(actor, request.pool, cost, request.current)
                .await?;
        }

        let ratings = self.targets.current().await?;
        let target = resolve_target(&ratings, self.config.default_difficulty);
        debug!(stage = %Stage::DifficultyResolved, target, selected = ratings.len(), "target resolved");

        let mut depleted = 0;
        for pool in PoolKind::ALL {
            if self.read_track(actor, pool).await?.is_depleted() {
                depleted += 1;
            }
        }
        let modifier = net_modifier(depleted, request.modifier);
        let crit = self.config.crit_threshold;
        let action = request.label();

        let mut pool = DicePool::from_modifier(self.config.check_die, modifier);
        let mut rerolls = 0;
        let outcome = loop {
            let roll = self.roll_pool(&pool);
            let mut outcome = Outcome::rolled(&action, &pool, roll, target, crit);
            outcome.destiny_rerolls = rerolls;
            debug!(stage = %Stage::Rolled, notation = %outcome.notation, raw = outcome.raw_total, "rolled");

            if outcome.classification.is_critical() {
                debug!(stage = %Stage::CriticalTerminal, classification = %outcome.classification, "critical roll");
                break outcome;
            }

            debug!(stage = %Stage::PendingSpend, "offering spend");
            let spent = self.offer_spend(actor, request.pool, &outcome).await?;
            outcome.apply_spend(spent, crit);
            debug!(
                stage = %Stage::Classified,
                spent,
                total = outcome.running_total,
                classification = %outcome.classification,
                "classified"
            );

            if outcome.classification != Classification::Failure || !self.offer_destiny(actor).await? {
                break outcome;
            }
            rerolls += 1;
            debug!(stage = %Stage::DestinyReroll, rerolls, "re-rolling with destiny");
            pool = DicePool::single(self.config.check_die);
        };

        let name = self.actors.name(actor).await?;
        self.log.post(outcome.record(name)).await;
        info!(
            stage = %Stage::Logged,
            classification = %outcome.classification,
            total = outcome.running_total,
            target,
            "check resolved"
        );
        Ok(outcome)
    }

    /// Ask whether to add pool points, and how many. Returns points spent.
    async fn offer_spend(
        &self,
        actor: &ActorId,
        pool: PoolKind,
        outcome: &Outcome,
    ) -> MechResult<u32> {
        let path = FieldPath::PoolCurrent(pool);
        let available = self.actors.read(actor, path).await?;
        let body = format!(
            "You rolled {}. Add {pool} points to reach {}?",
            outcome.raw_total, outcome.target
        );
        let buttons = [
            Button::new(SPEND, "Confirm"),
            Button::new(DECLINE, "Decline"),
        ];
        if self.prompter.ask(SPEND_TITLE, &body, &buttons).await.as_deref() != Some(SPEND) {
            return Ok(0);
        }

        let question = format!("How many {pool} points? ({available} available)");
        let spent = loop {
            let Some(raw) = self.prompter.ask_value(SPEND_TITLE, &question, SPEND_FIELD).await else {
                break 0;
            };
            match parse_spend(&raw, available) {
                Ok(spent) => break spent,
                Err(err) => {
                    debug!(%err, "spend rejected");
                    self.prompter.inform(SPEND_TITLE, &err.to_string()).await;
                }
            }
        };

        if spent > 0 {
            let left = available.saturating_sub_unsigned(spent);
            self.actors.write(actor, path, left).await?;
            info!(%pool, spent, left, "points spent");
        }
        Ok(spent)
    }

    /// Offer a destiny re-roll after a plain failure. Returns true when a
    /// destiny die was spent.
    async fn offer_destiny(&self, actor: &ActorId) -> MechResult<bool> {
        let destiny = self.actors.read(actor, FieldPath::Destiny).await?;
        if destiny <= 0 {
            self.prompter
                .inform(NO_DESTINY_TITLE, &MechError::NoDestinyAvailable.to_string())
                .await;
            return Ok(false);
        }

        let body = format!("You failed. Spend a destiny die to roll again? ({destiny} left)");
        let buttons = [Button::new(REROLL, "Re-roll"), Button::new(KEEP, "Keep")];
        if self.prompter.ask(DESTINY_TITLE, &body, &buttons).await.as_deref() != Some(REROLL) {
            return Ok(false);
        }

        self.actors
            .write(actor, FieldPath::Destiny, destiny - 1)
            .await?;
        Ok(true)
    }
}

/// Parse a spend entry against the points available.
///
/// Blank means zero and negative numbers clamp to zero.
fn parse_spend(raw: &str, available: i32) -> MechResult<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let requested: i64 = trimmed
        .parse()
        .map_err(|_| MechError::InvalidSpend(trimmed.to_string()))?;
    if requested <= 0 {
        return Ok(0);
    }
    let overspend = MechError::OverspendAttempt {
        requested,
        available,
    };
    if requested > i64::from(available.max(0)) {
        return Err(overspend);
    }
    u32::try_from(requested).map_err(|_| overspend)
}
