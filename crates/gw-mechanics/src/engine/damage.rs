//! Damage rolls, and wands and scrolls which are nothing but damage.

use chrono::Utc;
use tracing::{info, instrument, warn};

use super::{ActionKind, ActionOutcome, DamageRequest, RollEngine, RollRequest};
use crate::activity::ActivityRecord;
use crate::dice::{DamageFormula, DamageRoll};
use crate::error::MechResult;
use crate::sheet::{ActorId, FieldPath};

impl RollEngine {
    /// Roll a damage formula, with the actor's power die and critical
    /// doubling applied as requested.
    ///
    /// A malformed formula is refused before anything is rolled or logged.
    #[instrument(skip(self, request), fields(actor = %request.actor, formula = %request.formula))]
    pub async fn resolve_damage(&self, request: &DamageRequest) -> MechResult<DamageRoll> {
        let extra = if request.extra_die {
            Some(self.actors.power_die(&request.actor).await?)
        } else {
            None
        };
        let parsed = DamageFormula::compose(&request.formula, extra, request.critical_die)
            .and_then(|formula| DamageFormula::parse(&formula));
        let formula = match parsed {
            Ok(formula) => formula,
            Err(err) => return Err(self.refuse(err).await),
        };
        let label = request.label.as_deref().unwrap_or("Damage");
        self.roll_damage(&request.actor, &formula, label).await
    }

    /// Dispatch a roll button press.
    ///
    /// Weapons, attacks and spells resolve as checks. Wands and scrolls pay
    /// their cost and roll damage directly.
    pub async fn perform(&self, request: &RollRequest) -> MechResult<ActionOutcome> {
        match request.kind {
            ActionKind::Weapon | ActionKind::Attack | ActionKind::Cast => {
                self.resolve_check(request).await.map(ActionOutcome::Check)
            }
            ActionKind::CastWand | ActionKind::CastScroll => {
                self.cast_item(request).await.map(ActionOutcome::Damage)
            }
        }
    }

    #[instrument(skip(self, request), fields(actor = %request.actor, kind = %request.kind))]
    async fn cast_item(&self, request: &RollRequest) -> MechResult<DamageRoll> {
        let actor = &request.actor;
        let _guard = self.lock_actor(actor).await;

        let formula = match DamageFormula::parse(request.formula.as_deref().unwrap_or("")) {
            Ok(formula) => formula,
            Err(err) => return Err(self.refuse(err).await),
        };
        let cost = request.point_cost.unwrap_or(0);
        let available = self
            .require_points(actor, request.pool, cost, request.current)
            .await?;
        if cost > 0 {
            let left = available.saturating_sub_unsigned(cost);
            self.actors
                .write(actor, FieldPath::PoolCurrent(request.pool), left)
                .await?;
            info!(pool = %request.pool, cost, left, "item cast paid");
        }

        let label = format!("{} Damage", request.label());
        self.roll_damage(actor, &formula, &label).await
    }

    async fn roll_damage(
        &self,
        actor: &ActorId,
        formula: &DamageFormula,
        label: &str,
    ) -> MechResult<DamageRoll> {
        let roll = self.roll_with(|dice| formula.roll(dice));
        if roll.total < 0 {
            warn!(total = roll.total, formula = %roll.formula, "damage total below zero");
        }
        let name = self.actors.name(actor).await?;
        self.log
            .post(ActivityRecord::Damage {
                actor: name,
                action: label.to_string(),
                transcript: roll.to_string(),
                total: roll.total,
                timestamp: Utc::now(),
            })
            .await;
        info!(total = roll.total, "damage rolled");
        Ok(roll)
    }
}
