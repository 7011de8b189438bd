//! Sheet-level rolls and resource bookkeeping.

use chrono::Utc;
use tracing::info;

use super::RollEngine;
use crate::activity::ActivityRecord;
use crate::error::{MechError, MechResult};
use crate::sheet::{ActorId, FieldPath, PoolKind, Track};

/// Base and current physical points gained while shapeshifted.
const SHAPESHIFT_BONUS: i32 = 2;

impl RollEngine {
    /// Roll initiative: one initiative die plus the actor's movement.
    pub async fn roll_initiative(&self, actor: &ActorId) -> MechResult<i32> {
        let bonus = self.actors.read(actor, FieldPath::Movement).await?;
        let sides = self.config.initiative_die.sides();
        let roll = self.roll_with(|dice| dice.roll_die(sides));
        let total = i32::try_from(roll).unwrap_or(i32::MAX).saturating_add(bonus);

        let name = self.actors.name(actor).await?;
        self.log
            .post(ActivityRecord::Initiative {
                actor: name,
                roll,
                bonus,
                total,
                timestamp: Utc::now(),
            })
            .await;
        info!(%actor, roll, bonus, total, "initiative rolled");
        Ok(total)
    }

    /// Spend a destiny die on a standalone roll of the check die.
    pub async fn roll_destiny_die(&self, actor: &ActorId) -> MechResult<u32> {
        let _guard = self.lock_actor(actor).await;
        let destiny = self.actors.read(actor, FieldPath::Destiny).await?;
        if destiny <= 0 {
            return Err(self.refuse(MechError::NoDestinyAvailable).await);
        }

        let sides = self.config.check_die.sides();
        let value = self.roll_with(|dice| dice.roll_die(sides));
        let remaining = destiny - 1;
        self.actors
            .write(actor, FieldPath::Destiny, remaining)
            .await?;

        let name = self.actors.name(actor).await?;
        self.log
            .post(ActivityRecord::DestinyDie {
                actor: name,
                value,
                remaining,
                timestamp: Utc::now(),
            })
            .await;
        info!(%actor, value, remaining, "destiny die rolled");
        Ok(value)
    }

    /// Roll the actor's power die on its own.
    pub async fn roll_power_die(&self, actor: &ActorId) -> MechResult<u32> {
        let die = self.actors.power_die(actor).await?;
        let value = self.roll_with(|dice| dice.roll_die(die.sides()));

        let name = self.actors.name(actor).await?;
        self.log
            .post(ActivityRecord::PowerDie {
                actor: name,
                die: format!("1{die}"),
                value,
                timestamp: Utc::now(),
            })
            .await;
        info!(%actor, %die, value, "power die rolled");
        Ok(value)
    }

    /// Add one destiny die.
    pub async fn add_destiny(&self, actor: &ActorId) -> MechResult<i32> {
        self.update(actor, FieldPath::Destiny, |n| n.saturating_add(1))
            .await
    }

    /// Remove one destiny die, never going below zero.
    pub async fn remove_destiny(&self, actor: &ActorId) -> MechResult<i32> {
        self.update(actor, FieldPath::Destiny, |n| n.saturating_sub(1).max(0))
            .await
    }

    /// Remember the current destiny count as the reset value.
    pub async fn save_destiny(&self, actor: &ActorId) -> MechResult<i32> {
        let _guard = self.lock_actor(actor).await;
        let destiny = self.actors.read(actor, FieldPath::Destiny).await?;
        self.actors
            .write(actor, FieldPath::StartingDestiny, destiny)
            .await?;
        info!(%actor, destiny, "destiny saved");
        Ok(destiny)
    }

    /// Restore destiny to the saved reset value.
    pub async fn reset_destiny(&self, actor: &ActorId) -> MechResult<i32> {
        let _guard = self.lock_actor(actor).await;
        let starting = self.actors.read(actor, FieldPath::StartingDestiny).await?;
        self.actors
            .write(actor, FieldPath::Destiny, starting)
            .await?;
        info!(%actor, destiny = starting, "destiny reset");
        Ok(starting)
    }

    /// Refill a pool to its base.
    pub async fn reset_pool(&self, actor: &ActorId, pool: PoolKind) -> MechResult<i32> {
        let _guard = self.lock_actor(actor).await;
        let mut track = self.read_track(actor, pool).await?;
        track.reset();
        self.actors
            .write(actor, FieldPath::PoolCurrent(pool), track.current)
            .await?;
        info!(%actor, %pool, base = track.base, "pool reset");
        Ok(track.current)
    }

    /// Move a pool's current value by `delta`, clamped to `0..=base`.
    pub async fn adjust_pool(&self, actor: &ActorId, pool: PoolKind, delta: i32) -> MechResult<i32> {
        let _guard = self.lock_actor(actor).await;
        let mut track = self.read_track(actor, pool).await?;
        let next = track.adjust(delta);
        self.actors
            .write(actor, FieldPath::PoolCurrent(pool), next)
            .await?;
        info!(%actor, %pool, delta, next, "pool adjusted");
        Ok(next)
    }

    /// Flip the shapeshift flag. Shifting raises physical base and current
    /// by two; shifting back lowers them again. Returns the new state.
    pub async fn toggle_shapeshift(&self, actor: &ActorId) -> MechResult<bool> {
        let _guard = self.lock_actor(actor).await;
        let shifted = self.actors.read(actor, FieldPath::Shapeshift).await? != 0;
        let delta = if shifted {
            -SHAPESHIFT_BONUS
        } else {
            SHAPESHIFT_BONUS
        };

        let mut physical = self.read_track(actor, PoolKind::Physical).await?;
        physical.shift(delta);
        self.actors
            .write(actor, FieldPath::PoolBase(PoolKind::Physical), physical.base)
            .await?;
        self.actors
            .write(actor, FieldPath::PoolCurrent(PoolKind::Physical), physical.current)
            .await?;
        self.actors
            .write(actor, FieldPath::Shapeshift, i32::from(!shifted))
            .await?;
        info!(%actor, shapeshift = !shifted, "shapeshift toggled");
        Ok(!shifted)
    }

    /// Read one pool's base and current values from the host.
    pub(super) async fn read_track(&self, actor: &ActorId, pool: PoolKind) -> MechResult<Track> {
        let base = self.actors.read(actor, FieldPath::PoolBase(pool)).await?;
        let current = self.actors.read(actor, FieldPath::PoolCurrent(pool)).await?;
        Ok(Track {
            base: base.max(0),
            current,
        })
    }

    async fn update(
        &self,
        actor: &ActorId,
        path: FieldPath,
        f: impl FnOnce(i32) -> i32 + Send,
    ) -> MechResult<i32> {
        let _guard = self.lock_actor(actor).await;
        let value = f(self.actors.read(actor, path).await?);
        self.actors.write(actor, path, value).await?;
        info!(%actor, %path, value, "field updated");
        Ok(value)
    }
}
