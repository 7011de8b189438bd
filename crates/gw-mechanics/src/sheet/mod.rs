//! Actor sheets: the resource state a roll reads and spends.
//!
//! The host owns actors; this module gives them a typed shape and the
//! dotted field paths the host persists them under (`arcane.current`,
//! `DDie`, ...).

pub mod track;

pub use track::Track;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dice::Die;
use crate::error::MechError;

/// Host identifier of an actor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    /// Wrap a host identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One of the three renewable pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolKind {
    /// Spell and item power.
    Arcane,
    /// Body and weapons.
    Physical,
    /// Will and wits.
    Mental,
}

impl PoolKind {
    /// All pools, in sheet order.
    pub const ALL: [Self; 3] = [Self::Arcane, Self::Physical, Self::Mental];

    /// Parse a pool name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "arcane" => Some(Self::Arcane),
            "physical" => Some(Self::Physical),
            "mental" => Some(Self::Mental),
            _ => None,
        }
    }
}

impl std::fmt::Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arcane => write!(f, "arcane"),
            Self::Physical => write!(f, "physical"),
            Self::Mental => write!(f, "mental"),
        }
    }
}

/// A numeric actor field, addressed the way the host persists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// `<pool>.current`
    PoolCurrent(PoolKind),
    /// `<pool>.base`
    PoolBase(PoolKind),
    /// `DDie`, the destiny counter.
    Destiny,
    /// `startingDDie`, the saved destiny reset value.
    StartingDestiny,
    /// `toHit`, the defense rating.
    ToHit,
    /// `movement`, the initiative bonus.
    Movement,
    /// `shapeshift`, stored as 0 or 1.
    Shapeshift,
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PoolCurrent(pool) => write!(f, "{pool}.current"),
            Self::PoolBase(pool) => write!(f, "{pool}.base"),
            Self::Destiny => write!(f, "DDie"),
            Self::StartingDestiny => write!(f, "startingDDie"),
            Self::ToHit => write!(f, "toHit"),
            Self::Movement => write!(f, "movement"),
            Self::Shapeshift => write!(f, "shapeshift"),
        }
    }
}

impl FromStr for FieldPath {
    type Err = MechError;

    /// Accepts both bare paths and host paths prefixed with `system.`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let path = path.strip_prefix("system.").unwrap_or(path);
        let invalid = || MechError::InvalidFieldPath(s.to_string());

        match path {
            "DDie" => return Ok(Self::Destiny),
            "startingDDie" => return Ok(Self::StartingDestiny),
            "toHit" => return Ok(Self::ToHit),
            "movement" => return Ok(Self::Movement),
            "shapeshift" => return Ok(Self::Shapeshift),
            _ => {}
        }

        let (pool, field) = path.split_once('.').ok_or_else(invalid)?;
        let pool = PoolKind::parse(pool).ok_or_else(invalid)?;
        match field {
            "current" => Ok(Self::PoolCurrent(pool)),
            "base" => Ok(Self::PoolBase(pool)),
            _ => Err(invalid()),
        }
    }
}

/// A character's resource state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActorSheet {
    /// Display name.
    pub name: String,
    /// Arcane pool.
    pub arcane: Track,
    /// Physical pool.
    pub physical: Track,
    /// Mental pool.
    pub mental: Track,
    /// Destiny dice remaining.
    #[serde(rename = "DDie")]
    pub destiny: i32,
    /// Destiny value restored by a reset.
    #[serde(rename = "startingDDie")]
    pub starting_destiny: i32,
    /// Defense rating opponents must meet.
    pub to_hit: i32,
    /// Initiative bonus.
    pub movement: i32,
    /// Die added by power strikes.
    pub power_die: Die,
    /// Whether the actor is currently shapeshifted.
    pub shapeshift: bool,
}

impl Default for ActorSheet {
    fn default() -> Self {
        Self {
            name: String::new(),
            arcane: Track::new(5),
            physical: Track::new(5),
            mental: Track::new(5),
            destiny: 1,
            starting_destiny: 1,
            to_hit: 8,
            movement: 0,
            power_die: Die::D6,
            shapeshift: false,
        }
    }
}

impl ActorSheet {
    /// A fresh sheet with default pools.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Borrow one pool.
    pub fn pool(&self, kind: PoolKind) -> &Track {
        match kind {
            PoolKind::Arcane => &self.arcane,
            PoolKind::Physical => &self.physical,
            PoolKind::Mental => &self.mental,
        }
    }

    /// Mutably borrow one pool.
    pub fn pool_mut(&mut self, kind: PoolKind) -> &mut Track {
        match kind {
            PoolKind::Arcane => &mut self.arcane,
            PoolKind::Physical => &mut self.physical,
            PoolKind::Mental => &mut self.mental,
        }
    }

    /// Read a numeric field.
    pub fn get(&self, path: FieldPath) -> i32 {
        match path {
            FieldPath::PoolCurrent(kind) => self.pool(kind).current,
            FieldPath::PoolBase(kind) => self.pool(kind).base,
            FieldPath::Destiny => self.destiny,
            FieldPath::StartingDestiny => self.starting_destiny,
            FieldPath::ToHit => self.to_hit,
            FieldPath::Movement => self.movement,
            FieldPath::Shapeshift => i32::from(self.shapeshift),
        }
    }

    /// Write a numeric field. Pool values are clamped to `0..=base` and
    /// counters to zero or above.
    pub fn set(&mut self, path: FieldPath, value: i32) {
        match path {
            FieldPath::PoolCurrent(kind) => {
                let pool = self.pool_mut(kind);
                pool.current = value.clamp(0, pool.base);
            }
            FieldPath::PoolBase(kind) => {
                let pool = self.pool_mut(kind);
                pool.base = value.max(0);
                pool.current = pool.current.min(pool.base);
            }
            FieldPath::Destiny => self.destiny = value.max(0),
            FieldPath::StartingDestiny => self.starting_destiny = value.max(0),
            FieldPath::ToHit => self.to_hit = value,
            FieldPath::Movement => self.movement = value,
            FieldPath::Shapeshift => self.shapeshift = value != 0,
        }
    }
}
