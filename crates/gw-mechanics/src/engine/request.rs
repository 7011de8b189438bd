//! What the host asks the engine to do.

use serde::{Deserialize, Serialize};

use crate::sheet::{ActorId, PoolKind};

/// The kind of action a roll button triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Attack with an equipped weapon.
    Weapon,
    /// A pool check or unarmed attack.
    Attack,
    /// Cast a spell or cantrip.
    Cast,
    /// Discharge a wand: pay points, roll its damage.
    CastWand,
    /// Read a scroll: pay points, roll its damage.
    CastScroll,
}

impl ActionKind {
    /// Parse the host's roll-type tag, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weapon" => Some(Self::Weapon),
            "attack" => Some(Self::Attack),
            "cast" => Some(Self::Cast),
            "castwand" | "wand" => Some(Self::CastWand),
            "castscroll" | "scroll" => Some(Self::CastScroll),
            _ => None,
        }
    }

    /// Label used in the activity log when the request has none.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Weapon => "Weapon Attack",
            Self::Attack => "Attack",
            Self::Cast => "Cast",
            Self::CastWand => "Wand",
            Self::CastScroll => "Scroll",
        }
    }

    /// Wands and scrolls skip the check and go straight to damage.
    pub fn is_item_cast(self) -> bool {
        matches!(self, Self::CastWand | Self::CastScroll)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::Attack => write!(f, "attack"),
            Self::Cast => write!(f, "cast"),
            Self::CastWand => write!(f, "castWand"),
            Self::CastScroll => write!(f, "castScroll"),
        }
    }
}

/// Input to [`RollEngine::perform`](super::RollEngine::perform) and
/// [`RollEngine::resolve_check`](super::RollEngine::resolve_check).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollRequest {
    /// The acting actor.
    pub actor: ActorId,
    /// What kind of action this is.
    pub kind: ActionKind,
    /// Pool that points are spent from.
    pub pool: PoolKind,
    /// The pool value the sheet showed when the button was pressed.
    ///
    /// Informational: the engine validates against the stored value.
    pub current: Option<i32>,
    /// Boons (positive) or banes (negative) the action carries.
    pub modifier: i32,
    /// Points the action costs, for spells, wands and scrolls.
    pub point_cost: Option<u32>,
    /// Damage formula, for wands and scrolls.
    pub formula: Option<String>,
    /// Display label.
    pub label: Option<String>,
}

impl RollRequest {
    /// A request with no modifier, cost or formula.
    pub fn new(actor: impl Into<ActorId>, kind: ActionKind, pool: PoolKind) -> Self {
        Self {
            actor: actor.into(),
            kind,
            pool,
            current: None,
            modifier: 0,
            point_cost: None,
            formula: None,
            label: None,
        }
    }

    /// Record the pool value the sheet showed.
    pub fn with_current(mut self, current: i32) -> Self {
        self.current = Some(current);
        self
    }

    /// Set the boon/bane modifier.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Set the point cost.
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.point_cost = Some(cost);
        self
    }

    /// Set the damage formula.
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label to log under.
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.kind.default_label().to_string())
    }
}

/// Input to [`RollEngine::resolve_damage`](super::RollEngine::resolve_damage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageRequest {
    /// The acting actor.
    pub actor: ActorId,
    /// Base damage formula.
    pub formula: String,
    /// Add the actor's power die.
    pub extra_die: bool,
    /// Critical hit: double the base formula.
    pub critical_die: bool,
    /// Display label.
    pub label: Option<String>,
}

impl DamageRequest {
    /// A plain damage roll.
    pub fn new(actor: impl Into<ActorId>, formula: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            formula: formula.into(),
            extra_die: false,
            critical_die: false,
            label: None,
        }
    }

    /// Add the actor's power die.
    pub fn with_extra_die(mut self, extra: bool) -> Self {
        self.extra_die = extra;
        self
    }

    /// Mark the hit as critical.
    pub fn with_critical_die(mut self, critical: bool) -> Self {
        self.critical_die = critical;
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
