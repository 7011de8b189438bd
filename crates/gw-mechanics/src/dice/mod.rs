//! Dice types, pools, damage formulas, and rolling.
//!
//! Grimwood checks use a single d12 whose pool grows with boons and banes.
//! Damage is rolled from free-form formulas such as `1d8+2`.

pub mod formula;
pub mod pool;
pub mod roll;

pub use formula::{DamageFormula, DamageRoll, FormulaTerm, TermRoll};
pub use pool::{DicePool, KeepRule};
pub use roll::{DieResult, RollResult};

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// Build a die from its side count. Fewer than two sides is not a die.
    pub fn from_sides(sides: u32) -> Option<Self> {
        match sides {
            0 | 1 => None,
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            20 => Some(Self::D20),
            100 => Some(Self::D100),
            n => Some(Self::Custom(n)),
        }
    }

    /// Parse a die from a string like "d12", "d6", "d100".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let sides = s.strip_prefix('d')?.parse::<u32>().ok()?;
        Self::from_sides(sides)
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

impl TryFrom<String> for Die {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_tag(&value).ok_or_else(|| format!("invalid die: {value}"))
    }
}

impl From<Die> for String {
    fn from(die: Die) -> Self {
        die.to_string()
    }
}

/// Anything that can produce a face value for a die.
///
/// The engine rolls through this trait so hosts and tests can swap the
/// randomness source.
pub trait DieSource: Send {
    /// Roll one die with the given number of sides, returning 1..=sides.
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl DieSource for StdRng {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn die_sides() {
        assert_eq!(Die::D4.sides(), 4);
        assert_eq!(Die::D6.sides(), 6);
        assert_eq!(Die::D12.sides(), 12);
        assert_eq!(Die::D100.sides(), 100);
        assert_eq!(Die::Custom(13).sides(), 13);
    }

    #[test]
    fn die_from_str() {
        assert_eq!(Die::from_str_tag("d12"), Some(Die::D12));
        assert_eq!(Die::from_str_tag(" D6 "), Some(Die::D6));
        assert_eq!(Die::from_str_tag("d13"), Some(Die::Custom(13)));
        assert_eq!(Die::from_str_tag("d1"), None);
        assert_eq!(Die::from_str_tag("12"), None);
        assert_eq!(Die::from_str_tag("power"), None);
    }

    #[test]
    fn die_display() {
        assert_eq!(Die::D12.to_string(), "d12");
        assert_eq!(Die::Custom(30).to_string(), "d30");
    }

    #[test]
    fn die_serializes_as_tag() {
        let json = serde_json::to_string(&Die::D8).unwrap();
        assert_eq!(json, "\"d8\"");
        let die: Die = serde_json::from_str("\"d10\"").unwrap();
        assert_eq!(die, Die::D10);
        assert!(serde_json::from_str::<Die>("\"x\"").is_err());
    }

    #[test]
    fn std_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = rng.roll_die(12);
            assert!((1..=12).contains(&v));
        }
    }
}
