//! Dice pool construction and rolling.
//!
//! A check pool is derived from the net boon/bane modifier: one die plus one
//! per point of modifier, keeping the highest die on boons and the lowest on
//! banes.

use serde::{Deserialize, Serialize};

use super::roll::{DieResult, RollResult};
use super::{Die, DieSource};

/// Which dice of a pool count toward the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeepRule {
    /// Every die counts.
    #[default]
    All,
    /// Only the single highest die counts (boon).
    Highest,
    /// Only the single lowest die counts (bane).
    Lowest,
}

impl KeepRule {
    /// Notation suffix used in roll transcripts.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Highest => "kh",
            Self::Lowest => "kl",
        }
    }
}

/// A collection of dice to be rolled together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DicePool {
    /// The dice in this pool.
    pub dice: Vec<Die>,
    /// How the rolled dice are reduced to a total.
    pub keep: KeepRule,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single unmodified die, as used for destiny re-rolls.
    pub fn single(die: Die) -> Self {
        Self::new().add(die, 1)
    }

    /// Build a check pool from a net boon/bane modifier.
    ///
    /// Die count is `1 + |modifier|`; positive keeps the highest die,
    /// negative keeps the lowest, zero keeps everything.
    pub fn from_modifier(die: Die, modifier: i32) -> Self {
        let keep = match modifier.signum() {
            1 => KeepRule::Highest,
            -1 => KeepRule::Lowest,
            _ => KeepRule::All,
        };
        Self::new()
            .add(die, modifier.unsigned_abs().saturating_add(1))
            .keep(keep)
    }

    /// Add `count` dice of the given type.
    pub fn add(mut self, die: Die, count: u32) -> Self {
        for _ in 0..count {
            self.dice.push(die);
        }
        self
    }

    /// Set the keep rule.
    pub fn keep(mut self, keep: KeepRule) -> Self {
        self.keep = keep;
        self
    }

    /// Returns how many dice are in the pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Dice notation for the pool, e.g. `1d12`, `3d12kh`.
    ///
    /// Mixed pools are listed term by term.
    pub fn notation(&self) -> String {
        let mut terms: Vec<(Die, usize)> = Vec::new();
        for die in &self.dice {
            match terms.last_mut() {
                Some((last, n)) if last == die => *n += 1,
                _ => terms.push((*die, 1)),
            }
        }
        let body: Vec<String> = terms.iter().map(|(die, n)| format!("{n}{die}")).collect();
        format!("{}{}", body.join("+"), self.keep.suffix())
    }

    /// Roll all dice in the pool and apply the keep rule.
    pub fn roll<S: DieSource + ?Sized>(&self, source: &mut S) -> RollResult {
        let mut dice: Vec<DieResult> = self
            .dice
            .iter()
            .map(|die| DieResult {
                die: *die,
                value: source.roll_die(die.sides()),
                kept: self.keep == KeepRule::All,
            })
            .collect();

        let chosen = match self.keep {
            KeepRule::All => None,
            KeepRule::Highest => dice
                .iter()
                .enumerate()
                .rev()
                .max_by_key(|(_, d)| d.value)
                .map(|(i, _)| i),
            KeepRule::Lowest => dice
                .iter()
                .enumerate()
                .min_by_key(|(_, d)| d.value)
                .map(|(i, _)| i),
        };
        if let Some(i) = chosen {
            dice[i].kept = true;
        }

        RollResult {
            dice,
            keep: self.keep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedRolls;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_pool() {
        let pool = DicePool::new();
        assert_eq!(pool.count(), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn neutral_pool_is_one_die() {
        let pool = DicePool::from_modifier(Die::D12, 0);
        assert_eq!(pool.count(), 1);
        assert_eq!(pool.keep, KeepRule::All);
        assert_eq!(pool.notation(), "1d12");
    }

    #[test]
    fn one_bane_rolls_two_keep_lowest() {
        let pool = DicePool::from_modifier(Die::D12, -1);
        assert_eq!(pool.count(), 2);
        assert_eq!(pool.keep, KeepRule::Lowest);
        assert_eq!(pool.notation(), "2d12kl");
    }

    #[test]
    fn two_boons_roll_three_keep_highest() {
        let pool = DicePool::from_modifier(Die::D12, 2);
        assert_eq!(pool.count(), 3);
        assert_eq!(pool.keep, KeepRule::Highest);
        assert_eq!(pool.notation(), "3d12kh");
    }

    #[test]
    fn keep_lowest_keeps_exactly_one() {
        let pool = DicePool::from_modifier(Die::D12, -2);
        let mut rolls = FixedRolls::new([8, 3, 3]);
        let result = pool.roll(&mut rolls);
        assert_eq!(result.total(), 3);
        assert_eq!(result.dice.iter().filter(|d| d.kept).count(), 1);
        assert!(result.dice[1].kept);
    }

    #[test]
    fn keep_highest_keeps_first_of_ties() {
        let pool = DicePool::from_modifier(Die::D12, 2);
        let mut rolls = FixedRolls::new([10, 4, 10]);
        let result = pool.roll(&mut rolls);
        assert_eq!(result.total(), 10);
        assert!(result.dice[0].kept);
        assert!(!result.dice[2].kept);
    }

    #[test]
    fn mixed_notation() {
        let pool = DicePool::new().add(Die::D12, 1).add(Die::D6, 2);
        assert_eq!(pool.notation(), "1d12+2d6");
    }

    #[test]
    fn roll_deterministic_with_seed() {
        let pool = DicePool::from_modifier(Die::D12, 3);
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        assert_eq!(pool.roll(&mut rng1), pool.roll(&mut rng2));
    }

    proptest! {
        #[test]
        fn die_count_and_keep_rule_follow_modifier(m in -20i32..=20) {
            let pool = DicePool::from_modifier(Die::D12, m);
            prop_assert_eq!(pool.count() as i64, 1 + i64::from(m).abs());
            let expected = if m > 0 {
                KeepRule::Highest
            } else if m < 0 {
                KeepRule::Lowest
            } else {
                KeepRule::All
            };
            prop_assert_eq!(pool.keep, expected);
        }

        #[test]
        fn kept_total_is_a_face_value(m in -6i32..=6, seed in any::<u64>()) {
            let pool = DicePool::from_modifier(Die::D12, m);
            let mut rng = StdRng::seed_from_u64(seed);
            let result = pool.roll(&mut rng);
            let total = result.total();
            prop_assert!((1..=12).contains(&total));
            if m > 0 {
                prop_assert_eq!(total, result.highest());
            } else if m < 0 {
                prop_assert_eq!(total, result.lowest());
            }
        }
    }
}
