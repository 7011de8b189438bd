//! Dice roll results and aggregation.

use serde::{Deserialize, Serialize};

use super::Die;
use super::pool::KeepRule;

/// The result of rolling a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// The value rolled (1 to die.sides()).
    pub value: u32,
    /// Whether this die counts toward the total after the keep rule.
    pub kept: bool,
}

/// The result of rolling an entire dice pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results, in the order they were rolled.
    pub dice: Vec<DieResult>,
    /// The keep rule that selected the counted dice.
    pub keep: KeepRule,
}

impl RollResult {
    /// Sum of the kept die values.
    pub fn total(&self) -> u32 {
        self.dice.iter().filter(|d| d.kept).map(|d| d.value).sum()
    }

    /// The highest single die value, or 0 if empty.
    pub fn highest(&self) -> u32 {
        self.dice.iter().map(|d| d.value).max().unwrap_or(0)
    }

    /// The lowest single die value, or 0 if empty.
    pub fn lowest(&self) -> u32 {
        self.dice.iter().map(|d| d.value).min().unwrap_or(0)
    }

    /// Every rolled value, kept or not.
    pub fn values(&self) -> Vec<u32> {
        self.dice.iter().map(|d| d.value).collect()
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .dice
            .iter()
            .map(|d| {
                if d.kept {
                    d.value.to_string()
                } else {
                    format!("({})", d.value)
                }
            })
            .collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(values: &[(u32, bool)], keep: KeepRule) -> RollResult {
        RollResult {
            dice: values
                .iter()
                .map(|&(value, kept)| DieResult {
                    die: Die::D12,
                    value,
                    kept,
                })
                .collect(),
            keep,
        }
    }

    #[test]
    fn total_counts_only_kept_dice() {
        let r = make_result(&[(3, true), (9, false)], KeepRule::Lowest);
        assert_eq!(r.total(), 3);
    }

    #[test]
    fn highest_and_lowest() {
        let r = make_result(&[(3, false), (11, true), (1, false)], KeepRule::Highest);
        assert_eq!(r.highest(), 11);
        assert_eq!(r.lowest(), 1);
        assert_eq!(r.values(), vec![3, 11, 1]);
    }

    #[test]
    fn empty_result() {
        let r = RollResult::default();
        assert_eq!(r.total(), 0);
        assert_eq!(r.highest(), 0);
        assert_eq!(r.lowest(), 0);
        assert_eq!(r.count(), 0);
    }

    #[test]
    fn display_marks_dropped_dice() {
        let r = make_result(&[(3, true), (9, false)], KeepRule::Lowest);
        assert_eq!(r.to_string(), "[3, (9)] = 3");

        let single = make_result(&[(7, true)], KeepRule::All);
        assert_eq!(single.to_string(), "[7] = 7");
    }
}
