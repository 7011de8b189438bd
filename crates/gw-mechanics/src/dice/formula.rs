//! Damage formulas such as `1d8+2` or `2d6+1d4-1`.
//!
//! A formula is a signed sum of dice terms (`NdM`, `dM`) and flat numbers.
//! Damage is a flat roll-and-report: no crit or target logic applies.

use serde::{Deserialize, Serialize};

use super::{Die, DieSource};
use crate::error::{MechError, MechResult};

/// Upper bound on dice in a single term.
const MAX_TERM_DICE: u32 = 100;
/// Largest die a formula may name.
const MAX_SIDES: u32 = 1000;
/// Largest flat modifier a formula may name.
const MAX_FLAT: i32 = 10_000;

/// One signed term of a damage formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormulaTerm {
    /// `count` dice of one type, added or subtracted.
    Dice {
        /// Number of dice.
        count: u32,
        /// Die type.
        die: Die,
        /// True when the term is subtracted.
        negative: bool,
    },
    /// A flat modifier.
    Flat(i32),
}

/// A parsed damage formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageFormula {
    /// Terms in written order.
    pub terms: Vec<FormulaTerm>,
    /// The normalized source text.
    pub source: String,
}

impl DamageFormula {
    /// Parse a formula string.
    pub fn parse(input: &str) -> MechResult<Self> {
        let source: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if source.is_empty() {
            return Err(MechError::InvalidFormula("formula is empty".to_string()));
        }

        let mut terms = Vec::new();
        let mut current = String::new();
        let mut negative = false;

        for ch in source.chars() {
            match ch {
                '+' | '-' => {
                    if current.is_empty() && !terms.is_empty() {
                        return Err(MechError::InvalidFormula(format!(
                            "dangling operator in '{source}'"
                        )));
                    }
                    if !current.is_empty() {
                        terms.push(parse_term(&current, negative)?);
                        current.clear();
                    }
                    negative = ch == '-';
                }
                _ => current.push(ch),
            }
        }

        if current.is_empty() {
            return Err(MechError::InvalidFormula(format!(
                "dangling operator in '{source}'"
            )));
        }
        terms.push(parse_term(&current, negative)?);

        Ok(Self { terms, source })
    }

    /// Build the formula text for a damage roll with optional extra and
    /// critical dice.
    ///
    /// The extra die adds one power die; a critical doubles the base formula
    /// and, with the extra die, adds two power dice instead of one.
    pub fn compose(base: &str, extra_die: Option<Die>, critical: bool) -> MechResult<String> {
        let base = base.trim();
        if base.is_empty() {
            return Err(MechError::InvalidFormula("formula is empty".to_string()));
        }
        let formula = match (extra_die, critical) {
            (None, false) => base.to_string(),
            (Some(power), false) => format!("{base}+1{power}"),
            (None, true) => format!("{base}+{base}"),
            (Some(power), true) => format!("{base}+{base}+2{power}"),
        };
        Ok(formula)
    }

    /// Roll every term once. The total saturates at the `i32` bounds.
    pub fn roll<S: DieSource + ?Sized>(&self, source: &mut S) -> DamageRoll {
        let mut parts = Vec::with_capacity(self.terms.len());
        let mut total: i32 = 0;

        for term in &self.terms {
            match *term {
                FormulaTerm::Dice {
                    count,
                    die,
                    negative,
                } => {
                    let values: Vec<u32> = (0..count).map(|_| source.roll_die(die.sides())).collect();
                    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
                    let subtotal = i32::try_from(sum).unwrap_or(i32::MAX);
                    total = if negative {
                        total.saturating_sub(subtotal)
                    } else {
                        total.saturating_add(subtotal)
                    };
                    parts.push(TermRoll::Dice {
                        notation: format!("{count}{die}"),
                        values,
                        negative,
                    });
                }
                FormulaTerm::Flat(n) => {
                    total = total.saturating_add(n);
                    parts.push(TermRoll::Flat(n));
                }
            }
        }

        DamageRoll {
            formula: self.source.clone(),
            parts,
            total,
        }
    }
}

fn parse_term(term: &str, negative: bool) -> MechResult<FormulaTerm> {
    let invalid = || MechError::InvalidFormula(format!("invalid term '{term}'"));

    let Some(d_pos) = term.find('d') else {
        let value: i32 = term.parse().map_err(|_| invalid())?;
        if value > MAX_FLAT {
            return Err(invalid());
        }
        return Ok(FormulaTerm::Flat(if negative { -value } else { value }));
    };

    let count_str = &term[..d_pos];
    let count: u32 = if count_str.is_empty() {
        1
    } else {
        count_str.parse().map_err(|_| invalid())?
    };
    if count == 0 || count > MAX_TERM_DICE {
        return Err(invalid());
    }

    let sides: u32 = term[d_pos + 1..].parse().map_err(|_| invalid())?;
    if sides > MAX_SIDES {
        return Err(invalid());
    }
    let die = Die::from_sides(sides).ok_or_else(invalid)?;

    Ok(FormulaTerm::Dice {
        count,
        die,
        negative,
    })
}

/// The rolled value of one formula term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermRoll {
    /// Dice with their individual values.
    Dice {
        /// Term notation, e.g. `2d6`.
        notation: String,
        /// Rolled values.
        values: Vec<u32>,
        /// True when subtracted.
        negative: bool,
    },
    /// A flat modifier.
    Flat(i32),
}

/// The result of rolling a damage formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    /// The formula that was rolled.
    pub formula: String,
    /// Per-term results.
    pub parts: Vec<TermRoll>,
    /// Final signed total.
    pub total: i32,
}

impl DamageRoll {
    /// Every individual die value in roll order.
    pub fn values(&self) -> Vec<u32> {
        self.parts
            .iter()
            .flat_map(|p| match p {
                TermRoll::Dice { values, .. } => values.clone(),
                TermRoll::Flat(_) => Vec::new(),
            })
            .collect()
    }
}

impl std::fmt::Display for DamageRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.formula)?;
        for (i, part) in self.parts.iter().enumerate() {
            let (negative, text) = match part {
                TermRoll::Dice {
                    values, negative, ..
                } => {
                    let vals: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                    (*negative, format!("[{}]", vals.join(", ")))
                }
                TermRoll::Flat(n) => (*n < 0, n.unsigned_abs().to_string()),
            };
            match (i, negative) {
                (0, false) => write!(f, " {text}")?,
                (0, true) => write!(f, " -{text}")?,
                (_, false) => write!(f, " + {text}")?,
                (_, true) => write!(f, " - {text}")?,
            }
        }
        write!(f, " = {}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedRolls;

    #[test]
    fn parse_simple() {
        let f = DamageFormula::parse("1d8+2").unwrap();
        assert_eq!(
            f.terms,
            vec![
                FormulaTerm::Dice {
                    count: 1,
                    die: Die::D8,
                    negative: false
                },
                FormulaTerm::Flat(2),
            ]
        );
    }

    #[test]
    fn parse_shorthand_and_subtraction() {
        let f = DamageFormula::parse(" d6 + 2d4 - 1 ").unwrap();
        assert_eq!(f.source, "d6+2d4-1");
        assert_eq!(f.terms.len(), 3);
        assert_eq!(f.terms[2], FormulaTerm::Flat(-1));
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!(
            DamageFormula::parse("   "),
            Err(MechError::InvalidFormula(_))
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["1d", "d1", "0d6", "2x6", "1d8+", "1d8++2", "abc", "1d6kh"] {
            assert!(DamageFormula::parse(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn parse_rejects_out_of_range_numbers() {
        for bad in ["2147483647+1", "2d4294967295", "1d1001", "10001", "1d6+99999999999"] {
            assert!(
                matches!(DamageFormula::parse(bad), Err(MechError::InvalidFormula(_))),
                "accepted {bad}"
            );
        }
        assert!(DamageFormula::parse("1d1000+10000").is_ok());
    }

    #[test]
    fn roll_total_saturates() {
        let f = DamageFormula {
            terms: vec![
                FormulaTerm::Flat(i32::MAX),
                FormulaTerm::Dice {
                    count: 2,
                    die: Die::Custom(u32::MAX),
                    negative: false,
                },
            ],
            source: "huge".to_string(),
        };
        let mut dice = FixedRolls::new([4_000_000_000, 4_000_000_000]);
        assert_eq!(f.roll(&mut dice).total, i32::MAX);

        let f = DamageFormula {
            terms: vec![FormulaTerm::Flat(i32::MIN), FormulaTerm::Flat(-1)],
            source: "tiny".to_string(),
        };
        assert_eq!(f.roll(&mut dice).total, i32::MIN);
    }

    #[test]
    fn compose_extra_die() {
        let f = DamageFormula::compose("1d8", Some(Die::D6), false).unwrap();
        assert_eq!(f, "1d8+1d6");
    }

    #[test]
    fn compose_critical_doubles_base() {
        let f = DamageFormula::compose("1d8+2", None, true).unwrap();
        assert_eq!(f, "1d8+2+1d8+2");
    }

    #[test]
    fn compose_critical_with_extra_die() {
        let f = DamageFormula::compose("1d8", Some(Die::D6), true).unwrap();
        assert_eq!(f, "1d8+1d8+2d6");
    }

    #[test]
    fn compose_rejects_empty_base() {
        assert!(DamageFormula::compose("", Some(Die::D6), true).is_err());
    }

    #[test]
    fn roll_sums_terms() {
        let f = DamageFormula::parse("2d6+1d4-1").unwrap();
        let mut dice = FixedRolls::new([5, 2, 3]);
        let roll = f.roll(&mut dice);
        assert_eq!(roll.total, 9);
        assert_eq!(roll.values(), vec![5, 2, 3]);
        assert_eq!(roll.to_string(), "2d6+1d4-1: [5, 2] + [3] - 1 = 9");
    }

    #[test]
    fn roll_flat_only() {
        let f = DamageFormula::parse("-3").unwrap();
        let mut dice = FixedRolls::new([1]);
        let roll = f.roll(&mut dice);
        assert_eq!(roll.total, -3);
        assert_eq!(roll.to_string(), "-3: -3 = -3");
    }
}
