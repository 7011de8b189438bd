//! Difficulty and boon/bane computation.

/// The difficulty of a check: the toughest selected defender, or the
/// default when nothing usable is selected.
///
/// Non-positive ratings are ignored so the target is always at least 1.
pub fn resolve_target(ratings: &[i32], default_difficulty: u32) -> u32 {
    ratings
        .iter()
        .copied()
        .filter(|r| *r > 0)
        .max()
        .map(|r| r.unsigned_abs())
        .unwrap_or(default_difficulty.max(1))
}

/// Net boon/bane modifier: the request's own modifier, less one bane per
/// depleted pool. Uncapped.
pub fn net_modifier(depleted_pools: usize, modifier: i32) -> i32 {
    let banes = i32::try_from(depleted_pools).unwrap_or(i32::MAX);
    modifier.saturating_sub(banes)
}
