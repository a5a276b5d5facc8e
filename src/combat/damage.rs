//! Damage arithmetic
//!
//! Pure functions only. Rolls (variance, critical) are taken as inputs so
//! every formula can be checked with fixed numbers.

use crate::combat::constants::{
    BASIC_CRIT_BASE_CHANCE, BASIC_CRIT_CHANCE_PER_COMBO, MIN_DAMAGE, WEAKNESS_MULTIPLIER,
    WOUND_BONUS_PER_STACK, WOUND_BONUS_STACK_CAP,
};

/// `max(1, round((power - defense) * variance))`
pub fn base_damage(power: u32, defense: u32, variance: f64) -> u32 {
    let margin = power as f64 - defense as f64;
    let rolled = (margin * variance).round();
    if rolled < MIN_DAMAGE as f64 {
        MIN_DAMAGE
    } else {
        rolled.min(u32::MAX as f64) as u32
    }
}

/// `1.5^k` for `k` matched weakness tags
pub fn weakness_multiplier(matched: u32) -> f64 {
    WEAKNESS_MULTIPLIER.powi(matched as i32)
}

/// Flat bonus from existing wounds on the matched channels, 4 stacks max each
pub fn wound_bonus(wound_counts: impl IntoIterator<Item = u32>) -> u32 {
    wound_counts
        .into_iter()
        .map(|count| count.min(WOUND_BONUS_STACK_CAP) * WOUND_BONUS_PER_STACK)
        .sum()
}

/// Scale by a multiplier and floor, never below 1
pub fn scale_damage(damage: u32, multiplier: f64) -> u32 {
    let scaled = (damage as f64 * multiplier).floor();
    (scaled.min(u32::MAX as f64) as u32).max(MIN_DAMAGE)
}

/// Basic attack crit chance: `0.15 + 0.05 * combo`, clamped to `cap`
pub fn basic_crit_chance(combo: u32, cap: f64) -> f64 {
    (BASIC_CRIT_BASE_CHANCE + BASIC_CRIT_CHANCE_PER_COMBO * combo as f64).min(cap)
}
