//! Wound system: per-channel hit counters that erode enemy defense
//!
//! Physical wounds (slash, blunt, pierce) erode physical defense and
//! elemental wounds (fire, lightning, holy, ice) erode magical defense,
//! 10% of the baseline per stack, never more than 60%, never below 1.

use serde::{Deserialize, Serialize};

use crate::catalog::WoundChannel;
use crate::combat::constants::{
    MAX_WOUND_REDUCTION_PERCENT, MIN_DEFENSE, WOUND_REDUCTION_PERCENT_PER_STACK,
};
use crate::entity::Enemy;

/// The seven wound counters of one enemy
///
/// Serializes as a map keyed by channel. Channels missing from a stored
/// map read back as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wounds {
    pub slash: u32,
    pub blunt: u32,
    pub pierce: u32,
    pub fire: u32,
    pub lightning: u32,
    pub holy: u32,
    pub ice: u32,
}

impl Wounds {
    pub fn get(&self, channel: WoundChannel) -> u32 {
        match channel {
            WoundChannel::Slash => self.slash,
            WoundChannel::Blunt => self.blunt,
            WoundChannel::Pierce => self.pierce,
            WoundChannel::Fire => self.fire,
            WoundChannel::Lightning => self.lightning,
            WoundChannel::Holy => self.holy,
            WoundChannel::Ice => self.ice,
        }
    }

    fn slot_mut(&mut self, channel: WoundChannel) -> &mut u32 {
        match channel {
            WoundChannel::Slash => &mut self.slash,
            WoundChannel::Blunt => &mut self.blunt,
            WoundChannel::Pierce => &mut self.pierce,
            WoundChannel::Fire => &mut self.fire,
            WoundChannel::Lightning => &mut self.lightning,
            WoundChannel::Holy => &mut self.holy,
            WoundChannel::Ice => &mut self.ice,
        }
    }

    /// Add one stack; returns the new count
    pub fn inflict(&mut self, channel: WoundChannel) -> u32 {
        let slot = self.slot_mut(channel);
        *slot = slot.saturating_add(1);
        *slot
    }

    pub fn physical_total(&self) -> u32 {
        self.total_where(|channel| channel.is_physical())
    }

    pub fn magical_total(&self) -> u32 {
        self.total_where(|channel| !channel.is_physical())
    }

    pub fn is_clear(&self) -> bool {
        WoundChannel::ALL.iter().all(|channel| self.get(*channel) == 0)
    }

    fn total_where(&self, include: impl Fn(&WoundChannel) -> bool) -> u32 {
        WoundChannel::ALL
            .iter()
            .filter(|channel| include(channel))
            .fold(0u32, |total, channel| total.saturating_add(self.get(*channel)))
    }
}

/// Percent of baseline defense removed by `wound_count` stacks on one axis
pub fn wound_reduction_percent(wound_count: u32) -> u32 {
    wound_count
        .saturating_mul(WOUND_REDUCTION_PERCENT_PER_STACK)
        .min(MAX_WOUND_REDUCTION_PERCENT)
}

/// Live defense on one axis: `max(1, floor(base * (1 - reduction)))`
pub fn wounded_defense(base: u32, wound_count: u32) -> u32 {
    let kept = 100 - wound_reduction_percent(wound_count);
    let defense = (base as u64 * kept as u64 / 100) as u32;
    defense.max(MIN_DEFENSE)
}

/// Recompute both live defenses from wounds and baselines
///
/// Pure in wounds and baselines, so repeated calls are idempotent. Must
/// run after every wound mutation.
pub fn recalc_defense(enemy: &mut Enemy) {
    enemy.current_physical_defense =
        wounded_defense(enemy.base_physical_defense, enemy.wounds.physical_total());
    enemy.current_magical_defense =
        wounded_defense(enemy.base_magical_defense, enemy.wounds.magical_total());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ENEMY_TEMPLATES;

    #[test]
    fn test_inflict_counts_per_channel() {
        let mut wounds = Wounds::default();
        assert!(wounds.is_clear());
        assert_eq!(wounds.inflict(WoundChannel::Slash), 1);
        assert_eq!(wounds.inflict(WoundChannel::Slash), 2);
        assert_eq!(wounds.inflict(WoundChannel::Ice), 1);
        assert_eq!(wounds.physical_total(), 2);
        assert_eq!(wounds.magical_total(), 1);
        assert!(!wounds.is_clear());
    }

    #[test]
    fn test_reduction_caps_at_sixty_percent() {
        assert_eq!(wound_reduction_percent(0), 0);
        assert_eq!(wound_reduction_percent(4), 40);
        assert_eq!(wound_reduction_percent(6), 60);
        assert_eq!(wound_reduction_percent(50), 60);
        assert_eq!(wound_reduction_percent(u32::MAX), 60);
    }

    #[test]
    fn test_four_slash_wounds_keep_sixty_percent() {
        assert_eq!(wounded_defense(20, 4), 12);
        assert_eq!(wounded_defense(5, 1), 4);
    }

    #[test]
    fn test_defense_never_below_one() {
        assert_eq!(wounded_defense(1, 100), 1);
        assert_eq!(wounded_defense(0, 0), 1);
    }

    #[test]
    fn test_recalc_is_idempotent_and_axis_separated() {
        let mut enemy = Enemy::from_template(&ENEMY_TEMPLATES[2], 1);
        enemy.wounds.inflict(WoundChannel::Blunt);
        enemy.wounds.inflict(WoundChannel::Blunt);
        recalc_defense(&mut enemy);
        let first = (enemy.current_physical_defense, enemy.current_magical_defense);
        recalc_defense(&mut enemy);
        assert_eq!(
            first,
            (enemy.current_physical_defense, enemy.current_magical_defense)
        );
        assert_eq!(enemy.current_physical_defense, 9);
        assert_eq!(enemy.current_magical_defense, enemy.base_magical_defense);
    }

    #[test]
    fn test_missing_channels_deserialize_as_zero() {
        let wounds: Wounds = serde_json::from_str(r#"{"slash": 2}"#).unwrap();
        assert_eq!(wounds.slash, 2);
        assert_eq!(wounds.holy, 0);
    }
}
