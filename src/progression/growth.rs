//! Level-up grants for the shared character level and the two sub-levels

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::types::{LevelKind, StatDeltas};
use crate::entity::Player;
use crate::progression::curve::{ExpTrack, MAGICAL_GROWTH, PHYSICAL_GROWTH};

pub const PHYSICAL_LEVEL_ATTACK: u32 = 3;
pub const MAGICAL_LEVEL_ATTACK: u32 = 2;
pub const MAGICAL_LEVEL_MP: u32 = 5;

/// One resolved level-up on any track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUp {
    pub kind: LevelKind,
    pub level: u32,
    pub deltas: StatDeltas,
}

/// Random stat grant for one character level
///
/// HP +20..=29, MP +10..=14, physical attack +3..=5, defense +2..=3.
pub fn roll_character_grant(rng: &mut impl Rng) -> StatDeltas {
    StatDeltas {
        max_hp: rng.gen_range(20..=29),
        max_mp: rng.gen_range(10..=14),
        physical_attack: rng.gen_range(3..=5),
        magical_attack: 0,
        defense: rng.gen_range(2..=3),
    }
}

pub fn physical_grant() -> StatDeltas {
    StatDeltas {
        physical_attack: PHYSICAL_LEVEL_ATTACK,
        ..StatDeltas::default()
    }
}

pub fn magical_grant() -> StatDeltas {
    StatDeltas {
        magical_attack: MAGICAL_LEVEL_ATTACK,
        max_mp: MAGICAL_LEVEL_MP,
        ..StatDeltas::default()
    }
}

/// Add physical exp; each level reached grants +3 physical attack
pub fn gain_physical_exp(player: &mut Player, amount: u32) -> Vec<LevelUp> {
    let reached = ExpTrack {
        level: &mut player.physical_level,
        exp: &mut player.physical_exp,
        to_next: &mut player.physical_exp_to_next,
        growth: PHYSICAL_GROWTH,
    }
    .gain(amount);

    reached
        .into_iter()
        .map(|level| {
            let deltas = physical_grant();
            player.apply_deltas(&deltas);
            info!(level, "physical level up");
            LevelUp {
                kind: LevelKind::Physical,
                level,
                deltas,
            }
        })
        .collect()
}

/// Add magical exp; each level reached grants +2 magical attack and +5 max MP,
/// and refills MP
pub fn gain_magical_exp(player: &mut Player, amount: u32) -> Vec<LevelUp> {
    let reached = ExpTrack {
        level: &mut player.magical_level,
        exp: &mut player.magical_exp,
        to_next: &mut player.magical_exp_to_next,
        growth: MAGICAL_GROWTH,
    }
    .gain(amount);

    reached
        .into_iter()
        .map(|level| {
            let deltas = magical_grant();
            player.apply_deltas(&deltas);
            player.mp = player.max_mp;
            info!(level, "magical level up");
            LevelUp {
                kind: LevelKind::Magical,
                level,
                deltas,
            }
        })
        .collect()
}
