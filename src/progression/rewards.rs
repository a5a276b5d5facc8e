//! Victory rewards and the shared character level

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::types::LevelKind;
use crate::entity::{Enemy, Player};
use crate::progression::curve::{ExpTrack, CHARACTER_GROWTH};
use crate::progression::growth::{roll_character_grant, LevelUp};
use crate::progression::state::GameState;

/// A max combo above this earns the combo bonus
pub const COMBO_BONUS_THRESHOLD: u32 = 5;
pub const COMBO_BONUS_RATE: f64 = 0.2;

/// Everything a victory paid out
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictoryReport {
    pub gold: u32,
    pub exp: u32,
    pub combo_bonus: u32,
    pub level_ups: Vec<LevelUp>,
}

impl VictoryReport {
    pub fn leveled_up(&self) -> bool {
        !self.level_ups.is_empty()
    }

    /// Gold added to the score including the combo bonus
    pub fn total_gold(&self) -> u32 {
        self.gold + self.combo_bonus
    }
}

/// `floor(gold * 0.2)` when the battle's max combo is above 5
pub fn combo_bonus(max_combo: u32, gold: u32) -> u32 {
    if max_combo > COMBO_BONUS_THRESHOLD {
        (gold as f64 * COMBO_BONUS_RATE).floor() as u32
    } else {
        0
    }
}

/// Pay out a defeated enemy and resolve character level-ups
///
/// Every level gained applies a random stat grant and fully restores HP
/// and MP.
pub fn award_victory(
    state: &mut GameState,
    player: &mut Player,
    enemy: &Enemy,
    rng: &mut impl Rng,
) -> VictoryReport {
    state.earn(enemy.gold);
    state.battle_count += 1;

    let reached = ExpTrack {
        level: &mut state.level,
        exp: &mut state.exp,
        to_next: &mut state.exp_to_next,
        growth: CHARACTER_GROWTH,
    }
    .gain(enemy.exp);

    let level_ups = reached
        .into_iter()
        .map(|level| {
            let deltas = roll_character_grant(rng);
            player.apply_deltas(&deltas);
            player.restore_fully();
            info!(level, ?deltas, "character level up");
            LevelUp {
                kind: LevelKind::Character,
                level,
                deltas,
            }
        })
        .collect();

    let bonus = combo_bonus(player.max_combo, enemy.gold);
    state.earn(bonus);

    info!(
        enemy = %enemy.name,
        gold = enemy.gold,
        exp = enemy.exp,
        combo_bonus = bonus,
        battles = state.battle_count,
        "victory"
    );

    VictoryReport {
        gold: enemy.gold,
        exp: enemy.exp,
        combo_bonus: bonus,
        level_ups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_combo_bonus_threshold() {
        assert_eq!(combo_bonus(5, 100), 0);
        assert_eq!(combo_bonus(6, 100), 20);
        assert_eq!(combo_bonus(9, 57), 11);
    }

    #[test]
    fn test_victory_pays_and_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = GameState::default();
        let mut player = Player::default();
        let slime = Enemy::spawn(1);
        let report = award_victory(&mut state, &mut player, &slime, &mut rng);
        assert_eq!(state.score, 50);
        assert_eq!(state.exp, 25);
        assert_eq!(state.battle_count, 1);
        assert!(!report.leveled_up());
        assert_eq!(report.combo_bonus, 0);
    }

    #[test]
    fn test_level_up_restores_and_grows() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut state = GameState {
            exp: 90,
            ..GameState::default()
        };
        let mut player = Player::default();
        player.hp = 10;
        let report = award_victory(&mut state, &mut player, &Enemy::spawn(1), &mut rng);
        assert!(report.leveled_up());
        assert_eq!(state.level, 2);
        assert_eq!(state.exp, 15);
        assert_eq!(state.exp_to_next, 110);
        assert!(player.max_hp >= 120);
        assert_eq!(player.hp, player.max_hp);
        assert_eq!(player.mp, player.max_mp);
    }
}
