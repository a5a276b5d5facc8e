//! Combat integration tests
//!
//! End-to-end checks of the damage pipeline: live defense, weakness
//! multipliers, wound bonuses and the multi-hit split.

use epic_battle::catalog::{AttackType, WeaponKey, Weaknesses, WoundChannel, ENEMY_TEMPLATES};
use epic_battle::combat::{
    land, recalc_defense, split_damage, strike_with_weapon, weakness_multiplier, wounded_defense,
    AttackRolls,
};
use epic_battle::core::StatDeltas;
use epic_battle::entity::{Enemy, Player};
use proptest::prelude::*;

/// A dummy with the given physical defense and weaknesses
fn dummy(defense: u32, weak_to: &[AttackType]) -> Enemy {
    let mut enemy = Enemy::from_template(&ENEMY_TEMPLATES[0], 1);
    enemy.hp = 1000;
    enemy.max_hp = 1000;
    enemy.base_physical_defense = defense;
    enemy.base_magical_defense = defense;
    enemy.weaknesses = Weaknesses::new(weak_to, &[]);
    recalc_defense(&mut enemy);
    enemy
}

fn hero(physical_attack: u32) -> Player {
    let mut player = Player::default();
    player.physical_attack = physical_attack;
    player
}

#[test]
fn test_plain_hit_without_weakness() {
    let player = hero(15);
    let enemy = dummy(5, &[]);
    let result = strike_with_weapon(&player, WeaponKey::Sword.def(), &enemy, AttackRolls::NEUTRAL);

    assert_eq!(result.total, 10);
    assert_eq!(result.hits, vec![10]);
    assert!(!result.hit_weakness());
    assert!(result.wound_channels.is_empty());
}

#[test]
fn test_weakness_then_wound_bonus_on_follow_up() {
    let player = hero(15);
    let mut enemy = dummy(5, &[AttackType::Slash]);
    let sword = WeaponKey::Sword.def();

    let first = strike_with_weapon(&player, sword, &enemy, AttackRolls::NEUTRAL);
    assert_eq!(first.total, 15);
    assert_eq!(first.weakness_multiplier, 1.5);
    assert_eq!(first.wound_bonus, 0);

    let landed = land(&first, &mut enemy);
    assert_eq!(landed.opened, vec![(WoundChannel::Slash, 1)]);
    assert_eq!(enemy.hp, 985);
    assert_eq!(enemy.current_physical_defense, 4);

    // one slash wound: +3 bonus, and live defense is now 4
    let second = strike_with_weapon(&player, sword, &enemy, AttackRolls::NEUTRAL);
    assert_eq!(second.wound_bonus, 3);
    assert_eq!(second.total, 19);
}

#[test]
fn test_follow_up_against_sturdier_enemy() {
    let player = hero(15);
    let mut enemy = dummy(6, &[AttackType::Slash]);
    enemy.wound(WoundChannel::Slash);
    assert_eq!(enemy.current_physical_defense, 5);

    let result = strike_with_weapon(&player, WeaponKey::Sword.def(), &enemy, AttackRolls::NEUTRAL);
    assert_eq!(result.total, 18);
}

#[test]
fn test_four_slash_wounds_cut_defense_to_sixty_percent() {
    let mut enemy = dummy(25, &[]);
    for _ in 0..4 {
        enemy.wound(WoundChannel::Slash);
    }
    assert_eq!(enemy.wounds.get(WoundChannel::Slash), 4);
    assert_eq!(enemy.current_physical_defense, 15);
    assert_eq!(enemy.current_magical_defense, 25);
    assert_eq!(enemy.base_physical_defense, 25);
}

#[test]
fn test_critical_doubles_after_weakness() {
    let player = hero(15);
    let enemy = dummy(5, &[AttackType::Slash, AttackType::Pierce]);
    let rolls = AttackRolls {
        variance: 1.0,
        critical: true,
    };
    let result = strike_with_weapon(&player, WeaponKey::Sword.def(), &enemy, rolls);
    // 10 * 2.25 = 22, doubled
    assert_eq!(result.total, 44);
    assert_eq!(result.matched_weaknesses, 2);
}

#[test]
fn test_club_splits_into_three_hits() {
    let player = hero(20);
    let enemy = dummy(6, &[AttackType::Blunt]);
    let result = strike_with_weapon(&player, WeaponKey::Club.def(), &enemy, AttackRolls::NEUTRAL);
    // power 16, margin 10, x1.5
    assert_eq!(result.total, 15);
    assert_eq!(result.hits, vec![5, 5, 5]);
    assert_eq!(result.wound_channels, vec![WoundChannel::Blunt]);
}

#[test]
fn test_overpowered_defense_still_deals_one() {
    let player = hero(5);
    let enemy = dummy(200, &[]);
    let result = strike_with_weapon(&player, WeaponKey::Sword.def(), &enemy, AttackRolls::NEUTRAL);
    assert_eq!(result.total, 1);
}

proptest! {
    #[test]
    fn prop_live_defense_respects_floor_and_cap(base in 0u32..10_000, wounds in 0u32..100) {
        let defense = wounded_defense(base, wounds);
        prop_assert!(defense >= 1);
        prop_assert!(defense as u64 >= base as u64 * 40 / 100);
        prop_assert!(defense <= base.max(1));
    }

    #[test]
    fn prop_split_preserves_total(total in 0u32..100_000, hits in 0u32..8) {
        let shares = split_damage(total, hits);
        prop_assert_eq!(shares.len() as u32, hits.max(1));
        prop_assert_eq!(shares.iter().sum::<u32>(), total);
        let max = *shares.iter().max().unwrap();
        let min = *shares.iter().min().unwrap();
        prop_assert!(max - min <= 1);
    }

    #[test]
    fn prop_weakness_multiplier_is_power_of_one_and_a_half(k in 0u32..4) {
        prop_assert_eq!(weakness_multiplier(k), 1.5f64.powi(k as i32));
    }

    #[test]
    fn prop_enemy_hp_never_underflows(hp in 1u32..500, damage in 0u32..2_000) {
        let mut enemy = dummy(5, &[]);
        enemy.hp = hp;
        let lost = enemy.take_damage(damage);
        prop_assert_eq!(lost, damage.min(hp));
        prop_assert_eq!(enemy.hp, hp - lost);
        prop_assert_eq!(enemy.is_defeated(), damage >= hp);
    }

    #[test]
    fn prop_player_vitals_stay_clamped(
        ops in prop::collection::vec((0u8..5, 0u32..300), 0..60)
    ) {
        let mut player = Player::default();
        for (op, amount) in ops {
            match op {
                0 => {
                    let hp = player.hp;
                    prop_assert_eq!(player.take_damage(amount), amount.min(hp));
                }
                1 => {
                    player.heal(amount);
                }
                2 => {
                    let mp = player.mp;
                    prop_assert_eq!(player.spend_mp(amount), amount <= mp);
                }
                3 => {
                    player.restore_mp(amount);
                }
                _ => player.apply_deltas(&StatDeltas {
                    max_hp: amount % 25,
                    max_mp: amount % 10,
                    ..StatDeltas::default()
                }),
            }
            prop_assert!(player.hp <= player.max_hp);
            prop_assert!(player.mp <= player.max_mp);
        }
    }

    #[test]
    fn prop_recalc_is_idempotent(slash in 0u32..10, fire in 0u32..10, base in 1u32..500) {
        let mut enemy = dummy(base, &[]);
        for _ in 0..slash {
            enemy.wound(WoundChannel::Slash);
        }
        for _ in 0..fire {
            enemy.wound(WoundChannel::Fire);
        }
        let once = (enemy.current_physical_defense, enemy.current_magical_defense);
        recalc_defense(&mut enemy);
        prop_assert_eq!(once, (enemy.current_physical_defense, enemy.current_magical_defense));
        prop_assert_eq!(enemy.current_physical_defense, wounded_defense(base, slash));
    }
}
