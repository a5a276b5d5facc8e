//! Player attack resolution
//!
//! `strike_*` functions are pure: they read the current enemy state and a
//! fixed set of rolls and describe what the attack would do. `resolve_*`
//! functions roll, strike, and land the result on the enemy.
//!
//! Order of a physical strike:
//! 1. Base damage against the enemy's live (wound-adjusted) defense
//! 2. Weakness multiplier `1.5^k` over the weapon's matched types
//! 3. Wound bonus from the wounds already on the matched channels
//! 4. Critical multiplier
//! 5. Landing adds one wound per matched channel, then defense is recomputed
//!
//! Wounds opened by a hit therefore weaken defense from the next hit on.

use rand::Rng;
use tracing::debug;

use crate::catalog::{AttackType, SkillDef, SkillEffect, SkillPower, WeaponDef, WoundChannel};
use crate::combat::constants::{
    BASIC_CRIT_MULTIPLIER, HEAL_SKILL_SCALE, SKILL_CRIT_CHANCE, SKILL_CRIT_MULTIPLIER,
};
use crate::combat::damage::{
    base_damage, basic_crit_chance, scale_damage, weakness_multiplier, wound_bonus,
};
use crate::combat::split::{jitter_hits, split_damage};
use crate::core::GameConfig;
use crate::entity::{Enemy, Player};

/// Random inputs of one attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRolls {
    pub variance: f64,
    pub critical: bool,
}

impl AttackRolls {
    /// No variance, no critical
    pub const NEUTRAL: AttackRolls = AttackRolls {
        variance: 1.0,
        critical: false,
    };

    pub fn roll_basic(rng: &mut impl Rng, combo: u32, config: &GameConfig) -> Self {
        Self {
            variance: roll_variance(rng, config),
            critical: rng.gen_bool(basic_crit_chance(combo, config.crit_chance_cap)),
        }
    }

    pub fn roll_skill(rng: &mut impl Rng, config: &GameConfig) -> Self {
        Self {
            variance: roll_variance(rng, config),
            critical: rng.gen_bool(SKILL_CRIT_CHANCE.min(config.crit_chance_cap)),
        }
    }
}

pub fn roll_variance(rng: &mut impl Rng, config: &GameConfig) -> f64 {
    rng.gen_range(config.variance_min..=config.variance_max)
}

/// Outcome of one player attack
#[derive(Debug, Clone, PartialEq)]
pub struct DamageResult {
    /// HP removed from the enemy
    pub total: u32,
    /// Per-hit amounts for display; unjittered shares sum to `total`
    pub hits: Vec<u32>,
    pub critical: bool,
    pub weakness_multiplier: f64,
    pub matched_weaknesses: u32,
    pub wound_bonus: u32,
    /// Channels that gain a wound when the attack lands
    pub wound_channels: Vec<WoundChannel>,
}

impl DamageResult {
    pub fn hit_weakness(&self) -> bool {
        self.matched_weaknesses > 0
    }
}

/// Wounds applied by landing an attack
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LandedWounds {
    /// (channel, new count) per wound opened
    pub opened: Vec<(WoundChannel, u32)>,
}

/// Describe a basic attack with `weapon` against the enemy as it stands
pub fn strike_with_weapon(
    player: &Player,
    weapon: &WeaponDef,
    enemy: &Enemy,
    rolls: AttackRolls,
) -> DamageResult {
    let power = weapon.power(player.physical_attack);
    let matched: Vec<AttackType> = weapon
        .types
        .iter()
        .copied()
        .filter(|attack| enemy.weaknesses.is_weak_to_attack(*attack))
        .collect();

    let multiplier = weakness_multiplier(matched.len() as u32);
    let mut total = base_damage(power, enemy.current_physical_defense, rolls.variance);
    let mut bonus = 0;
    if multiplier > 1.0 {
        total = scale_damage(total, multiplier);
        bonus = wound_bonus(
            matched
                .iter()
                .map(|attack| enemy.wounds.get(WoundChannel::from(*attack))),
        );
        total += bonus;
    }
    if rolls.critical {
        total = scale_damage(total, BASIC_CRIT_MULTIPLIER);
    }

    DamageResult {
        total,
        hits: split_damage(total, weapon.hit_count),
        critical: rolls.critical,
        weakness_multiplier: multiplier,
        matched_weaknesses: matched.len() as u32,
        wound_bonus: bonus,
        wound_channels: matched.into_iter().map(WoundChannel::from).collect(),
    }
}

/// Attack power and the defense it is measured against
fn skill_power_and_defense(
    player: &Player,
    power: SkillPower,
    enemy: &Enemy,
    elemental: bool,
) -> (u32, u32) {
    match power {
        SkillPower::Simple(scalar) if elemental => (
            (player.magical_attack as f64 * scalar).floor() as u32,
            enemy.current_magical_defense,
        ),
        SkillPower::Simple(scalar) => (
            (player.physical_attack as f64 * scalar).floor() as u32,
            enemy.current_physical_defense,
        ),
        SkillPower::Combo { physical, magical } => (
            (player.physical_attack as f64 * physical + player.magical_attack as f64 * magical)
                .floor() as u32,
            (enemy.current_physical_defense + enemy.current_magical_defense) / 2,
        ),
    }
}

/// Describe a damaging skill; `None` for skills that deal no damage
pub fn strike_with_skill(
    player: &Player,
    skill: &SkillDef,
    enemy: &Enemy,
    rolls: AttackRolls,
) -> Option<DamageResult> {
    let SkillEffect::Damage { power, element } = skill.effect else {
        return None;
    };

    let (attack_power, defense) = skill_power_and_defense(player, power, enemy, element.is_some());
    let matched = element.filter(|element| enemy.weaknesses.is_weak_to_element(*element));
    let multiplier = weakness_multiplier(matched.is_some() as u32);

    let mut total = base_damage(attack_power, defense, rolls.variance);
    if multiplier > 1.0 {
        total = scale_damage(total, multiplier);
    }
    if rolls.critical {
        total = scale_damage(total, SKILL_CRIT_MULTIPLIER);
    }

    Some(DamageResult {
        total,
        hits: vec![total],
        critical: rolls.critical,
        weakness_multiplier: multiplier,
        matched_weaknesses: matched.is_some() as u32,
        wound_bonus: 0,
        wound_channels: matched.into_iter().map(WoundChannel::from).collect(),
    })
}

/// Apply damage and open wounds on the enemy
pub fn land(result: &DamageResult, enemy: &mut Enemy) -> LandedWounds {
    enemy.take_damage(result.total);
    let opened = result
        .wound_channels
        .iter()
        .map(|channel| (*channel, enemy.wound(*channel)))
        .collect();
    LandedWounds { opened }
}

/// Roll, strike and land a basic attack with the equipped weapon
pub fn resolve_physical_attack(
    player: &Player,
    enemy: &mut Enemy,
    rng: &mut impl Rng,
    config: &GameConfig,
) -> (DamageResult, LandedWounds) {
    let rolls = AttackRolls::roll_basic(rng, player.combo, config);
    let mut result = strike_with_weapon(player, player.weapon(), enemy, rolls);
    result.hits = jitter_hits(&result.hits, rng);
    let landed = land(&result, enemy);

    debug!(
        weapon = player.weapon().name,
        damage = result.total,
        critical = result.critical,
        weaknesses = result.matched_weaknesses,
        enemy_hp = enemy.hp,
        "basic attack landed"
    );
    (result, landed)
}

/// Roll, strike and land a damaging skill
///
/// Returns `None` without touching the enemy for non-damaging skills.
pub fn resolve_skill(
    player: &Player,
    skill: &SkillDef,
    enemy: &mut Enemy,
    rng: &mut impl Rng,
    config: &GameConfig,
) -> Option<(DamageResult, LandedWounds)> {
    let rolls = AttackRolls::roll_skill(rng, config);
    let result = strike_with_skill(player, skill, enemy, rolls)?;
    let landed = land(&result, enemy);

    debug!(
        skill = skill.name,
        damage = result.total,
        critical = result.critical,
        weak = result.hit_weakness(),
        enemy_hp = enemy.hp,
        "skill landed"
    );
    Some((result, landed))
}

/// Fixed-power item damage against live physical defense; no weakness, no crit
pub fn resolve_item_damage(
    power: u32,
    enemy: &mut Enemy,
    rng: &mut impl Rng,
    config: &GameConfig,
) -> u32 {
    let damage = base_damage(power, enemy.current_physical_defense, roll_variance(rng, config));
    enemy.take_damage(damage);
    damage
}

/// HP restored by a heal skill: `floor(max_hp * ratio * 0.5)`
pub fn heal_amount(player: &Player, ratio: f64) -> u32 {
    (player.max_hp as f64 * ratio * HEAL_SKILL_SCALE).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Element, SkillKey, WeaponKey, Weaknesses, ENEMY_TEMPLATES};
    use crate::combat::wounds::recalc_defense;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn dummy(physical: u32, magical: u32, weaknesses: Weaknesses) -> Enemy {
        let mut enemy = Enemy::from_template(&ENEMY_TEMPLATES[0], 1);
        enemy.hp = 500;
        enemy.max_hp = 500;
        enemy.base_physical_defense = physical;
        enemy.base_magical_defense = magical;
        enemy.weaknesses = weaknesses;
        recalc_defense(&mut enemy);
        enemy
    }

    fn hero(physical_attack: u32) -> Player {
        let mut player = Player::default();
        player.physical_attack = physical_attack;
        player
    }

    fn swing(physical_attack: u32, weapon: WeaponKey, enemy: &Enemy) -> DamageResult {
        strike_with_weapon(&hero(physical_attack), weapon.def(), enemy, AttackRolls::NEUTRAL)
    }

    fn cast(skill: SkillKey, enemy: &Enemy) -> Option<DamageResult> {
        strike_with_skill(&Player::default(), skill.def(), enemy, AttackRolls::NEUTRAL)
    }

    #[test]
    fn test_no_weakness_plain_damage() {
        let enemy = dummy(5, 5, Weaknesses::default());
        let result = swing(15, WeaponKey::Sword, &enemy);
        assert_eq!(result.total, 10);
        assert_eq!(result.weakness_multiplier, 1.0);
        assert!(result.wound_channels.is_empty());
    }

    #[test]
    fn test_dual_weakness_multiplies() {
        let enemy = dummy(5, 5, Weaknesses::new(&[AttackType::Slash, AttackType::Pierce], &[]));
        let result = swing(15, WeaponKey::Sword, &enemy);
        assert_eq!(result.weakness_multiplier, 2.25);
        assert_eq!(result.total, 22);
        assert_eq!(result.wound_channels.len(), 2);
    }

    #[test]
    fn test_critical_doubles_basic_attack() {
        let enemy = dummy(5, 5, Weaknesses::default());
        let rolls = AttackRolls { variance: 1.0, critical: true };
        let result = strike_with_weapon(&hero(15), WeaponKey::Sword.def(), &enemy, rolls);
        assert_eq!(result.total, 20);
    }

    #[test]
    fn test_every_weapon_type_applies_to_every_sub_hit() {
        let twin = WeaponDef {
            hit_count: 3,
            ..WeaponKey::Sword.def().clone()
        };
        let enemy = dummy(5, 5, Weaknesses::new(&[AttackType::Pierce], &[]));
        let result = strike_with_weapon(&hero(15), &twin, &enemy, AttackRolls::NEUTRAL);
        // 10 x1.5, then split; the pierce weakness counts for the whole swing
        assert_eq!(result.matched_weaknesses, 1);
        assert_eq!(result.total, 15);
        assert_eq!(result.hits, vec![5, 5, 5]);
        assert_eq!(result.wound_channels, vec![WoundChannel::Pierce]);
    }

    #[test]
    fn test_multi_hit_shares_sum_to_total() {
        let enemy = dummy(5, 5, Weaknesses::default());
        let result = swing(40, WeaponKey::Club, &enemy);
        // club power floor(40 * 0.8) = 32, minus 5
        assert_eq!(result.total, 27);
        assert_eq!(result.hits, vec![9, 9, 9]);
    }

    #[test]
    fn test_landing_opens_wounds_and_lowers_defense() {
        let mut enemy = dummy(20, 5, Weaknesses::new(&[AttackType::Slash], &[]));
        let result = swing(30, WeaponKey::Sword, &enemy);
        let landed = land(&result, &mut enemy);
        assert_eq!(landed.opened, vec![(WoundChannel::Slash, 1)]);
        assert_eq!(enemy.current_physical_defense, 18);
        assert_eq!(enemy.hp, 500 - 15);
    }

    #[test]
    fn test_elemental_skill_uses_magical_defense() {
        let enemy = dummy(50, 3, Weaknesses::new(&[], &[Element::Fire]));
        // magical attack 15 * 1.8 = 27, minus 3 = 24, x1.5 weakness
        let result = cast(SkillKey::Fire, &enemy).unwrap();
        assert_eq!(result.total, 36);
        assert_eq!(result.wound_channels, vec![WoundChannel::Fire]);
        assert_eq!(result.wound_bonus, 0);
    }

    #[test]
    fn test_power_strike_uses_physical_defense() {
        let enemy = dummy(10, 90, Weaknesses::default());
        let result = cast(SkillKey::PowerStrike, &enemy).unwrap();
        assert_eq!(result.total, 50);
    }

    #[test]
    fn test_combo_skill_averages_defenses() {
        let enemy = dummy(10, 20, Weaknesses::default());
        // 20 * 1.2 + 15 * 1.0 = 39 against (10 + 20) / 2 = 15
        let result = cast(SkillKey::FlameSlash, &enemy).unwrap();
        assert_eq!(result.total, 24);
    }

    #[test]
    fn test_heal_skill_is_not_a_strike() {
        let enemy = dummy(5, 5, Weaknesses::default());
        assert!(cast(SkillKey::Heal, &enemy).is_none());
        assert_eq!(heal_amount(&Player::default(), 0.8), 40);
    }

    #[test]
    fn test_resolve_physical_attack_is_seed_stable() {
        let config = GameConfig::default();
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut enemy = Enemy::spawn(1);
            let (result, _) =
                resolve_physical_attack(&Player::default(), &mut enemy, &mut rng, &config);
            (result.total, enemy.hp)
        };
        assert_eq!(run(11), run(11));
        let (total, hp) = run(11);
        assert_eq!(hp, 60u32.saturating_sub(total));
    }
}
