//! Enemy turn: pick a move, roll the dodge, apply guard

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::WeaponDef;
use crate::combat::constants::{
    BASE_DODGE_CHANCE, ENEMY_SPECIAL_CHANCE, ENEMY_SPECIAL_POWER, GUARD_DAMAGE_FACTOR,
    RANGED_DODGE_CHANCE,
};
use crate::combat::damage::base_damage;
use crate::combat::resolution::roll_variance;
use crate::core::GameConfig;
use crate::entity::{Enemy, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyMove {
    Attack,
    /// 1.5x attack power
    Special,
}

impl EnemyMove {
    pub fn choose(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(ENEMY_SPECIAL_CHANCE) {
            EnemyMove::Special
        } else {
            EnemyMove::Attack
        }
    }

    pub fn power(self, attack: u32) -> u32 {
        match self {
            EnemyMove::Attack => attack,
            EnemyMove::Special => (attack as f64 * ENEMY_SPECIAL_POWER).floor() as u32,
        }
    }
}

/// Outcome of the enemy's action against the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyStrike {
    pub mv: EnemyMove,
    pub dodged: bool,
    pub guarded: bool,
    /// HP the player loses
    pub damage: u32,
}

impl EnemyStrike {
    /// Unguarded, non-zero hits break the player's combo
    pub fn breaks_combo(&self) -> bool {
        !self.guarded && self.damage > 0
    }
}

pub fn dodge_chance(weapon: &WeaponDef) -> f64 {
    if weapon.ranged {
        RANGED_DODGE_CHANCE
    } else {
        BASE_DODGE_CHANCE
    }
}

/// Describe an enemy move against the player with fixed rolls
pub fn strike_player(
    mv: EnemyMove,
    enemy: &Enemy,
    player: &Player,
    variance: f64,
    dodged: bool,
) -> EnemyStrike {
    let guarded = player.is_guarding;
    let damage = if dodged {
        0
    } else {
        let raw = base_damage(mv.power(enemy.attack), player.defense, variance);
        if guarded {
            (raw as f64 * GUARD_DAMAGE_FACTOR).floor() as u32
        } else {
            raw
        }
    };
    EnemyStrike {
        mv,
        dodged,
        guarded,
        damage,
    }
}

/// Roll and resolve the enemy's single action for this round
///
/// Applies the damage, breaks the combo on an unguarded hit and clears the
/// guard stance.
pub fn resolve_enemy_turn(
    enemy: &Enemy,
    player: &mut Player,
    rng: &mut impl Rng,
    config: &GameConfig,
) -> EnemyStrike {
    let mv = EnemyMove::choose(rng);
    let dodged = rng.gen_bool(dodge_chance(player.weapon()));
    let variance = roll_variance(rng, config);
    let strike = strike_player(mv, enemy, player, variance, dodged);

    player.take_damage(strike.damage);
    if strike.breaks_combo() {
        player.break_combo();
    }
    player.is_guarding = false;

    debug!(
        enemy = %enemy.name,
        ?mv,
        dodged = strike.dodged,
        guarded = strike.guarded,
        damage = strike.damage,
        player_hp = player.hp,
        "enemy acted"
    );
    strike
}
