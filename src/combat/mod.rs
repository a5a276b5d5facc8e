//! Combat system: damage, weaknesses, wounds and the enemy's turn
//!
//! Every formula has a pure form taking explicit rolls. The `resolve_*`
//! entry points draw those rolls from the caller's RNG.

pub mod constants;
pub mod damage;
pub mod enemy_ai;
pub mod resolution;
pub mod split;
pub mod wounds;

pub use damage::{base_damage, basic_crit_chance, weakness_multiplier, wound_bonus};
pub use enemy_ai::{dodge_chance, resolve_enemy_turn, strike_player, EnemyMove, EnemyStrike};
pub use resolution::{
    heal_amount, land, resolve_item_damage, resolve_physical_attack, resolve_skill,
    strike_with_skill, strike_with_weapon, AttackRolls, DamageResult, LandedWounds,
};
pub use split::{jitter_hits, split_damage};
pub use wounds::{recalc_defense, wound_reduction_percent, wounded_defense, Wounds};
