//! Combat rule constants - all fixed rule values in one place
//!
//! Tunables (variance band, crit cap, pacing) live in `GameConfig`.

// Weakness and wounds
pub const WEAKNESS_MULTIPLIER: f64 = 1.5;
pub const WOUND_REDUCTION_PERCENT_PER_STACK: u32 = 10;
pub const MAX_WOUND_REDUCTION_PERCENT: u32 = 60;
pub const WOUND_BONUS_PER_STACK: u32 = 3;
pub const WOUND_BONUS_STACK_CAP: u32 = 4;
pub const MIN_DEFENSE: u32 = 1;
pub const MIN_DAMAGE: u32 = 1;

// Critical hits
pub const BASIC_CRIT_BASE_CHANCE: f64 = 0.15;
pub const BASIC_CRIT_CHANCE_PER_COMBO: f64 = 0.05;
pub const BASIC_CRIT_MULTIPLIER: f64 = 2.0;
pub const SKILL_CRIT_CHANCE: f64 = 0.30;
pub const SKILL_CRIT_MULTIPLIER: f64 = 1.5;

// Combo gains
pub const COMBO_PER_ATTACK: u32 = 1;
pub const COMBO_PER_SKILL: u32 = 2;

// Heal skill restores max_hp * ratio * this
pub const HEAL_SKILL_SCALE: f64 = 0.5;

// Enemy behaviour
pub const ENEMY_SPECIAL_CHANCE: f64 = 0.2;
pub const ENEMY_SPECIAL_POWER: f64 = 1.5;
pub const RANGED_DODGE_CHANCE: f64 = 0.30;
pub const BASE_DODGE_CHANCE: f64 = 0.05;
pub const GUARD_DAMAGE_FACTOR: f64 = 0.5;
pub const GUARD_MP_RESTORE: u32 = 5;
