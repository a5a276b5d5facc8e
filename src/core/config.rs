//! Game configuration with documented tunables
//!
//! Rule constants that define the game (weakness multiplier, wound caps,
//! growth factors) live in `combat::constants` and `progression`. This
//! struct only carries values that are meant to be tuned per deployment.

use serde::Deserialize;
use std::time::Duration;

use crate::core::error::{GameError, Result};

/// Tunable values for the battle engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === DAMAGE ===
    /// Lower bound of the per-hit damage variance band
    pub variance_min: f64,

    /// Upper bound of the per-hit damage variance band
    pub variance_max: f64,

    /// Ceiling for the combo-scaled basic attack critical chance
    /// (`0.15 + 0.05 * combo` reaches 1.0 at combo 17)
    pub crit_chance_cap: f64,

    // === TURN PACING ===
    /// Pause between the player's action and the enemy taking over (ms)
    pub turn_handoff_ms: u64,

    /// Enemy "thinking" pause before its action resolves (ms)
    pub enemy_think_ms: u64,

    // === SUB-LEVEL GROWTH ===
    /// Physical exp granted by each basic attack
    pub physical_exp_per_attack: u32,

    /// Magical exp granted by each damaging skill
    pub magical_exp_per_skill: u32,

    // === ITEMS AND TOWN ===
    /// Chance for each item to restock by one when the next battle begins
    pub restock_chance: f64,

    /// Restocking never raises a count above this
    pub restock_cap: u32,

    /// Purchases never raise a count above this
    pub item_carry_limit: u32,

    /// Inn price is this times the character level
    pub inn_price_per_level: u32,

    /// Fraction of the purchase price refunded when selling a weapon
    pub weapon_sell_ratio: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variance_min: 0.975,
            variance_max: 1.025,
            crit_chance_cap: 0.75,

            turn_handoff_ms: 800,
            enemy_think_ms: 1500,

            physical_exp_per_attack: 10,
            magical_exp_per_skill: 12,

            restock_chance: 0.3,
            restock_cap: 5,
            item_carry_limit: 9,
            inn_price_per_level: 10,
            weapon_sell_ratio: 0.5,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| GameError::InvalidConfig(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Total delay between a player action and the enemy action resolving
    pub fn enemy_turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_handoff_ms + self.enemy_think_ms)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.variance_min > 0.0 && self.variance_min <= self.variance_max) {
            return Err(GameError::InvalidConfig(format!(
                "variance band [{}, {}] must be positive and ordered",
                self.variance_min, self.variance_max
            )));
        }

        if !(0.0..=1.0).contains(&self.crit_chance_cap) {
            return Err(GameError::InvalidConfig(format!(
                "crit_chance_cap ({}) must be within [0, 1]",
                self.crit_chance_cap
            )));
        }

        if !(0.0..=1.0).contains(&self.restock_chance) {
            return Err(GameError::InvalidConfig(format!(
                "restock_chance ({}) must be within [0, 1]",
                self.restock_chance
            )));
        }

        if self.restock_cap > self.item_carry_limit {
            return Err(GameError::InvalidConfig(format!(
                "restock_cap ({}) should be <= item_carry_limit ({})",
                self.restock_cap, self.item_carry_limit
            )));
        }

        if !(0.0..=1.0).contains(&self.weapon_sell_ratio) {
            return Err(GameError::InvalidConfig(
                "weapon_sell_ratio must be within [0, 1]".into(),
            ));
        }

        Ok(())
    }
}
