//! Enemy combatant - one per battle, discarded when the battle ends

use serde::{Deserialize, Serialize};

use crate::catalog::{
    level_multiplier_percent, scale, template_for_level, EnemyTemplate, Weaknesses, WoundChannel,
};
use crate::combat::wounds::{recalc_defense, Wounds};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub name: String,
    pub sprite: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub base_physical_defense: u32,
    pub base_magical_defense: u32,
    pub current_physical_defense: u32,
    pub current_magical_defense: u32,
    pub weaknesses: Weaknesses,
    pub wounds: Wounds,
    pub exp: u32,
    pub gold: u32,
}

impl Enemy {
    /// Spawn the species matching the character level
    pub fn spawn(level: u32) -> Self {
        Self::from_template(template_for_level(level), level)
    }

    /// Scale a template by the level multiplier, flooring every stat
    pub fn from_template(template: &EnemyTemplate, level: u32) -> Self {
        let multiplier = level_multiplier_percent(level);
        let max_hp = scale(template.hp, multiplier).max(1);
        let mut enemy = Self {
            name: template.name.to_string(),
            sprite: template.sprite.to_string(),
            hp: max_hp,
            max_hp,
            attack: scale(template.attack, multiplier),
            base_physical_defense: scale(template.physical_defense, multiplier),
            base_magical_defense: scale(template.magical_defense, multiplier),
            current_physical_defense: 0,
            current_magical_defense: 0,
            weaknesses: template.weaknesses(),
            wounds: Wounds::default(),
            exp: scale(template.exp, multiplier),
            gold: scale(template.gold, multiplier),
        };
        recalc_defense(&mut enemy);
        enemy
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Apply damage, clamped at 0; returns HP actually lost
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Add a wound stack and refresh live defense; returns the new count
    pub fn wound(&mut self, channel: WoundChannel) -> u32 {
        let count = self.wounds.inflict(channel);
        recalc_defense(self);
        count
    }

    pub fn clamp_vitals(&mut self) {
        self.hp = self.hp.min(self.max_hp);
    }
}
