//! Player combatant
//!
//! Persists across battles; only `restart` resets it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{WeaponDef, WeaponKey};
use crate::core::types::StatDeltas;

pub const STARTING_HP: u32 = 100;
pub const STARTING_MP: u32 = 50;
pub const STARTING_PHYSICAL_ATTACK: u32 = 20;
pub const STARTING_MAGICAL_ATTACK: u32 = 15;
pub const STARTING_DEFENSE: u32 = 10;
pub const STARTING_SUB_LEVEL_EXP_TO_NEXT: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub physical_attack: u32,
    pub magical_attack: u32,
    pub defense: u32,
    pub physical_level: u32,
    pub magical_level: u32,
    pub physical_exp: u32,
    pub physical_exp_to_next: u32,
    pub magical_exp: u32,
    pub magical_exp_to_next: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub is_guarding: bool,
    pub current_weapon: WeaponKey,
    /// Serialized separately as the save's `weapons` ownership map
    #[serde(skip)]
    pub owned_weapons: BTreeSet<WeaponKey>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new("Hero")
    }
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            mp: STARTING_MP,
            max_mp: STARTING_MP,
            physical_attack: STARTING_PHYSICAL_ATTACK,
            magical_attack: STARTING_MAGICAL_ATTACK,
            defense: STARTING_DEFENSE,
            physical_level: 1,
            magical_level: 1,
            physical_exp: 0,
            physical_exp_to_next: STARTING_SUB_LEVEL_EXP_TO_NEXT,
            magical_exp: 0,
            magical_exp_to_next: STARTING_SUB_LEVEL_EXP_TO_NEXT,
            combo: 0,
            max_combo: 0,
            is_guarding: false,
            current_weapon: WeaponKey::DEFAULT,
            owned_weapons: default_owned_weapons(),
        }
    }

    /// The equipped weapon's catalog entry
    pub fn weapon(&self) -> &'static WeaponDef {
        self.current_weapon.def()
    }

    pub fn owns(&self, key: WeaponKey) -> bool {
        self.owned_weapons.contains(&key)
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

    /// Restore HP, clamped at max; returns HP actually gained
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp.min(self.max_hp));
        self.hp = (self.hp + gained).min(self.max_hp);
        gained
    }

    /// Restore MP, clamped at max; returns MP actually gained
    pub fn restore_mp(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_mp - self.mp.min(self.max_mp));
        self.mp = (self.mp + gained).min(self.max_mp);
        gained
    }

    /// Spend MP if enough is available
    pub fn spend_mp(&mut self, cost: u32) -> bool {
        if self.mp < cost {
            return false;
        }
        self.mp -= cost;
        true
    }

    pub fn restore_fully(&mut self) {
        self.hp = self.max_hp;
        self.mp = self.max_mp;
    }

    /// Force HP/MP back into `[0, max]`
    pub fn clamp_vitals(&mut self) {
        self.hp = self.hp.min(self.max_hp);
        self.mp = self.mp.min(self.max_mp);
    }

    /// Count a landed hit toward the combo
    pub fn extend_combo(&mut self, by: u32) {
        self.combo += by;
        self.max_combo = self.max_combo.max(self.combo);
    }

    /// Drop the combo; returns the broken combo length if there was one
    pub fn break_combo(&mut self) -> Option<u32> {
        let broken = self.combo;
        self.combo = 0;
        (broken > 0).then_some(broken)
    }

    /// Battle spawn resets per-battle counters
    pub fn reset_for_battle(&mut self) {
        self.combo = 0;
        self.max_combo = 0;
        self.is_guarding = false;
    }

    /// Raise stats; stats only ever go up
    pub fn apply_deltas(&mut self, deltas: &StatDeltas) {
        self.max_hp += deltas.max_hp;
        self.max_mp += deltas.max_mp;
        self.physical_attack += deltas.physical_attack;
        self.magical_attack += deltas.magical_attack;
        self.defense += deltas.defense;
    }

    /// Re-equip the default weapon if the current one is not owned
    ///
    /// Returns the rejected key when a repair happened.
    pub fn ensure_valid_weapon(&mut self) -> Option<WeaponKey> {
        self.owned_weapons.insert(WeaponKey::DEFAULT);
        if self.owns(self.current_weapon) {
            return None;
        }
        let rejected = self.current_weapon;
        self.current_weapon = WeaponKey::DEFAULT;
        Some(rejected)
    }
}

/// Weapons owned by a fresh character according to the catalog
pub fn default_owned_weapons() -> BTreeSet<WeaponKey> {
    WeaponKey::ALL
        .into_iter()
        .filter(|key| key.def().owned_by_default)
        .collect()
}
