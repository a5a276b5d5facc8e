//! Weapon catalog
//!
//! Static reference data: hit count, damage types, multiplier and price.
//! Ownership is player state and lives on `Player`, not here.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::catalog::tags::AttackType;
use crate::core::error::GameError;

/// Key into the weapon catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKey {
    Sword,
    Axe,
    Club,
    Bow,
}

impl WeaponKey {
    pub const ALL: [WeaponKey; 4] = [
        WeaponKey::Sword,
        WeaponKey::Axe,
        WeaponKey::Club,
        WeaponKey::Bow,
    ];

    /// Always owned, cannot be sold; the fallback for any invalid reference
    pub const DEFAULT: WeaponKey = WeaponKey::Sword;

    pub fn def(self) -> &'static WeaponDef {
        match self {
            WeaponKey::Sword => &WEAPONS[0],
            WeaponKey::Axe => &WEAPONS[1],
            WeaponKey::Club => &WEAPONS[2],
            WeaponKey::Bow => &WEAPONS[3],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKey::Sword => "sword",
            WeaponKey::Axe => "axe",
            WeaponKey::Club => "club",
            WeaponKey::Bow => "bow",
        }
    }
}

impl FromStr for WeaponKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeaponKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| GameError::UnknownKey(s.to_string()))
    }
}

/// Immutable weapon entry
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponDef {
    pub key: WeaponKey,
    pub name: &'static str,
    pub icon: &'static str,
    /// Number of sub-hits one attack is split into (>= 1)
    pub hit_count: u32,
    /// Damage types; each one applies to the whole attack and every sub-hit
    pub types: &'static [AttackType],
    pub attack_multiplier: f64,
    /// Ranged weapons raise the chance to dodge enemy attacks
    pub ranged: bool,
    pub owned_by_default: bool,
    pub price: Option<u32>,
}

impl WeaponDef {
    pub fn has_type(&self, attack: AttackType) -> bool {
        self.types.contains(&attack)
    }

    /// Attack power of a swing: physical attack scaled by the multiplier, floored
    pub fn power(&self, physical_attack: u32) -> u32 {
        (physical_attack as f64 * self.attack_multiplier).floor() as u32
    }
}

pub static WEAPONS: [WeaponDef; 4] = [
    WeaponDef {
        key: WeaponKey::Sword,
        name: "Iron Sword",
        icon: "🗡️",
        hit_count: 1,
        types: &[AttackType::Slash, AttackType::Pierce],
        attack_multiplier: 1.0,
        ranged: false,
        owned_by_default: true,
        price: None,
    },
    WeaponDef {
        key: WeaponKey::Axe,
        name: "Battle Axe",
        icon: "🪓",
        hit_count: 1,
        types: &[AttackType::Slash],
        attack_multiplier: 1.35,
        ranged: false,
        owned_by_default: false,
        price: Some(300),
    },
    WeaponDef {
        key: WeaponKey::Club,
        name: "Spiked Club",
        icon: "🏏",
        hit_count: 3,
        types: &[AttackType::Blunt],
        attack_multiplier: 0.8,
        ranged: false,
        owned_by_default: false,
        price: Some(250),
    },
    WeaponDef {
        key: WeaponKey::Bow,
        name: "Longbow",
        icon: "🏹",
        hit_count: 2,
        types: &[AttackType::Pierce],
        attack_multiplier: 0.9,
        ranged: true,
        owned_by_default: false,
        price: Some(400),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keys_line_up() {
        for key in WeaponKey::ALL {
            assert_eq!(key.def().key, key);
            assert!(key.def().hit_count >= 1);
            assert!(!key.def().types.is_empty());
            assert!(key.def().attack_multiplier > 0.0);
        }
    }

    #[test]
    fn test_only_default_weapon_is_owned_and_unpriced() {
        for key in WeaponKey::ALL {
            let def = key.def();
            assert_eq!(def.owned_by_default, key == WeaponKey::DEFAULT);
            assert_eq!(def.price.is_none(), key == WeaponKey::DEFAULT);
        }
    }

    #[test]
    fn test_sword_is_dual_typed() {
        let sword = WeaponKey::Sword.def();
        assert!(sword.has_type(AttackType::Slash));
        assert!(sword.has_type(AttackType::Pierce));
        assert!(!sword.has_type(AttackType::Blunt));
    }

    #[test]
    fn test_power_floors() {
        assert_eq!(WeaponKey::Axe.def().power(20), 27);
        assert_eq!(WeaponKey::Club.def().power(15), 12);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("bow".parse::<WeaponKey>().unwrap(), WeaponKey::Bow);
        assert!("spoon".parse::<WeaponKey>().is_err());
    }
}
