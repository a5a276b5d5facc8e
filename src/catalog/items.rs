//! Consumable item catalog

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKey {
    Potion,
    Mana,
    Bomb,
}

impl ItemKey {
    pub const ALL: [ItemKey; 3] = [ItemKey::Potion, ItemKey::Mana, ItemKey::Bomb];

    pub fn def(self) -> &'static ItemDef {
        &ITEMS[self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKey::Potion => "potion",
            ItemKey::Mana => "mana",
            ItemKey::Bomb => "bomb",
        }
    }
}

impl FromStr for ItemKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| GameError::UnknownKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    RestoreHp(u32),
    RestoreMp(u32),
    /// Fixed attack power resolved against current physical defense
    Damage(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDef {
    pub key: ItemKey,
    pub name: &'static str,
    pub icon: &'static str,
    pub effect: ItemEffect,
    pub starting_count: u32,
    pub price: u32,
}

pub static ITEMS: [ItemDef; 3] = [
    ItemDef {
        key: ItemKey::Potion,
        name: "Potion",
        icon: "🧪",
        effect: ItemEffect::RestoreHp(30),
        starting_count: 3,
        price: 50,
    },
    ItemDef {
        key: ItemKey::Mana,
        name: "Mana Potion",
        icon: "💙",
        effect: ItemEffect::RestoreMp(20),
        starting_count: 2,
        price: 80,
    },
    ItemDef {
        key: ItemKey::Bomb,
        name: "Bomb",
        icon: "💣",
        effect: ItemEffect::Damage(50),
        starting_count: 1,
        price: 120,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keys_line_up() {
        for key in ItemKey::ALL {
            assert_eq!(key.def().key, key);
            assert_eq!(key.as_str().parse::<ItemKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_starting_counts() {
        assert_eq!(ItemKey::Potion.def().starting_count, 3);
        assert_eq!(ItemKey::Mana.def().starting_count, 2);
        assert_eq!(ItemKey::Bomb.def().starting_count, 1);
    }
}
