//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Which screen the session is on
///
/// Persisted with saves so a resumed session re-enters the same context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Town,
    ItemShop,
    WeaponShop,
    WeaponSelect,
    Inn,
    #[default]
    Battle,
}

impl Screen {
    /// Screens reachable from the town hub
    pub fn is_town(&self) -> bool {
        !matches!(self, Screen::Battle)
    }
}

/// Side that receives damage or healing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Player,
    Enemy,
}

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Which growth track leveled up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelKind {
    Character,
    Physical,
    Magical,
}

/// Stat increases granted by a single level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatDeltas {
    pub max_hp: u32,
    pub max_mp: u32,
    pub physical_attack: u32,
    pub magical_attack: u32,
    pub defense: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_battle_is_outside_town() {
        assert!(!Screen::Battle.is_town());
        assert!(Screen::Inn.is_town());
        assert!(Screen::WeaponSelect.is_town());
    }

    #[test]
    fn test_screen_serializes_as_tag() {
        let json = serde_json::to_string(&Screen::WeaponShop).unwrap();
        assert_eq!(json, "\"weapon_shop\"");
    }
}
