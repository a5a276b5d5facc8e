//! Snapshot encoding and reconciling load
//!
//! Loading happens in three stages: upgrade the raw JSON to the current
//! schema, decode it into typed values, then reconcile invariants (vitals
//! in range, live defense derived from wounds, an owned weapon equipped).
//! Nothing is applied to a running game until all three succeed.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::battle::{Game, TurnPhase};
use crate::catalog::{ItemKey, WeaponKey};
use crate::combat::recalc_defense;
use crate::core::types::Screen;
use crate::core::Result;
use crate::entity::{default_owned_weapons, Enemy, Inventory, ItemStock, Player};
use crate::persistence::blob::{BattleStateTag, SaveBlob, WeaponOwnership, CURRENT_SCHEMA_VERSION};
use crate::persistence::schema;
use crate::progression::GameState;

/// A recoverable inconsistency fixed during load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    UpgradedSchema { from: u32, to: u32 },
    /// `currentWeapon` named a weapon the catalog does not have
    UnknownWeapon(String),
    /// `currentWeapon` named a weapon the player does not own
    UnownedWeapon(WeaponKey),
    /// The ownership map listed a weapon the catalog does not have
    UnknownOwnedWeapon(String),
    /// The item map listed an item the catalog does not have
    UnknownItem(String),
    VitalsClamped,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::UpgradedSchema { from, to } => {
                write!(f, "Save upgraded from schema v{} to v{}", from, to)
            }
            LoadWarning::UnknownWeapon(key) => {
                write!(f, "Unknown equipped weapon '{}'; equipped the default", key)
            }
            LoadWarning::UnownedWeapon(key) => {
                write!(f, "Equipped weapon '{}' is not owned; equipped the default", key.as_str())
            }
            LoadWarning::UnknownOwnedWeapon(key) => {
                write!(f, "Dropped unknown weapon '{}' from the armory", key)
            }
            LoadWarning::UnknownItem(key) => {
                write!(f, "Dropped unknown item '{}' from the bag", key)
            }
            LoadWarning::VitalsClamped => {
                write!(f, "HP/MP were out of range and have been clamped")
            }
        }
    }
}

/// Session state decoded from a save, ready to replace the running game's
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    pub state: GameState,
    pub player: Player,
    pub items: Inventory,
    pub enemy: Option<Enemy>,
    pub screen: Screen,
    pub phase: TurnPhase,
}

/// Capture the session as a current-schema blob
pub fn snapshot(game: &Game, saved_at: u64) -> SaveBlob {
    let weapons = WeaponKey::ALL
        .into_iter()
        .map(|key| {
            (
                key.as_str().to_string(),
                WeaponOwnership {
                    owned: game.player.owns(key),
                },
            )
        })
        .collect();
    let items = game
        .items
        .iter()
        .map(|(key, count)| (key.as_str().to_string(), ItemStock { count }))
        .collect();

    SaveBlob {
        schema_version: CURRENT_SCHEMA_VERSION,
        game_version: env!("CARGO_PKG_VERSION").to_string(),
        saved_at,
        game_state: game.state.clone(),
        player: game.player.clone(),
        items,
        weapons: Some(weapons),
        enemy: game.enemy.clone(),
        battle_state: BattleStateTag::new(game.screen, game.phase),
    }
}

pub fn encode(blob: &SaveBlob) -> Result<String> {
    Ok(serde_json::to_string_pretty(blob)?)
}

/// Parse, upgrade and reconcile a stored blob
pub fn decode(json: &str) -> Result<(Restored, Vec<LoadWarning>)> {
    let raw: Value = serde_json::from_str(json)?;
    let (mut upgraded, found) = schema::upgrade(raw)?;

    let mut warnings = Vec::new();
    if found < CURRENT_SCHEMA_VERSION {
        warnings.push(LoadWarning::UpgradedSchema {
            from: found,
            to: CURRENT_SCHEMA_VERSION,
        });
    }
    warnings.extend(repair_unknown_weapon(&mut upgraded));

    let blob: SaveBlob = serde_json::from_value(upgraded)?;
    let (restored, reconciled) = reconcile(blob);
    warnings.extend(reconciled);
    Ok((restored, warnings))
}

/// Replace an equipped weapon key the catalog no longer knows
fn repair_unknown_weapon(blob: &mut Value) -> Option<LoadWarning> {
    let current = blob.get_mut("player")?.get_mut("currentWeapon")?;
    let label = match current.as_str() {
        Some(key) if key.parse::<WeaponKey>().is_ok() => return None,
        Some(key) => key.to_string(),
        None => current.to_string(),
    };
    *current = Value::String(WeaponKey::DEFAULT.as_str().to_string());
    Some(LoadWarning::UnknownWeapon(label))
}

fn owned_weapons(
    map: Option<BTreeMap<String, WeaponOwnership>>,
    warnings: &mut Vec<LoadWarning>,
) -> BTreeSet<WeaponKey> {
    let Some(map) = map else {
        return default_owned_weapons();
    };
    let mut owned = BTreeSet::new();
    for (name, ownership) in map {
        match name.parse::<WeaponKey>() {
            Ok(key) if ownership.owned => {
                owned.insert(key);
            }
            Ok(_) => {}
            Err(_) => warnings.push(LoadWarning::UnknownOwnedWeapon(name)),
        }
    }
    owned
}

fn inventory(stock: BTreeMap<String, ItemStock>, warnings: &mut Vec<LoadWarning>) -> Inventory {
    let mut items = Inventory::empty();
    for (name, entry) in stock {
        match name.parse::<ItemKey>() {
            Ok(key) => items.set(key, entry.count),
            Err(_) => warnings.push(LoadWarning::UnknownItem(name)),
        }
    }
    items
}

/// Restore invariants on a decoded blob
pub fn reconcile(blob: SaveBlob) -> (Restored, Vec<LoadWarning>) {
    let mut warnings = Vec::new();

    let mut player = blob.player;
    player.owned_weapons = owned_weapons(blob.weapons, &mut warnings);
    if let Some(rejected) = player.ensure_valid_weapon() {
        warnings.push(LoadWarning::UnownedWeapon(rejected));
    }
    let vitals = (player.hp, player.mp);
    player.clamp_vitals();
    if vitals != (player.hp, player.mp) {
        warnings.push(LoadWarning::VitalsClamped);
    }

    let enemy = blob.enemy.and_then(|mut enemy| {
        enemy.clamp_vitals();
        recalc_defense(&mut enemy);
        (!enemy.is_defeated()).then_some(enemy)
    });

    let mut state = blob.game_state;
    state.level = state.level.max(1);
    state.exp_to_next = state.exp_to_next.max(1);

    let items = inventory(blob.items, &mut warnings);

    let tag = blob.battle_state;
    let mut screen = tag.screen;
    let phase = match (enemy.is_some(), tag.resolved_phase()) {
        // a command never spans a save, so a half-resolved turn restarts
        (true, TurnPhase::PlayerResolving) => TurnPhase::PlayerActionable,
        (true, TurnPhase::EnemyResolving) => TurnPhase::EnemyDeciding,
        (true, TurnPhase::BattleOver(_)) => TurnPhase::PlayerActionable,
        // no enemy is left to take a turn
        (false, TurnPhase::EnemyDeciding | TurnPhase::EnemyResolving) => {
            TurnPhase::PlayerActionable
        }
        (_, phase) => phase,
    };
    if enemy.is_some() {
        screen = Screen::Battle;
    }

    let restored = Restored {
        state,
        player,
        items,
        enemy,
        screen,
        phase,
    };
    (restored, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_game_round_trips() {
        let game = Game::with_seed(10);
        let json = encode(&snapshot(&game, 0)).unwrap();
        let (restored, warnings) = decode(&json).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(restored.player, game.player);
        assert_eq!(restored.enemy, game.enemy);
        assert_eq!(restored.phase, game.phase);
        assert_eq!(restored.screen, Screen::Battle);
    }

    #[test]
    fn test_unknown_equipped_weapon_is_replaced() {
        let game = Game::with_seed(10);
        let mut value = serde_json::to_value(snapshot(&game, 0)).unwrap();
        value["player"]["currentWeapon"] = Value::String("halberd".into());
        let (restored, warnings) = decode(&value.to_string()).unwrap();
        assert_eq!(restored.player.current_weapon, WeaponKey::DEFAULT);
        assert_eq!(warnings, vec![LoadWarning::UnknownWeapon("halberd".into())]);
    }

    #[test]
    fn test_unowned_equipped_weapon_is_replaced() {
        let mut game = Game::with_seed(10);
        game.player.current_weapon = WeaponKey::Club;
        let json = encode(&snapshot(&game, 0)).unwrap();
        let (restored, warnings) = decode(&json).unwrap();
        assert_eq!(restored.player.current_weapon, WeaponKey::DEFAULT);
        assert_eq!(warnings, vec![LoadWarning::UnownedWeapon(WeaponKey::Club)]);
    }

    #[test]
    fn test_missing_ownership_map_keeps_catalog_defaults() {
        let game = Game::with_seed(10);
        let mut value = serde_json::to_value(snapshot(&game, 0)).unwrap();
        value.as_object_mut().unwrap().remove("weapons");
        let (restored, _) = decode(&value.to_string()).unwrap();
        assert_eq!(restored.player.owned_weapons, default_owned_weapons());
    }

    #[test]
    fn test_out_of_range_vitals_are_clamped() {
        let mut game = Game::with_seed(10);
        game.player.hp = 999;
        let json = encode(&snapshot(&game, 0)).unwrap();
        let (restored, warnings) = decode(&json).unwrap();
        assert_eq!(restored.player.hp, restored.player.max_hp);
        assert!(warnings.contains(&LoadWarning::VitalsClamped));
    }

    #[test]
    fn test_unknown_item_is_dropped_with_warning() {
        let game = Game::with_seed(10);
        let mut value = serde_json::to_value(snapshot(&game, 0)).unwrap();
        value["items"]["elixir"] = serde_json::json!({"count": 4});
        let (restored, warnings) = decode(&value.to_string()).unwrap();
        assert_eq!(warnings, vec![LoadWarning::UnknownItem("elixir".into())]);
        assert_eq!(restored.items, game.items);
    }

    #[test]
    fn test_turn_flag_restores_enemy_turn_without_phase() {
        let game = Game::with_seed(10);
        let mut value = serde_json::to_value(snapshot(&game, 0)).unwrap();
        value["battleState"] = serde_json::json!({"screen": "battle", "isPlayerTurn": false});
        let (restored, _) = decode(&value.to_string()).unwrap();
        assert_eq!(restored.phase, TurnPhase::EnemyDeciding);

        value["enemy"] = Value::Null;
        let (restored, _) = decode(&value.to_string()).unwrap();
        assert_eq!(restored.phase, TurnPhase::PlayerActionable);
    }

    #[test]
    fn test_garbage_is_corrupt() {
        assert!(decode("{not json").is_err());
        assert!(decode(r#"{"schemaVersion": 4}"#).is_err());
    }
}
