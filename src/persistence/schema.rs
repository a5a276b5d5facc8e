//! Schema versions and the upgrade chain
//!
//! | Version | Adds |
//! |---|---|
//! | 1 | no `schemaVersion`; flat player `attack`, flat enemy `defense` |
//! | 2 | split physical/magical player stats, sub-levels, `currentWeapon` |
//! | 3 | enemy wounds, defense baselines and weaknesses |
//! | 4 | `battleState` screen tag |
//!
//! Each step is a pure function on the raw JSON object, so a blob of any
//! supported version reaches the current shape before typed decoding.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::catalog::{template_by_name, WeaponKey};
use crate::combat::Wounds;
use crate::core::{GameError, Result};
use crate::entity::Player;
use crate::persistence::blob::CURRENT_SCHEMA_VERSION;
use crate::progression::GameState;

type Upgrader = fn(&mut Map<String, Value>);

/// `UPGRADERS[n - 1]` lifts version n to n + 1
const UPGRADERS: [Upgrader; (CURRENT_SCHEMA_VERSION - 1) as usize] =
    [v1_to_v2, v2_to_v3, v3_to_v4];

fn corrupt(message: &str) -> GameError {
    GameError::CorruptSave(<serde_json::Error as serde::de::Error>::custom(message))
}

/// Version recorded in a blob; absent means version 1
pub fn detect_version(blob: &Map<String, Value>) -> Result<u32> {
    match blob.get("schemaVersion") {
        None | Some(Value::Null) => Ok(1),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v >= 1)
            .ok_or_else(|| corrupt("schemaVersion must be a positive integer")),
        Some(_) => Err(corrupt("schemaVersion must be a positive integer")),
    }
}

/// Bring a raw blob up to the current schema; returns it with its original version
pub fn upgrade(value: Value) -> Result<(Value, u32)> {
    let Value::Object(mut blob) = value else {
        return Err(corrupt("save blob must be a JSON object"));
    };

    let found = detect_version(&blob)?;
    if found > CURRENT_SCHEMA_VERSION {
        return Err(GameError::UnsupportedSchema {
            found,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    for version in found..CURRENT_SCHEMA_VERSION {
        debug!(from = version, to = version + 1, "upgrading save");
        UPGRADERS[(version - 1) as usize](&mut blob);
    }
    blob.insert("schemaVersion".into(), json!(CURRENT_SCHEMA_VERSION));
    Ok((Value::Object(blob), found))
}

/// Insert every key of `defaults` missing from `target`
fn fill_missing(target: &mut Map<String, Value>, defaults: Value) {
    if let Value::Object(defaults) = defaults {
        for (key, value) in defaults {
            target.entry(key).or_insert(value);
        }
    }
}

fn object_mut<'a>(
    blob: &'a mut Map<String, Value>,
    key: &str,
) -> Option<&'a mut Map<String, Value>> {
    blob.get_mut(key).and_then(Value::as_object_mut)
}

/// Player `attack` becomes `physicalAttack`; magic stats, sub-levels and the
/// equipped weapon appear with starting values.
fn v1_to_v2(blob: &mut Map<String, Value>) {
    if let Some(player) = object_mut(blob, "player") {
        if let Some(attack) = player.remove("attack") {
            player.entry("physicalAttack").or_insert(attack);
        }
        player.remove("level");
        fill_missing(player, serde_json::to_value(Player::default()).unwrap_or(Value::Null));
        player
            .entry("currentWeapon")
            .or_insert(json!(WeaponKey::DEFAULT.as_str()));
    }
    if let Some(state) = object_mut(blob, "gameState") {
        fill_missing(state, serde_json::to_value(GameState::default()).unwrap_or(Value::Null));
    }
    blob.entry("items").or_insert_with(|| json!({}));
}

/// Enemies gain zeroed wounds, baselines from the flat `defense`, and the
/// species' weaknesses looked up by name.
fn v2_to_v3(blob: &mut Map<String, Value>) {
    let Some(enemy) = object_mut(blob, "enemy") else {
        return;
    };

    let legacy_defense = enemy
        .remove("defense")
        .and_then(|defense| defense.as_u64())
        .unwrap_or(1);
    for key in [
        "basePhysicalDefense",
        "baseMagicalDefense",
        "currentPhysicalDefense",
        "currentMagicalDefense",
    ] {
        enemy.entry(key).or_insert(json!(legacy_defense));
    }

    enemy
        .entry("wounds")
        .or_insert_with(|| serde_json::to_value(Wounds::default()).unwrap_or(Value::Null));

    if !enemy.contains_key("weaknesses") {
        let weaknesses = enemy
            .get("name")
            .and_then(Value::as_str)
            .and_then(template_by_name)
            .map(|template| template.weaknesses())
            .unwrap_or_default();
        enemy.insert(
            "weaknesses".into(),
            serde_json::to_value(weaknesses).unwrap_or(Value::Null),
        );
    }

    if !enemy.contains_key("maxHp") {
        let hp = enemy.get("hp").cloned().unwrap_or(json!(1));
        enemy.insert("maxHp".into(), hp);
    }
    enemy.entry("sprite").or_insert(json!(""));
    enemy.entry("exp").or_insert(json!(0));
    enemy.entry("gold").or_insert(json!(0));
}

/// Blobs without a screen tag resume on the battle screen
fn v3_to_v4(blob: &mut Map<String, Value>) {
    blob.entry("battleState").or_insert_with(|| {
        json!({
            "screen": "battle",
            "phase": "player_actionable",
            "isPlayerTurn": true,
        })
    });
}
