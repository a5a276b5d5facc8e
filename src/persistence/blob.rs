//! Save blob layout (current schema)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::battle::TurnPhase;
use crate::core::types::Screen;
use crate::entity::{Enemy, ItemStock, Player};
use crate::progression::GameState;

pub const CURRENT_SCHEMA_VERSION: u32 = 4;

/// Name of the single save slot
pub const SAVE_SLOT_NAME: &str = "epic-battle-save";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponOwnership {
    pub owned: bool,
}

/// Which screen and turn the session was on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattleStateTag {
    pub screen: Screen,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<TurnPhase>,
    /// Whose turn it was; the only turn record in tags written without `phase`
    pub is_player_turn: bool,
}

impl Default for BattleStateTag {
    fn default() -> Self {
        Self {
            screen: Screen::Battle,
            phase: None,
            is_player_turn: true,
        }
    }
}

impl BattleStateTag {
    pub fn new(screen: Screen, phase: TurnPhase) -> Self {
        Self {
            screen,
            phase: Some(phase),
            is_player_turn: phase.is_player_turn(),
        }
    }

    /// The saved phase, or the turn flag's phase when none was written
    pub fn resolved_phase(&self) -> TurnPhase {
        match self.phase {
            Some(phase) => phase,
            None if self.is_player_turn => TurnPhase::PlayerActionable,
            None => TurnPhase::EnemyDeciding,
        }
    }
}

/// One point-in-time snapshot of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBlob {
    pub schema_version: u32,
    #[serde(default)]
    pub game_version: String,
    /// Unix seconds
    #[serde(default)]
    pub saved_at: u64,
    pub game_state: GameState,
    pub player: Player,
    /// Item counts by item key. Keys stay strings so a retired item does not
    /// fail the whole load.
    pub items: BTreeMap<String, ItemStock>,
    /// Ownership per weapon key; absent in saves that predate buying weapons.
    /// Keys stay strings so a retired weapon does not fail the whole load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapons: Option<BTreeMap<String, WeaponOwnership>>,
    #[serde(default)]
    pub enemy: Option<Enemy>,
    #[serde(default)]
    pub battle_state: BattleStateTag,
}
