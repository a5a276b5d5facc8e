//! Turn phases of a battle

use serde::{Deserialize, Serialize};

use crate::core::types::BattleOutcome;

/// Turn state machine
///
/// ```text
/// PlayerActionable -> PlayerResolving -> EnemyDeciding -> EnemyResolving -> PlayerActionable
///                            \                                  \
///                             -> BattleOver(Victory)             -> BattleOver(Defeat)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    #[default]
    PlayerActionable,
    PlayerResolving,
    /// Suspension point: the enemy acts after the turn delay
    EnemyDeciding,
    EnemyResolving,
    BattleOver(BattleOutcome),
}

impl TurnPhase {
    /// Only state in which player commands are accepted
    pub fn accepts_player_action(&self) -> bool {
        matches!(self, TurnPhase::PlayerActionable)
    }

    pub fn is_player_turn(&self) -> bool {
        matches!(self, TurnPhase::PlayerActionable | TurnPhase::PlayerResolving)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, TurnPhase::BattleOver(_))
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self {
            TurnPhase::BattleOver(outcome) => Some(*outcome),
            _ => None,
        }
    }
}
