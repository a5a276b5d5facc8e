//! Aggregate progression counters

use serde::{Deserialize, Serialize};

pub const STARTING_EXP_TO_NEXT: u32 = 100;

/// Gold, shared character level and battle count
///
/// Persists across battles; reset only on restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Gold on hand
    pub score: u32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub battle_count: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            exp: 0,
            exp_to_next: STARTING_EXP_TO_NEXT,
            battle_count: 0,
        }
    }
}

impl GameState {
    /// Spend gold if enough is on hand
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.score < amount {
            return false;
        }
        self.score -= amount;
        true
    }

    pub fn earn(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }
}
