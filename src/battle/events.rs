//! Outbound events for the presentation layer
//!
//! The engine never calls into rendering. It appends `GameEvent`s to its
//! log and the adapter drains them, or forwards them into an `EventSink`.

use serde::{Deserialize, Serialize};

use crate::catalog::WoundChannel;
use crate::core::types::{BattleOutcome, LevelKind, StatDeltas, Target};
use crate::progression::VictoryReport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    Damage {
        target: Target,
        amount: u32,
        critical: bool,
        heal: bool,
    },
    Wound {
        channel: WoundChannel,
        count: u32,
    },
    LevelUp {
        kind: LevelKind,
        level: u32,
        deltas: StatDeltas,
    },
    BattleEnd {
        outcome: BattleOutcome,
        /// Present on victory
        rewards: Option<VictoryReport>,
    },
    Log(String),
    /// A command was refused; state is unchanged
    Rejected {
        reason: String,
    },
}

/// Anything that consumes game events
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Events produced since the last drain
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.events.push(GameEvent::Log(message.into()));
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}
