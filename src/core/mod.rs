pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use types::{BattleOutcome, LevelKind, Screen, StatDeltas, Target};
