//! Progression engine: gold, the shared character level, and the
//! independent physical and magical sub-levels

pub mod curve;
pub mod growth;
pub mod rewards;
pub mod state;

pub use curve::{next_threshold, ExpTrack, CHARACTER_GROWTH, MAGICAL_GROWTH, PHYSICAL_GROWTH};
pub use growth::{gain_magical_exp, gain_physical_exp, roll_character_grant, LevelUp};
pub use rewards::{award_victory, combo_bonus, VictoryReport};
pub use state::GameState;
