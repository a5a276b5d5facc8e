//! Turn controller and command surface
//!
//! Player turn -> enemy turn -> player turn, until one side falls. The
//! enemy turn is a suspension point driven by a `TurnScheduler`.

pub mod events;
pub mod game;
pub mod phase;
pub mod scheduler;
pub mod town;

pub use events::{EventLog, EventSink, GameEvent};
pub use game::Game;
pub use phase::TurnPhase;
pub use scheduler::{run_pending, Immediate, Paced, Recording, TurnScheduler};
