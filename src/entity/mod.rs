//! Combatant model: the persistent player, the per-battle enemy, and items

pub mod enemy;
pub mod inventory;
pub mod player;

pub use enemy::Enemy;
pub use inventory::{Inventory, ItemStock};
pub use player::{default_owned_weapons, Player};
