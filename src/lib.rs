//! Epic Battle - turn-based battle and progression engine
//!
//! A pure game core: commands go in, `GameEvent`s come out. Rendering,
//! audio and input live in adapters such as the bundled text front end.

pub mod battle;
pub mod catalog;
pub mod combat;
pub mod core;
pub mod entity;
pub mod persistence;
pub mod progression;
