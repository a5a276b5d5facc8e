//! Turn delay scheduling
//!
//! The engine only reports how long the enemy "thinks". A scheduler decides
//! what waiting means: real sleeps for play, nothing at all for tests and
//! replays.

use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

use crate::battle::game::Game;
use crate::core::Result;

pub trait TurnScheduler {
    fn pause(&mut self, delay: Duration);
}

/// Resolves enemy turns without waiting
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl TurnScheduler for Immediate {
    fn pause(&mut self, _delay: Duration) {}
}

/// Waits out each delay on a single-threaded tokio timer
#[derive(Debug)]
pub struct Paced {
    runtime: Runtime,
}

impl Paced {
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_time().build()?;
        Ok(Self { runtime })
    }
}

impl TurnScheduler for Paced {
    fn pause(&mut self, delay: Duration) {
        self.runtime.block_on(tokio::time::sleep(delay));
    }
}

/// Records requested delays without waiting
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub pauses: Vec<Duration>,
}

impl TurnScheduler for Recording {
    fn pause(&mut self, delay: Duration) {
        self.pauses.push(delay);
    }
}

/// Run every pending enemy turn; returns how many resolved
pub fn run_pending(game: &mut Game, scheduler: &mut impl TurnScheduler) -> usize {
    let mut resolved = 0;
    while let Some(delay) = game.pending_delay() {
        scheduler.pause(delay);
        if !game.advance_turn() {
            break;
        }
        resolved += 1;
    }
    resolved
}
