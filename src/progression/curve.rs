//! Geometric experience curves
//!
//! All three tracks (character, physical, magical) share one rule: exp
//! accumulates, and while it reaches the threshold the threshold is paid
//! off, the level rises and the next threshold grows by the track's factor.
//! Overflow carries forward, so after resolution `exp < to_next` always.

pub const CHARACTER_GROWTH: f64 = 1.1;
pub const PHYSICAL_GROWTH: f64 = 1.2;
pub const MAGICAL_GROWTH: f64 = 1.15;

/// Threshold after one level-up: `floor(to_next * growth)`, never lower
pub fn next_threshold(to_next: u32, growth: f64) -> u32 {
    let grown = (to_next as f64 * growth).floor();
    (grown.min(u32::MAX as f64) as u32).max(to_next).max(1)
}

/// One experience track viewed as mutable counters
#[derive(Debug)]
pub struct ExpTrack<'a> {
    pub level: &'a mut u32,
    pub exp: &'a mut u32,
    pub to_next: &'a mut u32,
    pub growth: f64,
}

impl ExpTrack<'_> {
    /// Add exp and resolve every level it pays for; returns the new levels
    pub fn gain(&mut self, amount: u32) -> Vec<u32> {
        *self.to_next = (*self.to_next).max(1);
        *self.exp = self.exp.saturating_add(amount);

        let mut reached = Vec::new();
        while *self.exp >= *self.to_next {
            *self.exp -= *self.to_next;
            *self.level += 1;
            *self.to_next = next_threshold(*self.to_next, self.growth);
            reached.push(*self.level);
        }
        reached
    }
}
