//! Multi-hit damage split

use rand::Rng;

/// Split `total` into `hit_count` shares
///
/// Each share is `floor(total / hit_count)`; the remainder goes one point
/// each to the first hits. Shares sum to `total`. A zero hit count is
/// treated as one hit.
pub fn split_damage(total: u32, hit_count: u32) -> Vec<u32> {
    let hits = hit_count.max(1);
    let base = total / hits;
    let remainder = total % hits;
    (0..hits)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Nudge every share by -1, 0 or +1, never below 1
pub fn jitter_hits(shares: &[u32], rng: &mut impl Rng) -> Vec<u32> {
    shares
        .iter()
        .map(|&share| {
            let offset: i64 = rng.gen_range(-1..=1);
            (share as i64 + offset).max(1) as u32
        })
        .collect()
}
