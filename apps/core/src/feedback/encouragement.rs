//! Canned encouragement with an injectable random source.
//!
//! The draw is the engine's only non-deterministic step, so it goes through
//! [`RandomSource`] and tests can pin the outcome.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of uniform indices
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..len`. Only called with `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Thread-local OS-seeded randomness
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible randomness from a fixed seed
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, len: usize) -> usize {
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..len)
    }
}

/// Always picks the same index (wrapped into range)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedChoice(pub usize);

impl RandomSource for FixedChoice {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

/// Built-in encouragement lines
pub fn builtin_encouragements() -> Vec<String> {
    [
        "Great effort! Keep practising and you'll see steady progress.",
        "You're doing well. Every conversation makes you more confident.",
        "Nice work! Your English is getting clearer each time.",
        "Well done. Keep speaking, and don't be afraid of mistakes.",
        "Good job! Consistency is the key to fluency.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Draws one line; empty string when the list is empty.
pub fn draw(lines: &[String], rng: &dyn RandomSource) -> String {
    if lines.is_empty() {
        return String::new();
    }
    // Guard against sources that ignore the contract
    let idx = rng.pick(lines.len()) % lines.len();
    lines[idx].clone()
}
