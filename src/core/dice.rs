//! Randomness source for game logic.
//!
//! Every random decision in the engine (dodge, crit, loot, spawn variance)
//! goes through [`Dice`]. Any `rand::Rng` works in production; tests either
//! seed a `rand_chacha::ChaCha8Rng` or script exact rolls with [`ScriptedDice`].

use rand::Rng;
use std::collections::VecDeque;

/// Uniform roll source.
pub trait Dice {
    /// Uniform value in `[0, 1)`.
    fn roll(&mut self) -> f64;

    /// Uniform index in `0..n`. `n` must be non-zero.
    fn pick(&mut self, n: usize) -> usize {
        ((self.roll() * n as f64) as usize).min(n.saturating_sub(1))
    }

    /// True with probability `chance`.
    fn chance(&mut self, chance: f64) -> bool {
        self.roll() < chance
    }
}

impl<R: Rng> Dice for R {
    fn roll(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed queue of rolls, then repeats `fallback` forever.
///
/// ```
/// use hero_idle::core::dice::{Dice, ScriptedDice};
///
/// let mut dice = ScriptedDice::new(&[0.1, 0.9]).with_fallback(0.5);
/// assert_eq!(dice.roll(), 0.1);
/// assert_eq!(dice.roll(), 0.9);
/// assert_eq!(dice.roll(), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedDice {
    pub fn new(rolls: &[f64]) -> Self {
        Self {
            rolls: rolls.iter().copied().collect(),
            fallback: 0.99,
        }
    }

    /// Dice that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(&[]).with_fallback(value)
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn push(&mut self, roll: f64) {
        self.rolls.push_back(roll);
    }

    /// Rolls still queued before the fallback kicks in.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
