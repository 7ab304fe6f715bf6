//! Bot strategy trait and the uniform random bot.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::engine::models::*;

/// A bot strategy picks the cell to play given the current board.
pub trait BotStrategy {
    fn name(&self) -> &str;

    /// Returns `None` only when the board has no empty cell.
    fn choose_cell(&mut self, board: &Board) -> Option<Position>;
}

/// Picks a uniformly random empty cell. No look-ahead, no blocking.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl BotStrategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_cell(&mut self, board: &Board) -> Option<Position> {
        let empty = board.empty_positions();
        empty.choose(&mut self.rng).copied()
    }
}
