//! Automated players.

use crate::game::{GameState, Ruleset};
use crate::types::Move;

/// Something that picks a move for the side to play.
pub trait Agent<R: Ruleset> {
    fn select_move(&mut self, state: &GameState<R>) -> Move;
}

/// Plays a uniformly random sensible move, and passes when there is none.
pub struct RandomBot {
    rng: fastrand::Rng,
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomBot {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// A bot whose choices are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl<R: Ruleset> Agent<R> for RandomBot {
    fn select_move(&mut self, state: &GameState<R>) -> Move {
        let candidates = state.sensible_moves();
        if candidates.is_empty() {
            return Move::Pass;
        }
        candidates[self.rng.usize(..candidates.len())]
    }
}
