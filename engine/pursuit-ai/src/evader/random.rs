//! Uniform random evader.

use pursuit_core::{AgentId, BeliefTracker, GameState, Move};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::policy::{policy_rng, EvaderPolicy};

/// Uniformly random legal move.
#[derive(Debug)]
pub struct RandomEvader {
    rng: ChaCha20Rng,
}

impl RandomEvader {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: policy_rng(seed),
        }
    }
}

impl EvaderPolicy for RandomEvader {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_move(&mut self, state: &GameState, _belief: &BeliefTracker) -> Option<Move> {
        let moves = state.legal_moves(AgentId::EVADER).ok()?;
        moves.choose(&mut self.rng).copied()
    }
}
