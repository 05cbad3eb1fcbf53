//! Uniform random seeker.

use pursuit_core::{AgentId, BeliefTracker, GameState, Move};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::policy::{policy_rng, SeekerPolicy};

/// Uniformly random legal move.
#[derive(Debug)]
pub struct RandomSeeker {
    rng: ChaCha20Rng,
}

impl RandomSeeker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: policy_rng(seed),
        }
    }
}

impl SeekerPolicy for RandomSeeker {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_move(
        &mut self,
        seeker: AgentId,
        state: &GameState,
        _belief: &BeliefTracker,
    ) -> Option<Move> {
        let moves = state.legal_moves(seeker).ok()?;
        moves.choose(&mut self.rng).copied()
    }
}
