//! Strategy interfaces shared by every bot.

use pursuit_core::{AgentId, BeliefTracker, GameState, Move};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::fmt;

/// Decision maker for the evader. The evader sees the full state.
pub trait EvaderPolicy: Send + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Pick one legal evader move, or `None` if there is none.
    fn choose_move(&mut self, state: &GameState, belief: &BeliefTracker) -> Option<Move>;
}

/// Decision maker for a seeker.
///
/// Implementations read the evader's position only through `belief`.
pub trait SeekerPolicy: Send + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Pick one legal move for `seeker`, or `None` if there is none.
    fn choose_move(
        &mut self,
        seeker: AgentId,
        state: &GameState,
        belief: &BeliefTracker,
    ) -> Option<Move>;
}

/// Policy RNG from a seed, where 0 means "seed from the OS".
pub fn policy_rng(seed: u64) -> ChaCha20Rng {
    if seed == 0 {
        ChaCha20Rng::from_entropy()
    } else {
        ChaCha20Rng::seed_from_u64(seed)
    }
}
