//! Private, copyable simulation state for rollouts.
//!
//! Simulations never touch the authoritative [`GameState`]; they work on
//! [`MoverSnapshot`] copies of positions and tickets.
//!
//! [`GameState`]: pursuit_core::GameState

use pursuit_core::{legal_moves, AgentId, GameState, MoverSnapshot, StationId, TransportGraph};
use rand::distributions::WeightedIndex;
use rand::prelude::*;

use crate::planner::preferred_move;

/// Positions and tickets of every agent in one simulated continuation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimWorld {
    pub evader: MoverSnapshot,
    pub seekers: Vec<MoverSnapshot>,
}

impl SimWorld {
    /// Copy the live positions and tickets out of `state`.
    pub fn from_state(state: &GameState) -> Self {
        Self {
            evader: MoverSnapshot::new(state.evader().station, state.evader().tickets),
            seekers: state
                .seekers()
                .iter()
                .map(|a| MoverSnapshot::new(a.station, a.tickets))
                .collect(),
        }
    }

    /// Index into `seekers` for an agent id.
    pub fn seeker_index(id: AgentId) -> Option<usize> {
        id.0.checked_sub(1)
    }

    pub fn captured(&self) -> bool {
        self.seekers.iter().any(|s| s.station == self.evader.station)
    }

    /// Hop distance from the evader to the nearest seeker.
    pub fn min_seeker_distance(&self, graph: &TransportGraph) -> u32 {
        self.seekers
            .iter()
            .map(|s| graph.distance_or(self.evader.station, s.station, u32::MAX))
            .min()
            .unwrap_or(u32::MAX)
    }
}

/// Take a uniformly random legal step. Stays put and returns false if the
/// mover has no legal move.
pub fn random_step<R: Rng + ?Sized>(
    graph: &TransportGraph,
    mover: &mut MoverSnapshot,
    rng: &mut R,
) -> bool {
    let moves = legal_moves(graph, mover);
    match moves.choose(rng) {
        Some(&mv) => mover.advance(mv),
        None => false,
    }
}

/// Step along the legal move that minimises hop distance to `target`.
///
/// Ties go to the lowest station id, using the most plentiful ticket.
pub fn greedy_step(graph: &TransportGraph, mover: &mut MoverSnapshot, target: StationId) -> bool {
    let moves = legal_moves(graph, mover);
    let best = moves
        .iter()
        .min_by_key(|m| (graph.distance_or(m.destination, target, u32::MAX), m.destination))
        .and_then(|m| preferred_move(&moves, m.destination, &mover.tickets));
    match best {
        Some(mv) => mover.advance(mv),
        None => false,
    }
}

/// Draw one item with probability proportional to its weight.
///
/// Non-finite and negative weights count as zero. Returns `None` if nothing
/// has positive weight.
pub fn sample_weighted<T: Copy, R: Rng + ?Sized>(items: &[(T, f64)], rng: &mut R) -> Option<T> {
    let weights = items
        .iter()
        .map(|(_, w)| if w.is_finite() && *w > 0.0 { *w } else { 0.0 });
    let dist = WeightedIndex::new(weights).ok()?;
    Some(items[dist.sample(rng)].0)
}
