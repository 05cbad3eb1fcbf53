//! Monte Carlo evaluation of seeker moves under belief uncertainty.
//!
//! For every legal move, many short continuations are simulated on private
//! snapshots. Each one draws the evader's position from the belief map; the
//! evader then wanders randomly while the seekers close in, greedily with
//! probability `greedy_probability` and randomly otherwise. A capture after
//! `r` simulated rounds scores `discount^r`.

use pursuit_core::{
    AgentId, BeliefTracker, GameState, Move, MoverSnapshot, StationId, TransportGraph,
};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace, warn};

use crate::config::MonteCarloConfig;
use crate::policy::{policy_rng, SeekerPolicy};
use crate::sim::{greedy_step, random_step, sample_weighted, SimWorld};

const SCORE_EPSILON: f64 = 1e-12;

#[derive(Debug)]
pub struct MonteCarloSeeker {
    config: MonteCarloConfig,
    rng: ChaCha20Rng,
}

impl MonteCarloSeeker {
    pub fn new(mut config: MonteCarloConfig, seed: u64) -> Self {
        let p = config.greedy_probability;
        config.greedy_probability = if p.is_finite() {
            p.clamp(0.0, 1.0)
        } else {
            let fallback = MonteCarloConfig::default().greedy_probability;
            warn!(value = p, fallback, "non-finite greedy probability");
            fallback
        };
        Self {
            config,
            rng: policy_rng(seed),
        }
    }

    fn move_seeker(&mut self, graph: &TransportGraph, seeker: &mut MoverSnapshot, target: StationId) {
        if self.rng.gen_bool(self.config.greedy_probability) {
            greedy_step(graph, seeker, target);
        } else {
            random_step(graph, seeker, &mut self.rng);
        }
    }

    /// One continuation after `acting` plays `mv`. Seekers that have already
    /// moved this round stay put during round 0.
    fn simulate(
        &mut self,
        state: &GameState,
        acting: usize,
        mv: Move,
        belief_map: &[(StationId, f64)],
    ) -> f64 {
        let graph = state.graph();
        let mut world = SimWorld::from_state(state);
        let Some(evader_at) = sample_weighted(belief_map, &mut self.rng) else {
            return 0.0;
        };
        world.evader.station = evader_at;

        world.seekers[acting].advance(mv);
        if world.captured() {
            return 1.0;
        }
        for (i, seeker) in state.seekers().iter().enumerate() {
            if i == acting || seeker.moved_this_turn || !seeker.controlled {
                continue;
            }
            self.move_seeker(graph, &mut world.seekers[i], evader_at);
        }
        if world.captured() {
            return 1.0;
        }

        let mut weight = 1.0;
        for _ in 0..self.config.depth {
            weight *= self.config.discount;
            random_step(graph, &mut world.evader, &mut self.rng);
            if world.captured() {
                return weight;
            }
            let target = world.evader.station;
            for seeker in &mut world.seekers {
                self.move_seeker(graph, seeker, target);
            }
            if world.captured() {
                return weight;
            }
        }
        0.0
    }
}

impl SeekerPolicy for MonteCarloSeeker {
    fn name(&self) -> &'static str {
        "monte_carlo"
    }

    fn choose_move(
        &mut self,
        seeker: AgentId,
        state: &GameState,
        belief: &BeliefTracker,
    ) -> Option<Move> {
        let legal = state.legal_moves(seeker).ok()?;
        if legal.is_empty() {
            return None;
        }
        let acting = SimWorld::seeker_index(seeker)?;
        let belief_map: Vec<(StationId, f64)> = belief
            .probability_map(state.graph(), &state.seeker_positions())
            .into_iter()
            .collect();
        if belief_map.is_empty() {
            return legal.choose(&mut self.rng).copied();
        }

        let sims = self.config.simulations.max(1);
        let mut scored = Vec::with_capacity(legal.len());
        for &mv in &legal {
            let total: f64 = (0..sims)
                .map(|_| self.simulate(state, acting, mv, &belief_map))
                .sum();
            let score = total / sims as f64;
            trace!(agent = %seeker, destination = %mv.destination, score, "monte carlo candidate");
            scored.push((mv, score));
        }

        let best = scored
            .iter()
            .map(|(_, s)| *s)
            .fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<Move> = scored
            .iter()
            .filter(|(_, s)| best - *s <= SCORE_EPSILON)
            .map(|(m, _)| *m)
            .collect();
        let chosen = tied.choose(&mut self.rng).copied();
        if let Some(mv) = chosen {
            debug!(agent = %seeker, destination = %mv.destination, score = best, "monte carlo move");
        }
        chosen
    }
}
