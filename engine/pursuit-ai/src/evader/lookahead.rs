//! Depth-first safety lookahead.
//!
//! Seeker reach is forecast a few rounds ahead. A station reached on step
//! `k` of a candidate path is safe when the evader's hop distance to it from
//! its current position is strictly smaller than the distance from the
//! nearest station the seekers could occupy after `k - 1` rounds. Paths are
//! scored per step (safety and clearance) plus a bonus for the final
//! station's branching, transport diversity and clearance at the forecast
//! horizon. The first move of the best path is played.

use pursuit_core::{
    legal_moves, AgentId, BeliefTracker, GameState, Move, MoverSnapshot, StationId, TransportGraph,
};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::config::LookaheadConfig;
use crate::planner::distinct_destinations;
use crate::policy::{policy_rng, EvaderPolicy};
use crate::predict::SeekerForecast;

#[derive(Debug)]
pub struct SafetyLookaheadEvader {
    config: LookaheadConfig,
    rng: ChaCha20Rng,
}

impl SafetyLookaheadEvader {
    pub fn new(config: LookaheadConfig, seed: u64) -> Self {
        Self {
            config,
            rng: policy_rng(seed),
        }
    }
}

impl EvaderPolicy for SafetyLookaheadEvader {
    fn name(&self) -> &'static str {
        "lookahead"
    }

    fn choose_move(&mut self, state: &GameState, _belief: &BeliefTracker) -> Option<Move> {
        let legal = state.legal_moves(AgentId::EVADER).ok()?;
        if legal.is_empty() {
            return None;
        }
        let graph = state.graph();
        let evader = state.evader();
        let forecast = SeekerForecast::new(
            graph,
            &state.seeker_positions(),
            self.config.prediction_depth,
        );

        let mut search = PathSearch {
            graph,
            config: &self.config,
            forecast: &forecast,
            origin: graph.distances_from(evader.station),
            clearance_cap: graph.station_count() as u32,
            visits: HashMap::from([(evader.station, 1)]),
            first: None,
            nodes: 0,
            best: None,
        };
        search.dfs(MoverSnapshot::new(evader.station, evader.tickets), 0, 0.0);

        if let Some((score, mv)) = search.best {
            debug!(
                destination = %mv.destination,
                transport = %mv.transport,
                score,
                nodes = search.nodes,
                "lookahead move"
            );
            return Some(mv);
        }

        let safest = legal
            .iter()
            .map(|m| (forecast.threat_distance(m.destination, 0), *m))
            .max_by_key(|(d, m)| (*d, std::cmp::Reverse(m.destination)));
        match safest {
            Some((d, mv)) if d > 0 => Some(mv),
            _ => legal.choose(&mut self.rng).copied(),
        }
    }
}

struct PathSearch<'a> {
    graph: &'a TransportGraph,
    config: &'a LookaheadConfig,
    forecast: &'a SeekerForecast,
    origin: Arc<HashMap<StationId, u32>>,
    clearance_cap: u32,
    visits: HashMap<StationId, u32>,
    first: Option<Move>,
    nodes: usize,
    best: Option<(f64, Move)>,
}

impl PathSearch<'_> {
    fn is_safe(&self, station: StationId, step: usize) -> bool {
        let own = self.origin.get(&station).copied().unwrap_or(u32::MAX);
        own < self.forecast.threat_distance(station, step.saturating_sub(1))
    }

    fn clearance(&self, station: StationId, round: usize) -> f64 {
        self.forecast
            .threat_distance(station, round)
            .min(self.clearance_cap) as f64
    }

    fn step_score(&self, station: StationId, step: usize) -> f64 {
        let safety = if self.is_safe(station, step) {
            self.config.safe_step_reward
        } else {
            -self.config.unsafe_step_penalty
        };
        safety + self.config.distance_weight * self.clearance(station, step.saturating_sub(1))
    }

    fn terminal_bonus(&self, station: StationId) -> f64 {
        self.config.branching_weight * self.graph.degree(station) as f64
            + self.config.diversity_weight * self.graph.transport_types(station).len() as f64
            + self.config.final_distance_weight * self.clearance(station, self.forecast.depth())
    }

    fn record(&mut self, station: StationId, score: f64) {
        let Some(first) = self.first else {
            return;
        };
        let total = score + self.terminal_bonus(station);
        if self.best.map_or(true, |(best, _)| total > best) {
            trace!(station = %station, total, "new best lookahead path");
            self.best = Some((total, first));
        }
    }

    fn dfs(&mut self, mover: MoverSnapshot, steps: usize, score: f64) {
        if self.nodes >= self.config.max_nodes {
            return;
        }
        self.nodes += 1;
        if steps >= self.config.path_limit() {
            self.record(mover.station, score);
            return;
        }

        let step = steps + 1;
        let mut candidates: Vec<(bool, bool, u32, Move)> =
            distinct_destinations(&legal_moves(self.graph, &mover), &mover.tickets)
                .into_iter()
                .filter_map(|m| {
                    let seen = self.visits.get(&m.destination).copied().unwrap_or(0);
                    (seen < self.config.max_revisits).then(|| {
                        (
                            self.is_safe(m.destination, step),
                            seen == 0,
                            self.forecast
                                .threat_distance(m.destination, steps),
                            m,
                        )
                    })
                })
                .collect();
        if candidates.is_empty() {
            self.record(mover.station, score);
            return;
        }
        // safe first, then unvisited, then by clearance
        candidates.sort_by(|a, b| {
            (b.0, b.1, b.2, a.3.destination).cmp(&(a.0, a.1, a.2, b.3.destination))
        });

        for (_, _, _, mv) in candidates {
            let mut next = mover;
            if !next.advance(mv) {
                continue;
            }
            let is_root = steps == 0;
            if is_root {
                self.first = Some(mv);
            }
            *self.visits.entry(mv.destination).or_insert(0) += 1;
            let gained = self.step_score(mv.destination, step);
            self.dfs(next, step, score + gained);
            if let Some(v) = self.visits.get_mut(&mv.destination) {
                *v -= 1;
            }
            if is_root {
                self.first = None;
            }
        }
    }
}
