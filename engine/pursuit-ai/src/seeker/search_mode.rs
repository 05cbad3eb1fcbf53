//! Early-game positioning before the evader has been seen.

use pursuit_core::{AgentId, BeliefTracker, GameState, Move, StationId, TransportGraph};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

use crate::config::SearchModeConfig;
use crate::planner::preferred_move;
use crate::policy::{policy_rng, SeekerPolicy};

/// Heads for the best-connected station within a few hops, a cheap proxy
/// for a central position. With no hub in range it moves randomly.
#[derive(Debug, Clone)]
pub struct SearchModeSeeker {
    config: SearchModeConfig,
    rng: ChaCha20Rng,
}

impl SearchModeSeeker {
    pub fn new(config: SearchModeConfig, seed: u64) -> Self {
        Self {
            config,
            rng: policy_rng(seed),
        }
    }

    pub fn config(&self) -> &SearchModeConfig {
        &self.config
    }

    /// Highest-degree station within `depth` hops of `from`, excluding
    /// `from` itself. Ties go to the nearer, then lower-numbered station.
    pub fn hub_near(graph: &TransportGraph, from: StationId, depth: usize) -> Option<StationId> {
        let mut seen: HashMap<StationId, usize> = HashMap::from([(from, 0)]);
        let mut queue = VecDeque::from([from]);
        while let Some(current) = queue.pop_front() {
            let d = seen[&current];
            if d >= depth {
                continue;
            }
            for &(next, _) in graph.neighbors(current) {
                if !seen.contains_key(&next) {
                    seen.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
        seen.into_iter()
            .filter(|(s, _)| *s != from)
            .max_by(|(sa, da), (sb, db)| {
                graph
                    .degree(*sa)
                    .cmp(&graph.degree(*sb))
                    .then_with(|| db.cmp(da))
                    .then_with(|| sb.cmp(sa))
            })
            .map(|(s, _)| s)
    }
}

impl SeekerPolicy for SearchModeSeeker {
    fn name(&self) -> &'static str {
        "search_mode"
    }

    fn choose_move(
        &mut self,
        seeker: AgentId,
        state: &GameState,
        _belief: &BeliefTracker,
    ) -> Option<Move> {
        let agent = state.agent(seeker).ok()?;
        let legal = state.legal_moves(seeker).ok()?;
        let graph = state.graph();
        let Some(hub) = Self::hub_near(graph, agent.station, self.config.depth) else {
            debug!(agent = %seeker, "no hub in range, moving randomly");
            return legal.choose(&mut self.rng).copied();
        };
        let closest = legal
            .iter()
            .min_by(|a, b| {
                graph
                    .euclidean(a.destination, hub)
                    .total_cmp(&graph.euclidean(b.destination, hub))
                    .then_with(|| a.destination.cmp(&b.destination))
            })?
            .destination;
        let mv = preferred_move(&legal, closest, &agent.tickets)?;
        debug!(agent = %seeker, hub = %hub, next = %mv.destination, "search mode step");
        Some(mv)
    }
}
