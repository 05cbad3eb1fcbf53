//! Head for the most likely evader station along a planned path.

use pursuit_core::{AgentId, BeliefTracker, GameState, Move, StationId};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, warn};

use crate::config::PlannerConfig;
use crate::planner::{preferred_move, PathPlanner};
use crate::policy::{policy_rng, SeekerPolicy};

/// Targets the station with the highest belief probability, breaking ties
/// by straight-line distance to the seeker, and takes the first step of an
/// A* path to it. Stations occupied by seekers are never targeted.
#[derive(Debug)]
pub struct BeliefGreedySeeker {
    planner: PlannerConfig,
    rng: ChaCha20Rng,
}

impl BeliefGreedySeeker {
    pub fn new(planner: PlannerConfig, seed: u64) -> Self {
        Self {
            planner,
            rng: policy_rng(seed),
        }
    }

    /// Most probable unoccupied station, nearest to `from` on ties.
    pub fn target(
        state: &GameState,
        belief: &BeliefTracker,
        from: StationId,
    ) -> Option<StationId> {
        let graph = state.graph();
        let occupied = state.seeker_positions();
        let map = belief.probability_map(graph, &occupied);
        map.iter()
            .filter(|(station, _)| !occupied.contains(station))
            .max_by(|(sa, pa), (sb, pb)| {
                pa.total_cmp(pb)
                    .then_with(|| {
                        graph
                            .euclidean(**sb, from)
                            .total_cmp(&graph.euclidean(**sa, from))
                    })
                    .then_with(|| sb.cmp(sa))
            })
            .map(|(station, _)| *station)
    }
}

impl SeekerPolicy for BeliefGreedySeeker {
    fn name(&self) -> &'static str {
        "belief_greedy"
    }

    fn choose_move(
        &mut self,
        seeker: AgentId,
        state: &GameState,
        belief: &BeliefTracker,
    ) -> Option<Move> {
        let agent = state.agent(seeker).ok()?;
        let legal = state.legal_moves(seeker).ok()?;
        if legal.is_empty() {
            return None;
        }

        let planned = Self::target(state, belief, agent.station).and_then(|target| {
            let planner = PathPlanner::new(state.graph(), &self.planner);
            let path = planner.find_path(agent.station, target, &agent.tickets)?;
            let step = preferred_move(&legal, *path.get(1)?, &agent.tickets)?;
            debug!(
                agent = %seeker,
                target = %target,
                path_len = path.len(),
                next = %step.destination,
                "belief greedy step"
            );
            Some(step)
        });

        planned.or_else(|| {
            warn!(agent = %seeker, "no path to belief target, moving randomly");
            legal.choose(&mut self.rng).copied()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pursuit_core::{
        Agent, GameRules, GameSetup, Outcome, TicketInventory, TransportGraph, TransportType::*,
    };
    use std::sync::Arc;

    fn square() -> Arc<TransportGraph> {
        Arc::new(
            TransportGraph::from_records(
                &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 1.0, 1.0), (4, 0.0, 1.0)],
                &[(1, 2, Taxi), (2, 3, Taxi), (3, 4, Taxi), (4, 1, Taxi)],
            )
            .unwrap(),
        )
    }

    fn scenario_a() -> GameState {
        let rules = GameRules::standard().with_reveal_turns(vec![]);
        let evader = Agent::evader(StationId(1), TicketInventory::new(1, 0, 0, 0));
        let seeker = Agent::seeker(1, StationId(3), TicketInventory::new(1, 0, 0, 0));
        GameState::from_agents(square(), rules, evader, vec![seeker]).unwrap()
    }

    #[test]
    fn test_scenario_a_plans_two_step_path_and_captures_on_meeting() {
        let mut state = scenario_a();
        let mut disclosed = BeliefTracker::default();
        disclosed.on_reveal(StationId(1), 1);

        let planner = PathPlanner::new(state.graph(), &PlannerConfig::default());
        let path = planner
            .find_path(StationId(3), StationId(1), &state.seekers()[0].tickets)
            .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(&StationId(3)));
        assert_eq!(path.last(), Some(&StationId(1)));

        let mut policy = BeliefGreedySeeker::new(PlannerConfig::default(), 1);
        let mv = policy.choose_move(AgentId(1), &state, &disclosed).unwrap();
        assert!([StationId(2), StationId(4)].contains(&mv.destination));
        assert_eq!(mv.destination, path[1]);

        state
            .apply_move(AgentId::EVADER, Move::new(StationId(2), Taxi))
            .unwrap();
        state.apply_move(AgentId(1), mv).unwrap();
        let met = mv.destination == StationId(2);
        assert_eq!(state.is_over(), met);
        if met {
            assert!(matches!(state.outcome(), Outcome::Captured { by: AgentId(1), .. }));
        }
    }

    #[test]
    fn test_scenario_a_other_branch_does_not_capture() {
        let mut state = scenario_a();
        state
            .apply_move(AgentId::EVADER, Move::new(StationId(2), Taxi))
            .unwrap();
        state
            .apply_move(AgentId(1), Move::new(StationId(4), Taxi))
            .unwrap();
        assert_eq!(state.outcome(), Outcome::Running);
    }

    #[test]
    fn test_target_prefers_nearest_on_ties() {
        let graph = Arc::new(
            TransportGraph::from_records(
                &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 2.0, 0.0), (4, 3.0, 0.0), (5, 4.0, 0.0)],
                &[(1, 2, Taxi), (2, 3, Taxi), (3, 4, Taxi), (4, 5, Taxi)],
            )
            .unwrap(),
        );
        let setup = GameSetup::new(StationId(5), vec![StationId(3)]);
        let state = GameState::new(graph, GameRules::standard(), &setup).unwrap();
        // uniform belief: nearest unoccupied stations are 2 and 4, lower id wins
        let target = BeliefGreedySeeker::target(&state, state.belief(), StationId(3));
        assert_eq!(target, Some(StationId(2)));
    }

    #[test]
    fn test_falls_back_when_no_path() {
        let graph = Arc::new(
            TransportGraph::from_records(
                &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 9.0, 0.0), (4, 10.0, 0.0)],
                &[(1, 2, Taxi), (3, 4, Taxi)],
            )
            .unwrap(),
        );
        let setup = GameSetup::new(StationId(4), vec![StationId(1)]);
        let state = GameState::new(graph, GameRules::standard(), &setup).unwrap();
        let mut belief = BeliefTracker::default();
        belief.on_reveal(StationId(4), 1);
        let mut policy = BeliefGreedySeeker::new(PlannerConfig::default(), 3);
        let mv = policy.choose_move(AgentId(1), &state, &belief).unwrap();
        assert_eq!(mv.destination, StationId(2));
    }
}
