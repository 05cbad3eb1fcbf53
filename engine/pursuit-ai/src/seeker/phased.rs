//! Search mode first, a belief-driven policy after.

use pursuit_core::{AgentId, BeliefTracker, GameState, Move};

use crate::policy::SeekerPolicy;
use crate::seeker::SearchModeSeeker;

/// Plays [`SearchModeSeeker`] until the evader is first disclosed (or the
/// early-turn window closes), then hands over to `late`.
#[derive(Debug)]
pub struct PhasedSeeker {
    early: SearchModeSeeker,
    late: Box<dyn SeekerPolicy>,
}

impl PhasedSeeker {
    pub fn new(early: SearchModeSeeker, late: Box<dyn SeekerPolicy>) -> Self {
        Self { early, late }
    }

    pub fn in_search_phase(&self, state: &GameState, belief: &BeliefTracker) -> bool {
        !belief.has_disclosure() && state.turn() <= self.early.config().until_turn
    }
}

impl SeekerPolicy for PhasedSeeker {
    fn name(&self) -> &'static str {
        self.late.name()
    }

    fn choose_move(
        &mut self,
        seeker: AgentId,
        state: &GameState,
        belief: &BeliefTracker,
    ) -> Option<Move> {
        if self.in_search_phase(state, belief) {
            self.early.choose_move(seeker, state, belief)
        } else {
            self.late.choose_move(seeker, state, belief)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlannerConfig, SearchModeConfig};
    use crate::seeker::BeliefGreedySeeker;
    use pursuit_core::{demo_board, GameRules, GameSetup, StationId};
    use std::sync::Arc;

    #[test]
    fn test_switches_after_disclosure() {
        let setup = GameSetup::new(StationId(24), vec![StationId(1)]);
        let state = GameState::new(Arc::new(demo_board()), GameRules::standard(), &setup).unwrap();
        let policy = PhasedSeeker::new(
            SearchModeSeeker::new(SearchModeConfig::default(), 1),
            Box::new(BeliefGreedySeeker::new(PlannerConfig::default(), 1)),
        );
        let mut belief = BeliefTracker::default();
        assert!(policy.in_search_phase(&state, &belief));
        belief.on_reveal(StationId(24), 1);
        assert!(!policy.in_search_phase(&state, &belief));
        assert_eq!(policy.name(), "belief_greedy");
    }
}
