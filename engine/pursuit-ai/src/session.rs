//! Turn driver tying the game state to human or bot controllers.
//!
//! A [`Session`] performs one agent decision per [`Session::step`]. Agents
//! without a legal move are passed automatically; human-controlled agents
//! park the session until [`Session::submit_human_move`] is called.

use pursuit_core::{AgentId, GameError, GameState, Move, Outcome, PublicView, StationId};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::policy::{EvaderPolicy, SeekerPolicy};
use crate::predict::predict_seeker_reach;

/// Who decides for an agent.
#[derive(Debug)]
pub enum Controller<P> {
    Human,
    Bot(P),
}

impl<P> Controller<P> {
    pub fn is_human(&self) -> bool {
        matches!(self, Controller::Human)
    }
}

pub type EvaderController = Controller<Box<dyn EvaderPolicy>>;
pub type SeekerController = Controller<Box<dyn SeekerPolicy>>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("waiting for a human move for {agent}")]
    AwaitingHumanInput { agent: AgentId },

    #[error("{agent} is not controlled by a human")]
    NotHuman { agent: AgentId },

    #[error("expected {expected} seeker controllers, got {actual}")]
    ControllerCount { expected: usize, actual: usize },

    #[error("game did not finish within {0} steps")]
    StepLimit(usize),
}

/// Result of one [`Session::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepEvent {
    Moved { agent: AgentId, mv: Move },
    Passed { agent: AgentId },
    AwaitingHuman { agent: AgentId, legal: Vec<Move> },
    Finished(Outcome),
}

#[derive(Debug)]
pub struct Session {
    state: GameState,
    evader: EvaderController,
    seekers: Vec<SeekerController>,
    steps: usize,
}

impl Session {
    /// One controller per seeker, in seeker id order.
    pub fn new(
        state: GameState,
        evader: EvaderController,
        seekers: Vec<SeekerController>,
    ) -> Result<Self, SessionError> {
        let expected = state.seekers().len();
        if seekers.len() != expected {
            return Err(SessionError::ControllerCount {
                expected,
                actual: seekers.len(),
            });
        }
        Ok(Self {
            state,
            evader,
            seekers,
            steps: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Hand the state back, e.g. for post-game inspection.
    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn public_view(&self) -> PublicView {
        self.state.public_view()
    }

    /// Per-seeker reach sets for the next `depth` rounds.
    pub fn predictions(&self, depth: usize) -> Vec<Vec<BTreeSet<StationId>>> {
        predict_seeker_reach(self.state.graph(), &self.state.seeker_positions(), depth)
    }

    fn is_human(&self, agent: AgentId) -> bool {
        if agent.is_evader() {
            self.evader.is_human()
        } else {
            self.seekers
                .get(agent.0 - 1)
                .is_some_and(Controller::is_human)
        }
    }

    /// Perform at most one agent decision.
    pub fn step(&mut self) -> Result<StepEvent, SessionError> {
        let Some(agent) = self.state.awaiting() else {
            return Ok(StepEvent::Finished(self.state.outcome()));
        };
        let legal = self.state.legal_moves(agent)?;
        if legal.is_empty() {
            self.state.pass(agent)?;
            self.steps += 1;
            debug!(agent = %agent, "no legal move, passing");
            return Ok(StepEvent::Passed { agent });
        }

        let belief = self.state.belief();
        let decision = if agent.is_evader() {
            match &mut self.evader {
                Controller::Human => None,
                Controller::Bot(policy) => Some(policy.choose_move(&self.state, belief)),
            }
        } else {
            match self.seekers.get_mut(agent.0 - 1) {
                Some(Controller::Bot(policy)) => {
                    Some(policy.choose_move(agent, &self.state, belief))
                }
                Some(Controller::Human) => None,
                None => return Err(GameError::UnknownAgent(agent).into()),
            }
        };

        let mv = match decision {
            None => return Ok(StepEvent::AwaitingHuman { agent, legal }),
            Some(Some(mv)) => mv,
            Some(None) => {
                warn!(agent = %agent, "policy returned no move, taking the first legal one");
                legal[0]
            }
        };
        self.state.apply_move(agent, mv)?;
        self.steps += 1;
        self.log_if_finished();
        Ok(StepEvent::Moved { agent, mv })
    }

    /// Apply a move chosen by a human for `agent`.
    pub fn submit_human_move(&mut self, agent: AgentId, mv: Move) -> Result<StepEvent, SessionError> {
        if self.state.awaiting() != Some(agent) {
            if self.state.is_over() {
                return Err(GameError::GameOver.into());
            }
            return Err(GameError::NotYourTurn { agent }.into());
        }
        if !self.is_human(agent) {
            return Err(SessionError::NotHuman { agent });
        }
        self.state.apply_move(agent, mv)?;
        self.steps += 1;
        self.log_if_finished();
        Ok(StepEvent::Moved { agent, mv })
    }

    /// Step until the game ends. Fails if a human must act or `max_steps`
    /// decisions pass without an outcome.
    pub fn run_to_end(&mut self, max_steps: usize) -> Result<Outcome, SessionError> {
        for _ in 0..max_steps {
            match self.step()? {
                StepEvent::Finished(outcome) => return Ok(outcome),
                StepEvent::AwaitingHuman { agent, .. } => {
                    return Err(SessionError::AwaitingHumanInput { agent })
                }
                StepEvent::Moved { .. } | StepEvent::Passed { .. } => {}
            }
        }
        if self.state.is_over() {
            return Ok(self.state.outcome());
        }
        Err(SessionError::StepLimit(max_steps))
    }

    fn log_if_finished(&self) {
        if self.state.is_over() {
            info!(
                outcome = %self.state.outcome(),
                turn = self.state.turn(),
                steps = self.steps,
                "game finished"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;
    use crate::factory::{
        create_evader_policy, create_seeker_policy, EvaderPolicyKind, SeekerPolicyKind,
    };
    use pursuit_core::{demo_board, GameRules, GameSetup, TransportGraph, TransportType::*};
    use std::sync::Arc;

    fn line_state(n: u32, evader: u32, seeker: u32, max_turns: u32) -> GameState {
        let stations: Vec<_> = (1..=n).map(|i| (i, i as f64, 0.0)).collect();
        let edges: Vec<_> = (1..n).map(|i| (i, i + 1, Taxi)).collect();
        let graph = Arc::new(TransportGraph::from_records(&stations, &edges).unwrap());
        let rules = GameRules::standard().with_max_turns(max_turns);
        GameState::new(graph, rules, &GameSetup::new(StationId(evader), vec![StationId(seeker)]))
            .unwrap()
    }

    fn bots(state: &GameState, evader: EvaderPolicyKind, seeker: SeekerPolicyKind, seed: u64) -> Session {
        let config = AiConfig::for_testing();
        let seekers = (0..state.seekers().len())
            .map(|i| Controller::Bot(create_seeker_policy(seeker, &config, seed + 1 + i as u64)))
            .collect();
        Session::new(
            state.clone(),
            Controller::Bot(create_evader_policy(evader, &config, seed)),
            seekers,
        )
        .unwrap()
    }

    #[test]
    fn test_bot_game_runs_to_an_outcome() {
        let graph = Arc::new(demo_board());
        let setup = GameSetup::new(
            StationId(9),
            vec![StationId(1), StationId(6), StationId(19), StationId(24)],
        );
        let state = GameState::new(graph, GameRules::standard(), &setup).unwrap();
        for (evader, seeker) in [
            (EvaderPolicyKind::Random, SeekerPolicyKind::Random),
            (EvaderPolicyKind::SafetyLookahead, SeekerPolicyKind::BeliefGreedy),
            (EvaderPolicyKind::Rollout, SeekerPolicyKind::MonteCarlo),
        ] {
            let mut session = bots(&state, evader, seeker, 17);
            let outcome = session.run_to_end(10_000).unwrap();
            assert!(outcome.is_over());
            assert_eq!(session.step().unwrap(), StepEvent::Finished(outcome));
        }
    }

    #[test]
    fn test_human_evader_blocks_until_submitted() {
        let state = line_state(6, 3, 6, 24);
        let config = AiConfig::for_testing();
        let mut session = Session::new(
            state,
            Controller::Human,
            vec![Controller::Bot(create_seeker_policy(SeekerPolicyKind::Random, &config, 3))],
        )
        .unwrap();

        let event = session.step().unwrap();
        assert_eq!(
            event,
            StepEvent::AwaitingHuman {
                agent: AgentId::EVADER,
                legal: vec![Move::new(StationId(2), Taxi), Move::new(StationId(4), Taxi)],
            }
        );
        assert!(matches!(
            session.run_to_end(10),
            Err(SessionError::AwaitingHumanInput { agent: AgentId::EVADER })
        ));

        let bad = session.submit_human_move(AgentId::EVADER, Move::new(StationId(5), Taxi));
        assert!(matches!(bad, Err(SessionError::Game(GameError::InvalidMove { .. }))));

        session
            .submit_human_move(AgentId::EVADER, Move::new(StationId(2), Taxi))
            .unwrap();
        assert!(matches!(
            session.submit_human_move(AgentId(1), Move::new(StationId(5), Taxi)),
            Err(SessionError::NotHuman { agent: AgentId(1) })
        ));
        assert!(matches!(session.step().unwrap(), StepEvent::Moved { agent: AgentId(1), .. }));
        assert_eq!(session.state().turn(), 2);
    }

    #[test]
    fn test_stuck_agents_are_passed() {
        let graph = Arc::new(
            TransportGraph::from_records(
                &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 5.0, 0.0), (4, 6.0, 0.0)],
                &[(1, 2, Water), (3, 4, Taxi)],
            )
            .unwrap(),
        );
        let rules = GameRules::standard()
            .with_max_turns(2)
            .with_evader_tickets(pursuit_core::TicketInventory::empty());
        let state =
            GameState::new(graph, rules, &GameSetup::new(StationId(1), vec![StationId(3)])).unwrap();
        let mut session = bots(&state, EvaderPolicyKind::Random, SeekerPolicyKind::Random, 5);
        assert_eq!(
            session.step().unwrap(),
            StepEvent::Passed { agent: AgentId::EVADER }
        );
        assert_eq!(
            session.run_to_end(20).unwrap(),
            Outcome::Escaped { rounds: 2 }
        );
    }

    #[test]
    fn test_controller_count_must_match() {
        let state = line_state(4, 1, 4, 24);
        let err = Session::new(state, Controller::Human, vec![]).unwrap_err();
        assert!(matches!(err, SessionError::ControllerCount { expected: 1, actual: 0 }));
    }

    #[test]
    fn test_step_limit() {
        let state = line_state(10, 1, 10, 24);
        let mut session = bots(&state, EvaderPolicyKind::Random, SeekerPolicyKind::Random, 9);
        assert!(matches!(session.run_to_end(1), Err(SessionError::StepLimit(1))));
    }

    #[test]
    fn test_predictions_cover_each_seeker() {
        let state = line_state(9, 1, 5, 24);
        let session = bots(&state, EvaderPolicyKind::Random, SeekerPolicyKind::Random, 1);
        let predictions = session.predictions(2);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0][2].len(), 5);
    }
}
