//! Turn and ticket state machine.
//!
//! A round is one evader move followed by one move from every controlled
//! seeker. Seekers may move in any order during their phase; a seeker with
//! no legal move is skipped automatically. Capture is checked after every
//! single move, and the evader escapes once the configured number of rounds
//! has completed.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::agent::{Agent, AgentId, Role};
use crate::belief::BeliefTracker;
use crate::error::{GameError, RulesError};
use crate::graph::{StationId, TransportGraph};
use crate::moves::{legal_moves, Move, MoverSnapshot};
use crate::rules::{GameRules, GameSetup};
use crate::tickets::TicketInventory;
use crate::transport::TransportType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    EvaderTurn,
    SeekerTurn,
}

/// Terminal state of a game, or `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Running,
    Captured {
        by: AgentId,
        station: StationId,
        turn: u32,
    },
    Escaped {
        rounds: u32,
    },
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::Running)
    }

    /// Short reason string for status lines.
    pub fn reason(self) -> &'static str {
        match self {
            Outcome::Running => "running",
            Outcome::Captured { .. } => "captured",
            Outcome::Escaped { .. } => "evader escaped",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Running => f.write_str("running"),
            Outcome::Captured { by, station, turn } => {
                write!(f, "captured by {by} at {station} on turn {turn}")
            }
            Outcome::Escaped { rounds } => write!(f, "evader escaped after {rounds} rounds"),
        }
    }
}

/// One entry of the evader's public log. Destinations are only included
/// on reveal turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub turn: u32,
    pub transport: TransportType,
    pub revealed: Option<StationId>,
}

/// Authoritative game state.
#[derive(Debug, Clone)]
pub struct GameState {
    graph: Arc<TransportGraph>,
    rules: GameRules,
    /// Index 0 is the evader, seekers follow in id order.
    agents: Vec<Agent>,
    turn: u32,
    phase: Phase,
    outcome: Outcome,
    history: Vec<MoveRecord>,
    belief: BeliefTracker,
}

impl GameState {
    /// Start a game with agents placed per `setup` and tickets per `rules`.
    pub fn new(
        graph: Arc<TransportGraph>,
        rules: GameRules,
        setup: &GameSetup,
    ) -> Result<Self, RulesError> {
        setup.validate(&graph)?;
        let evader = Agent::evader(setup.evader_start, rules.evader_tickets);
        let seekers = setup
            .seeker_starts
            .iter()
            .enumerate()
            .map(|(i, &station)| Agent::seeker(i + 1, station, rules.seeker_tickets))
            .collect();
        Self::from_agents(graph, rules, evader, seekers)
    }

    /// Start a game from fully specified agents, e.g. with custom tickets.
    ///
    /// Agent ids are reassigned so the evader is 0 and seekers are numbered
    /// from 1 in the given order. Roles must already match those slots.
    pub fn from_agents(
        graph: Arc<TransportGraph>,
        rules: GameRules,
        evader: Agent,
        seekers: Vec<Agent>,
    ) -> Result<Self, RulesError> {
        rules.validate()?;
        if seekers.is_empty() {
            return Err(RulesError::NoSeekers);
        }
        let mut agents = Vec::with_capacity(seekers.len() + 1);
        agents.push(evader);
        agents.extend(seekers);
        for (i, agent) in agents.iter_mut().enumerate() {
            let expected = if i == 0 { Role::Evader } else { Role::Seeker };
            if agent.role != expected {
                return Err(RulesError::RoleMismatch {
                    agent: AgentId(i),
                    expected,
                });
            }
            if !graph.contains(agent.station) {
                return Err(RulesError::StartNotOnBoard(agent.station));
            }
            agent.id = AgentId(i);
            agent.moved_this_turn = false;
        }

        info!(
            seekers = agents.len() - 1,
            max_turns = rules.max_turns,
            stations = graph.station_count(),
            "game started"
        );
        let mut state = Self {
            graph,
            rules,
            agents,
            turn: 1,
            phase: Phase::EvaderTurn,
            outcome: Outcome::Running,
            history: Vec::new(),
            belief: BeliefTracker::default(),
        };
        state.check_capture(AgentId::EVADER);
        Ok(state)
    }

    /// Replace the belief tracker, typically to change its distance weight.
    pub fn with_belief(mut self, belief: BeliefTracker) -> Self {
        self.belief = belief;
        self
    }

    pub fn graph(&self) -> &TransportGraph {
        &self.graph
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Result<&Agent, GameError> {
        self.agents.get(id.0).ok_or(GameError::UnknownAgent(id))
    }

    pub fn evader(&self) -> &Agent {
        &self.agents[0]
    }

    pub fn seekers(&self) -> &[Agent] {
        &self.agents[1..]
    }

    pub fn seeker_positions(&self) -> Vec<StationId> {
        self.seekers().iter().map(|a| a.station).collect()
    }

    /// The evader's public log of transport types.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn transport_history(&self) -> Vec<TransportType> {
        self.history.iter().map(|r| r.transport).collect()
    }

    pub fn belief(&self) -> &BeliefTracker {
        &self.belief
    }

    /// Belief distribution weighted by the current seeker positions.
    pub fn belief_map(&self) -> BTreeMap<StationId, f64> {
        self.belief
            .probability_map(&self.graph, &self.seeker_positions())
    }

    /// True while the last disclosure is still exact, i.e. the evader has
    /// not made a hidden move since.
    pub fn is_revealed(&self) -> bool {
        self.belief.has_disclosure() && self.belief.moves_since_disclosure().is_empty()
    }

    /// The last disclosed evader position, as the seekers know it.
    pub fn visible_evader_position(&self) -> Option<StationId> {
        self.belief.last_known()
    }

    pub fn snapshot(&self, id: AgentId) -> Result<MoverSnapshot, GameError> {
        let agent = self.agent(id)?;
        Ok(MoverSnapshot::new(agent.station, agent.tickets))
    }

    /// Moves `id` could make from where it stands with the tickets it holds.
    ///
    /// This ignores whose turn it is; use [`awaiting`](Self::awaiting) for
    /// that.
    pub fn legal_moves(&self, id: AgentId) -> Result<Vec<Move>, GameError> {
        let snapshot = self.snapshot(id)?;
        Ok(legal_moves(&self.graph, &snapshot))
    }

    fn has_legal_move(&self, agent: &Agent) -> bool {
        self.graph
            .neighbors(agent.station)
            .iter()
            .any(|(_, t)| agent.tickets.available(*t))
    }

    /// Seekers that still have to act this round.
    pub fn pending_seekers(&self) -> Vec<AgentId> {
        if self.phase != Phase::SeekerTurn || self.is_over() {
            return Vec::new();
        }
        self.seekers()
            .iter()
            .filter(|a| a.controlled && !a.moved_this_turn && self.has_legal_move(a))
            .map(|a| a.id)
            .collect()
    }

    /// The agent expected to act next, `None` once the game is over.
    pub fn awaiting(&self) -> Option<AgentId> {
        if self.is_over() {
            return None;
        }
        match self.phase {
            Phase::EvaderTurn => Some(AgentId::EVADER),
            Phase::SeekerTurn => self.pending_seekers().into_iter().next(),
        }
    }

    fn check_can_act(&self, id: AgentId) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let agent = self.agent(id)?;
        let allowed = match self.phase {
            Phase::EvaderTurn => agent.is_evader(),
            Phase::SeekerTurn => {
                !agent.is_evader() && agent.controlled && !agent.moved_this_turn
            }
        };
        if allowed {
            Ok(())
        } else {
            Err(GameError::NotYourTurn { agent: id })
        }
    }

    /// Move an agent. Illegal moves are rejected and leave the state
    /// untouched.
    pub fn apply_move(&mut self, id: AgentId, mv: Move) -> Result<(), GameError> {
        self.check_can_act(id)?;
        if !self.graph.contains(mv.destination) {
            return Err(GameError::UnknownStation(mv.destination));
        }

        let agent = &self.agents[id.0];
        let edge_exists = self
            .graph
            .neighbors(agent.station)
            .contains(&(mv.destination, mv.transport));
        if !edge_exists {
            return Err(GameError::InvalidMove {
                agent: id,
                destination: mv.destination,
                transport: mv.transport,
            });
        }

        let agent = &mut self.agents[id.0];
        agent.tickets.consume(mv.transport)?;
        let from = agent.station;
        agent.station = mv.destination;
        agent.moved_this_turn = true;
        debug!(
            agent = %id,
            from = %from,
            to = %mv.destination,
            transport = %mv.transport,
            turn = self.turn,
            "move applied"
        );

        if id.is_evader() {
            self.finish_evader_turn(Some(mv));
        }
        self.check_capture(id);
        self.maybe_finish_round();
        Ok(())
    }

    /// End the agent's turn without moving. Only allowed when it has no
    /// legal move.
    pub fn pass(&mut self, id: AgentId) -> Result<(), GameError> {
        self.check_can_act(id)?;
        if self.has_legal_move(&self.agents[id.0]) {
            return Err(GameError::CannotPass { agent: id });
        }
        self.agents[id.0].moved_this_turn = true;
        debug!(agent = %id, turn = self.turn, "agent passed");
        if id.is_evader() {
            self.finish_evader_turn(None);
        }
        self.maybe_finish_round();
        Ok(())
    }

    /// Include or exclude a seeker from the round-completion rule.
    pub fn set_controlled(&mut self, id: AgentId, controlled: bool) -> Result<(), GameError> {
        let agent = self
            .agents
            .get_mut(id.0)
            .ok_or(GameError::UnknownAgent(id))?;
        agent.controlled = controlled;
        if !self.is_over() {
            self.maybe_finish_round();
        }
        Ok(())
    }

    fn finish_evader_turn(&mut self, mv: Option<Move>) {
        let station = self.agents[0].station;
        let reveal = self.rules.is_reveal_turn(self.turn);
        if let Some(mv) = mv {
            self.history.push(MoveRecord {
                turn: self.turn,
                transport: mv.transport,
                revealed: reveal.then_some(station),
            });
            if !reveal {
                self.belief.on_hidden_move(&self.graph, mv.transport);
            }
        }
        if reveal {
            info!(station = %station, turn = self.turn, "evader position revealed");
            self.belief.on_reveal(station, self.turn);
        }
        self.phase = Phase::SeekerTurn;
    }

    fn check_capture(&mut self, mover: AgentId) {
        if self.is_over() {
            return;
        }
        let evader_at = self.agents[0].station;
        let catcher = if mover.is_evader() {
            self.seekers()
                .iter()
                .find(|s| s.station == evader_at)
                .map(|s| s.id)
        } else {
            self.agents
                .get(mover.0)
                .filter(|s| s.station == evader_at)
                .map(|s| s.id)
        };
        if let Some(by) = catcher {
            self.outcome = Outcome::Captured {
                by,
                station: evader_at,
                turn: self.turn,
            };
            info!(by = %by, station = %evader_at, turn = self.turn, "evader captured");
        }
    }

    fn maybe_finish_round(&mut self) {
        if self.is_over() || self.phase != Phase::SeekerTurn {
            return;
        }
        if !self.pending_seekers().is_empty() {
            return;
        }
        for agent in &mut self.agents {
            agent.moved_this_turn = false;
        }
        self.turn += 1;
        if self.turn > self.rules.max_turns {
            self.outcome = Outcome::Escaped {
                rounds: self.rules.max_turns,
            };
            info!(rounds = self.rules.max_turns, "evader escaped");
        } else {
            self.phase = Phase::EvaderTurn;
            debug!(turn = self.turn, "round complete");
        }
    }

    /// Everything a presentation layer may show to the seekers' side.
    pub fn public_view(&self) -> PublicView {
        let awaiting = self.awaiting();
        let legal_destinations = awaiting
            .and_then(|id| self.legal_moves(id).ok())
            .map(|moves| {
                let mut dests: Vec<StationId> = moves.iter().map(|m| m.destination).collect();
                dests.dedup();
                dests
            })
            .unwrap_or_default();
        PublicView {
            turn: self.turn,
            phase: self.phase,
            outcome: self.outcome,
            revealed: self.is_revealed(),
            evader_position: self.visible_evader_position(),
            evader_tickets: self.evader().tickets,
            seekers: self
                .seekers()
                .iter()
                .map(|a| SeekerView {
                    id: a.id,
                    name: a.name.clone(),
                    station: a.station,
                    tickets: a.tickets,
                    moved: a.moved_this_turn,
                })
                .collect(),
            history: self.history.clone(),
            awaiting,
            legal_destinations,
        }
    }
}

/// Seeker entry of a [`PublicView`].
#[derive(Debug, Clone, Serialize)]
pub struct SeekerView {
    pub id: AgentId,
    pub name: String,
    pub station: StationId,
    pub tickets: TicketInventory,
    pub moved: bool,
}

/// Snapshot of the publicly visible state.
#[derive(Debug, Clone, Serialize)]
pub struct PublicView {
    pub turn: u32,
    pub phase: Phase,
    pub outcome: Outcome,
    pub revealed: bool,
    pub evader_position: Option<StationId>,
    pub evader_tickets: TicketInventory,
    pub seekers: Vec<SeekerView>,
    pub history: Vec<MoveRecord>,
    pub awaiting: Option<AgentId>,
    pub legal_destinations: Vec<StationId>,
}

#[cfg(test)]
mod tests;
