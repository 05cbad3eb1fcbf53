//! Error types for game state and setup.

use thiserror::Error;

use crate::agent::{AgentId, Role};
use crate::graph::StationId;
use crate::transport::TransportType;

/// Errors surfaced by [`GameState`](crate::GameState) operations.
///
/// An illegal move is always reported to the caller and never silently
/// corrected. Running out of legal moves and reaching a terminal outcome
/// are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{agent} cannot move to station {destination} by {transport}")]
    InvalidMove {
        agent: AgentId,
        destination: StationId,
        transport: TransportType,
    },

    #[error("no {transport} tickets left")]
    InsufficientTickets { transport: TransportType },

    #[error("unknown station {0}")]
    UnknownStation(StationId),

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("game is already over")]
    GameOver,

    #[error("it is not {agent}'s turn")]
    NotYourTurn { agent: AgentId },

    #[error("{agent} still has legal moves and cannot pass")]
    CannotPass { agent: AgentId },
}

/// Problems with a rules or setup description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("at least one seeker is required")]
    NoSeekers,

    #[error("{agent} must be the {expected:?}")]
    RoleMismatch { agent: AgentId, expected: Role },

    #[error("turn cap must be at least 1")]
    ZeroTurns,

    #[error("reveal turns must be strictly ascending, got {0:?}")]
    RevealScheduleNotAscending(Vec<u32>),

    #[error("start station {0} is not on the board")]
    StartNotOnBoard(StationId),

    #[error("start station {0} is used by more than one agent")]
    DuplicateStart(StationId),

    #[error("board has {stations} stations, need {needed} distinct starts")]
    NotEnoughStations { stations: usize, needed: usize },
}
