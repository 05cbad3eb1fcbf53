//! Core model for hidden-movement pursuit games.
//!
//! One evader moves across a [`TransportGraph`] while several seekers try to
//! land on the same station. The evader's position is only disclosed on
//! scheduled reveal turns; in between the seekers see the transport type of
//! each move and infer candidate positions with a [`BeliefTracker`].
//!
//! [`GameState`] enforces move legality, ticket consumption, round
//! progression and termination. Decision making lives in `pursuit-ai`.

pub mod agent;
pub mod belief;
pub mod demo;
pub mod error;
pub mod graph;
pub mod moves;
pub mod rules;
pub mod state;
pub mod tickets;
pub mod transport;

pub use agent::{Agent, AgentId, Role};
pub use belief::{reachable_after, BeliefTracker};
pub use demo::{demo_board, demo_records, DEMO_STATIONS};
pub use error::{GameError, RulesError};
pub use graph::{Connection, GraphBuilder, GraphError, Point, Station, StationId, TransportGraph};
pub use moves::{legal_moves, Move, MoverSnapshot};
pub use rules::{GameRules, GameSetup};
pub use state::{GameState, MoveRecord, Outcome, Phase, PublicView, SeekerView};
pub use tickets::{TicketCount, TicketInventory};
pub use transport::{ParseTransportError, TransportSet, TransportType};
