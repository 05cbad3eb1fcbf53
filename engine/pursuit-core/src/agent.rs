//! Agents: the evader and the seekers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::StationId;
use crate::tickets::TicketInventory;

/// Index of an agent in the game. The evader is always agent 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub usize);

impl AgentId {
    pub const EVADER: AgentId = AgentId(0);

    #[inline]
    pub fn is_evader(self) -> bool {
        self == Self::EVADER
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_evader() {
            f.write_str("evader")
        } else {
            write!(f, "seeker {}", self.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Evader,
    Seeker,
}

/// A pawn on the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub role: Role,
    pub station: StationId,
    pub tickets: TicketInventory,
    /// Reset at the start of every round.
    pub moved_this_turn: bool,
    /// Seekers that are not controlled are ignored when deciding whether a
    /// round is complete.
    pub controlled: bool,
}

impl Agent {
    pub fn evader(station: StationId, tickets: TicketInventory) -> Self {
        Self {
            id: AgentId::EVADER,
            name: "Mr. X".to_string(),
            role: Role::Evader,
            station,
            tickets,
            moved_this_turn: false,
            controlled: true,
        }
    }

    pub fn seeker(index: usize, station: StationId, tickets: TicketInventory) -> Self {
        Self {
            id: AgentId(index),
            name: format!("Seeker {index}"),
            role: Role::Seeker,
            station,
            tickets,
            moved_this_turn: false,
            controlled: true,
        }
    }

    #[inline]
    pub fn is_evader(&self) -> bool {
        self.role == Role::Evader
    }

    /// One-line description, e.g. `Seeker 2@17 [T:10 B:8 U:4 W:0]`.
    pub fn summary(&self) -> String {
        format!("{}@{} [{}]", self.name, self.station, self.tickets)
    }
}
