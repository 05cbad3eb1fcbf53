//! Move values and the pure legal-move query.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::{StationId, TransportGraph};
use crate::tickets::TicketInventory;
use crate::transport::TransportType;

/// A single step: where to go and which ticket to spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub destination: StationId,
    pub transport: TransportType,
}

impl Move {
    pub fn new(destination: StationId, transport: TransportType) -> Self {
        Self {
            destination,
            transport,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.transport, self.destination)
    }
}

/// Position plus tickets, enough to ask what moves are possible from a
/// real or hypothetical situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoverSnapshot {
    pub station: StationId,
    pub tickets: TicketInventory,
}

impl MoverSnapshot {
    pub fn new(station: StationId, tickets: TicketInventory) -> Self {
        Self { station, tickets }
    }

    /// Apply a move to the snapshot. Returns false (leaving it unchanged)
    /// if the ticket is not available.
    pub fn advance(&mut self, mv: Move) -> bool {
        if self.tickets.consume(mv.transport).is_err() {
            return false;
        }
        self.station = mv.destination;
        true
    }
}

/// Every `(destination, transport)` pair reachable in one step with an
/// available ticket, sorted and free of duplicates.
pub fn legal_moves(graph: &TransportGraph, mover: &MoverSnapshot) -> Vec<Move> {
    let mut moves: Vec<Move> = graph
        .neighbors(mover.station)
        .iter()
        .filter(|(_, transport)| mover.tickets.available(*transport))
        .map(|&(destination, transport)| Move::new(destination, transport))
        .collect();
    moves.sort();
    moves.dedup();
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransportType::*;

    #[test]
    fn test_legal_moves_respect_tickets() {
        let g = TransportGraph::from_records(
            &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 0.0, 1.0)],
            &[(1, 2, Taxi), (1, 2, Bus), (1, 3, Underground)],
        )
        .unwrap();
        let mover = MoverSnapshot::new(StationId(1), TicketInventory::new(0, 1, 0, 0));
        assert_eq!(legal_moves(&g, &mover), vec![Move::new(StationId(2), Bus)]);

        let rich = MoverSnapshot::new(StationId(1), TicketInventory::unlimited());
        assert_eq!(legal_moves(&g, &rich).len(), 3);
    }

    #[test]
    fn test_advance_consumes_ticket() {
        let mut s = MoverSnapshot::new(StationId(1), TicketInventory::new(1, 0, 0, 0));
        assert!(s.advance(Move::new(StationId(2), Taxi)));
        assert_eq!(s.station, StationId(2));
        assert!(!s.advance(Move::new(StationId(1), Taxi)));
        assert_eq!(s.station, StationId(2));
    }
}
