//! Game rules and starting positions.

use pursuit_config::RulesConfig;
use rand::seq::index::sample;
use rand::Rng;
use std::collections::HashSet;

use crate::error::RulesError;
use crate::graph::{StationId, TransportGraph};
use crate::tickets::TicketInventory;

/// Turn cap, reveal schedule and starting ticket allotments.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    /// The evader escapes once this many rounds complete without capture.
    pub max_turns: u32,
    /// Strictly ascending turn numbers on which the evader is disclosed.
    pub reveal_turns: Vec<u32>,
    pub seeker_tickets: TicketInventory,
    pub evader_tickets: TicketInventory,
}

impl GameRules {
    /// Classic board game constants: 24 rounds, 11/8/4 seeker tickets and an
    /// evader with unlimited land transport plus 5 water tickets.
    pub fn standard() -> Self {
        Self {
            max_turns: 24,
            reveal_turns: vec![3, 8, 13, 18, 24],
            seeker_tickets: TicketInventory::new(11, 8, 4, 0),
            evader_tickets: TicketInventory::evader(5),
        }
    }

    pub fn from_config(config: &RulesConfig) -> Self {
        Self {
            max_turns: config.max_turns,
            reveal_turns: config.reveal_turns.clone(),
            seeker_tickets: TicketInventory::new(
                config.seeker_taxi_tickets,
                config.seeker_bus_tickets,
                config.seeker_underground_tickets,
                config.seeker_water_tickets,
            ),
            evader_tickets: TicketInventory::evader(config.evader_water_tickets),
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_reveal_turns(mut self, reveal_turns: Vec<u32>) -> Self {
        self.reveal_turns = reveal_turns;
        self
    }

    pub fn with_seeker_tickets(mut self, tickets: TicketInventory) -> Self {
        self.seeker_tickets = tickets;
        self
    }

    pub fn with_evader_tickets(mut self, tickets: TicketInventory) -> Self {
        self.evader_tickets = tickets;
        self
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.max_turns == 0 {
            return Err(RulesError::ZeroTurns);
        }
        if self.reveal_turns.windows(2).any(|w| w[0] >= w[1]) {
            return Err(RulesError::RevealScheduleNotAscending(
                self.reveal_turns.clone(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn is_reveal_turn(&self, turn: u32) -> bool {
        self.reveal_turns.binary_search(&turn).is_ok()
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Starting stations for the evader and each seeker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub evader_start: StationId,
    pub seeker_starts: Vec<StationId>,
}

impl GameSetup {
    pub fn new(evader_start: StationId, seeker_starts: Vec<StationId>) -> Self {
        Self {
            evader_start,
            seeker_starts,
        }
    }

    /// Distinct random stations for the evader and `seekers` seekers.
    pub fn random<R: Rng + ?Sized>(
        graph: &TransportGraph,
        seekers: usize,
        rng: &mut R,
    ) -> Result<Self, RulesError> {
        if seekers == 0 {
            return Err(RulesError::NoSeekers);
        }
        let needed = seekers + 1;
        let stations = graph.stations();
        if stations.len() < needed {
            return Err(RulesError::NotEnoughStations {
                stations: stations.len(),
                needed,
            });
        }
        let mut picks = sample(rng, stations.len(), needed)
            .into_iter()
            .map(|i| stations[i].id);
        // `sample` returned exactly `needed >= 2` indices
        let evader_start = picks.next().ok_or(RulesError::NoSeekers)?;
        Ok(Self {
            evader_start,
            seeker_starts: picks.collect(),
        })
    }

    /// Checks seekers exist, every start is on the board and no two agents
    /// share a start.
    pub fn validate(&self, graph: &TransportGraph) -> Result<(), RulesError> {
        if self.seeker_starts.is_empty() {
            return Err(RulesError::NoSeekers);
        }
        let mut seen = HashSet::new();
        for &station in std::iter::once(&self.evader_start).chain(&self.seeker_starts) {
            if !graph.contains(station) {
                return Err(RulesError::StartNotOnBoard(station));
            }
            if !seen.insert(station) {
                return Err(RulesError::DuplicateStart(station));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn star(n: u32) -> TransportGraph {
        let stations: Vec<_> = (1..=n).map(|i| (i, i as f64, 0.0)).collect();
        let edges: Vec<_> = (2..=n).map(|i| (1, i, TransportType::Taxi)).collect();
        TransportGraph::from_records(&stations, &edges).unwrap()
    }

    #[test]
    fn test_standard_rules() {
        let rules = GameRules::standard();
        assert!(rules.validate().is_ok());
        assert!(rules.is_reveal_turn(3));
        assert!(!rules.is_reveal_turn(4));
        assert_eq!(rules.evader_tickets.remaining(TransportType::Water), Some(5));
    }

    #[test]
    fn test_from_config_matches_standard() {
        assert_eq!(GameRules::from_config(&RulesConfig::default()), GameRules::standard());
    }

    #[test]
    fn test_validate_rejects_bad_schedule() {
        let rules = GameRules::standard().with_reveal_turns(vec![3, 3, 8]);
        assert!(matches!(
            rules.validate(),
            Err(RulesError::RevealScheduleNotAscending(_))
        ));
        assert_eq!(
            GameRules::standard().with_max_turns(0).validate(),
            Err(RulesError::ZeroTurns)
        );
    }

    #[test]
    fn test_random_setup_is_distinct_and_seeded() {
        let g = star(10);
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let setup = GameSetup::random(&g, 4, &mut rng).unwrap();
        assert_eq!(setup.seeker_starts.len(), 4);
        assert!(setup.validate(&g).is_ok());

        let mut again = ChaCha20Rng::seed_from_u64(7);
        assert_eq!(GameSetup::random(&g, 4, &mut again).unwrap(), setup);
    }

    #[test]
    fn test_random_setup_needs_room() {
        let g = star(3);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(
            GameSetup::random(&g, 3, &mut rng),
            Err(RulesError::NotEnoughStations { stations: 3, needed: 4 })
        );
    }

    #[test]
    fn test_setup_validation() {
        let g = star(4);
        let dup = GameSetup::new(StationId(1), vec![StationId(2), StationId(1)]);
        assert_eq!(dup.validate(&g), Err(RulesError::DuplicateStart(StationId(1))));
        let off = GameSetup::new(StationId(1), vec![StationId(9)]);
        assert_eq!(off.validate(&g), Err(RulesError::StartNotOnBoard(StationId(9))));
        let none = GameSetup::new(StationId(1), vec![]);
        assert_eq!(none.validate(&g), Err(RulesError::NoSeekers));
    }
}
