//! Per-agent ticket inventories.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GameError;
use crate::transport::TransportType;

/// Remaining tickets of one transport type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCount {
    Limited(u32),
    Unlimited,
}

impl TicketCount {
    #[inline]
    pub fn is_available(self) -> bool {
        match self {
            TicketCount::Limited(n) => n > 0,
            TicketCount::Unlimited => true,
        }
    }
}

impl fmt::Display for TicketCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketCount::Limited(n) => write!(f, "{n}"),
            TicketCount::Unlimited => f.write_str("inf"),
        }
    }
}

/// Ticket counters for one agent, indexed by [`TransportType::index`].
///
/// Counts never go negative and unlimited entries are never decremented.
/// The inventory is `Copy` so simulations can take private snapshots freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketInventory {
    counts: [TicketCount; 4],
}

impl TicketInventory {
    /// Finite counts for taxi, bus, underground and water.
    pub fn new(taxi: u32, bus: u32, underground: u32, water: u32) -> Self {
        Self {
            counts: [
                TicketCount::Limited(taxi),
                TicketCount::Limited(bus),
                TicketCount::Limited(underground),
                TicketCount::Limited(water),
            ],
        }
    }

    /// Every transport type unlimited.
    pub fn unlimited() -> Self {
        Self {
            counts: [TicketCount::Unlimited; 4],
        }
    }

    /// No tickets at all.
    pub fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Unlimited taxi, bus and underground with a finite water allotment.
    pub fn evader(water: u32) -> Self {
        Self::unlimited().with(TransportType::Water, TicketCount::Limited(water))
    }

    pub fn with(mut self, transport: TransportType, count: TicketCount) -> Self {
        self.counts[transport.index()] = count;
        self
    }

    #[inline]
    pub fn get(&self, transport: TransportType) -> TicketCount {
        self.counts[transport.index()]
    }

    #[inline]
    pub fn available(&self, transport: TransportType) -> bool {
        self.get(transport).is_available()
    }

    /// Finite remaining count, `None` if unlimited.
    pub fn remaining(&self, transport: TransportType) -> Option<u32> {
        match self.get(transport) {
            TicketCount::Limited(n) => Some(n),
            TicketCount::Unlimited => None,
        }
    }

    /// Spend one ticket. Unlimited types are left untouched.
    pub fn consume(&mut self, transport: TransportType) -> Result<(), GameError> {
        match &mut self.counts[transport.index()] {
            TicketCount::Unlimited => Ok(()),
            TicketCount::Limited(n) if *n > 0 => {
                *n -= 1;
                Ok(())
            }
            TicketCount::Limited(_) => Err(GameError::InsufficientTickets { transport }),
        }
    }

    /// True if no transport type can be used at all.
    pub fn is_exhausted(&self) -> bool {
        !self.counts.iter().any(|c| c.is_available())
    }
}

impl Default for TicketInventory {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for TicketInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, transport) in TransportType::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", transport.short(), self.get(*transport))?;
        }
        Ok(())
    }
}
