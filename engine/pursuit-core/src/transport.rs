//! Transport types and compact sets of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of transport modes a connection can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Taxi,
    Bus,
    Underground,
    Water,
}

impl TransportType {
    /// Every transport type, in ticket-display order.
    pub const ALL: [TransportType; 4] = [
        TransportType::Taxi,
        TransportType::Bus,
        TransportType::Underground,
        TransportType::Water,
    ];

    /// Dense index used for per-type arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            TransportType::Taxi => 0,
            TransportType::Bus => 1,
            TransportType::Underground => 2,
            TransportType::Water => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransportType::Taxi => "taxi",
            TransportType::Bus => "bus",
            TransportType::Underground => "underground",
            TransportType::Water => "water",
        }
    }

    /// Single-letter tag used in ticket summaries.
    pub fn short(self) -> char {
        match self {
            TransportType::Taxi => 'T',
            TransportType::Bus => 'B',
            TransportType::Underground => 'U',
            TransportType::Water => 'W',
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transport type '{0}'")]
pub struct ParseTransportError(pub String);

impl FromStr for TransportType {
    type Err = ParseTransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "taxi" => Ok(TransportType::Taxi),
            "bus" => Ok(TransportType::Bus),
            "underground" | "metro" | "subway" => Ok(TransportType::Underground),
            "water" | "ferry" | "boat" => Ok(TransportType::Water),
            _ => Err(ParseTransportError(s.to_string())),
        }
    }
}

/// Bit set of transport types serviced by a station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransportSet(u8);

impl TransportSet {
    pub const EMPTY: TransportSet = TransportSet(0);

    #[inline]
    pub fn insert(&mut self, transport: TransportType) {
        self.0 |= 1 << transport.index();
    }

    #[inline]
    pub fn contains(self, transport: TransportType) -> bool {
        self.0 & (1 << transport.index()) != 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = TransportType> {
        TransportType::ALL
            .into_iter()
            .filter(move |&t| self.contains(t))
    }
}

impl FromIterator<TransportType> for TransportSet {
    fn from_iter<I: IntoIterator<Item = TransportType>>(iter: I) -> Self {
        let mut set = TransportSet::EMPTY;
        for transport in iter {
            set.insert(transport);
        }
        set
    }
}
