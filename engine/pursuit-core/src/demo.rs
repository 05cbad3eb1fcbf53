//! Built-in 24-station board.
//!
//! A 6x4 grid of taxi streets with bus lines, an underground network and a
//! short water route layered on top. Station `r * 6 + c + 1` sits at
//! `(c, r)`, one unit per taxi hop.

use crate::graph::TransportGraph;
use crate::transport::TransportType;

const COLS: u32 = 6;
const ROWS: u32 = 4;
const SPACING: f64 = 1.0;

const BUS: &[(u32, u32)] = &[
    (1, 3),
    (3, 15),
    (15, 13),
    (13, 1),
    (4, 6),
    (6, 18),
    (18, 16),
    (16, 4),
    (8, 10),
    (20, 22),
    (9, 21),
];

const UNDERGROUND: &[(u32, u32)] = &[(1, 18), (6, 19), (13, 24), (3, 22)];

const WATER: &[(u32, u32)] = &[(7, 19), (12, 24)];

pub const DEMO_STATIONS: usize = (COLS * ROWS) as usize;

/// The demo board as plain records.
pub fn demo_records() -> (Vec<(u32, f64, f64)>, Vec<(u32, u32, TransportType)>) {
    let id = |r: u32, c: u32| r * COLS + c + 1;

    let mut stations = Vec::with_capacity(DEMO_STATIONS);
    let mut connections = Vec::new();
    for r in 0..ROWS {
        for c in 0..COLS {
            stations.push((id(r, c), c as f64 * SPACING, r as f64 * SPACING));
            if c + 1 < COLS {
                connections.push((id(r, c), id(r, c + 1), TransportType::Taxi));
            }
            if r + 1 < ROWS {
                connections.push((id(r, c), id(r + 1, c), TransportType::Taxi));
            }
        }
    }
    let layers = [
        (BUS, TransportType::Bus),
        (UNDERGROUND, TransportType::Underground),
        (WATER, TransportType::Water),
    ];
    for (edges, transport) in layers {
        connections.extend(edges.iter().map(|&(a, b)| (a, b, transport)));
    }
    (stations, connections)
}

/// Build the demo board.
pub fn demo_board() -> TransportGraph {
    let (stations, connections) = demo_records();
    TransportGraph::from_records(&stations, &connections)
        .expect("built-in demo board only references its own stations")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StationId;

    #[test]
    fn test_demo_board_shape() {
        let g = demo_board();
        assert_eq!(g.station_count(), DEMO_STATIONS);
        for t in TransportType::ALL {
            assert!(g.connections().iter().any(|c| c.transport == t));
        }
    }

    #[test]
    fn test_demo_board_is_connected_by_taxi() {
        let g = demo_board();
        let from_first = g.distances_from(StationId(1));
        assert_eq!(from_first.len(), DEMO_STATIONS);
        assert_eq!(g.shortest_distance(StationId(1), StationId(24)), Some(2));
    }
}
