//! Static transport graph of stations and typed connections.
//!
//! The graph is immutable once built. Breadth-first distance tables are
//! cached per source station for the lifetime of the graph; the cache sits
//! behind an `RwLock` and the graph is `Sync`.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::trace;

use crate::transport::{TransportSet, TransportType};

/// Station identifier as printed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Board coordinate. Only used for heuristic distances, never for legality.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A graph node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub position: Point,
    /// Transport types of all incident connections.
    pub transports: TransportSet,
}

/// An undirected, typed edge. Parallel edges of different types are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub a: StationId,
    pub b: StationId,
    pub transport: TransportType,
}

/// Errors raised while assembling a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("station {0} defined more than once")]
    DuplicateStation(StationId),

    #[error("connection {a}-{b} ({transport}) references unknown station {missing}")]
    UnknownStation {
        a: StationId,
        b: StationId,
        transport: TransportType,
        missing: StationId,
    },

    #[error("station {0} is connected to itself")]
    SelfLoop(StationId),

    #[error("graph has no stations")]
    Empty,
}

type DistanceTable = Arc<HashMap<StationId, u32>>;

/// Immutable station/connection graph with cached BFS distances.
#[derive(Debug)]
pub struct TransportGraph {
    stations: Vec<Station>,
    index: HashMap<StationId, usize>,
    adjacency: Vec<Vec<(StationId, TransportType)>>,
    connections: Vec<Connection>,
    distance_cache: RwLock<HashMap<StationId, DistanceTable>>,
}

impl TransportGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Build a graph from plain station and connection records.
    ///
    /// This is the in-memory shape a map loader hands over: station id with
    /// its coordinate, and `(a, b, transport)` connection triples.
    pub fn from_records(
        stations: &[(u32, f64, f64)],
        connections: &[(u32, u32, TransportType)],
    ) -> Result<Self, GraphError> {
        let mut builder = GraphBuilder::default();
        for &(id, x, y) in stations {
            builder = builder.station(id, x, y);
        }
        for &(a, b, transport) in connections {
            builder = builder.connect(a, b, transport);
        }
        builder.build()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Stations in ascending id order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stations.iter().map(|s| s.id)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[inline]
    pub fn contains(&self, id: StationId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.index.get(&id).map(|&i| &self.stations[i])
    }

    pub fn coordinate(&self, id: StationId) -> Option<Point> {
        self.station(id).map(|s| s.position)
    }

    /// Transport types serviced by a station (empty for unknown ids).
    pub fn transport_types(&self, id: StationId) -> TransportSet {
        self.station(id)
            .map(|s| s.transports)
            .unwrap_or(TransportSet::EMPTY)
    }

    /// Every `(neighbor, transport)` pair incident to `id`, one entry per edge.
    ///
    /// Unknown stations have no neighbors.
    pub fn neighbors(&self, id: StationId) -> &[(StationId, TransportType)] {
        match self.index.get(&id) {
            Some(&i) => &self.adjacency[i],
            None => &[],
        }
    }

    /// Neighbors reachable from `id` over edges of one transport type.
    pub fn neighbors_by(
        &self,
        id: StationId,
        transport: TransportType,
    ) -> impl Iterator<Item = StationId> + '_ {
        self.neighbors(id)
            .iter()
            .filter(move |(_, t)| *t == transport)
            .map(|(s, _)| *s)
    }

    /// Number of incident edges, counting parallel edges separately.
    pub fn degree(&self, id: StationId) -> usize {
        self.neighbors(id).len()
    }

    pub fn are_connected(&self, a: StationId, b: StationId) -> bool {
        self.neighbors(a).iter().any(|(s, _)| *s == b)
    }

    /// Straight-line distance between two stations' coordinates.
    ///
    /// Returns infinity if either station is unknown.
    pub fn euclidean(&self, a: StationId, b: StationId) -> f64 {
        match (self.coordinate(a), self.coordinate(b)) {
            (Some(pa), Some(pb)) => pa.distance(pb),
            _ => f64::INFINITY,
        }
    }

    /// Unweighted shortest-path distance (number of hops, any transport).
    ///
    /// `None` means the stations are disconnected or unknown.
    pub fn shortest_distance(&self, a: StationId, b: StationId) -> Option<u32> {
        if a == b && self.contains(a) {
            return Some(0);
        }
        self.distances_from(a).get(&b).copied()
    }

    /// Shortest distance with unreachable pairs mapped to `fallback`.
    #[inline]
    pub fn distance_or(&self, a: StationId, b: StationId, fallback: u32) -> u32 {
        self.shortest_distance(a, b).unwrap_or(fallback)
    }

    /// Full BFS distance table from `source`, cached for the graph's lifetime.
    pub fn distances_from(&self, source: StationId) -> DistanceTable {
        if let Some(table) = self
            .distance_cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&source)
        {
            return Arc::clone(table);
        }

        let table = Arc::new(self.bfs(source));
        trace!(source = %source, reached = table.len(), "cached BFS distances");
        self.distance_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(source)
            .or_insert_with(|| Arc::clone(&table));
        table
    }

    fn bfs(&self, source: StationId) -> HashMap<StationId, u32> {
        let mut dist = HashMap::with_capacity(self.stations.len());
        if !self.contains(source) {
            return dist;
        }
        let mut queue = VecDeque::new();
        dist.insert(source, 0);
        queue.push_back(source);
        while let Some(current) = queue.pop_front() {
            let d = dist[&current];
            for &(next, _) in self.neighbors(current) {
                if !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    }
}

/// Incremental, validating constructor for [`TransportGraph`].
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    stations: Vec<(StationId, Point)>,
    connections: Vec<Connection>,
}

impl GraphBuilder {
    pub fn station(mut self, id: u32, x: f64, y: f64) -> Self {
        self.stations.push((StationId(id), Point::new(x, y)));
        self
    }

    pub fn connect(mut self, a: u32, b: u32, transport: TransportType) -> Self {
        self.connections.push(Connection {
            a: StationId(a),
            b: StationId(b),
            transport,
        });
        self
    }

    pub fn build(self) -> Result<TransportGraph, GraphError> {
        if self.stations.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut stations: Vec<Station> = self
            .stations
            .into_iter()
            .map(|(id, position)| Station {
                id,
                position,
                transports: TransportSet::EMPTY,
            })
            .collect();
        stations.sort_by_key(|s| s.id);

        let mut index = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            if index.insert(station.id, i).is_some() {
                return Err(GraphError::DuplicateStation(station.id));
            }
        }

        let mut adjacency = vec![Vec::new(); stations.len()];
        for conn in &self.connections {
            if conn.a == conn.b {
                return Err(GraphError::SelfLoop(conn.a));
            }
            let lookup = |id: StationId| {
                index.get(&id).copied().ok_or(GraphError::UnknownStation {
                    a: conn.a,
                    b: conn.b,
                    transport: conn.transport,
                    missing: id,
                })
            };
            let ia = lookup(conn.a)?;
            let ib = lookup(conn.b)?;
            adjacency[ia].push((conn.b, conn.transport));
            adjacency[ib].push((conn.a, conn.transport));
            stations[ia].transports.insert(conn.transport);
            stations[ib].transports.insert(conn.transport);
        }
        for list in &mut adjacency {
            list.sort();
            list.dedup();
        }

        Ok(TransportGraph {
            stations,
            index,
            adjacency,
            connections: self.connections,
            distance_cache: RwLock::new(HashMap::new()),
        })
    }
}
