//! Inference over the evader's hidden position.
//!
//! Seekers only ever see the transport type of each hidden evader move. The
//! tracker keeps the last disclosed position and the types played since, and
//! derives the exact set of stations consistent with following that type
//! sequence from the disclosure point. Doubling back is allowed, so the set
//! can include stations closer than the number of moves suggests.
//!
//! [`BeliefTracker::probability_map`] turns the set into a distribution that
//! favours stations far from the seekers, using straight-line distance as a
//! cheap stand-in for graph distance.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::graph::{StationId, TransportGraph};
use crate::transport::TransportType;

/// Stations reachable from `start` by following exactly `sequence`, one edge
/// of the given type per step.
pub fn reachable_after(
    graph: &TransportGraph,
    start: StationId,
    sequence: &[TransportType],
) -> BTreeSet<StationId> {
    let mut frontier = BTreeSet::new();
    if graph.contains(start) {
        frontier.insert(start);
    }
    for &transport in sequence {
        frontier = frontier
            .iter()
            .flat_map(|&s| graph.neighbors_by(s, transport))
            .collect();
        if frontier.is_empty() {
            break;
        }
    }
    frontier
}

/// Belief over the evader's position as seen by the seekers.
#[derive(Debug, Clone, Serialize)]
pub struct BeliefTracker {
    last_known: Option<StationId>,
    disclosed_turn: Option<u32>,
    buffer: Vec<TransportType>,
    reachable: BTreeSet<StationId>,
    /// Weight of the nearest-seeker distance term.
    alpha: f64,
}

impl BeliefTracker {
    pub const DEFAULT_ALPHA: f64 = 0.5;

    pub fn new(alpha: f64) -> Self {
        Self {
            last_known: None,
            disclosed_turn: None,
            buffer: Vec::new(),
            reachable: BTreeSet::new(),
            alpha,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Last disclosed evader position, `None` before the first reveal.
    pub fn last_known(&self) -> Option<StationId> {
        self.last_known
    }

    pub fn disclosed_turn(&self) -> Option<u32> {
        self.disclosed_turn
    }

    pub fn has_disclosure(&self) -> bool {
        self.last_known.is_some()
    }

    /// Transport types played since the last disclosure.
    pub fn moves_since_disclosure(&self) -> &[TransportType] {
        &self.buffer
    }

    /// Candidate stations. Empty until the first disclosure.
    pub fn reachable(&self) -> &BTreeSet<StationId> {
        &self.reachable
    }

    /// Reset to certainty at the evader's true position.
    pub fn on_reveal(&mut self, position: StationId, turn: u32) {
        self.last_known = Some(position);
        self.disclosed_turn = Some(turn);
        self.buffer.clear();
        self.reachable = BTreeSet::from([position]);
        debug!(station = %position, turn, "belief reset to disclosed position");
    }

    /// Record a hidden move of the given type and refine the candidate set.
    pub fn on_hidden_move(&mut self, graph: &TransportGraph, transport: TransportType) {
        self.buffer.push(transport);
        let Some(origin) = self.last_known else {
            return;
        };
        self.reachable = reachable_after(graph, origin, &self.buffer);
        if self.reachable.is_empty() {
            warn!(
                origin = %origin,
                moves = self.buffer.len(),
                "no station matches the observed moves, falling back to last disclosure"
            );
            self.reachable.insert(origin);
        }
        debug!(
            transport = %transport,
            candidates = self.reachable.len(),
            "belief refined"
        );
    }

    /// Normalised distribution over possible evader stations.
    ///
    /// Uniform over the whole board before the first disclosure. Afterwards
    /// each candidate gets `(1 / |R|) * (1 + alpha * d)` where `d` is the
    /// straight-line distance to the nearest seeker in `seekers`, normalised
    /// to sum to one.
    pub fn probability_map(
        &self,
        graph: &TransportGraph,
        seekers: &[StationId],
    ) -> BTreeMap<StationId, f64> {
        if self.last_known.is_none() {
            let n = graph.station_count();
            if n == 0 {
                return BTreeMap::new();
            }
            let p = 1.0 / n as f64;
            return graph.station_ids().map(|s| (s, p)).collect();
        }

        let base = 1.0 / self.reachable.len() as f64;
        let weights: Vec<(StationId, f64)> = self
            .reachable
            .iter()
            .map(|&station| {
                let nearest = seekers
                    .iter()
                    .map(|&s| graph.euclidean(station, s))
                    .filter(|d| d.is_finite())
                    .fold(f64::INFINITY, f64::min);
                let nearest = if nearest.is_finite() { nearest } else { 0.0 };
                (station, base * (1.0 + self.alpha * nearest))
            })
            .collect();

        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if total <= 0.0 || !total.is_finite() {
            return weights.into_iter().map(|(s, _)| (s, base)).collect();
        }
        weights.into_iter().map(|(s, w)| (s, w / total)).collect()
    }

    /// Station(s) with the highest probability, in ascending id order.
    pub fn most_likely(&self, graph: &TransportGraph, seekers: &[StationId]) -> Vec<StationId> {
        let map = self.probability_map(graph, seekers);
        let best = map.values().copied().fold(f64::NEG_INFINITY, f64::max);
        map.into_iter()
            .filter(|(_, p)| (*p - best).abs() <= f64::EPSILON * best.abs().max(1.0))
            .map(|(s, _)| s)
            .collect()
    }
}

impl Default for BeliefTracker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA)
    }
}
