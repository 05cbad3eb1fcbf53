//! Forecasts of where the seekers could be in the next few rounds.
//!
//! Ticket types are ignored: any incident edge counts as traversable, so the
//! forecast over-approximates real seeker reach.

use pursuit_core::{StationId, TransportGraph};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Per-seeker cumulative reach sets for rounds `0..=depth`.
///
/// `result[i][r]` is every station seeker `i` could occupy after at most `r`
/// moves from `starts[i]`.
pub fn predict_seeker_reach(
    graph: &TransportGraph,
    starts: &[StationId],
    depth: usize,
) -> Vec<Vec<BTreeSet<StationId>>> {
    starts
        .iter()
        .map(|&start| {
            let mut rounds = Vec::with_capacity(depth + 1);
            let mut reach = BTreeSet::from([start]);
            rounds.push(reach.clone());
            for _ in 0..depth {
                let next: Vec<StationId> = reach
                    .iter()
                    .flat_map(|&s| graph.neighbors(s).iter().map(|(n, _)| *n))
                    .collect();
                reach.extend(next);
                rounds.push(reach.clone());
            }
            rounds
        })
        .collect()
}

/// Seeker reach plus, per round, the hop distance from every station to the
/// nearest station any seeker could occupy.
#[derive(Debug, Clone)]
pub struct SeekerForecast {
    reach: Vec<Vec<BTreeSet<StationId>>>,
    threat: Vec<HashMap<StationId, u32>>,
}

impl SeekerForecast {
    pub fn new(graph: &TransportGraph, starts: &[StationId], depth: usize) -> Self {
        let reach = predict_seeker_reach(graph, starts, depth);
        let threat = (0..=depth)
            .map(|round| {
                let sources: BTreeSet<StationId> = reach
                    .iter()
                    .flat_map(|per_seeker| per_seeker[round].iter().copied())
                    .collect();
                multi_source_distances(graph, &sources)
            })
            .collect();
        Self { reach, threat }
    }

    pub fn depth(&self) -> usize {
        self.threat.len().saturating_sub(1)
    }

    /// Reach sets of one seeker, indexed by round.
    pub fn reach(&self, seeker: usize) -> Option<&[BTreeSet<StationId>]> {
        self.reach.get(seeker).map(Vec::as_slice)
    }

    /// Union of every seeker's reach at `round`, clamped to the forecast depth.
    pub fn positions_at(&self, round: usize) -> BTreeSet<StationId> {
        let round = round.min(self.depth());
        self.reach
            .iter()
            .flat_map(|per_seeker| per_seeker[round].iter().copied())
            .collect()
    }

    /// Hops from `station` to the nearest possible seeker position at
    /// `round`. Unreachable stations report `u32::MAX`.
    pub fn threat_distance(&self, station: StationId, round: usize) -> u32 {
        let round = round.min(self.depth());
        self.threat
            .get(round)
            .and_then(|table| table.get(&station))
            .copied()
            .unwrap_or(u32::MAX)
    }
}

fn multi_source_distances(
    graph: &TransportGraph,
    sources: &BTreeSet<StationId>,
) -> HashMap<StationId, u32> {
    let mut dist = HashMap::with_capacity(graph.station_count());
    let mut queue = VecDeque::new();
    for &s in sources {
        dist.insert(s, 0);
        queue.push_back(s);
    }
    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        for &(next, _) in graph.neighbors(current) {
            if !dist.contains_key(&next) {
                dist.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}
