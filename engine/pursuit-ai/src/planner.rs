//! Ticket-constrained best-first path search.

use pursuit_core::{Move, StationId, TicketCount, TicketInventory, TransportGraph};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::trace;

use crate::config::PlannerConfig;

/// Heap key: `g + h`, ordered with `total_cmp` so NaN cannot break the heap.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Priority(f64);

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A*-style planner over a borrowed graph.
///
/// Edges are only followed if the live inventory has a ticket for their
/// type; tickets are not consumed along the hypothetical path. Equal
/// priorities are broken by step count and then station id, so results are
/// deterministic for a given graph.
#[derive(Debug, Clone, Copy)]
pub struct PathPlanner<'g> {
    graph: &'g TransportGraph,
    max_expansions: usize,
}

impl<'g> PathPlanner<'g> {
    pub fn new(graph: &'g TransportGraph, config: &PlannerConfig) -> Self {
        Self {
            graph,
            max_expansions: config.max_expansions,
        }
    }

    /// Stations from `start` to `goal` inclusive, or `None` if no path was
    /// found within the expansion budget.
    pub fn find_path(
        &self,
        start: StationId,
        goal: StationId,
        tickets: &TicketInventory,
    ) -> Option<Vec<StationId>> {
        if !self.graph.contains(start) || !self.graph.contains(goal) {
            return None;
        }
        if start == goal {
            return Some(vec![start]);
        }

        let h = |s: StationId| self.graph.euclidean(s, goal);
        let mut open = BinaryHeap::new();
        let mut best_g: HashMap<StationId, u32> = HashMap::new();
        let mut came_from: HashMap<StationId, StationId> = HashMap::new();
        let mut closed: HashSet<StationId> = HashSet::new();
        let mut expansions = 0usize;

        best_g.insert(start, 0);
        open.push(Reverse((Priority(h(start)), 0u32, start)));

        while let Some(Reverse((_, g, current))) = open.pop() {
            if current == goal {
                return Some(reconstruct(&came_from, start, goal));
            }
            if !closed.insert(current) {
                continue;
            }
            expansions += 1;
            if expansions > self.max_expansions {
                trace!(
                    start = %start,
                    goal = %goal,
                    expansions,
                    "planner expansion cap reached"
                );
                return None;
            }
            for &(next, transport) in self.graph.neighbors(current) {
                if !tickets.available(transport) || closed.contains(&next) {
                    continue;
                }
                let ng = g + 1;
                if best_g.get(&next).is_some_and(|&old| old <= ng) {
                    continue;
                }
                best_g.insert(next, ng);
                came_from.insert(next, current);
                open.push(Reverse((Priority(ng as f64 + h(next)), ng, next)));
            }
        }
        None
    }
}

fn reconstruct(
    came_from: &HashMap<StationId, StationId>,
    start: StationId,
    goal: StationId,
) -> Vec<StationId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Pick the ticket to use for stepping to `destination` among `moves`.
///
/// Unlimited tickets are preferred, then the type with the most remaining.
pub fn preferred_move(
    moves: &[Move],
    destination: StationId,
    tickets: &TicketInventory,
) -> Option<Move> {
    moves
        .iter()
        .filter(|m| m.destination == destination)
        .max_by_key(|m| match tickets.get(m.transport) {
            TicketCount::Unlimited => u64::MAX,
            TicketCount::Limited(n) => n as u64,
        })
        .copied()
}

/// One move per reachable destination, using [`preferred_move`].
pub fn distinct_destinations(moves: &[Move], tickets: &TicketInventory) -> Vec<Move> {
    let mut out: Vec<Move> = Vec::new();
    for m in moves {
        if out.iter().any(|o| o.destination == m.destination) {
            continue;
        }
        if let Some(best) = preferred_move(moves, m.destination, tickets) {
            out.push(best);
        }
    }
    out
}
