//! Rollout evader with a short-horizon deception heuristic.
//!
//! Candidate moves with acceptable immediate risk are scored by how far they
//! take the evader from its previous station, the last disclosed station and
//! the seekers' one-round reach, by their risk, and by random rollouts in
//! which the seekers chase greedily. The move is then sampled with softmax
//! weights over the positive utilities.

use pursuit_core::{AgentId, BeliefTracker, GameState, Move, StationId, TransportGraph};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::RolloutConfig;
use crate::planner::distinct_destinations;
use crate::policy::{policy_rng, EvaderPolicy};
use crate::predict::SeekerForecast;
use crate::sim::{greedy_step, random_step, sample_weighted, SimWorld};

#[derive(Debug)]
pub struct RolloutEvader {
    config: RolloutConfig,
    rng: ChaCha20Rng,
    previous: Option<StationId>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    mv: Move,
    risk: f64,
    utility: f64,
}

/// `d / (1 + d)`, mapping hop counts into `[0, 1)`. Unreachable is 1.
fn squash(d: u32) -> f64 {
    if d == u32::MAX {
        1.0
    } else {
        let d = d as f64;
        d / (1.0 + d)
    }
}

impl RolloutEvader {
    pub fn new(config: RolloutConfig, seed: u64) -> Self {
        Self {
            config,
            rng: policy_rng(seed),
            previous: None,
        }
    }

    /// Inverse distance to the nearest seeker plus a penalty for stations
    /// with few exits. Standing on a seeker is infinitely risky.
    fn risk(&self, graph: &TransportGraph, forecast: &SeekerForecast, station: StationId) -> f64 {
        let d = forecast.threat_distance(station, 0);
        let base = match d {
            0 => return f64::INFINITY,
            u32::MAX => 0.0,
            d => 1.0 / d as f64,
        };
        base + self.config.low_branching_penalty / graph.degree(station).max(1) as f64
    }

    fn deception(
        &self,
        graph: &TransportGraph,
        forecast: &SeekerForecast,
        current: StationId,
        disclosed: Option<StationId>,
        station: StationId,
    ) -> f64 {
        let previous = self.previous.unwrap_or(current);
        let mut score = self.config.previous_position_weight
            * squash(graph.distance_or(station, previous, u32::MAX));
        if let Some(disclosed) = disclosed {
            score += self.config.disclosed_position_weight
                * squash(graph.distance_or(station, disclosed, u32::MAX));
        }
        score + self.config.predicted_seeker_weight * squash(forecast.threat_distance(station, 1))
    }

    /// Mean rollout value: -1 for a capture, otherwise the average seeker
    /// distance `a` mapped to `a / (1 + a)`.
    fn rollout_value(&mut self, graph: &TransportGraph, start: &SimWorld) -> f64 {
        let runs = self.config.rollouts.max(1);
        let mut total = 0.0;
        for _ in 0..runs {
            let mut world = start.clone();
            let mut distances = Vec::with_capacity(self.config.depth as usize);
            let mut captured = world.captured();
            for _ in 0..self.config.depth {
                if captured {
                    break;
                }
                let target = world.evader.station;
                for seeker in &mut world.seekers {
                    greedy_step(graph, seeker, target);
                }
                if world.captured() {
                    captured = true;
                    break;
                }
                random_step(graph, &mut world.evader, &mut self.rng);
                if world.captured() {
                    captured = true;
                    break;
                }
                distances.push(world.min_seeker_distance(graph));
            }
            total += if captured {
                -1.0
            } else if distances.is_empty() {
                squash(world.min_seeker_distance(graph))
            } else {
                let finite: Vec<f64> = distances
                    .iter()
                    .map(|&d| if d == u32::MAX { graph.station_count() as f64 } else { d as f64 })
                    .collect();
                let avg = finite.iter().sum::<f64>() / finite.len() as f64;
                avg / (1.0 + avg)
            };
        }
        total / runs as f64
    }

    fn pick(&mut self, candidates: &[Candidate]) -> Option<Move> {
        let best = candidates
            .iter()
            .map(|c| c.utility)
            .fold(f64::NEG_INFINITY, f64::max);
        if best <= 0.0 {
            return None;
        }
        let t = self.config.softmax_temperature;
        if t <= 0.0 {
            return candidates
                .iter()
                .find(|c| c.utility == best)
                .map(|c| c.mv);
        }
        let weighted: Vec<(Move, f64)> = candidates
            .iter()
            .filter(|c| c.utility > 0.0)
            .map(|c| (c.mv, ((c.utility - best) / t).exp()))
            .collect();
        sample_weighted(&weighted, &mut self.rng)
    }
}

impl EvaderPolicy for RolloutEvader {
    fn name(&self) -> &'static str {
        "rollout"
    }

    fn choose_move(&mut self, state: &GameState, belief: &BeliefTracker) -> Option<Move> {
        let legal = state.legal_moves(AgentId::EVADER).ok()?;
        let evader = state.evader();
        let moves = distinct_destinations(&legal, &evader.tickets);
        if moves.is_empty() {
            return None;
        }
        let graph = state.graph();
        let current = evader.station;
        let forecast = SeekerForecast::new(graph, &state.seeker_positions(), 1);
        let base_world = SimWorld::from_state(state);

        let risks: Vec<(Move, f64)> = moves
            .iter()
            .map(|&m| (m, self.risk(graph, &forecast, m.destination)))
            .collect();
        let lowest_risk = risks
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(m, _)| *m);

        let threshold = self.config.risk_threshold;
        let mut candidates = Vec::new();
        for &(mv, risk) in risks.iter().filter(|(_, r)| *r < threshold) {
            let mut world = base_world.clone();
            world.evader.advance(mv);
            let outcome = self.rollout_value(graph, &world);
            let utility = self.deception(graph, &forecast, current, belief.last_known(), mv.destination)
                - self.config.risk_weight * risk
                + self.config.outcome_weight * outcome;
            trace!(destination = %mv.destination, risk, outcome, utility, "rollout candidate");
            candidates.push(Candidate { mv, risk, utility });
        }

        let chosen = self.pick(&candidates).or_else(|| {
            candidates
                .iter()
                .min_by(|a, b| a.risk.total_cmp(&b.risk))
                .map(|c| c.mv)
                .or(lowest_risk)
        });
        if let Some(mv) = chosen {
            debug!(
                destination = %mv.destination,
                candidates = candidates.len(),
                "rollout move"
            );
        }
        self.previous = Some(current);
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pursuit_core::{demo_board, GameRules, GameSetup, TransportType::*};
    use std::sync::Arc;

    fn line_game(n: u32, evader: u32, seekers: &[u32]) -> GameState {
        let stations: Vec<_> = (1..=n).map(|i| (i, i as f64, 0.0)).collect();
        let edges: Vec<_> = (1..n).map(|i| (i, i + 1, Taxi)).collect();
        let graph = Arc::new(TransportGraph::from_records(&stations, &edges).unwrap());
        let setup = GameSetup::new(
            StationId(evader),
            seekers.iter().map(|&s| StationId(s)).collect(),
        );
        GameState::new(graph, GameRules::standard(), &setup).unwrap()
    }

    #[test]
    fn test_avoids_risky_moves() {
        // moving to 4 puts the evader next to the seeker at 3
        let state = line_game(9, 5, &[3]);
        let mut policy = RolloutEvader::new(RolloutConfig::for_testing().with_risk_threshold(0.6), 9);
        for _ in 0..10 {
            let mv = policy.choose_move(&state, state.belief()).unwrap();
            assert_eq!(mv.destination, StationId(6));
        }
    }

    #[test]
    fn test_all_risky_takes_lowest_risk() {
        // both exits are adjacent to a seeker
        let state = line_game(7, 4, &[2, 6]);
        let mut policy = RolloutEvader::new(RolloutConfig::for_testing().with_risk_threshold(0.1), 4);
        let mv = policy.choose_move(&state, state.belief()).unwrap();
        assert!([StationId(3), StationId(5)].contains(&mv.destination));
    }

    #[test]
    fn test_squash() {
        assert_eq!(squash(0), 0.0);
        assert!((squash(1) - 0.5).abs() < 1e-12);
        assert_eq!(squash(u32::MAX), 1.0);
    }

    #[test]
    fn test_remembers_previous_station() {
        let state = line_game(9, 5, &[1]);
        let mut policy = RolloutEvader::new(RolloutConfig::for_testing(), 6);
        policy.choose_move(&state, state.belief());
        assert_eq!(policy.previous, Some(StationId(5)));
    }

    #[test]
    fn test_moves_are_legal_on_demo_board() {
        let graph = Arc::new(demo_board());
        let setup = GameSetup::new(StationId(9), vec![StationId(1), StationId(6), StationId(19)]);
        let state = GameState::new(graph, GameRules::standard(), &setup).unwrap();
        let mut policy = RolloutEvader::new(RolloutConfig::default(), 8);
        for _ in 0..5 {
            let mv = policy.choose_move(&state, state.belief()).unwrap();
            assert!(state.legal_moves(AgentId::EVADER).unwrap().contains(&mv));
        }
    }
}
