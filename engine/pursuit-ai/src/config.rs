//! Tuning parameters for planners and policies.

use pursuit_config::CentralConfig;

/// Bounds for the ticket-constrained A* planner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Node expansions before the search gives up.
    pub max_expansions: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { max_expansions: 100 }
    }
}

impl PlannerConfig {
    pub fn with_max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = n;
        self
    }
}

/// Safety-lookahead evader tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct LookaheadConfig {
    /// Rounds of seeker reach to predict.
    pub prediction_depth: usize,
    /// Hard cap on path length explored by the depth-first search.
    pub search_depth: usize,
    /// Paths stop growing once they reach this length.
    pub target_length: usize,
    /// How often a station may appear on one candidate path.
    pub max_revisits: u32,
    /// Total search nodes per decision.
    pub max_nodes: usize,
    pub safe_step_reward: f64,
    pub unsafe_step_penalty: f64,
    /// Multiplies the distance to the nearest predicted seeker at each step.
    pub distance_weight: f64,
    pub branching_weight: f64,
    pub diversity_weight: f64,
    pub final_distance_weight: f64,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            prediction_depth: 3,
            search_depth: 10,
            target_length: 6,
            max_revisits: 2,
            max_nodes: 20_000,
            safe_step_reward: 100.0,
            unsafe_step_penalty: 200.0,
            distance_weight: 10.0,
            branching_weight: 15.0,
            diversity_weight: 20.0,
            final_distance_weight: 25.0,
        }
    }
}

impl LookaheadConfig {
    pub fn for_testing() -> Self {
        Self {
            max_nodes: 2_000,
            target_length: 4,
            ..Self::default()
        }
    }

    pub fn with_prediction_depth(mut self, depth: usize) -> Self {
        self.prediction_depth = depth;
        self
    }

    pub fn with_target_length(mut self, length: usize) -> Self {
        self.target_length = length;
        self
    }

    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    /// Effective maximum path length.
    pub fn path_limit(&self) -> usize {
        self.target_length.min(self.search_depth)
    }
}

/// Rollout evader tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloutConfig {
    /// Candidates with immediate risk at or above this are discarded.
    pub risk_threshold: f64,
    pub rollouts: u32,
    /// Simulated rounds per rollout.
    pub depth: u32,
    pub previous_position_weight: f64,
    pub disclosed_position_weight: f64,
    pub predicted_seeker_weight: f64,
    pub risk_weight: f64,
    pub outcome_weight: f64,
    /// Added to risk as `penalty / degree`.
    pub low_branching_penalty: f64,
    pub softmax_temperature: f64,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            risk_threshold: 0.75,
            rollouts: 6,
            depth: 3,
            previous_position_weight: 0.6,
            disclosed_position_weight: 0.8,
            predicted_seeker_weight: 1.0,
            risk_weight: 2.0,
            outcome_weight: 3.0,
            low_branching_penalty: 0.25,
            softmax_temperature: 1.0,
        }
    }
}

impl RolloutConfig {
    pub fn for_testing() -> Self {
        Self {
            rollouts: 3,
            depth: 2,
            ..Self::default()
        }
    }

    pub fn with_rollouts(mut self, n: u32) -> Self {
        self.rollouts = n;
        self
    }

    pub fn with_risk_threshold(mut self, threshold: f64) -> Self {
        self.risk_threshold = threshold;
        self
    }

    pub fn with_temperature(mut self, t: f64) -> Self {
        self.softmax_temperature = t;
        self
    }
}

/// Monte Carlo seeker tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloConfig {
    /// Simulations per candidate move.
    pub simulations: u32,
    /// Rounds simulated after the candidate move.
    pub depth: u32,
    /// Chance that a simulated seeker steps greedily instead of randomly.
    pub greedy_probability: f64,
    /// Per-round discount applied to a capture.
    pub discount: f64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            simulations: 100,
            depth: 3,
            greedy_probability: 0.8,
            discount: 0.9,
        }
    }
}

impl MonteCarloConfig {
    pub fn for_testing() -> Self {
        Self {
            simulations: 20,
            depth: 2,
            ..Self::default()
        }
    }

    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulations = n;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_greedy_probability(mut self, p: f64) -> Self {
        self.greedy_probability = p;
        self
    }
}

/// Pre-disclosure positioning.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchModeConfig {
    /// Search mode is used while no disclosure has happened and the turn is
    /// at most this.
    pub until_turn: u32,
    /// Breadth-first exploration depth.
    pub depth: usize,
}

impl Default for SearchModeConfig {
    fn default() -> Self {
        Self {
            until_turn: 3,
            depth: 3,
        }
    }
}

impl SearchModeConfig {
    pub fn with_until_turn(mut self, turn: u32) -> Self {
        self.until_turn = turn;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

/// All AI tuning in one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiConfig {
    pub planner: PlannerConfig,
    pub lookahead: LookaheadConfig,
    pub rollout: RolloutConfig,
    pub monte_carlo: MonteCarloConfig,
    pub search_mode: SearchModeConfig,
}

impl AiConfig {
    /// Small budgets for fast tests.
    pub fn for_testing() -> Self {
        Self {
            planner: PlannerConfig::default(),
            lookahead: LookaheadConfig::for_testing(),
            rollout: RolloutConfig::for_testing(),
            monte_carlo: MonteCarloConfig::for_testing(),
            search_mode: SearchModeConfig::default(),
        }
    }

    /// Map the file/env configuration onto typed tuning structs.
    pub fn from_central(config: &CentralConfig) -> Self {
        let l = &config.lookahead;
        let r = &config.rollout;
        let m = &config.monte_carlo;
        Self {
            planner: PlannerConfig {
                max_expansions: config.planner.max_expansions,
            },
            lookahead: LookaheadConfig {
                prediction_depth: l.prediction_depth,
                search_depth: l.search_depth,
                target_length: l.target_length,
                max_revisits: l.max_revisits,
                max_nodes: l.max_nodes,
                safe_step_reward: l.safe_step_reward,
                unsafe_step_penalty: l.unsafe_step_penalty,
                distance_weight: l.distance_weight,
                branching_weight: l.branching_weight,
                diversity_weight: l.diversity_weight,
                final_distance_weight: l.final_distance_weight,
            },
            rollout: RolloutConfig {
                risk_threshold: r.risk_threshold,
                rollouts: r.rollouts,
                depth: r.depth,
                previous_position_weight: r.previous_position_weight,
                disclosed_position_weight: r.disclosed_position_weight,
                predicted_seeker_weight: r.predicted_seeker_weight,
                risk_weight: r.risk_weight,
                outcome_weight: r.outcome_weight,
                low_branching_penalty: r.low_branching_penalty,
                softmax_temperature: r.softmax_temperature,
            },
            monte_carlo: MonteCarloConfig {
                simulations: m.simulations,
                depth: m.depth,
                greedy_probability: m.greedy_probability,
                discount: m.discount,
            },
            search_mode: SearchModeConfig {
                until_turn: config.search_mode.until_turn,
                depth: config.search_mode.depth,
            },
        }
    }
}
