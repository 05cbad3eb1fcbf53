//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.
//! Every section is `#[serde(default)]`, so a config.toml only needs the keys
//! it actually changes.

use crate::defaults;
use serde::Deserialize;

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub belief: BeliefConfig,
    #[serde(default)]
    pub planner: PlannerSection,
    #[serde(default)]
    pub lookahead: LookaheadSection,
    #[serde(default)]
    pub rollout: RolloutSection,
    #[serde(default)]
    pub monte_carlo: MonteCarloSection,
    #[serde(default)]
    pub search_mode: SearchModeSection,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    pub log_level: String,
    /// Seed for every random generator; 0 means "draw from the OS".
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

/// Game rules: turn cap, reveal schedule and starting ticket allotments
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RulesConfig {
    pub max_turns: u32,
    /// Ascending turn numbers on which the evader's position is disclosed.
    pub reveal_turns: Vec<u32>,
    pub seeker_count: usize,
    pub seeker_taxi_tickets: u32,
    pub seeker_bus_tickets: u32,
    pub seeker_underground_tickets: u32,
    pub seeker_water_tickets: u32,
    /// The evader's taxi, bus and underground tickets are unlimited.
    pub evader_water_tickets: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_turns: defaults::max_turns(),
            reveal_turns: defaults::reveal_turns().to_vec(),
            seeker_count: defaults::seeker_count(),
            seeker_taxi_tickets: defaults::seeker_taxi_tickets(),
            seeker_bus_tickets: defaults::seeker_bus_tickets(),
            seeker_underground_tickets: defaults::seeker_underground_tickets(),
            seeker_water_tickets: defaults::seeker_water_tickets(),
            evader_water_tickets: defaults::evader_water_tickets(),
        }
    }
}

/// Belief tracker tuning
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BeliefConfig {
    /// Weight of the nearest-seeker distance term (alpha).
    pub distance_weight: f64,
}

impl Default for BeliefConfig {
    fn default() -> Self {
        Self {
            distance_weight: defaults::belief_distance_weight(),
        }
    }
}

/// Path planner bounds
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlannerSection {
    pub max_expansions: usize,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            max_expansions: defaults::planner_max_expansions(),
        }
    }
}

/// Safety-lookahead evader tuning
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LookaheadSection {
    pub prediction_depth: usize,
    pub search_depth: usize,
    pub target_length: usize,
    pub max_revisits: u32,
    pub max_nodes: usize,
    pub safe_step_reward: f64,
    pub unsafe_step_penalty: f64,
    pub distance_weight: f64,
    pub branching_weight: f64,
    pub diversity_weight: f64,
    pub final_distance_weight: f64,
}

impl Default for LookaheadSection {
    fn default() -> Self {
        Self {
            prediction_depth: defaults::lookahead_prediction_depth(),
            search_depth: defaults::lookahead_search_depth(),
            target_length: defaults::lookahead_target_length(),
            max_revisits: defaults::lookahead_max_revisits(),
            max_nodes: defaults::lookahead_max_nodes(),
            safe_step_reward: defaults::lookahead_safe_step_reward(),
            unsafe_step_penalty: defaults::lookahead_unsafe_step_penalty(),
            distance_weight: defaults::lookahead_distance_weight(),
            branching_weight: defaults::lookahead_branching_weight(),
            diversity_weight: defaults::lookahead_diversity_weight(),
            final_distance_weight: defaults::lookahead_final_distance_weight(),
        }
    }
}

/// Rollout (decoy) evader tuning
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RolloutSection {
    pub risk_threshold: f64,
    pub rollouts: u32,
    pub depth: u32,
    pub previous_position_weight: f64,
    pub disclosed_position_weight: f64,
    pub predicted_seeker_weight: f64,
    pub risk_weight: f64,
    pub outcome_weight: f64,
    pub low_branching_penalty: f64,
    pub softmax_temperature: f64,
}

impl Default for RolloutSection {
    fn default() -> Self {
        Self {
            risk_threshold: defaults::rollout_risk_threshold(),
            rollouts: defaults::rollout_rollouts(),
            depth: defaults::rollout_depth(),
            previous_position_weight: defaults::rollout_previous_position_weight(),
            disclosed_position_weight: defaults::rollout_disclosed_position_weight(),
            predicted_seeker_weight: defaults::rollout_predicted_seeker_weight(),
            risk_weight: defaults::rollout_risk_weight(),
            outcome_weight: defaults::rollout_outcome_weight(),
            low_branching_penalty: defaults::rollout_low_branching_penalty(),
            softmax_temperature: defaults::rollout_softmax_temperature(),
        }
    }
}

/// Monte Carlo seeker tuning
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MonteCarloSection {
    pub simulations: u32,
    pub depth: u32,
    pub greedy_probability: f64,
    pub discount: f64,
}

impl Default for MonteCarloSection {
    fn default() -> Self {
        Self {
            simulations: defaults::monte_carlo_simulations(),
            depth: defaults::monte_carlo_depth(),
            greedy_probability: defaults::monte_carlo_greedy_probability(),
            discount: defaults::monte_carlo_discount(),
        }
    }
}

/// Opening search-mode seeker tuning
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchModeSection {
    /// Last turn on which search mode may run (only before the first disclosure).
    pub until_turn: u32,
    pub depth: usize,
}

impl Default for SearchModeSection {
    fn default() -> Self {
        Self {
            until_turn: defaults::search_mode_until_turn(),
            depth: defaults::search_mode_depth(),
        }
    }
}

/// Headless arena runner configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    pub games: u32,
    pub evader_policy: String,
    pub seeker_policy: String,
    /// Log progress every N games (0 to disable).
    pub log_interval: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::arena_games(),
            evader_policy: defaults::arena_evader_policy().into(),
            seeker_policy: defaults::arena_seeker_policy().into(),
            log_interval: defaults::arena_log_interval(),
        }
    }
}
