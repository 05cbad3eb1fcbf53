//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so every component and the checked-in documentation agree on one set of
//! values.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    rules: RulesDefaults,
    belief: BeliefDefaults,
    planner: PlannerDefaults,
    lookahead: LookaheadDefaults,
    rollout: RolloutDefaults,
    monte_carlo: MonteCarloDefaults,
    search_mode: SearchModeDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct RulesDefaults {
    max_turns: u32,
    reveal_turns: Vec<u32>,
    seeker_count: usize,
    seeker_taxi_tickets: u32,
    seeker_bus_tickets: u32,
    seeker_underground_tickets: u32,
    seeker_water_tickets: u32,
    evader_water_tickets: u32,
}

#[derive(Debug, Deserialize)]
struct BeliefDefaults {
    distance_weight: f64,
}

#[derive(Debug, Deserialize)]
struct PlannerDefaults {
    max_expansions: usize,
}

#[derive(Debug, Deserialize)]
struct LookaheadDefaults {
    prediction_depth: usize,
    search_depth: usize,
    target_length: usize,
    max_revisits: u32,
    max_nodes: usize,
    safe_step_reward: f64,
    unsafe_step_penalty: f64,
    distance_weight: f64,
    branching_weight: f64,
    diversity_weight: f64,
    final_distance_weight: f64,
}

#[derive(Debug, Deserialize)]
struct RolloutDefaults {
    risk_threshold: f64,
    rollouts: u32,
    depth: u32,
    previous_position_weight: f64,
    disclosed_position_weight: f64,
    predicted_seeker_weight: f64,
    risk_weight: f64,
    outcome_weight: f64,
    low_branching_penalty: f64,
    softmax_temperature: f64,
}

#[derive(Debug, Deserialize)]
struct MonteCarloDefaults {
    simulations: u32,
    depth: u32,
    greedy_probability: f64,
    discount: f64,
}

#[derive(Debug, Deserialize)]
struct SearchModeDefaults {
    until_turn: u32,
    depth: usize,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    evader_policy: String,
    seeker_policy: String,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> u64 {
    DEFAULTS.common.seed
}

// Rules
pub fn max_turns() -> u32 {
    DEFAULTS.rules.max_turns
}
pub fn reveal_turns() -> &'static [u32] {
    &DEFAULTS.rules.reveal_turns
}
pub fn seeker_count() -> usize {
    DEFAULTS.rules.seeker_count
}
pub fn seeker_taxi_tickets() -> u32 {
    DEFAULTS.rules.seeker_taxi_tickets
}
pub fn seeker_bus_tickets() -> u32 {
    DEFAULTS.rules.seeker_bus_tickets
}
pub fn seeker_underground_tickets() -> u32 {
    DEFAULTS.rules.seeker_underground_tickets
}
pub fn seeker_water_tickets() -> u32 {
    DEFAULTS.rules.seeker_water_tickets
}
pub fn evader_water_tickets() -> u32 {
    DEFAULTS.rules.evader_water_tickets
}

// Belief
pub fn belief_distance_weight() -> f64 {
    DEFAULTS.belief.distance_weight
}

// Planner
pub fn planner_max_expansions() -> usize {
    DEFAULTS.planner.max_expansions
}

// Lookahead
pub fn lookahead_prediction_depth() -> usize {
    DEFAULTS.lookahead.prediction_depth
}
pub fn lookahead_search_depth() -> usize {
    DEFAULTS.lookahead.search_depth
}
pub fn lookahead_target_length() -> usize {
    DEFAULTS.lookahead.target_length
}
pub fn lookahead_max_revisits() -> u32 {
    DEFAULTS.lookahead.max_revisits
}
pub fn lookahead_max_nodes() -> usize {
    DEFAULTS.lookahead.max_nodes
}
pub fn lookahead_safe_step_reward() -> f64 {
    DEFAULTS.lookahead.safe_step_reward
}
pub fn lookahead_unsafe_step_penalty() -> f64 {
    DEFAULTS.lookahead.unsafe_step_penalty
}
pub fn lookahead_distance_weight() -> f64 {
    DEFAULTS.lookahead.distance_weight
}
pub fn lookahead_branching_weight() -> f64 {
    DEFAULTS.lookahead.branching_weight
}
pub fn lookahead_diversity_weight() -> f64 {
    DEFAULTS.lookahead.diversity_weight
}
pub fn lookahead_final_distance_weight() -> f64 {
    DEFAULTS.lookahead.final_distance_weight
}

// Rollout
pub fn rollout_risk_threshold() -> f64 {
    DEFAULTS.rollout.risk_threshold
}
pub fn rollout_rollouts() -> u32 {
    DEFAULTS.rollout.rollouts
}
pub fn rollout_depth() -> u32 {
    DEFAULTS.rollout.depth
}
pub fn rollout_previous_position_weight() -> f64 {
    DEFAULTS.rollout.previous_position_weight
}
pub fn rollout_disclosed_position_weight() -> f64 {
    DEFAULTS.rollout.disclosed_position_weight
}
pub fn rollout_predicted_seeker_weight() -> f64 {
    DEFAULTS.rollout.predicted_seeker_weight
}
pub fn rollout_risk_weight() -> f64 {
    DEFAULTS.rollout.risk_weight
}
pub fn rollout_outcome_weight() -> f64 {
    DEFAULTS.rollout.outcome_weight
}
pub fn rollout_low_branching_penalty() -> f64 {
    DEFAULTS.rollout.low_branching_penalty
}
pub fn rollout_softmax_temperature() -> f64 {
    DEFAULTS.rollout.softmax_temperature
}

// Monte Carlo
pub fn monte_carlo_simulations() -> u32 {
    DEFAULTS.monte_carlo.simulations
}
pub fn monte_carlo_depth() -> u32 {
    DEFAULTS.monte_carlo.depth
}
pub fn monte_carlo_greedy_probability() -> f64 {
    DEFAULTS.monte_carlo.greedy_probability
}
pub fn monte_carlo_discount() -> f64 {
    DEFAULTS.monte_carlo.discount
}

// Search mode
pub fn search_mode_until_turn() -> u32 {
    DEFAULTS.search_mode.until_turn
}
pub fn search_mode_depth() -> usize {
    DEFAULTS.search_mode.depth
}

// Arena
pub fn arena_games() -> u32 {
    DEFAULTS.arena.games
}
pub fn arena_evader_policy() -> &'static str {
    &DEFAULTS.arena.evader_policy
}
pub fn arena_seeker_policy() -> &'static str {
    &DEFAULTS.arena.seeker_policy
}
pub fn arena_log_interval() -> u32 {
    DEFAULTS.arena.log_interval
}
