//! Tests for the configuration module.

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.common.seed, 0);
    assert_eq!(config.arena.evader_policy, "lookahead");
    assert_eq!(config.arena.seeker_policy, "belief_greedy");
    assert_eq!(config.planner.max_expansions, 100);
}

#[test]
fn test_rules_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.rules.max_turns, 24);
    assert_eq!(config.rules.reveal_turns, vec![3, 8, 13, 18, 24]);
    assert_eq!(config.rules.seeker_count, 4);
    assert_eq!(config.rules.seeker_taxi_tickets, 11);
    assert_eq!(config.rules.seeker_bus_tickets, 8);
    assert_eq!(config.rules.seeker_underground_tickets, 4);
    assert_eq!(config.rules.seeker_water_tickets, 0);
    assert_eq!(config.rules.evader_water_tickets, 5);
}

#[test]
fn test_reveal_turns_are_ascending() {
    let config = CentralConfig::default();
    assert!(config
        .rules
        .reveal_turns
        .windows(2)
        .all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_search_defaults() {
    let config = CentralConfig::default();
    assert!((config.belief.distance_weight - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.lookahead.prediction_depth, 3);
    assert_eq!(config.lookahead.search_depth, 10);
    assert_eq!(config.lookahead.target_length, 6);
    assert_eq!(config.lookahead.max_revisits, 2);
    assert_eq!(config.monte_carlo.simulations, 100);
    assert_eq!(config.search_mode.until_turn, 3);
    assert_eq!(config.search_mode.depth, 3);
}

#[test]
fn test_env_overrides() {
    std::env::set_var("PURSUIT_RULES_MAX_TURNS", "12");
    std::env::set_var("PURSUIT_BELIEF_DISTANCE_WEIGHT", "0.75");
    std::env::set_var("PURSUIT_ARENA_SEEKER_POLICY", "monte_carlo");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.rules.max_turns, 12);
    assert!((config.belief.distance_weight - 0.75).abs() < f64::EPSILON);
    assert_eq!(config.arena.seeker_policy, "monte_carlo");

    std::env::remove_var("PURSUIT_RULES_MAX_TURNS");
    std::env::remove_var("PURSUIT_BELIEF_DISTANCE_WEIGHT");
    std::env::remove_var("PURSUIT_ARENA_SEEKER_POLICY");
}

#[test]
fn test_list_env_override() {
    std::env::set_var("PURSUIT_RULES_REVEAL_TURNS", "2, 5,9");
    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.rules.reveal_turns, vec![2, 5, 9]);
    std::env::remove_var("PURSUIT_RULES_REVEAL_TURNS");
}

#[test]
fn test_malformed_env_override_is_ignored() {
    std::env::set_var("PURSUIT_MONTE_CARLO_SIMULATIONS", "lots");
    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.monte_carlo.simulations, 100);
    std::env::remove_var("PURSUIT_MONTE_CARLO_SIMULATIONS");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"
seed = 99

[rules]
max_turns = 10
reveal_turns = [2, 6]
seeker_count = 2

[rollout]
rollouts = 12
risk_threshold = 0.5
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.common.seed, 99);
    assert_eq!(config.rules.max_turns, 10);
    assert_eq!(config.rules.reveal_turns, vec![2, 6]);
    assert_eq!(config.rules.seeker_count, 2);
    assert_eq!(config.rollout.rollouts, 12);
    assert!((config.rollout.risk_threshold - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[rules]
max_turns = 8
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.rules.max_turns, 8);
    assert_eq!(config.rules.seeker_taxi_tickets, 11); // Default
    assert_eq!(config.common.log_level, "info"); // Default
    assert_eq!(config.monte_carlo.depth, 3); // Default
}

#[test]
fn test_load_from_missing_path_uses_defaults() {
    let config = load_from_path(std::path::Path::new("/definitely/not/here/config.toml"));
    assert_eq!(config.lookahead.target_length, 6);
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.rules.reveal_turns, cloned.rules.reveal_turns);
    assert_eq!(config.arena.games, cloned.arena.games);
}

#[test]
fn test_env_key_shape() {
    assert_eq!(env_key("monte_carlo", "greedy_probability"), "PURSUIT_MONTE_CARLO_GREEDY_PROBABILITY");
    assert_eq!(env_key("rules", "reveal_turns"), "PURSUIT_RULES_REVEAL_TURNS");
}
