//! Locating config.toml and layering environment overrides on top.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Fallback locations, relative to the working directory.
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml"];

/// Resolve and load the configuration.
///
/// `PURSUIT_CONFIG` wins if it names an existing file, then the first hit in
/// [`CONFIG_SEARCH_PATHS`], then the built-in defaults. Environment
/// overrides are applied in every case.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("PURSUIT_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from PURSUIT_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "PURSUIT_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load one file. Unreadable or malformed files fall back to the defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// `PURSUIT_<SECTION>_<FIELD>`, upper-cased.
pub fn env_key(section: &str, field: &str) -> String {
    format!("PURSUIT_{}_{}", section, field).to_ascii_uppercase()
}

/// Replace `target` with the parsed value of `key`, if set and valid.
fn override_value<T: FromStr>(key: &str, target: &mut T) {
    let Ok(raw) = std::env::var(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => warn!("Ignoring unparseable {}={}", key, raw),
    }
}

/// Comma separated list; ignored entirely if any item fails to parse.
fn override_list<T: FromStr>(key: &str, target: &mut Vec<T>) {
    let Ok(raw) = std::env::var(key) else {
        return;
    };
    let parsed: Result<Vec<T>, _> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect();
    match parsed {
        Ok(values) => *target = values,
        Err(_) => warn!("Ignoring malformed list {}={}", key, raw),
    }
}

macro_rules! section_overrides {
    ($config:ident . $section:ident { $($field:ident),* $(,)? }) => {
        $(
            override_value(
                &env_key(stringify!($section), stringify!($field)),
                &mut $config.$section.$field,
            );
        )*
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Every scalar key can be overridden as `PURSUIT_<SECTION>_<KEY>`;
/// `PURSUIT_RULES_REVEAL_TURNS` takes a comma separated list.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    section_overrides!(config.common { log_level, seed });
    section_overrides!(config.rules {
        max_turns,
        seeker_count,
        seeker_taxi_tickets,
        seeker_bus_tickets,
        seeker_underground_tickets,
        seeker_water_tickets,
        evader_water_tickets,
    });
    override_list(&env_key("rules", "reveal_turns"), &mut config.rules.reveal_turns);
    section_overrides!(config.belief { distance_weight });
    section_overrides!(config.planner { max_expansions });
    section_overrides!(config.lookahead {
        prediction_depth,
        search_depth,
        target_length,
        max_revisits,
        max_nodes,
        safe_step_reward,
        unsafe_step_penalty,
        distance_weight,
        branching_weight,
        diversity_weight,
        final_distance_weight,
    });
    section_overrides!(config.rollout {
        risk_threshold,
        rollouts,
        depth,
        previous_position_weight,
        disclosed_position_weight,
        predicted_seeker_weight,
        risk_weight,
        outcome_weight,
        low_branching_penalty,
        softmax_temperature,
    });
    section_overrides!(config.monte_carlo { simulations, depth, greedy_probability, discount });
    section_overrides!(config.search_mode { until_turn, depth });
    section_overrides!(config.arena { games, evader_policy, seeker_policy, log_interval });

    config
}
