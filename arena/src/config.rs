//! Command line configuration for the arena.
//!
//! Defaults come from the central configuration (config.toml plus
//! `PURSUIT_*` environment overrides); flags take priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use pursuit_ai::{EvaderPolicyKind, SeekerPolicyKind};
use pursuit_config::{load_config, CentralConfig};
use tracing::level_filters::LevelFilter;

pub static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_evader_policy() -> String {
    CENTRAL_CONFIG.arena.evader_policy.clone()
}

fn default_seeker_policy() -> String {
    CENTRAL_CONFIG.arena.seeker_policy.clone()
}

fn default_seekers() -> usize {
    CENTRAL_CONFIG.rules.seeker_count
}

fn default_max_turns() -> u32 {
    CENTRAL_CONFIG.rules.max_turns
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.arena.log_interval
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Play bot-vs-bot pursuit games on the demo board and report outcomes")]
pub struct Config {
    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Evader policy (random, lookahead, rollout)
    #[arg(long, default_value_t = default_evader_policy())]
    pub evader_policy: String,

    /// Seeker policy (random, belief_greedy, search_mode, monte_carlo)
    #[arg(long, default_value_t = default_seeker_policy())]
    pub seeker_policy: String,

    /// Number of seekers
    #[arg(long, default_value_t = default_seekers())]
    pub seekers: usize,

    /// Rounds before the evader escapes
    #[arg(long, default_value_t = default_max_turns())]
    pub max_turns: u32,

    /// Master seed (0 draws one from the OS)
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log a progress summary every N games (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// Also write the JSON summary to this file
    #[arg(long)]
    pub output: Option<String>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }
        if self.seekers == 0 {
            return Err(anyhow!("at least one seeker is required"));
        }
        if self.seekers + 1 > pursuit_core::DEMO_STATIONS {
            return Err(anyhow!(
                "the demo board has {} stations, too few for {} seekers",
                pursuit_core::DEMO_STATIONS,
                self.seekers
            ));
        }
        if self.max_turns == 0 {
            return Err(anyhow!("max_turns must be greater than 0"));
        }
        self.evader_kind()?;
        self.seeker_kind()?;
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }
        Ok(())
    }

    pub fn evader_kind(&self) -> Result<EvaderPolicyKind> {
        Ok(self.evader_policy.parse()?)
    }

    pub fn seeker_kind(&self) -> Result<SeekerPolicyKind> {
        Ok(self.seeker_policy.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            games: 3,
            evader_policy: "lookahead".into(),
            seeker_policy: "belief_greedy".into(),
            seekers: 4,
            max_turns: 24,
            seed: 42,
            log_level: "info".into(),
            log_interval: 1,
            output: None,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_zero_games_rejected() {
        let config = Config {
            games: 0,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let config = Config {
            seeker_policy: "psychic".into(),
            ..base_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("psychic"));
    }

    #[test]
    fn test_too_many_seekers_rejected() {
        let config = Config {
            seekers: 30,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let config = Config {
            log_level: "loud".into(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let config = Config::parse_from([
            "arena",
            "--games",
            "7",
            "--evader-policy",
            "rollout",
            "--seeker-policy",
            "monte_carlo",
            "--seed",
            "9",
        ]);
        assert_eq!(config.games, 7);
        assert_eq!(config.evader_kind().unwrap(), EvaderPolicyKind::Rollout);
        assert_eq!(config.seeker_kind().unwrap(), SeekerPolicyKind::MonteCarlo);
        assert_eq!(config.seed, 9);
    }
}
