//! Policy selection by name.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::AiConfig;
use crate::evader::{RandomEvader, RolloutEvader, SafetyLookaheadEvader};
use crate::policy::{EvaderPolicy, SeekerPolicy};
use crate::seeker::{
    BeliefGreedySeeker, MonteCarloSeeker, PhasedSeeker, RandomSeeker, SearchModeSeeker,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {role} policy '{name}'")]
pub struct UnknownPolicy {
    pub role: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaderPolicyKind {
    Random,
    SafetyLookahead,
    Rollout,
}

impl EvaderPolicyKind {
    pub const ALL: [EvaderPolicyKind; 3] = [
        EvaderPolicyKind::Random,
        EvaderPolicyKind::SafetyLookahead,
        EvaderPolicyKind::Rollout,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EvaderPolicyKind::Random => "random",
            EvaderPolicyKind::SafetyLookahead => "lookahead",
            EvaderPolicyKind::Rollout => "rollout",
        }
    }
}

impl fmt::Display for EvaderPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvaderPolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "random" => Ok(EvaderPolicyKind::Random),
            "lookahead" | "safety_lookahead" | "dfs" => Ok(EvaderPolicyKind::SafetyLookahead),
            "rollout" | "decoy" => Ok(EvaderPolicyKind::Rollout),
            _ => Err(UnknownPolicy {
                role: "evader",
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekerPolicyKind {
    Random,
    BeliefGreedy,
    SearchMode,
    MonteCarlo,
}

impl SeekerPolicyKind {
    pub const ALL: [SeekerPolicyKind; 4] = [
        SeekerPolicyKind::Random,
        SeekerPolicyKind::BeliefGreedy,
        SeekerPolicyKind::SearchMode,
        SeekerPolicyKind::MonteCarlo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SeekerPolicyKind::Random => "random",
            SeekerPolicyKind::BeliefGreedy => "belief_greedy",
            SeekerPolicyKind::SearchMode => "search_mode",
            SeekerPolicyKind::MonteCarlo => "monte_carlo",
        }
    }
}

impl fmt::Display for SeekerPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SeekerPolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "random" => Ok(SeekerPolicyKind::Random),
            "belief_greedy" | "greedy" | "astar" | "a_star" => Ok(SeekerPolicyKind::BeliefGreedy),
            "search_mode" | "search" => Ok(SeekerPolicyKind::SearchMode),
            "monte_carlo" | "mc" => Ok(SeekerPolicyKind::MonteCarlo),
            _ => Err(UnknownPolicy {
                role: "seeker",
                name: s.to_string(),
            }),
        }
    }
}

pub fn create_evader_policy(
    kind: EvaderPolicyKind,
    config: &AiConfig,
    seed: u64,
) -> Box<dyn EvaderPolicy> {
    match kind {
        EvaderPolicyKind::Random => Box::new(RandomEvader::new(seed)),
        EvaderPolicyKind::SafetyLookahead => {
            Box::new(SafetyLookaheadEvader::new(config.lookahead.clone(), seed))
        }
        EvaderPolicyKind::Rollout => Box::new(RolloutEvader::new(config.rollout.clone(), seed)),
    }
}

/// Build a seeker policy. Belief-driven kinds are wrapped so search mode
/// runs until the evader is first disclosed.
pub fn create_seeker_policy(
    kind: SeekerPolicyKind,
    config: &AiConfig,
    seed: u64,
) -> Box<dyn SeekerPolicy> {
    let phased = |late: Box<dyn SeekerPolicy>| -> Box<dyn SeekerPolicy> {
        Box::new(PhasedSeeker::new(
            SearchModeSeeker::new(config.search_mode.clone(), seed),
            late,
        ))
    };
    match kind {
        SeekerPolicyKind::Random => Box::new(RandomSeeker::new(seed)),
        SeekerPolicyKind::SearchMode => {
            Box::new(SearchModeSeeker::new(config.search_mode.clone(), seed))
        }
        SeekerPolicyKind::BeliefGreedy => {
            phased(Box::new(BeliefGreedySeeker::new(config.planner.clone(), seed)))
        }
        SeekerPolicyKind::MonteCarlo => {
            phased(Box::new(MonteCarloSeeker::new(config.monte_carlo.clone(), seed)))
        }
    }
}
