//! Decision making for pursuit games.
//!
//! - [`PathPlanner`]: ticket-constrained A* over the transport graph.
//! - [`SeekerForecast`]: where the seekers could be over the next rounds.
//! - Evader policies: [`RandomEvader`], [`SafetyLookaheadEvader`],
//!   [`RolloutEvader`].
//! - Seeker policies: [`RandomSeeker`], [`BeliefGreedySeeker`],
//!   [`SearchModeSeeker`], [`MonteCarloSeeker`], and [`PhasedSeeker`] which
//!   runs search mode until the evader is first seen.
//! - [`Session`]: drives a game with human or bot controllers.
//!
//! Every stochastic component owns a seeded `ChaCha20Rng`, so a fixed seed
//! replays a game exactly.

pub mod config;
pub mod evader;
pub mod factory;
pub mod planner;
pub mod policy;
pub mod predict;
pub mod seeker;
pub mod session;
pub mod sim;

pub use config::{
    AiConfig, LookaheadConfig, MonteCarloConfig, PlannerConfig, RolloutConfig, SearchModeConfig,
};
pub use evader::{RandomEvader, RolloutEvader, SafetyLookaheadEvader};
pub use factory::{
    create_evader_policy, create_seeker_policy, EvaderPolicyKind, SeekerPolicyKind, UnknownPolicy,
};
pub use planner::{distinct_destinations, preferred_move, PathPlanner};
pub use policy::{policy_rng, EvaderPolicy, SeekerPolicy};
pub use predict::{predict_seeker_reach, SeekerForecast};
pub use seeker::{BeliefGreedySeeker, MonteCarloSeeker, PhasedSeeker, RandomSeeker, SearchModeSeeker};
pub use session::{
    Controller, EvaderController, SeekerController, Session, SessionError, StepEvent,
};
pub use sim::SimWorld;
