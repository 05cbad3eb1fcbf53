//! Evader strategies.

mod lookahead;
mod random;
mod rollout;

pub use lookahead::SafetyLookaheadEvader;
pub use random::RandomEvader;
pub use rollout::RolloutEvader;
