//! Seeker strategies.

mod belief_greedy;
mod monte_carlo;
mod phased;
mod random;
mod search_mode;

pub use belief_greedy::BeliefGreedySeeker;
pub use monte_carlo::MonteCarloSeeker;
pub use phased::PhasedSeeker;
pub use random::RandomSeeker;
pub use search_mode::SearchModeSeeker;
