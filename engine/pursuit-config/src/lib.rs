//! Shared settings for the pursuit engine and the arena runner.
//!
//! Three layers, later ones winning: the embedded `config.defaults.toml`,
//! an optional `config.toml`, then `PURSUIT_<SECTION>_<FIELD>` environment
//! variables, e.g. `PURSUIT_RULES_MAX_TURNS=12` or
//! `PURSUIT_ARENA_SEEKER_POLICY=monte_carlo`. List fields such as
//! `PURSUIT_RULES_REVEAL_TURNS` take comma separated values.

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, env_key, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
