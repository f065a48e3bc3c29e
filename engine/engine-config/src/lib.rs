//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic for the
//! match runner and anything else that needs the same settings.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`SPLENDOR_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! SPLENDOR_<SECTION>_<KEY>=value
//!
//! Examples:
//!     SPLENDOR_COMMON_SEED=7
//!     SPLENDOR_GAME_GOAL=21
//!     SPLENDOR_GAME_PLAYERS=mcts:ucb1,default,default
//!     SPLENDOR_MCTS_TIME_BUDGET_MS=250
//!     SPLENDOR_ACTOR_GAMES=100
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
