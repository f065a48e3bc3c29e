//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",      // Current directory
    "../config.toml",   // Parent directory (when running from subdirectory)
    "/app/config.toml", // Docker container
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by SPLENDOR_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
/// 4. Docker container path (/app/config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("SPLENDOR_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from SPLENDOR_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "SPLENDOR_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
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

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Comma-separated list field
    ($config:expr, $section:ident . $field:ident, $key:expr, list) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: SPLENDOR_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "SPLENDOR_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "SPLENDOR_COMMON_SEED", parse);

    // Game
    env_override!(config, game.goal, "SPLENDOR_GAME_GOAL", parse);
    env_override!(config, game.players, "SPLENDOR_GAME_PLAYERS", list);
    env_override!(
        config,
        game.max_rejections,
        "SPLENDOR_GAME_MAX_REJECTIONS",
        parse
    );

    // MCTS
    env_override!(
        config,
        mcts.time_budget_ms,
        "SPLENDOR_MCTS_TIME_BUDGET_MS",
        parse
    );
    env_override!(
        config,
        mcts.max_iterations,
        "SPLENDOR_MCTS_MAX_ITERATIONS",
        parse
    );
    env_override!(
        config,
        mcts.rollout_round_limit,
        "SPLENDOR_MCTS_ROLLOUT_ROUND_LIMIT",
        parse
    );
    env_override!(config, mcts.variant, "SPLENDOR_MCTS_VARIANT");

    // Actor
    env_override!(config, actor.games, "SPLENDOR_ACTOR_GAMES", parse);
    env_override!(
        config,
        actor.log_interval,
        "SPLENDOR_ACTOR_LOG_INTERVAL",
        parse
    );

    config
}
