//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_goal() -> u32 {
    defaults::goal()
}
fn d_players() -> Vec<String> {
    defaults::players().to_vec()
}
fn d_max_rejections() -> u32 {
    defaults::max_rejections()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_max_iterations() -> u32 {
    defaults::max_iterations()
}
fn d_rollout_round_limit() -> u32 {
    defaults::rollout_round_limit()
}
fn d_variant() -> String {
    defaults::variant().into()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Base seed for deals, shuffles and agents
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

/// Game rules and seating
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    #[serde(default = "d_goal")]
    pub goal: u32,
    /// Agent spec per seat, e.g. "default" or "mcts:ucb1:500"
    #[serde(default = "d_players")]
    pub players: Vec<String>,
    #[serde(default = "d_max_rejections")]
    pub max_rejections: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            goal: defaults::goal(),
            players: defaults::players().to_vec(),
            max_rejections: defaults::max_rejections(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    /// Wall-clock budget per decision in milliseconds
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    /// Iteration cap per decision (0 = no cap)
    #[serde(default = "d_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "d_rollout_round_limit")]
    pub rollout_round_limit: u32,
    #[serde(default = "d_variant")]
    pub variant: String,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: defaults::time_budget_ms(),
            max_iterations: defaults::max_iterations(),
            rollout_round_limit: defaults::rollout_round_limit(),
            variant: defaults::variant().into(),
        }
    }
}

/// Match runner configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            log_interval: defaults::log_interval(),
        }
    }
}
