//! Configuration for the match runner
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::{MctsConfig, SearchVariant};
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

use crate::agents::AgentSpec;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_players() -> Vec<String> {
    CENTRAL_CONFIG.game.players.clone()
}

fn default_goal() -> u32 {
    CENTRAL_CONFIG.game.goal
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.actor.games
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_max_rejections() -> u32 {
    CENTRAL_CONFIG.game.max_rejections
}

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.mcts.time_budget_ms
}

fn default_max_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.max_iterations
}

fn default_rollout_round_limit() -> u32 {
    CENTRAL_CONFIG.mcts.rollout_round_limit
}

fn default_variant() -> String {
    CENTRAL_CONFIG.mcts.variant.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.actor.log_interval
}

#[derive(Parser, Debug, Clone)]
#[command(name = "actor")]
#[command(about = "Splendor match runner - plays configured agents against each other")]
#[command(
    long_about = "Plays a series of Splendor games between the configured agents and
reports each game's summary and winners.

Agent specs: 'default' for the heuristic policy, or
'mcts[:variant[:millis]]' for tree search, where variant is one of
random, most-wins, ucb1, ucb1-no-reserve.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Agent spec per seat, in seating order (2 to 4)
    #[arg(long = "player", value_delimiter = ',', default_values_t = default_players())]
    pub players: Vec<String>,

    /// Points needed to trigger the final round
    #[arg(long, default_value_t = default_goal())]
    pub goal: u32,

    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Base seed; each game derives its own
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Re-prompts allowed per decision before a game is abandoned
    #[arg(long, default_value_t = default_max_rejections())]
    pub max_rejections: u32,

    /// MCTS wall-clock budget per move in milliseconds
    #[arg(long, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// MCTS iteration cap per move (0 = no cap)
    #[arg(long, default_value_t = default_max_iterations())]
    pub max_iterations: u32,

    /// Rounds after which an MCTS rollout is scored as won by nobody
    #[arg(long, default_value_t = default_rollout_round_limit())]
    pub rollout_round_limit: u32,

    /// MCTS variant used when a spec does not name one
    #[arg(long, default_value_t = default_variant())]
    pub variant: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log running totals every N games (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(2..=4).contains(&self.players.len()) {
            return Err(anyhow!(
                "players must name 2 to 4 agents, got {}",
                self.players.len()
            ));
        }

        if self.goal == 0 {
            return Err(anyhow!("goal must be greater than 0"));
        }

        if self.time_budget_ms == 0 && self.max_iterations == 0 {
            return Err(anyhow!(
                "time_budget_ms must be greater than 0 unless max_iterations is set"
            ));
        }

        if self.rollout_round_limit == 0 {
            return Err(anyhow!("rollout_round_limit must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.agent_specs()?;
        self.mcts_config()?;
        Ok(())
    }

    pub fn agent_specs(&self) -> Result<Vec<AgentSpec>> {
        self.players.iter().map(|p| p.parse()).collect()
    }

    /// Search settings shared by every MCTS seat unless its spec overrides them.
    pub fn mcts_config(&self) -> Result<MctsConfig> {
        let variant: SearchVariant = self.variant.parse()?;
        let config = MctsConfig::default()
            .with_time_budget(self.time_budget())
            .with_rollout_round_limit(self.rollout_round_limit)
            .with_variant(variant);
        Ok(match self.max_iterations {
            0 => config,
            n => config.with_max_iterations(n),
        })
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            players: vec!["mcts:ucb1:50".into(), "default".into()],
            goal: 15,
            games: 2,
            seed: 42,
            max_rejections: 32,
            time_budget_ms: 1000,
            max_iterations: 0,
            rollout_round_limit: 200,
            variant: "ucb1".into(),
            log_level: "info".into(),
            log_interval: 1,
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_single_player() {
        let mut cfg = base_config();
        cfg.players.truncate(1);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("2 to 4"));
    }

    #[test]
    fn validate_rejects_five_players() {
        let mut cfg = base_config();
        cfg.players = vec!["default".into(); 5];
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_goal() {
        let mut cfg = base_config();
        cfg.goal = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("goal"));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn validate_rejects_unknown_agent() {
        let mut cfg = base_config();
        cfg.players[1] = "human".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("human"));
    }

    #[test]
    fn validate_rejects_unknown_variant() {
        let mut cfg = base_config();
        cfg.variant = "greedy".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("greedy"));
    }

    #[test]
    fn validate_rejects_zero_budget_without_iteration_cap() {
        let mut cfg = base_config();
        cfg.time_budget_ms = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("time_budget_ms"));
    }

    #[test]
    fn validate_allows_zero_budget_with_iteration_cap() {
        let mut cfg = base_config();
        cfg.time_budget_ms = 0;
        cfg.max_iterations = 10;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn mcts_config_applies_iteration_cap() {
        let mut cfg = base_config();
        assert_eq!(cfg.mcts_config().unwrap().max_iterations, None);
        cfg.max_iterations = 7;
        cfg.variant = "most-wins".into();
        let mcts = cfg.mcts_config().unwrap();
        assert_eq!(mcts.max_iterations, Some(7));
        assert_eq!(mcts.variant, SearchVariant::MostWins);
        assert_eq!(mcts.time_budget, Duration::from_secs(1));
    }

    #[test]
    fn players_parse_from_comma_list() {
        let cfg = Config::parse_from(["actor", "--player", "default,mcts:random", "--games", "1"]);
        assert_eq!(cfg.players, vec!["default", "mcts:random"]);
        assert_eq!(cfg.games, 1);
    }
}
