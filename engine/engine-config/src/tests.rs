//! Tests for the configuration module.

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.common.seed, 42);
    assert_eq!(config.game.goal, 15);
    assert_eq!(config.game.players, vec!["mcts", "default"]);
    assert_eq!(config.game.max_rejections, 32);
    assert_eq!(config.actor.games, 10);
}

#[test]
fn test_mcts_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.mcts.time_budget_ms, 1000);
    assert_eq!(config.mcts.max_iterations, 0);
    assert_eq!(config.mcts.rollout_round_limit, 200);
    assert_eq!(config.mcts.variant, "ucb1");
}

#[test]
fn test_splendor_env_overrides() {
    std::env::set_var("SPLENDOR_COMMON_SEED", "7");
    std::env::set_var("SPLENDOR_GAME_PLAYERS", "mcts:most-wins, default ,default");
    std::env::set_var("SPLENDOR_MCTS_VARIANT", "random");

    let config = load_config();
    assert_eq!(config.common.seed, 7);
    assert_eq!(config.game.players, vec!["mcts:most-wins", "default", "default"]);
    assert_eq!(config.mcts.variant, "random");

    std::env::remove_var("SPLENDOR_COMMON_SEED");
    std::env::remove_var("SPLENDOR_GAME_PLAYERS");
    std::env::remove_var("SPLENDOR_MCTS_VARIANT");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("SPLENDOR_ACTOR_LOG_INTERVAL", "often");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.actor.log_interval, 1);

    std::env::remove_var("SPLENDOR_ACTOR_LOG_INTERVAL");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"
seed = 1234

[game]
goal = 21
players = ["mcts:ucb1-no-reserve:5000", "mcts:random", "default"]

[actor]
games = 3
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.common.seed, 1234);
    assert_eq!(config.game.goal, 21);
    assert_eq!(config.game.players.len(), 3);
    assert_eq!(config.actor.games, 3);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[game]
goal = 10
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.game.goal, 10);
    assert_eq!(config.game.max_rejections, 32); // Default
    assert_eq!(config.common.log_level, "info"); // Default
    assert_eq!(config.mcts.time_budget_ms, 1000); // Default
}

#[test]
fn test_mcts_config_from_toml() {
    let toml_content = r#"
[mcts]
time_budget_ms = 250
max_iterations = 50
rollout_round_limit = 80
variant = "most-wins"
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.mcts.time_budget_ms, 250);
    assert_eq!(config.mcts.max_iterations, 50);
    assert_eq!(config.mcts.rollout_round_limit, 80);
    assert_eq!(config.mcts.variant, "most-wins");
}

#[test]
fn test_load_from_missing_path_uses_defaults() {
    let config = load_from_path(std::path::Path::new("/nonexistent/splendor.toml"));
    assert_eq!(config.game.goal, 15);
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.game.players, cloned.game.players);
    assert_eq!(config.common.seed, cloned.common.seed);
}
