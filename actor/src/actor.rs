//! Match runner: plays the configured agents against each other game by game.

use anyhow::{Context, Result};
use engine_core::rng;
use games_splendor::{Controller, DecisionProvider, GameSummary};
use mcts::MctsConfig;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::agents::AgentSpec;
use crate::config::Config;
use crate::stats::MatchStats;

/// Outcome of one game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub game: u32,
    pub seed: u64,
    pub winners: Vec<usize>,
    pub summary: GameSummary,
    pub elapsed: Duration,
}

pub struct Actor {
    config: Config,
    specs: Vec<AgentSpec>,
    mcts: MctsConfig,
    stats: MatchStats,
}

impl Actor {
    pub fn new(config: Config) -> Result<Self> {
        let specs = config.agent_specs()?;
        let mcts = config.mcts_config()?;
        let stats = MatchStats::new(specs.iter().map(ToString::to_string).collect());
        Ok(Self {
            config,
            specs,
            mcts,
            stats,
        })
    }

    /// Play every configured game, printing each result to stdout.
    pub fn run(&mut self) -> Result<&MatchStats> {
        info!(
            games = self.config.games,
            players = ?self.config.players,
            goal = self.config.goal,
            seed = self.config.seed,
            "Starting match"
        );

        for game in 0..self.config.games {
            let record = self.play_game(game)?;
            println!("Game {} (seed {})", record.game, record.seed);
            println!("{}", record.summary);
            println!("Winners {:?}", record.winners);

            self.stats
                .record_game(&record.winners, record.summary.rounds);

            let interval = self.config.log_interval;
            if interval > 0 && self.stats.games() % interval == 0 {
                self.stats.log_summary();
            }
        }

        Ok(&self.stats)
    }

    /// Play game number `game`. Its deal and every agent's randomness derive
    /// from the base seed, so a game can be replayed on its own.
    pub fn play_game(&self, game: u32) -> Result<GameRecord> {
        let start = Instant::now();
        let seed = rng::derive_seed(self.config.seed, game as u64);
        let mut deal_rng = rng::seeded(seed);

        let agents: Vec<Box<dyn DecisionProvider>> = self
            .specs
            .iter()
            .enumerate()
            .map(|(seat, spec)| spec.build(&self.mcts, rng::derive_seed(seed, seat as u64 + 1)))
            .collect();
        let mut controller = Controller::new(agents, self.config.goal, &mut deal_rng)
            .with_context(|| format!("setting up game {}", game))?
            .with_max_rejections(self.config.max_rejections);

        debug!(game, seed, "Dealt game");
        let winners = controller
            .play()
            .with_context(|| format!("playing game {}", game))?;
        let summary = controller.state().summary();
        let elapsed = start.elapsed();

        info!(
            game,
            seed,
            rounds = summary.rounds,
            points = ?summary.points,
            winners = ?winners,
            elapsed_ms = elapsed.as_millis() as u64,
            "Game finished"
        );

        Ok(GameRecord {
            game,
            seed,
            winners,
            summary,
            elapsed,
        })
    }
}
