//! Monte Carlo Tree Search (MCTS) agent for the Splendor engine.
//!
//! The search never copies the game per node. It forks the live state once
//! per decision into a [`games_splendor::Simulator`], then walks the tree by
//! replaying each edge's turn and rolling back with `mark`/`undo`.
//!
//! # Overview
//!
//! Each iteration consists of four phases:
//!
//! 1. **Selection**: descend from the root with the configured
//!    [`SelectionPolicy`] (random, most wins, or UCB1) until reaching a leaf
//! 2. **Expansion**: add a child for every legal move of the player to act,
//!    optionally dropping reserves ([`ExpansionFilter`])
//! 3. **Rollout**: for each new child, finish the game on a throwaway copy
//!    played by [`games_splendor::DefaultAgent`]s
//! 4. **Backpropagation**: add a sim to every node on the path and a win to
//!    each node whose seat won the rollout
//!
//! Iterations repeat until the time budget (or the optional iteration cap)
//! runs out. The root child with the best win rate is played.
//!
//! # Usage
//!
//! ```rust,ignore
//! use games_splendor::{Controller, DecisionProvider, DefaultAgent};
//! use mcts::{MctsAgent, MctsConfig, SearchVariant};
//!
//! let config = MctsConfig::default().with_variant(SearchVariant::Ucb1NoReserve);
//! let agents: Vec<Box<dyn DecisionProvider>> = vec![
//!     Box::new(MctsAgent::seeded(config, 1)),
//!     Box::new(DefaultAgent::seeded(2)),
//! ];
//! let mut rng = engine_core::rng::seeded(42);
//! let mut game = Controller::new(agents, 15, &mut rng)?;
//! let winners = game.play()?;
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod script;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{MctsConfig, SearchVariant, UnknownVariant};
pub use node::{Node, NodeId};
pub use policy::{legal_moves, ExpansionFilter, SelectionPolicy, TakeCache};
pub use script::{Script, ScriptedAgent};
pub use search::{MctsAgent, SearchError, SearchNode, SearchOutcome, SearchStats};
pub use tree::{Tree, TreeStats};
