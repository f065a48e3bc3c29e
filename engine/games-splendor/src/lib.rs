//! Splendor game engine
//!
//! This crate holds the full rules of the card and gem game: the token and
//! gem counters, the card and noble catalog, per-tier decks, players, and a
//! [`Controller`] that walks every turn through its move, discard and noble
//! visit phases while asking a [`DecisionProvider`] for each choice.
//!
//! Every mutable subsystem keeps an undo log, and [`Simulator`] ties them
//! together so a whole game position can be marked and restored cheaply.
//!
//! # Usage
//!
//! ```rust
//! use games_splendor::{Controller, DefaultAgent};
//! use engine_core::rng;
//!
//! let mut rng = rng::seeded(42);
//! let agents = vec![DefaultAgent::seeded(1), DefaultAgent::seeded(2)];
//! let mut game = Controller::new(agents, 15, &mut rng).unwrap();
//! let winners = game.play().unwrap();
//! println!("{:?}\n{}", winners, game.state().summary());
//! ```

pub mod agent;
pub mod card;
pub mod catalog;
pub mod controller;
pub mod deck;
pub mod default_agent;
pub mod error;
pub mod gems;
pub mod moves;
pub mod noble;
pub mod player;
pub mod rules;
pub mod simulator;
pub mod state;
pub mod view;

pub use agent::DecisionProvider;
pub use card::{Card, CardId, CardRef, HiddenCard, Tier};
pub use controller::{Controller, DEFAULT_MAX_REJECTIONS};
pub use deck::{CardDeck, DISPLAY_CAP};
pub use default_agent::DefaultAgent;
pub use error::{AgentAbort, EngineError, RuleViolation, SetupError};
pub use gems::{Color, ColorSet, GemSet, TokenColor, TokenSet};
pub use moves::Move;
pub use noble::{Noble, NobleId, NoblePool};
pub use player::{Player, RESERVE_CAP};
pub use simulator::Simulator;
pub use state::{GameState, GameSummary, Phase, DEFAULT_GOAL, MAX_TOKENS};
pub use view::GameView;
