//! Error types for the game engine.

use thiserror::Error;

/// A move, discard or noble choice the rules do not allow.
///
/// The message is shown to the agent that made the choice when it is asked
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("you are not allowed to pass without making a move")]
    NoMove,

    #[error("there are fewer than 3 colors available, so you must take exactly those colors")]
    MustTakeAllRemaining,

    #[error("you must take exactly three colors")]
    MustTakeThree,

    #[error("there are no more {0} tokens")]
    ColorExhausted(crate::gems::Color),

    #[error("there are not enough tokens of that color")]
    NotEnoughForTwo,

    #[error("you cannot reserve this card")]
    CannotReserve,

    #[error("this card is not available")]
    CardUnavailable,

    #[error("you must reserve a hidden card before purchasing it")]
    MustReserveHidden,

    #[error("you cannot purchase this card")]
    CannotPurchase,

    #[error("your payment does not match the card's cost")]
    BadPayment,

    #[error("incorrect number of tokens discarded: expected {expected}, got {actual}")]
    WrongDiscardCount { expected: u32, actual: u32 },

    #[error("you do not have enough tokens to discard")]
    DiscardNotHeld,

    #[error("you must choose a noble")]
    NoNoble,

    #[error("the noble you have chosen does not want you")]
    NobleNotOffered,
}

/// Failure to set up a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a game needs 2 to 4 players, got {0}")]
    PlayerCount(usize),

    #[error("expected {expected} agents, got {actual}")]
    AgentCount { expected: usize, actual: usize },
}

/// An agent giving up on a decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct AgentAbort(pub String);

impl AgentAbort {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// Abort because the previous choice was rejected.
    pub fn rejected(reason: &RuleViolation) -> Self {
        Self(format!("illegal choice: {reason}"))
    }
}

/// Failure that ends play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("agent for seat {seat} gave up: {reason}")]
    AgentAborted { seat: usize, reason: String },

    #[error("agent for seat {seat} made {attempts} illegal choices in a row, last: {last}")]
    TooManyRejections {
        seat: usize,
        attempts: u32,
        last: RuleViolation,
    },

    #[error(transparent)]
    Setup(#[from] SetupError),
}
