//! MCTS configuration parameters.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::policy::{ExpansionFilter, SelectionPolicy};

/// A named pairing of selection policy and expansion filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchVariant {
    /// Descend into a uniformly random child.
    Random,
    /// Descend into the child with the most wins, ties broken at random.
    MostWins,
    /// Descend by the UCB1 score.
    Ucb1,
    /// UCB1, and never expand a reserve when another move exists.
    Ucb1NoReserve,
}

impl SearchVariant {
    pub const ALL: [SearchVariant; 4] = [
        SearchVariant::Random,
        SearchVariant::MostWins,
        SearchVariant::Ucb1,
        SearchVariant::Ucb1NoReserve,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SearchVariant::Random => "random",
            SearchVariant::MostWins => "most-wins",
            SearchVariant::Ucb1 => "ucb1",
            SearchVariant::Ucb1NoReserve => "ucb1-no-reserve",
        }
    }

    pub fn selection(self) -> SelectionPolicy {
        match self {
            SearchVariant::Random => SelectionPolicy::Random,
            SearchVariant::MostWins => SelectionPolicy::MostWins,
            SearchVariant::Ucb1 | SearchVariant::Ucb1NoReserve => SelectionPolicy::Ucb1,
        }
    }

    pub fn expansion(self) -> ExpansionFilter {
        match self {
            SearchVariant::Ucb1NoReserve => ExpansionFilter::NoReserveUnlessOnly,
            _ => ExpansionFilter::AllMoves,
        }
    }
}

impl fmt::Display for SearchVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search variant '{0}' (expected random, most-wins, ucb1 or ucb1-no-reserve)")]
pub struct UnknownVariant(pub String);

impl FromStr for SearchVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        SearchVariant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or(UnknownVariant(s))
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Wall-clock time spent per decision. Checked once per iteration, so a
    /// search always completes at least one iteration.
    pub time_budget: Duration,

    /// Stop after this many iterations even if time remains.
    pub max_iterations: Option<u32>,

    /// Rollouts still running after this many rounds count as won by nobody.
    pub rollout_round_limit: u32,

    pub variant: SearchVariant,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(1),
            max_iterations: None,
            rollout_round_limit: 200,
            variant: SearchVariant::Ucb1,
        }
    }
}

impl MctsConfig {
    /// Create config for tournament play: longer budget, reserves only as a
    /// last resort.
    pub fn for_evaluation() -> Self {
        Self {
            time_budget: Duration::from_secs(5),
            max_iterations: None,
            rollout_round_limit: 200,
            variant: SearchVariant::Ucb1NoReserve,
        }
    }

    /// Create a fast, iteration-capped config for testing.
    pub fn for_testing() -> Self {
        Self {
            time_budget: Duration::from_secs(60),
            max_iterations: Some(4),
            rollout_round_limit: 100,
            variant: SearchVariant::Ucb1,
        }
    }

    /// Builder pattern: set time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Builder pattern: set iteration cap.
    pub fn with_max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Builder pattern: set rollout round limit.
    pub fn with_rollout_round_limit(mut self, rounds: u32) -> Self {
        self.rollout_round_limit = rounds;
        self
    }

    /// Builder pattern: set variant.
    pub fn with_variant(mut self, variant: SearchVariant) -> Self {
        self.variant = variant;
        self
    }
}
