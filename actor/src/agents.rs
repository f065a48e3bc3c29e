//! Agent specs: parse "default" or "mcts[:variant[:millis]]" and build the
//! matching decision provider for a seat.

use anyhow::{anyhow, Context, Result};
use games_splendor::{DecisionProvider, DefaultAgent};
use mcts::{MctsAgent, MctsConfig, SearchVariant};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentSpec {
    /// The non-searching heuristic policy
    Default,
    /// Tree search; unset fields fall back to the shared MCTS settings
    Mcts {
        variant: Option<SearchVariant>,
        time_budget: Option<Duration>,
    },
}

impl AgentSpec {
    /// Build the agent for one seat, seeded with `seed`.
    pub fn build(&self, shared: &MctsConfig, seed: u64) -> Box<dyn DecisionProvider> {
        match self {
            AgentSpec::Default => Box::new(DefaultAgent::seeded(seed)),
            AgentSpec::Mcts {
                variant,
                time_budget,
            } => {
                let mut config = shared.clone();
                if let Some(v) = variant {
                    config = config.with_variant(*v);
                }
                if let Some(budget) = time_budget {
                    config = config.with_time_budget(*budget);
                }
                Box::new(MctsAgent::seeded(config, seed))
            }
        }
    }
}

impl FromStr for AgentSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split(':');
        let kind = parts.next().unwrap_or_default().to_ascii_lowercase();
        match kind.as_str() {
            "default" => {
                if parts.next().is_some() {
                    return Err(anyhow!("agent spec '{}': default takes no options", s));
                }
                Ok(AgentSpec::Default)
            }
            "mcts" => {
                let variant: Option<SearchVariant> = parts
                    .next()
                    .filter(|v| !v.is_empty())
                    .map(|v| v.parse::<SearchVariant>())
                    .transpose()
                    .with_context(|| format!("agent spec '{}'", s))?;
                let time_budget = parts
                    .next()
                    .map(|ms| {
                        ms.parse::<u64>()
                            .ok()
                            .filter(|&ms| ms > 0)
                            .map(Duration::from_millis)
                            .ok_or_else(|| {
                                anyhow!(
                                    "agent spec '{}': '{}' is not a positive millisecond budget",
                                    s,
                                    ms
                                )
                            })
                    })
                    .transpose()?;
                if parts.next().is_some() {
                    return Err(anyhow!("agent spec '{}': too many options", s));
                }
                Ok(AgentSpec::Mcts {
                    variant,
                    time_budget,
                })
            }
            _ => Err(anyhow!(
                "unknown agent '{}', expected 'default' or 'mcts[:variant[:millis]]'",
                s
            )),
        }
    }
}

impl fmt::Display for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentSpec::Default => write!(f, "default"),
            AgentSpec::Mcts {
                variant,
                time_budget,
            } => {
                write!(f, "mcts")?;
                match (variant, time_budget) {
                    (None, None) => Ok(()),
                    (Some(v), None) => write!(f, ":{v}"),
                    (v, Some(t)) => {
                        let v = v.map(|v| v.to_string()).unwrap_or_default();
                        write!(f, ":{}:{}", v, t.as_millis())
                    }
                }
            }
        }
    }
}
