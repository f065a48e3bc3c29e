//! Turn sequencing: asks agents for decisions and applies them phase by phase.

use engine_core::GameRng;
use tracing::{trace, warn};

use crate::agent::DecisionProvider;
use crate::error::{AgentAbort, EngineError, RuleViolation, SetupError};
use crate::rules;
use crate::state::{GameState, Phase};
use crate::view::GameView;

/// Re-prompts allowed per decision before play stops with an error.
pub const DEFAULT_MAX_REJECTIONS: u32 = 32;

/// Runs one game between a fixed set of agents, one per seat.
#[derive(Debug)]
pub struct Controller<A> {
    pub(crate) state: GameState,
    agents: Vec<A>,
    max_rejections: u32,
}

impl<A: DecisionProvider> Controller<A> {
    /// Deal a new game for `agents`, seated in the given order.
    pub fn new(agents: Vec<A>, goal: u32, rng: &mut GameRng) -> Result<Self, SetupError> {
        let state = GameState::new(agents.len(), goal, rng)?;
        Self::from_state(state, agents)
    }

    /// Continue `state` with `agents`.
    pub fn from_state(state: GameState, agents: Vec<A>) -> Result<Self, SetupError> {
        if agents.len() != state.num_players() {
            return Err(SetupError::AgentCount {
                expected: state.num_players(),
                actual: agents.len(),
            });
        }
        Ok(Self {
            state,
            agents,
            max_rejections: DEFAULT_MAX_REJECTIONS,
        })
    }

    pub fn with_max_rejections(mut self, max_rejections: u32) -> Self {
        self.max_rejections = max_rejections;
        self
    }

    /// An independent game in the same position played by `agents`. Draw
    /// piles are reshuffled and no undo history is shared.
    pub fn fork_with<B: DecisionProvider>(
        &self,
        agents: Vec<B>,
        rng: &mut GameRng,
    ) -> Result<Controller<B>, SetupError> {
        Controller::from_state(self.state.fork(rng), agents)
            .map(|c| c.with_max_rejections(self.max_rejections))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn view(&self, seat: usize) -> GameView<'_> {
        GameView::new(&self.state, seat)
    }

    pub fn agent(&self, seat: usize) -> &A {
        &self.agents[seat]
    }

    pub fn agent_mut(&mut self, seat: usize) -> &mut A {
        &mut self.agents[seat]
    }

    pub fn max_rejections(&self) -> u32 {
        self.max_rejections
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn winners(&self) -> Option<Vec<usize>> {
        self.state.winners()
    }

    /// Play one phase. Returns `Ok(false)` once the game is over.
    pub fn next(&mut self) -> Result<bool, EngineError> {
        if self.state.is_over() {
            return Ok(false);
        }
        let seat = self.state.current;
        if seat == 0 && self.state.phase == Phase::Move {
            self.state.round += 1;
        }
        match self.state.phase {
            Phase::Move => {
                self.move_phase(seat)?;
                self.state.phase = Phase::Discard;
            }
            Phase::Discard => {
                self.discard_phase(seat)?;
                self.state.phase = Phase::Visit;
            }
            Phase::Visit => {
                self.visit_phase(seat)?;
                self.state.phase = Phase::Move;
                self.state.current = (seat + 1) % self.state.num_players();
            }
        }
        Ok(true)
    }

    /// Play to the end and return the winning seats.
    pub fn play(&mut self) -> Result<Vec<usize>, EngineError> {
        while self.next()? {}
        Ok(self.state.ranked_leaders())
    }

    fn move_phase(&mut self, seat: usize) -> Result<(), EngineError> {
        let view = GameView::new(&self.state, seat);
        let mut choice = self.agents[seat]
            .choose_move(&view)
            .map_err(|e| aborted(seat, e))?;
        let mut attempts = 0;
        loop {
            let reason = match rules::apply_move(&mut self.state, seat, choice) {
                Ok(()) => return Ok(()),
                Err(reason) => reason,
            };
            attempts += 1;
            self.check_attempts(seat, attempts, &reason)?;
            let view = GameView::new(&self.state, seat);
            choice = self.agents[seat]
                .choose_move_after_rejection(&view, &reason)
                .map_err(|e| aborted(seat, e))?;
        }
    }

    fn discard_phase(&mut self, seat: usize) -> Result<(), EngineError> {
        let count = rules::excess_tokens(&self.state, seat);
        if count == 0 {
            return Ok(());
        }
        trace!(seat, count, "discard requested");
        let view = GameView::new(&self.state, seat);
        let mut choice = self.agents[seat]
            .discard(&view, count)
            .map_err(|e| aborted(seat, e))?;
        let mut attempts = 0;
        loop {
            let reason = match rules::discard(&mut self.state, seat, choice) {
                Ok(()) => return Ok(()),
                Err(reason) => reason,
            };
            attempts += 1;
            self.check_attempts(seat, attempts, &reason)?;
            let view = GameView::new(&self.state, seat);
            choice = self.agents[seat]
                .discard_after_rejection(&view, count, &reason)
                .map_err(|e| aborted(seat, e))?;
        }
    }

    fn visit_phase(&mut self, seat: usize) -> Result<(), EngineError> {
        let offered = rules::satisfied_nobles(&self.state, seat);
        let mut choice = match offered.as_slice() {
            [] => return Ok(()),
            [only] => Some(*only),
            _ => {
                let view = GameView::new(&self.state, seat);
                self.agents[seat]
                    .choose_noble(&view, &offered)
                    .map_err(|e| aborted(seat, e))?
            }
        };
        let mut attempts = 0;
        loop {
            let reason = match rules::noble_visit(&mut self.state, seat, &offered, choice) {
                Ok(()) => break,
                Err(reason) => reason,
            };
            attempts += 1;
            self.check_attempts(seat, attempts, &reason)?;
            let view = GameView::new(&self.state, seat);
            choice = self.agents[seat]
                .choose_noble_after_rejection(&view, &offered, &reason)
                .map_err(|e| aborted(seat, e))?;
        }
        if let Some(noble) = choice {
            let view = GameView::new(&self.state, seat);
            self.agents[seat].notify_noble_visit(&view, &noble);
        }
        Ok(())
    }

    fn check_attempts(&self, seat: usize, attempts: u32, reason: &RuleViolation) -> Result<(), EngineError> {
        warn!(seat, attempts, %reason, "choice rejected");
        if attempts > self.max_rejections {
            return Err(EngineError::TooManyRejections {
                seat,
                attempts,
                last: reason.clone(),
            });
        }
        Ok(())
    }
}

fn aborted(seat: usize, abort: AgentAbort) -> EngineError {
    EngineError::AgentAborted {
        seat,
        reason: abort.0,
    }
}
