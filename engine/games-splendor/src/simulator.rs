//! A controller whose whole game can be marked and rolled back.
//!
//! [`Simulator::mark`] asks every subsystem for its own marker and bundles
//! them with the token pool and turn counters. [`Simulator::undo`] hands each
//! subsystem its marker back. Nothing is copied beyond the pool and a few
//! scalars, so a search can explore and retract thousands of lines of play
//! on one live state.

use std::convert::Infallible;

use engine_core::{GameRng, Marker, UndoLog};
use tracing::warn;

use crate::agent::DecisionProvider;
use crate::controller::Controller;
use crate::error::{EngineError, SetupError};
use crate::gems::TokenSet;
use crate::state::{GameState, Phase};
use crate::view::GameView;

#[derive(Debug, Clone)]
struct Checkpoint {
    players: Vec<Marker>,
    decks: [Marker; 3],
    nobles: Marker,
    pool: TokenSet,
    round: u32,
    current: usize,
    phase: Phase,
}

#[derive(Debug)]
pub struct Simulator<A> {
    controller: Controller<A>,
    checkpoints: UndoLog<Infallible, Checkpoint>,
}

impl<A: DecisionProvider> Simulator<A> {
    pub fn new(controller: Controller<A>) -> Self {
        Self {
            controller,
            checkpoints: UndoLog::new(),
        }
    }

    /// Simulate `state` with `agents`.
    pub fn from_state(state: GameState, agents: Vec<A>) -> Result<Self, SetupError> {
        Controller::from_state(state, agents).map(Self::new)
    }

    /// An independent simulator in the same position with new agents.
    /// Draw piles are reshuffled and no undo history is shared.
    pub fn fork_with<B: DecisionProvider>(
        &self,
        agents: Vec<B>,
        rng: &mut GameRng,
    ) -> Result<Simulator<B>, SetupError> {
        self.controller.fork_with(agents, rng).map(Simulator::new)
    }

    /// Capture the current position.
    pub fn mark(&mut self) -> Marker {
        let state = &mut self.controller.state;
        let checkpoint = Checkpoint {
            players: state.players.iter_mut().map(|p| p.mark()).collect(),
            decks: [
                state.decks[0].mark(),
                state.decks[1].mark(),
                state.decks[2].mark(),
            ],
            nobles: state.nobles.mark(),
            pool: state.pool,
            round: state.round,
            current: state.current,
            phase: state.phase,
        };
        self.checkpoints.mark_with(checkpoint)
    }

    /// Return to the position captured by `marker`, discarding every marker
    /// taken after it. Returns `false` if the marker is no longer valid, or if
    /// a player, deck or the noble pool had already been rolled back past it.
    pub fn undo(&mut self, marker: Marker) -> bool {
        let Some(unwind) = self.checkpoints.unwind(marker) else {
            return false;
        };
        let cp = unwind.snapshot;
        let state = &mut self.controller.state;
        let mut restored = true;
        for (player, m) in state.players.iter_mut().zip(cp.players) {
            restored &= player.undo(m);
        }
        for (deck, m) in state.decks.iter_mut().zip(cp.decks) {
            restored &= deck.undo(m);
        }
        restored &= state.nobles.undo(cp.nobles);
        state.pool = cp.pool;
        state.round = cp.round;
        state.current = cp.current;
        state.phase = cp.phase;
        if !restored {
            warn!(
                round = state.round,
                "undo history of a subsystem was unwound past its checkpoint"
            );
        }
        restored
    }

    /// Outstanding markers.
    pub fn depth(&self) -> usize {
        self.checkpoints.depth()
    }

    pub fn next(&mut self) -> Result<bool, EngineError> {
        self.controller.next()
    }

    pub fn play(&mut self) -> Result<Vec<usize>, EngineError> {
        self.controller.play()
    }

    pub fn controller(&self) -> &Controller<A> {
        &self.controller
    }

    pub fn state(&self) -> &GameState {
        self.controller.state()
    }

    pub fn view(&self, seat: usize) -> GameView<'_> {
        self.controller.view(seat)
    }

    pub fn agent_mut(&mut self, seat: usize) -> &mut A {
        self.controller.agent_mut(seat)
    }

    pub fn is_over(&self) -> bool {
        self.controller.is_over()
    }

    pub fn winners(&self) -> Option<Vec<usize>> {
        self.controller.winners()
    }
}
