//! What an agent may see of the game.

use engine_core::GameRng;

use crate::card::{CardRef, Tier};
use crate::deck::CardDeck;
use crate::gems::TokenSet;
use crate::noble::NoblePool;
use crate::player::Player;
use crate::state::{GameState, Phase};

/// Read-only view of a game from one seat.
///
/// Pile tops and other players' face-down reservations show only their tier.
/// Only the viewer's own reservations can be turned face up.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    state: &'a GameState,
    seat: usize,
}

impl<'a> GameView<'a> {
    pub fn new(state: &'a GameState, seat: usize) -> Self {
        Self { state, seat }
    }

    /// Seat of the viewer.
    pub fn seat(&self) -> usize {
        self.seat
    }

    /// The viewer's own holdings.
    pub fn me(&self) -> &'a Player {
        &self.state.players[self.seat]
    }

    pub fn player(&self, seat: usize) -> &'a Player {
        &self.state.players[seat]
    }

    pub fn players(&self) -> &'a [Player] {
        &self.state.players
    }

    pub fn num_players(&self) -> usize {
        self.state.num_players()
    }

    pub fn current(&self) -> usize {
        self.state.current
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn goal(&self) -> u32 {
        self.state.goal
    }

    pub fn deck(&self, tier: Tier) -> &'a CardDeck {
        self.state.deck(tier)
    }

    pub fn decks(&self) -> &'a [CardDeck; 3] {
        &self.state.decks
    }

    pub fn pool(&self) -> &'a TokenSet {
        &self.state.pool
    }

    pub fn nobles(&self) -> &'a NoblePool {
        &self.state.nobles
    }

    pub fn final_round(&self) -> bool {
        self.state.final_round()
    }

    /// `card` face up if the viewer has it reserved, otherwise unchanged.
    pub fn unhide(&self, card: &CardRef) -> CardRef {
        self.state.unhide_for(self.seat, card)
    }

    /// A copy of the game to simulate on, with every draw pile reshuffled.
    /// Only the viewer's own hidden reservations can be turned face up in it.
    pub fn fork_state(&self, rng: &mut GameRng) -> GameState {
        self.state.fork_for(self.seat, rng)
    }
}
