//! The complete game state and the queries every other layer builds on.

use std::fmt;

use engine_core::GameRng;

use crate::card::{Card, CardRef, Tier};
use crate::catalog;
use crate::deck::CardDeck;
use crate::error::SetupError;
use crate::gems::{Color, TokenColor, TokenSet};
use crate::noble::NoblePool;
use crate::player::{Player, RESERVE_CAP};

/// Most tokens a player may keep at the end of a turn.
pub const MAX_TOKENS: u32 = 10;

/// Gold tokens in every game.
pub const GOLD_TOKENS: u8 = 5;

/// Points needed to trigger the final round unless configured otherwise.
pub const DEFAULT_GOAL: u32 = 15;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// The part of a turn being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Move,
    Discard,
    Visit,
}

/// Starting token pool for `num_players` players.
pub fn starting_pool(num_players: usize) -> Result<TokenSet, SetupError> {
    let per_color = match num_players {
        2 => 4,
        3 => 5,
        4 => 7,
        n => return Err(SetupError::PlayerCount(n)),
    };
    Ok(TokenSet::new([
        per_color,
        per_color,
        per_color,
        per_color,
        per_color,
        GOLD_TOKENS,
    ]))
}

/// Players, decks, tokens and nobles, plus whose turn it is.
///
/// Players are addressed by seat (turn order) and decks by [`Tier`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) goal: u32,
    pub(crate) players: Vec<Player>,
    pub(crate) decks: [CardDeck; 3],
    pub(crate) pool: TokenSet,
    pub(crate) nobles: NoblePool,
    pub(crate) round: u32,
    pub(crate) current: usize,
    pub(crate) phase: Phase,
}

impl GameState {
    /// Deal a fresh game: shuffled decks, `num_players + 1` nobles, a full
    /// token pool and empty-handed players.
    pub fn new(num_players: usize, goal: u32, rng: &mut GameRng) -> Result<Self, SetupError> {
        let pool = starting_pool(num_players)?;
        let decks = Tier::ALL.map(|tier| CardDeck::new(tier, catalog::cards_of(tier), rng));
        let nobles = NoblePool::deal(num_players, rng);
        Ok(Self {
            goal,
            players: (0..num_players).map(|_| Player::new()).collect(),
            decks,
            pool,
            nobles,
            round: 0,
            current: 0,
            phase: Phase::Move,
        })
    }

    /// An equivalent state with reshuffled draw piles and no undo history.
    pub fn fork(&self, rng: &mut GameRng) -> Self {
        Self {
            goal: self.goal,
            players: self.players.iter().map(Player::fork).collect(),
            decks: [
                self.decks[0].fork(rng),
                self.decks[1].fork(rng),
                self.decks[2].fork(rng),
            ],
            pool: self.pool,
            nobles: self.nobles.fork(),
            round: self.round,
            current: self.current,
            phase: self.phase,
        }
    }

    /// A fork as `seat` sees the game: hidden cards reserved by anyone else
    /// stay face down in the copy.
    pub(crate) fn fork_for(&self, seat: usize, rng: &mut GameRng) -> Self {
        let mut fork = self.fork(rng);
        let own = self.players[seat].reserved();
        for deck in &mut fork.decks {
            deck.retain_issued(|id| {
                own.iter()
                    .any(|r| matches!(r, CardRef::Hidden(h) if h.id() == id))
            });
        }
        fork
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> &Player {
        &self.players[seat]
    }

    pub fn deck(&self, tier: Tier) -> &CardDeck {
        &self.decks[tier.index()]
    }

    pub fn decks(&self) -> &[CardDeck; 3] {
        &self.decks
    }

    /// Tokens still in the bank.
    pub fn pool(&self) -> &TokenSet {
        &self.pool
    }

    pub fn nobles(&self) -> &NoblePool {
        &self.nobles
    }

    /// Rounds started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Seat of the player to act.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether anyone has reached the goal, so this round is the last.
    pub fn final_round(&self) -> bool {
        self.players.iter().any(|p| p.points() >= self.goal)
    }

    /// The face-up card behind `card`, if any deck handed it out hidden.
    pub(crate) fn unhide(&self, card: &CardRef) -> Option<Card> {
        self.decks[card.tier().index()].unhide(card)
    }

    /// `card` turned face up if `seat` has it reserved, otherwise unchanged.
    pub(crate) fn unhide_for(&self, seat: usize, card: &CardRef) -> CardRef {
        if self.players[seat].has_reserved(card) {
            if let Some(real) = self.unhide(card) {
                return CardRef::Face(real);
            }
        }
        *card
    }

    /// Nobody can do anything useful and no colored tokens remain.
    pub fn deadlocked(&self) -> bool {
        if Color::ALL
            .iter()
            .any(|&c| self.pool.get(TokenColor::Gem(c)) > 0)
        {
            return false;
        }
        for p in &self.players {
            if !self.nobles.satisfied(p.gems()).is_empty() {
                return false;
            }
            for r in p.reserved() {
                if self.unhide(r).is_some_and(|c| p.can_purchase(&c)) {
                    return false;
                }
            }
            for deck in &self.decks {
                if deck.deck_size() > 0 && p.reserved().len() < RESERVE_CAP {
                    return false;
                }
                for c in deck.display() {
                    if p.can_reserve(&CardRef::Face(*c)) || p.can_purchase(c) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// The first seat is about to act and the final round has completed or
    /// the game is stuck.
    pub fn is_over(&self) -> bool {
        self.current == 0
            && self.phase == Phase::Move
            && (self.final_round() || self.deadlocked())
    }

    /// Seats of the winners, or `None` while the game is still running.
    ///
    /// Only players at or above the goal can win. The highest score wins,
    /// then the fewest owned cards; anyone still tied shares the win. A
    /// deadlocked game where nobody reached the goal has no winners.
    pub fn winners(&self) -> Option<Vec<usize>> {
        if !self.is_over() {
            return None;
        }
        Some(self.ranked_leaders())
    }

    pub(crate) fn ranked_leaders(&self) -> Vec<usize> {
        let top = self
            .players
            .iter()
            .map(Player::points)
            .filter(|&pts| pts >= self.goal)
            .max();
        let Some(top) = top else {
            return Vec::new();
        };
        let fewest = self
            .players
            .iter()
            .filter(|p| p.points() == top)
            .map(|p| p.owned().len())
            .min()
            .unwrap_or(0);
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.points() == top && p.owned().len() == fewest)
            .map(|(seat, _)| seat)
            .collect()
    }

    /// Points, cards left per tier and rounds played.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            points: self.players.iter().map(Player::points).collect(),
            cards_left: self
                .decks
                .each_ref()
                .map(|d| d.deck_size() + d.display().len()),
            rounds: self.round,
        }
    }

    /// Tokens in the pool plus every player's hand.
    pub fn token_total(&self) -> TokenSet {
        self.players
            .iter()
            .fold(self.pool, |acc, p| acc.add(p.tokens()))
    }
}

/// Compact end-of-game report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub points: Vec<u32>,
    /// Pile plus display, by tier.
    pub cards_left: [usize; 3],
    pub rounds: u32,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Players")?;
        for (seat, pts) in self.points.iter().enumerate() {
            writeln!(f, "{seat} {pts}")?;
        }
        writeln!(f, "Decks")?;
        for tier in Tier::ALL {
            writeln!(f, "{tier} {}", self.cards_left[tier.index()])?;
        }
        writeln!(f, "Rounds")?;
        write!(f, "{}", self.rounds)
    }
}
