//! Child selection, move enumeration and expansion filtering.

use std::collections::HashMap;

use engine_core::GameRng;
use games_splendor::{CardRef, Color, ColorSet, GameView, Move, Player};
use rand::seq::SliceRandom;

use crate::node::NodeId;
use crate::search::SearchNode;
use crate::tree::Tree;

/// Rule for picking which child to descend into during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionPolicy {
    Random,
    /// Most wins, ties broken at random.
    MostWins,
    /// `win_rate + sqrt(2 ln(parent_sims) / child_sims)`; unvisited children
    /// come first.
    Ucb1,
}

impl SelectionPolicy {
    /// The child of `parent` to descend into, or `None` at a leaf.
    pub fn select(
        self,
        tree: &Tree<SearchNode>,
        parent: NodeId,
        rng: &mut GameRng,
    ) -> Option<NodeId> {
        let children = tree.children(parent);
        match self {
            SelectionPolicy::Random => children.choose(rng).copied(),
            SelectionPolicy::MostWins => {
                let most = children.iter().map(|&c| tree.data(c).wins).max()?;
                let best: Vec<NodeId> = children
                    .iter()
                    .copied()
                    .filter(|&c| tree.data(c).wins == most)
                    .collect();
                best.choose(rng).copied()
            }
            SelectionPolicy::Ucb1 => {
                let ln_parent = (tree.data(parent).sims as f64).ln().max(0.0);
                let mut best = None;
                let mut max_score = f64::NEG_INFINITY;
                for &child in children {
                    let score = ucb1(tree.data(child), ln_parent);
                    if score > max_score {
                        max_score = score;
                        best = Some(child);
                    }
                }
                best
            }
        }
    }
}

fn ucb1(node: &SearchNode, ln_parent: f64) -> f64 {
    if node.sims == 0 {
        return f64::INFINITY;
    }
    node.win_rate() + (2.0 * ln_parent / node.sims as f64).sqrt()
}

/// Which legal moves become children of an expanded node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpansionFilter {
    AllMoves,
    /// Drop reserves whenever any other move exists.
    NoReserveUnlessOnly,
}

impl ExpansionFilter {
    pub fn apply(self, moves: Vec<Move>) -> Vec<Move> {
        match self {
            ExpansionFilter::AllMoves => moves,
            ExpansionFilter::NoReserveUnlessOnly => {
                if moves.iter().all(Move::is_reserve) {
                    return moves;
                }
                moves.into_iter().filter(|m| !m.is_reserve()).collect()
            }
        }
    }
}

/// Take-three moves per set of available colors.
#[derive(Debug, Clone, Default)]
pub struct TakeCache {
    takes: HashMap<ColorSet, Vec<Move>>,
}

impl TakeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every legal take-three when exactly `available` colors have tokens.
    pub fn takes(&mut self, available: ColorSet) -> &[Move] {
        self.takes
            .entry(available)
            .or_insert_with(|| take_threes(available))
    }

    pub fn len(&self) -> usize {
        self.takes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.takes.is_empty()
    }
}

fn take_threes(available: ColorSet) -> Vec<Move> {
    if available.len() <= 3 {
        return vec![Move::TakeThree(available)];
    }
    let colors: Vec<Color> = available.iter().collect();
    let mut moves = Vec::new();
    for i in 0..colors.len() {
        for j in 0..i {
            for k in 0..j {
                moves.push(Move::TakeThree(
                    ColorSet::empty()
                        .with(colors[i])
                        .with(colors[j])
                        .with(colors[k]),
                ));
            }
        }
    }
    moves
}

/// Every legal move for the viewer. Purchases use the canonical payment.
pub fn legal_moves(view: &GameView<'_>, takes: &mut TakeCache) -> Vec<Move> {
    let me: &Player = view.me();
    let mut moves = Vec::new();

    for deck in view.decks() {
        for card in deck.display() {
            if let Some(payment) = me.canonical_payment(card) {
                moves.push(Move::Purchase {
                    card: CardRef::Face(*card),
                    payment,
                });
            }
            let card = CardRef::Face(*card);
            if me.can_reserve(&card) {
                moves.push(Move::Reserve(card));
            }
        }
        if let Some(top) = deck.peek() {
            let card = CardRef::Hidden(top);
            if me.can_reserve(&card) {
                moves.push(Move::Reserve(card));
            }
        }
    }

    for reserved in me.reserved() {
        let Some(card) = view.unhide(reserved).face() else {
            continue;
        };
        if let Some(payment) = me.canonical_payment(&card) {
            moves.push(Move::Purchase {
                card: CardRef::Face(card),
                payment,
            });
        }
    }

    let pool = view.pool();
    for color in Color::ALL {
        if pool.get(color.into()) > 3 {
            moves.push(Move::TakeTwo(color));
        }
    }
    moves.extend_from_slice(takes.takes(pool.available_colors()));
    moves
}
