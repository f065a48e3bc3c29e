//! The fixed card and noble catalog.
//!
//! Costs are listed in [`Color::ALL`] order: brown, red, green, blue, white.

use once_cell::sync::Lazy;

use crate::card::{Card, CardId, Tier};
use crate::gems::{Color, GemSet};
use crate::noble::{Noble, NobleId};

use Color::{Blue as U, Brown as K, Green as G, Red as R, White as W};
use Tier::{High, Low, Mid};

const CARD_TABLE: &[(Tier, u8, Color, [u8; 5])] = &[
    // Low, 0 points
    (Low, 0, K, [0, 0, 3, 0, 0]),
    (Low, 0, R, [0, 0, 0, 0, 3]),
    (Low, 0, G, [0, 3, 0, 0, 0]),
    (Low, 0, U, [3, 0, 0, 0, 0]),
    (Low, 0, W, [0, 0, 0, 3, 0]),
    (Low, 0, K, [0, 1, 2, 0, 0]),
    (Low, 0, R, [0, 0, 1, 2, 0]),
    (Low, 0, G, [0, 0, 0, 1, 2]),
    (Low, 0, U, [2, 0, 0, 0, 1]),
    (Low, 0, W, [1, 2, 0, 0, 0]),
    (Low, 0, K, [0, 0, 2, 0, 2]),
    (Low, 0, R, [0, 2, 0, 0, 2]),
    (Low, 0, G, [0, 2, 0, 2, 0]),
    (Low, 0, U, [2, 0, 2, 0, 0]),
    (Low, 0, W, [2, 0, 0, 2, 0]),
    (Low, 0, K, [0, 1, 1, 1, 1]),
    (Low, 0, R, [1, 0, 1, 1, 1]),
    (Low, 0, G, [1, 1, 0, 1, 1]),
    (Low, 0, U, [1, 1, 1, 0, 1]),
    (Low, 0, W, [1, 1, 1, 1, 0]),
    (Low, 0, K, [0, 1, 0, 2, 2]),
    (Low, 0, R, [2, 0, 1, 0, 2]),
    (Low, 0, G, [2, 2, 0, 1, 0]),
    (Low, 0, U, [0, 2, 2, 0, 1]),
    (Low, 0, W, [1, 0, 2, 2, 0]),
    (Low, 0, K, [1, 3, 1, 0, 0]),
    (Low, 0, R, [3, 1, 0, 0, 1]),
    (Low, 0, G, [0, 0, 1, 3, 1]),
    (Low, 0, U, [0, 1, 3, 1, 0]),
    (Low, 0, W, [1, 0, 0, 1, 3]),
    (Low, 0, K, [0, 1, 1, 2, 1]),
    (Low, 0, R, [1, 0, 1, 1, 2]),
    (Low, 0, G, [2, 1, 0, 1, 1]),
    (Low, 0, U, [1, 2, 1, 0, 1]),
    (Low, 0, W, [1, 1, 2, 1, 0]),
    // Low, 1 point
    (Low, 1, K, [0, 0, 0, 4, 0]),
    (Low, 1, R, [0, 0, 0, 0, 4]),
    (Low, 1, G, [4, 0, 0, 0, 0]),
    (Low, 1, U, [0, 4, 0, 0, 0]),
    (Low, 1, W, [0, 0, 4, 0, 0]),
    // Mid, 1 point
    (Mid, 1, K, [0, 0, 2, 2, 3]),
    (Mid, 1, R, [3, 2, 0, 0, 2]),
    (Mid, 1, G, [2, 0, 0, 3, 2]),
    (Mid, 1, U, [0, 3, 2, 2, 0]),
    (Mid, 1, W, [2, 2, 3, 0, 0]),
    (Mid, 1, K, [2, 0, 3, 0, 3]),
    (Mid, 1, R, [3, 2, 0, 3, 0]),
    (Mid, 1, G, [0, 3, 2, 0, 3]),
    (Mid, 1, U, [3, 0, 3, 2, 0]),
    (Mid, 1, W, [0, 3, 0, 3, 2]),
    // Mid, 2 points
    (Mid, 2, K, [0, 0, 0, 0, 5]),
    (Mid, 2, R, [5, 0, 0, 0, 0]),
    (Mid, 2, G, [0, 0, 5, 0, 0]),
    (Mid, 2, U, [0, 0, 0, 5, 0]),
    (Mid, 2, W, [0, 5, 0, 0, 0]),
    (Mid, 2, K, [0, 2, 4, 1, 0]),
    (Mid, 2, R, [0, 0, 2, 4, 1]),
    (Mid, 2, G, [1, 0, 0, 2, 4]),
    (Mid, 2, U, [4, 1, 0, 0, 2]),
    (Mid, 2, W, [2, 4, 1, 0, 0]),
    (Mid, 2, K, [0, 3, 5, 0, 0]),
    (Mid, 2, R, [5, 0, 0, 0, 3]),
    (Mid, 2, G, [0, 0, 3, 5, 0]),
    (Mid, 2, U, [0, 0, 0, 3, 5]),
    (Mid, 2, W, [3, 5, 0, 0, 0]),
    // Mid, 3 points
    (Mid, 3, K, [6, 0, 0, 0, 0]),
    (Mid, 3, R, [0, 6, 0, 0, 0]),
    (Mid, 3, G, [0, 0, 6, 0, 0]),
    (Mid, 3, U, [0, 0, 0, 6, 0]),
    (Mid, 3, W, [0, 0, 0, 0, 6]),
    // High, 3 points
    (High, 3, K, [0, 3, 5, 3, 3]),
    (High, 3, R, [3, 0, 3, 5, 3]),
    (High, 3, G, [3, 3, 0, 3, 5]),
    (High, 3, U, [5, 3, 3, 0, 3]),
    (High, 3, W, [3, 5, 3, 3, 0]),
    // High, 4 points
    (High, 4, K, [0, 7, 0, 0, 0]),
    (High, 4, R, [0, 0, 7, 0, 0]),
    (High, 4, G, [0, 0, 0, 7, 0]),
    (High, 4, U, [0, 0, 0, 0, 7]),
    (High, 4, W, [7, 0, 0, 0, 0]),
    (High, 4, K, [3, 6, 3, 0, 0]),
    (High, 4, R, [0, 3, 6, 3, 0]),
    (High, 4, G, [0, 0, 3, 6, 3]),
    (High, 4, U, [3, 0, 0, 3, 6]),
    (High, 4, W, [6, 3, 0, 0, 3]),
    // High, 5 points
    (High, 5, K, [3, 7, 0, 0, 0]),
    (High, 5, R, [0, 3, 7, 0, 0]),
    (High, 5, G, [0, 0, 3, 7, 0]),
    (High, 5, U, [0, 0, 0, 3, 7]),
    (High, 5, W, [7, 0, 0, 0, 3]),
];

const NOBLE_POINTS: u8 = 3;

const NOBLE_TABLE: &[[u8; 5]] = &[
    [4, 4, 0, 0, 0],
    [0, 4, 4, 0, 0],
    [0, 0, 4, 4, 0],
    [0, 0, 0, 4, 4],
    [4, 0, 0, 0, 4],
    [3, 3, 3, 0, 0],
    [0, 3, 3, 3, 0],
    [0, 0, 3, 3, 3],
    [3, 0, 0, 3, 3],
    [3, 3, 0, 0, 3],
];

static CARDS: Lazy<Vec<Card>> = Lazy::new(|| {
    CARD_TABLE
        .iter()
        .enumerate()
        .map(|(i, &(tier, points, color, cost))| {
            Card::new(CardId(i as u8), tier, points, color, GemSet::new(cost))
        })
        .collect()
});

static NOBLES: Lazy<Vec<Noble>> = Lazy::new(|| {
    NOBLE_TABLE
        .iter()
        .enumerate()
        .map(|(i, &cost)| Noble::new(NobleId(i as u8), NOBLE_POINTS, GemSet::new(cost)))
        .collect()
});

/// Every card in the game.
pub fn cards() -> &'static [Card] {
    &CARDS
}

/// Every card of one tier, in catalog order.
pub fn cards_of(tier: Tier) -> impl Iterator<Item = Card> {
    cards().iter().copied().filter(move |c| c.tier() == tier)
}

/// Every noble in the game.
pub fn nobles() -> &'static [Noble] {
    &NOBLES
}
