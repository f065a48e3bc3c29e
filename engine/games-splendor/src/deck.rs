//! One tier's draw pile and face-up display.
//!
//! The display holds up to [`DISPLAY_CAP`] cards and is refilled from the top
//! of the pile after every removal, so it is always full while the pile has
//! cards left. The pile top can be seen only as a [`HiddenCard`]; the deck
//! remembers every hidden card it hands out so the holder can later have it
//! turned face up.
//!
//! Every mutation is logged so the deck can be rolled back to a [`Marker`].

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};

use engine_core::{GameRng, Marker, UndoLog};
use rand::seq::SliceRandom;

use crate::card::{Card, CardId, CardRef, HiddenCard, Tier};

/// Face-up cards per tier.
pub const DISPLAY_CAP: usize = 4;

#[derive(Debug, Clone, Copy)]
enum DeckOp {
    Draw(Card),
    Take { card: Card, slot: usize },
    Refill(Card),
}

#[derive(Debug, Clone)]
pub struct CardDeck {
    tier: Tier,
    /// Front is the top of the pile.
    pile: VecDeque<Card>,
    display: Vec<Card>,
    issued: RefCell<HashSet<CardId>>,
    log: UndoLog<DeckOp>,
}

impl CardDeck {
    /// Shuffle `cards` into a pile and deal the display.
    pub fn new(tier: Tier, cards: impl IntoIterator<Item = Card>, rng: &mut GameRng) -> Self {
        let mut cards: Vec<Card> = cards.into_iter().collect();
        cards.shuffle(rng);
        let mut deck = Self {
            tier,
            pile: cards.into(),
            display: Vec::with_capacity(DISPLAY_CAP),
            issued: RefCell::new(HashSet::new()),
            log: UndoLog::new(),
        };
        deck.refill();
        deck
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn display(&self) -> &[Card] {
        &self.display
    }

    /// Cards left in the draw pile.
    pub fn deck_size(&self) -> usize {
        self.pile.len()
    }

    /// Face-down view of the pile top.
    pub fn peek(&self) -> Option<HiddenCard> {
        let top = *self.pile.front()?;
        self.issued.borrow_mut().insert(top.id());
        Some(HiddenCard::new(top))
    }

    /// Whether `card` is the top of the pile.
    pub fn on_deck(&self, card: &CardRef) -> bool {
        self.pile.front().is_some_and(|top| card.is(top))
    }

    pub fn in_display(&self, card: &CardRef) -> bool {
        self.display.iter().any(|c| card.is(c))
    }

    /// Pop the pile top. The card counts as handed out hidden.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.pile.pop_front()?;
        self.issued.borrow_mut().insert(card.id());
        self.log.record(DeckOp::Draw(card));
        Some(card)
    }

    /// Remove `card` from the display and refill. Returns the real card, or
    /// `None` if it was not on display.
    pub fn take(&mut self, card: &CardRef) -> Option<Card> {
        let slot = self.display.iter().position(|c| card.is(c))?;
        let taken = self.display.remove(slot);
        self.log.record(DeckOp::Take { card: taken, slot });
        self.refill();
        Some(taken)
    }

    /// The face-up version of `card`. Face-up cards come back unchanged;
    /// hidden cards only if this deck handed them out.
    pub(crate) fn unhide(&self, card: &CardRef) -> Option<Card> {
        match card {
            CardRef::Face(c) => Some(*c),
            CardRef::Hidden(h) => self
                .issued
                .borrow()
                .contains(&h.id())
                .then(|| h.reveal()),
        }
    }

    pub fn mark(&mut self) -> Marker {
        self.log.mark()
    }

    /// Roll back to `marker`. Returns `false` if it is no longer on the stack.
    pub fn undo(&mut self, marker: Marker) -> bool {
        let Some(unwind) = self.log.unwind(marker) else {
            return false;
        };
        for op in unwind {
            match op {
                DeckOp::Draw(card) => self.pile.push_front(card),
                DeckOp::Take { card, slot } => self.display.insert(slot, card),
                DeckOp::Refill(card) => {
                    if let Some(pos) = self.display.iter().rposition(|c| *c == card) {
                        self.display.remove(pos);
                    }
                    self.pile.push_front(card);
                }
            }
        }
        true
    }

    /// Same display and cards, reshuffled pile, no undo history.
    pub fn fork(&self, rng: &mut GameRng) -> Self {
        let mut pile: Vec<Card> = self.pile.iter().copied().collect();
        pile.shuffle(rng);
        Self {
            tier: self.tier,
            pile: pile.into(),
            display: self.display.clone(),
            issued: self.issued.clone(),
            log: UndoLog::new(),
        }
    }

    /// Stop turning hidden cards face up unless `keep` holds for their id.
    pub(crate) fn retain_issued(&mut self, keep: impl Fn(CardId) -> bool) {
        self.issued.get_mut().retain(|id| keep(*id));
    }

    fn refill(&mut self) {
        while self.display.len() < DISPLAY_CAP {
            let Some(card) = self.pile.pop_front() else {
                break;
            };
            self.display.push(card);
            self.log.record(DeckOp::Refill(card));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use engine_core::rng;

    fn low_deck(seed: u64) -> CardDeck {
        let mut rng = rng::seeded(seed);
        CardDeck::new(Tier::Low, catalog::cards_of(Tier::Low), &mut rng)
    }

    fn display_invariant(deck: &CardDeck) -> bool {
        deck.display().len() == DISPLAY_CAP.min(deck.deck_size() + deck.display().len())
    }

    #[test]
    fn test_new_deals_full_display() {
        let deck = low_deck(1);
        assert_eq!(deck.display().len(), DISPLAY_CAP);
        assert_eq!(deck.deck_size(), 36);
    }

    #[test]
    fn test_peek_then_draw_yields_same_identity() {
        let mut deck = low_deck(2);
        let hidden = deck.peek().unwrap();
        assert!(deck.on_deck(&CardRef::Hidden(hidden)));
        let drawn = deck.draw().unwrap();
        assert_eq!(CardRef::Hidden(hidden), CardRef::Face(drawn));
        assert_eq!(deck.unhide(&CardRef::Hidden(hidden)), Some(drawn));
    }

    #[test]
    fn test_take_refills_from_pile() {
        let mut deck = low_deck(3);
        let target = CardRef::Face(deck.display()[1]);
        let next = deck.peek().unwrap();
        assert!(deck.take(&target).is_some());
        assert!(!deck.in_display(&target));
        assert!(deck.in_display(&CardRef::Hidden(next)));
        assert!(display_invariant(&deck));
        assert!(deck.take(&target).is_none());
    }

    #[test]
    fn test_undo_restores_pile_and_display() {
        let mut deck = low_deck(4);
        let display = deck.display().to_vec();
        let size = deck.deck_size();
        let top = deck.peek().unwrap();

        let m = deck.mark();
        deck.draw();
        let first = CardRef::Face(deck.display()[0]);
        deck.take(&first);
        let last = CardRef::Face(deck.display()[3]);
        deck.take(&last);
        assert!(deck.undo(m));

        assert_eq!(deck.display(), &display[..]);
        assert_eq!(deck.deck_size(), size);
        assert!(deck.on_deck(&CardRef::Hidden(top)));
    }

    #[test]
    fn test_display_shrinks_once_pile_is_empty() {
        let mut rng = rng::seeded(5);
        let cards: Vec<Card> = catalog::cards_of(Tier::High).take(6).collect();
        let mut deck = CardDeck::new(Tier::High, cards, &mut rng);
        for _ in 0..4 {
            let c = CardRef::Face(deck.display()[0]);
            deck.take(&c);
            assert!(display_invariant(&deck));
        }
        assert_eq!(deck.deck_size(), 0);
        assert_eq!(deck.display().len(), 2);
    }

    #[test]
    fn test_unhide_refuses_foreign_hidden_cards() {
        let low = low_deck(6);
        let mut rng = rng::seeded(6);
        let mid = CardDeck::new(Tier::Mid, catalog::cards_of(Tier::Mid), &mut rng);
        let hidden = CardRef::Hidden(mid.peek().unwrap());
        assert!(low.unhide(&hidden).is_none());
        assert!(mid.unhide(&hidden).is_some());
    }

    #[test]
    fn test_fork_keeps_cards_and_drops_history() {
        let mut deck = low_deck(7);
        let m = deck.mark();
        deck.draw();
        let mut rng = rng::seeded(70);
        let mut fork = deck.fork(&mut rng);
        assert_eq!(fork.display(), deck.display());
        assert_eq!(fork.deck_size(), deck.deck_size());
        assert!(!fork.undo(m));
        assert!(deck.undo(m));
    }
}
