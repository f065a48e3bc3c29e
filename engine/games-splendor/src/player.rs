//! Per-player holdings and the purchase/reserve rules that depend on them.

use engine_core::{Marker, UndoLog};

use crate::card::{Card, CardRef};
use crate::gems::{Color, GemSet, TokenColor, TokenSet};
use crate::noble::Noble;

/// Maximum number of reserved cards.
pub const RESERVE_CAP: usize = 3;

#[derive(Debug, Clone, Copy)]
enum PlayerOp {
    Reserve(CardRef),
    Purchase {
        card: Card,
        /// Slot and form of the reservation the card came from, if any.
        reserved: Option<(usize, CardRef)>,
        payment: TokenSet,
    },
    Visit(Noble),
}

/// Everything one player holds.
///
/// Token transfers made directly by the controller are not logged; a marker
/// snapshots the token balance and undo restores it.
#[derive(Debug, Clone)]
pub struct Player {
    tokens: TokenSet,
    gems: GemSet,
    reserved: Vec<CardRef>,
    owned: Vec<Card>,
    nobles: Vec<Noble>,
    points: u32,
    log: UndoLog<PlayerOp, TokenSet>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            tokens: TokenSet::empty(),
            gems: GemSet::empty(),
            reserved: Vec::with_capacity(RESERVE_CAP),
            owned: Vec::new(),
            nobles: Vec::new(),
            points: 0,
            log: UndoLog::new(),
        }
    }

    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Gems granted by owned cards.
    pub fn gems(&self) -> &GemSet {
        &self.gems
    }

    pub fn reserved(&self) -> &[CardRef] {
        &self.reserved
    }

    pub fn owned(&self) -> &[Card] {
        &self.owned
    }

    pub fn nobles(&self) -> &[Noble] {
        &self.nobles
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn token_count(&self) -> u32 {
        self.tokens.size()
    }

    pub fn has_reserved(&self, card: &CardRef) -> bool {
        self.reserved.contains(card)
    }

    pub fn owns(&self, card: &CardRef) -> bool {
        self.owned.iter().any(|c| card.is(c))
    }

    pub fn can_reserve(&self, card: &CardRef) -> bool {
        self.reserved.len() < RESERVE_CAP && !self.has_reserved(card) && !self.owns(card)
    }

    /// Whether the held tokens, with gold filling gaps, cover what card gems
    /// do not.
    pub fn can_purchase(&self, card: &Card) -> bool {
        !self.owns(&CardRef::Face(*card))
            && card.cost().sub(&self.gems).dominated_by_tokens(&self.tokens)
    }

    /// Whether `payment` is an acceptable way to pay for `card`.
    ///
    /// The payment must be held, must not overpay any color, and its gold
    /// must lie between the least gold that still covers the remainder after
    /// card gems and the most gold the remainder could absorb.
    pub fn can_purchase_with(&self, card: &Card, payment: &TokenSet) -> bool {
        if !payment.dominated_by(&self.tokens) {
            return false;
        }
        let cost = card.cost();
        let mut min_gold = 0u32;
        let mut max_gold = 0u32;
        for c in Color::ALL {
            let Some(rem) = cost.get(c).checked_sub(payment.get(c.into())) else {
                return false;
            };
            min_gold += rem.saturating_sub(self.gems.get(c)) as u32;
            max_gold += rem as u32;
        }
        let gold = payment.get(TokenColor::Gold) as u32;
        min_gold <= gold && gold <= max_gold
    }

    /// The payment that spends colored tokens first and gold only for what
    /// is left after card gems. `None` if the card is unaffordable.
    pub fn canonical_payment(&self, card: &Card) -> Option<TokenSet> {
        if !self.can_purchase(card) {
            return None;
        }
        let mut payment = TokenSet::empty();
        let rem = card.cost().sub(&self.gems);
        for (c, need) in rem.iter() {
            let colored = need.min(self.tokens.get(c.into()));
            payment.give(c.into(), colored);
            payment.give(TokenColor::Gold, need - colored);
        }
        Some(payment)
    }

    /// Reserve `card`. Returns `false` if [`can_reserve`](Self::can_reserve)
    /// does not hold.
    pub fn reserve(&mut self, card: CardRef) -> bool {
        if !self.can_reserve(&card) {
            return false;
        }
        self.reserved.push(card);
        self.log.record(PlayerOp::Reserve(card));
        true
    }

    /// Buy `card` with `payment`, moving it out of the reserve if it was
    /// there. Returns `false` without changes if the payment is not accepted.
    pub fn purchase(&mut self, card: Card, payment: TokenSet) -> bool {
        if !self.can_purchase(&card) || !self.can_purchase_with(&card, &payment) {
            return false;
        }
        self.tokens.take_all(&payment);
        let key = CardRef::Face(card);
        let slot = self.reserved.iter().position(|r| *r == key);
        let reserved = slot.map(|slot| (slot, self.reserved.remove(slot)));
        self.owned.push(card);
        self.gems.give(card.color(), 1);
        self.points += card.points() as u32;
        self.log.record(PlayerOp::Purchase {
            card,
            reserved,
            payment,
        });
        true
    }

    pub fn visited_by(&mut self, noble: Noble) {
        self.nobles.push(noble);
        self.points += noble.points() as u32;
        self.log.record(PlayerOp::Visit(noble));
    }

    pub(crate) fn give_tokens(&mut self, tokens: &TokenSet) {
        self.tokens.give_all(tokens);
    }

    pub(crate) fn take_tokens(&mut self, tokens: &TokenSet) -> bool {
        self.tokens.take_all(tokens)
    }

    pub fn mark(&mut self) -> Marker {
        self.log.mark_with(self.tokens)
    }

    /// Roll back to `marker`. Returns `false` if it is no longer on the stack.
    pub fn undo(&mut self, marker: Marker) -> bool {
        let Some(mut unwind) = self.log.unwind(marker) else {
            return false;
        };
        for op in &mut unwind {
            match op {
                PlayerOp::Reserve(card) => {
                    if let Some(pos) = self.reserved.iter().rposition(|r| *r == card) {
                        self.reserved.remove(pos);
                    }
                }
                PlayerOp::Purchase {
                    card,
                    reserved,
                    payment,
                } => {
                    self.owned.pop();
                    self.gems.take(card.color(), 1);
                    self.points -= card.points() as u32;
                    self.tokens.give_all(&payment);
                    if let Some((slot, form)) = reserved {
                        self.reserved.insert(slot, form);
                    }
                }
                PlayerOp::Visit(noble) => {
                    self.nobles.pop();
                    self.points -= noble.points() as u32;
                }
            }
        }
        self.tokens = unwind.snapshot;
        true
    }

    /// Same holdings, no undo history.
    pub fn fork(&self) -> Self {
        Self {
            tokens: self.tokens,
            gems: self.gems,
            reserved: self.reserved.clone(),
            owned: self.owned.clone(),
            nobles: self.nobles.clone(),
            points: self.points,
            log: UndoLog::new(),
        }
    }
}
