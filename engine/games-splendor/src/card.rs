//! Development cards and their hidden projection.
//!
//! A [`Card`] is an immutable catalog entry. A [`HiddenCard`] is the face-down
//! view of the same entry: it reveals only the tier. Both compare and hash by
//! catalog identity, so a [`CardRef`] holding either form can stand in for the
//! other in sets and lookups.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::gems::{Color, GemSet};

/// Card strength. Each tier has its own draw pile and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Mid, Tier::High];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Low => "LOW",
            Tier::Mid => "MID",
            Tier::High => "HIGH",
        })
    }
}

/// Catalog identity of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u8);

/// An immutable development card.
#[derive(Debug, Clone, Copy)]
pub struct Card {
    id: CardId,
    points: u8,
    tier: Tier,
    color: Color,
    cost: GemSet,
}

impl Card {
    pub const fn new(id: CardId, tier: Tier, points: u8, color: Color, cost: GemSet) -> Self {
        Self {
            id,
            points,
            tier,
            color,
            cost,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn points(&self) -> u8 {
        self.points
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// The gem this card grants once owned.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn cost(&self) -> GemSet {
        self.cost
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} card worth {} costing {}",
            self.tier, self.color, self.points, self.cost
        )
    }
}

/// Face-down view of a card.
///
/// Only a [`CardDeck`](crate::deck::CardDeck) can mint one, and only the deck
/// that minted it will turn it back into the real card.
#[derive(Clone, Copy)]
pub struct HiddenCard {
    card: Card,
}

impl HiddenCard {
    pub(crate) fn new(card: Card) -> Self {
        Self { card }
    }

    pub fn tier(&self) -> Tier {
        self.card.tier
    }

    pub(crate) fn id(&self) -> CardId {
        self.card.id
    }

    pub(crate) fn reveal(&self) -> Card {
        self.card
    }
}

impl fmt::Debug for HiddenCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HiddenCard")
            .field("tier", &self.card.tier)
            .finish()
    }
}

impl PartialEq for HiddenCard {
    fn eq(&self, other: &Self) -> bool {
        self.card.id == other.card.id
    }
}

impl Eq for HiddenCard {}

impl Hash for HiddenCard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.card.id.hash(state);
    }
}

/// A card as a player or move refers to it: face up or face down.
#[derive(Debug, Clone, Copy)]
pub enum CardRef {
    Face(Card),
    Hidden(HiddenCard),
}

impl CardRef {
    pub(crate) fn id(&self) -> CardId {
        match self {
            CardRef::Face(c) => c.id,
            CardRef::Hidden(h) => h.id(),
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            CardRef::Face(c) => c.tier,
            CardRef::Hidden(h) => h.tier(),
        }
    }

    /// Points, or 0 when hidden.
    pub fn points(&self) -> u8 {
        match self {
            CardRef::Face(c) => c.points,
            CardRef::Hidden(_) => 0,
        }
    }

    /// Reward color, unknown when hidden.
    pub fn color(&self) -> Option<Color> {
        match self {
            CardRef::Face(c) => Some(c.color),
            CardRef::Hidden(_) => None,
        }
    }

    /// Cost, reported as zero when hidden.
    pub fn cost(&self) -> GemSet {
        match self {
            CardRef::Face(c) => c.cost,
            CardRef::Hidden(_) => GemSet::empty(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, CardRef::Hidden(_))
    }

    /// The face-up card, if this reference is face up.
    pub fn face(&self) -> Option<Card> {
        match self {
            CardRef::Face(c) => Some(*c),
            CardRef::Hidden(_) => None,
        }
    }

    /// Whether this refers to `card`, in either form.
    pub fn is(&self, card: &Card) -> bool {
        self.id() == card.id
    }
}

impl PartialEq for CardRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for CardRef {}

impl Hash for CardRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl From<Card> for CardRef {
    fn from(card: Card) -> Self {
        CardRef::Face(card)
    }
}

impl From<HiddenCard> for CardRef {
    fn from(card: HiddenCard) -> Self {
        CardRef::Hidden(card)
    }
}

impl fmt::Display for CardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardRef::Face(c) => fmt::Display::fmt(c, f),
            CardRef::Hidden(h) => write!(f, "hidden {} card", h.tier()),
        }
    }
}
