//! Gem colors and the fixed-cardinality counters built on them.
//!
//! - [`Color`]: the five gem colors that appear on cards and nobles
//! - [`TokenColor`]: the gem colors plus the gold wildcard
//! - [`GemSet`] / [`TokenSet`]: per-color counts with give/take/dominance
//! - [`ColorSet`]: a small bitset of gem colors, used by take-three moves

use std::fmt;

/// A gem color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Brown,
    Red,
    Green,
    Blue,
    White,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::Brown,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::White,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Brown => "BROWN",
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
            Color::White => "WHITE",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token color: any gem color, or gold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenColor {
    Gem(Color),
    Gold,
}

impl TokenColor {
    pub const ALL: [TokenColor; 6] = [
        TokenColor::Gem(Color::Brown),
        TokenColor::Gem(Color::Red),
        TokenColor::Gem(Color::Green),
        TokenColor::Gem(Color::Blue),
        TokenColor::Gem(Color::White),
        TokenColor::Gold,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            TokenColor::Gem(c) => c.index(),
            TokenColor::Gold => 5,
        }
    }

    pub fn gem(self) -> Option<Color> {
        match self {
            TokenColor::Gem(c) => Some(c),
            TokenColor::Gold => None,
        }
    }
}

impl From<Color> for TokenColor {
    fn from(c: Color) -> Self {
        TokenColor::Gem(c)
    }
}

impl fmt::Display for TokenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenColor::Gem(c) => fmt::Display::fmt(c, f),
            TokenColor::Gold => f.write_str("GOLD"),
        }
    }
}

/// Count per gem color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GemSet([u8; 5]);

impl GemSet {
    pub const fn new(counts: [u8; 5]) -> Self {
        GemSet(counts)
    }

    pub const fn empty() -> Self {
        GemSet([0; 5])
    }

    #[inline]
    pub fn get(&self, color: Color) -> u8 {
        self.0[color.index()]
    }

    #[inline]
    pub fn put(&mut self, color: Color, amount: u8) {
        self.0[color.index()] = amount;
    }

    #[inline]
    pub fn give(&mut self, color: Color, amount: u8) {
        self.0[color.index()] += amount;
    }

    /// Remove `amount` of `color`. Returns `false` and leaves the set
    /// untouched if that would go negative.
    pub fn take(&mut self, color: Color, amount: u8) -> bool {
        let slot = &mut self.0[color.index()];
        match slot.checked_sub(amount) {
            Some(rest) => {
                *slot = rest;
                true
            }
            None => false,
        }
    }

    /// Entrywise sum.
    pub fn add(&self, other: &GemSet) -> GemSet {
        let mut out = *self;
        for c in Color::ALL {
            out.0[c.index()] += other.get(c);
        }
        out
    }

    /// Entrywise difference, clamped at zero.
    pub fn sub(&self, other: &GemSet) -> GemSet {
        let mut out = *self;
        for c in Color::ALL {
            out.0[c.index()] = self.get(c).saturating_sub(other.get(c));
        }
        out
    }

    /// Total number of gems.
    pub fn size(&self) -> u32 {
        self.0.iter().map(|&n| n as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Entrywise `self <= other`.
    pub fn dominated_by(&self, other: &GemSet) -> bool {
        Color::ALL.iter().all(|&c| self.get(c) <= other.get(c))
    }

    /// Whether `tokens` can cover these gems, letting gold make up any
    /// per-color shortfall.
    pub fn dominated_by_tokens(&self, tokens: &TokenSet) -> bool {
        let shortfall: u32 = Color::ALL
            .iter()
            .map(|&c| self.get(c).saturating_sub(tokens.get(c.into())) as u32)
            .sum();
        tokens.get(TokenColor::Gold) as u32 >= shortfall
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, u8)> + '_ {
        Color::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

impl fmt::Display for GemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut first = true;
        for (c, n) in self.iter().filter(|&(_, n)| n > 0) {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{n} {c}")?;
            first = false;
        }
        write!(f, "]")
    }
}

/// Count per token color, gold included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TokenSet([u8; 6]);

impl TokenSet {
    /// Colored counts in [`Color::ALL`] order followed by gold.
    pub const fn new(counts: [u8; 6]) -> Self {
        TokenSet(counts)
    }

    pub const fn empty() -> Self {
        TokenSet([0; 6])
    }

    /// Tokens matching `gems`, with no gold.
    pub fn from_gems(gems: &GemSet) -> Self {
        let mut out = TokenSet::empty();
        for (c, n) in gems.iter() {
            out.put(c.into(), n);
        }
        out
    }

    #[inline]
    pub fn get(&self, color: TokenColor) -> u8 {
        self.0[color.index()]
    }

    #[inline]
    pub fn put(&mut self, color: TokenColor, amount: u8) {
        self.0[color.index()] = amount;
    }

    #[inline]
    pub fn give(&mut self, color: TokenColor, amount: u8) {
        self.0[color.index()] += amount;
    }

    /// Remove `amount` of `color`. Returns `false` and leaves the set
    /// untouched if that would go negative.
    pub fn take(&mut self, color: TokenColor, amount: u8) -> bool {
        let slot = &mut self.0[color.index()];
        match slot.checked_sub(amount) {
            Some(rest) => {
                *slot = rest;
                true
            }
            None => false,
        }
    }

    pub fn give_all(&mut self, other: &TokenSet) {
        for c in TokenColor::ALL {
            self.give(c, other.get(c));
        }
    }

    /// Remove every token in `other`, or nothing at all if any color would
    /// go negative.
    pub fn take_all(&mut self, other: &TokenSet) -> bool {
        if !other.dominated_by(self) {
            return false;
        }
        for c in TokenColor::ALL {
            self.0[c.index()] -= other.get(c);
        }
        true
    }

    /// Entrywise sum.
    pub fn add(&self, other: &TokenSet) -> TokenSet {
        let mut out = *self;
        out.give_all(other);
        out
    }

    /// Entrywise difference, clamped at zero.
    pub fn sub(&self, other: &TokenSet) -> TokenSet {
        let mut out = *self;
        for c in TokenColor::ALL {
            out.0[c.index()] = self.get(c).saturating_sub(other.get(c));
        }
        out
    }

    /// Total number of tokens.
    pub fn size(&self) -> u32 {
        self.0.iter().map(|&n| n as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Entrywise `self <= other`.
    pub fn dominated_by(&self, other: &TokenSet) -> bool {
        TokenColor::ALL.iter().all(|&c| self.get(c) <= other.get(c))
    }

    /// The colored part, without gold.
    pub fn gems(&self) -> GemSet {
        let mut out = GemSet::empty();
        for c in Color::ALL {
            out.put(c, self.get(c.into()));
        }
        out
    }

    /// Gem colors with at least one token.
    pub fn available_colors(&self) -> ColorSet {
        Color::ALL
            .iter()
            .copied()
            .filter(|&c| self.get(c.into()) > 0)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenColor, u8)> + '_ {
        TokenColor::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut first = true;
        for (c, n) in self.iter().filter(|&(_, n)| n > 0) {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{n} {c}")?;
            first = false;
        }
        write!(f, "]")
    }
}

/// A set of gem colors, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorSet(u8);

impl ColorSet {
    pub const fn empty() -> Self {
        ColorSet(0)
    }

    pub fn contains(self, color: Color) -> bool {
        self.0 & (1 << color.index()) != 0
    }

    pub fn insert(&mut self, color: Color) {
        self.0 |= 1 << color.index();
    }

    pub fn with(mut self, color: Color) -> Self {
        self.insert(color);
        self
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in [`Color::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = ColorSet::empty();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}
