//! The moves a player can make on their turn.

use std::fmt;

use crate::card::CardRef;
use crate::gems::{Color, ColorSet, TokenSet};

/// One turn's main action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Three tokens of distinct colors, or every remaining color if fewer
    /// than three are left.
    TakeThree(ColorSet),
    /// Two tokens of one color whose pool holds more than three.
    TakeTwo(Color),
    /// Reserve a displayed card or, face down, the top of a pile.
    Reserve(CardRef),
    /// Buy a displayed or reserved card with exactly this payment.
    Purchase { card: CardRef, payment: TokenSet },
}

impl Move {
    pub fn is_reserve(&self) -> bool {
        matches!(self, Move::Reserve(_))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::TakeThree(colors) => write!(f, "take three {colors}"),
            Move::TakeTwo(color) => write!(f, "take two {color}"),
            Move::Reserve(card) => write!(f, "reserve {card}"),
            Move::Purchase { card, payment } => write!(f, "purchase {card} paying {payment}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gems::Color;

    #[test]
    fn test_display_take_moves() {
        let colors: ColorSet = [Color::Red, Color::Blue, Color::Brown].into_iter().collect();
        assert_eq!(Move::TakeThree(colors).to_string(), "take three [BROWN RED BLUE]");
        assert_eq!(Move::TakeTwo(Color::Green).to_string(), "take two GREEN");
    }
}
