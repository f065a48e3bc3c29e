//! A fixed-priority heuristic player.
//!
//! Buys the best card it can afford, else collects tokens, else reserves.
//! It never searches and never makes an illegal choice, which makes it the
//! opponent model for rollouts.

use engine_core::{rng, GameRng};
use rand::Rng;

use crate::agent::DecisionProvider;
use crate::card::{CardRef, Tier};
use crate::error::AgentAbort;
use crate::gems::{Color, TokenColor, TokenSet};
use crate::moves::Move;
use crate::noble::Noble;
use crate::view::GameView;

const TIERS_DESCENDING: [Tier; 3] = [Tier::High, Tier::Mid, Tier::Low];

#[derive(Debug, Clone)]
pub struct DefaultAgent {
    rng: GameRng,
}

impl DefaultAgent {
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(rng::seeded(seed))
    }

    /// The move this agent plays from `view`.
    pub fn pick_move(view: &GameView<'_>) -> Move {
        let me = view.me();

        for tier in TIERS_DESCENDING {
            for card in view.deck(tier).display() {
                if let Some(payment) = me.canonical_payment(card) {
                    return Move::Purchase {
                        card: CardRef::Face(*card),
                        payment,
                    };
                }
            }
        }
        for reserved in me.reserved() {
            let Some(card) = view.unhide(reserved).face() else {
                continue;
            };
            if let Some(payment) = me.canonical_payment(&card) {
                return Move::Purchase {
                    card: CardRef::Face(card),
                    payment,
                };
            }
        }

        let left = view.pool().available_colors();
        if left.len() >= 3 {
            return Move::TakeThree(left.iter().take(3).collect());
        }
        let two = Color::ALL
            .iter()
            .rev()
            .find(|&&c| view.pool().get(c.into()) > 3);
        if let Some(&color) = two {
            return Move::TakeTwo(color);
        }

        for tier in TIERS_DESCENDING {
            let deck = view.deck(tier);
            for card in deck.display() {
                let card = CardRef::Face(*card);
                if me.can_reserve(&card) {
                    return Move::Reserve(card);
                }
            }
            if let Some(top) = deck.peek() {
                let card = CardRef::Hidden(top);
                if me.can_reserve(&card) {
                    return Move::Reserve(card);
                }
            }
        }

        Move::TakeThree(left)
    }

    /// `count` tokens drawn at random from what the player holds.
    fn random_discard(&mut self, held: &TokenSet, count: u32) -> TokenSet {
        let mut out = TokenSet::empty();
        if held.size() < count {
            return *held;
        }
        while out.size() < count {
            let c = TokenColor::ALL[self.rng.gen_range(0..TokenColor::ALL.len())];
            if out.get(c) < held.get(c) {
                out.give(c, 1);
            }
        }
        out
    }
}

impl DecisionProvider for DefaultAgent {
    fn choose_move(&mut self, view: &GameView<'_>) -> Result<Option<Move>, AgentAbort> {
        Ok(Some(Self::pick_move(view)))
    }

    fn discard(&mut self, view: &GameView<'_>, count: u32) -> Result<Option<TokenSet>, AgentAbort> {
        Ok(Some(self.random_discard(view.me().tokens(), count)))
    }

    fn choose_noble(
        &mut self,
        _view: &GameView<'_>,
        offered: &[Noble],
    ) -> Result<Option<Noble>, AgentAbort> {
        Ok(most_points(offered))
    }
}

/// First noble with the highest points.
pub fn most_points(offered: &[Noble]) -> Option<Noble> {
    offered.iter().copied().fold(None, |best: Option<Noble>, n| match best {
        Some(b) if b.points() >= n.points() => Some(b),
        _ => Some(n),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gems::ColorSet;
    use crate::state::GameState;

    #[test]
    fn test_opening_move_takes_first_three_colors() {
        let mut rng = rng::seeded(1);
        let state = GameState::new(2, 15, &mut rng).unwrap();
        let view = GameView::new(&state, 0);
        let expected: ColorSet = [Color::Brown, Color::Red, Color::Green].into_iter().collect();
        assert_eq!(DefaultAgent::pick_move(&view), Move::TakeThree(expected));
    }

    #[test]
    fn test_takes_two_when_fewer_than_three_colors() {
        let mut rng = rng::seeded(2);
        let mut state = GameState::new(2, 15, &mut rng).unwrap();
        state.pool = TokenSet::new([0, 0, 0, 4, 1, 5]);
        let view = GameView::new(&state, 0);
        assert_eq!(DefaultAgent::pick_move(&view), Move::TakeTwo(Color::Blue));
    }

    #[test]
    fn test_discard_is_exact_and_held() {
        let mut agent = DefaultAgent::seeded(3);
        let held = TokenSet::new([3, 0, 4, 2, 1, 2]);
        for _ in 0..20 {
            let out = agent.random_discard(&held, 2);
            assert_eq!(out.size(), 2);
            assert!(out.dominated_by(&held));
        }
    }

    #[test]
    fn test_gives_up_after_rejection() {
        let mut rng = rng::seeded(4);
        let state = GameState::new(2, 15, &mut rng).unwrap();
        let view = GameView::new(&state, 0);
        let mut agent = DefaultAgent::seeded(4);
        let reason = crate::error::RuleViolation::NoMove;
        assert!(agent.choose_move_after_rejection(&view, &reason).is_err());
        assert!(agent.discard_after_rejection(&view, 1, &reason).is_err());
    }

    #[test]
    fn test_most_points_prefers_first_on_ties() {
        let nobles = crate::catalog::nobles();
        assert_eq!(most_points(&nobles[2..5]), Some(nobles[2]));
        assert_eq!(most_points(&[]), None);
    }
}
