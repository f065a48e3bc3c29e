//! Validation and application of moves, discards and noble visits.
//!
//! Every function checks its input against the current state first and
//! leaves the state untouched when it returns a [`RuleViolation`].

use tracing::trace;

use crate::card::{CardRef, HiddenCard};
use crate::error::RuleViolation;
use crate::gems::{Color, ColorSet, TokenColor, TokenSet};
use crate::moves::Move;
use crate::noble::Noble;
use crate::state::{GameState, MAX_TOKENS};

/// Validate and apply `mv` for `seat`.
pub fn apply_move(state: &mut GameState, seat: usize, mv: Option<Move>) -> Result<(), RuleViolation> {
    match mv {
        None => Err(RuleViolation::NoMove),
        Some(Move::TakeThree(colors)) => take_three(state, seat, colors),
        Some(Move::TakeTwo(color)) => take_two(state, seat, color),
        Some(Move::Reserve(card)) => reserve(state, seat, card),
        Some(Move::Purchase { card, payment }) => purchase(state, seat, card, payment),
    }
}

pub fn take_three(state: &mut GameState, seat: usize, colors: ColorSet) -> Result<(), RuleViolation> {
    let available = state.pool.available_colors();
    if available.len() < 3 {
        if colors != available {
            return Err(RuleViolation::MustTakeAllRemaining);
        }
    } else if colors.len() != 3 {
        return Err(RuleViolation::MustTakeThree);
    }
    if let Some(missing) = colors.iter().find(|&c| !available.contains(c)) {
        return Err(RuleViolation::ColorExhausted(missing));
    }

    let mut taken = TokenSet::empty();
    for c in colors.iter() {
        taken.give(c.into(), 1);
    }
    state.pool.take_all(&taken);
    state.players[seat].give_tokens(&taken);
    trace!(seat, %colors, "took three");
    Ok(())
}

pub fn take_two(state: &mut GameState, seat: usize, color: Color) -> Result<(), RuleViolation> {
    if state.pool.get(color.into()) < 4 {
        return Err(RuleViolation::NotEnoughForTwo);
    }
    let mut taken = TokenSet::empty();
    taken.give(color.into(), 2);
    state.pool.take_all(&taken);
    state.players[seat].give_tokens(&taken);
    trace!(seat, %color, "took two");
    Ok(())
}

/// Reserve a displayed card or the pile top, then hand out one gold if the
/// pool has any. A card drawn from the pile stays hidden to everyone else.
pub fn reserve(state: &mut GameState, seat: usize, card: CardRef) -> Result<(), RuleViolation> {
    if !state.players[seat].can_reserve(&card) {
        return Err(RuleViolation::CannotReserve);
    }
    let deck = &mut state.decks[card.tier().index()];
    let reserved = if deck.on_deck(&card) {
        let drawn = deck.draw().ok_or(RuleViolation::CardUnavailable)?;
        CardRef::Hidden(HiddenCard::new(drawn))
    } else if deck.in_display(&card) {
        let taken = deck.take(&card).ok_or(RuleViolation::CardUnavailable)?;
        CardRef::Face(taken)
    } else {
        return Err(RuleViolation::CardUnavailable);
    };

    let player = &mut state.players[seat];
    player.reserve(reserved);
    if state.pool.take(TokenColor::Gold, 1) {
        let mut gold = TokenSet::empty();
        gold.give(TokenColor::Gold, 1);
        player.give_tokens(&gold);
    }
    trace!(seat, card = %reserved, "reserved");
    Ok(())
}

/// Buy a displayed card or one of the player's reservations with exactly
/// `payment`, which goes back to the pool.
pub fn purchase(
    state: &mut GameState,
    seat: usize,
    card: CardRef,
    payment: TokenSet,
) -> Result<(), RuleViolation> {
    let from_reserve = state.players[seat].has_reserved(&card);
    if !from_reserve {
        if card.is_hidden() {
            return Err(RuleViolation::MustReserveHidden);
        }
        if !state.decks[card.tier().index()].in_display(&card) {
            return Err(RuleViolation::CardUnavailable);
        }
    }
    let real = state.unhide(&card).ok_or(RuleViolation::CardUnavailable)?;
    let player = &state.players[seat];
    if !player.can_purchase(&real) {
        return Err(RuleViolation::CannotPurchase);
    }
    if !player.can_purchase_with(&real, &payment) {
        return Err(RuleViolation::BadPayment);
    }

    if !from_reserve {
        state.decks[card.tier().index()].take(&card);
    }
    state.players[seat].purchase(real, payment);
    state.pool.give_all(&payment);
    trace!(seat, card = %real, %payment, "purchased");
    Ok(())
}

/// Tokens `seat` holds beyond the limit.
pub fn excess_tokens(state: &GameState, seat: usize) -> u32 {
    state.players[seat].token_count().saturating_sub(MAX_TOKENS)
}

/// Return exactly the excess tokens to the pool.
pub fn discard(state: &mut GameState, seat: usize, tokens: Option<TokenSet>) -> Result<(), RuleViolation> {
    let expected = excess_tokens(state, seat);
    let tokens = tokens.unwrap_or_else(TokenSet::empty);
    if tokens.size() != expected {
        return Err(RuleViolation::WrongDiscardCount {
            expected,
            actual: tokens.size(),
        });
    }
    if !state.players[seat].take_tokens(&tokens) {
        return Err(RuleViolation::DiscardNotHeld);
    }
    state.pool.give_all(&tokens);
    trace!(seat, %tokens, "discarded");
    Ok(())
}

/// Nobles the player at `seat` currently satisfies.
pub fn satisfied_nobles(state: &GameState, seat: usize) -> Vec<Noble> {
    state.nobles.satisfied(state.players[seat].gems())
}

/// Move `noble` from the pool to the player if it is among `offered`.
pub fn noble_visit(
    state: &mut GameState,
    seat: usize,
    offered: &[Noble],
    noble: Option<Noble>,
) -> Result<(), RuleViolation> {
    let noble = noble.ok_or(RuleViolation::NoNoble)?;
    if !offered.contains(&noble) || !state.nobles.take(&noble) {
        return Err(RuleViolation::NobleNotOffered);
    }
    state.players[seat].visited_by(noble);
    trace!(seat, %noble, "noble visit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Tier};
    use crate::catalog;
    use engine_core::rng;
    use rand::Rng;

    fn two_player_game(seed: u64) -> GameState {
        let mut rng = rng::seeded(seed);
        GameState::new(2, 15, &mut rng).unwrap()
    }

    fn colors(cs: &[Color]) -> ColorSet {
        cs.iter().copied().collect()
    }

    #[test]
    fn test_take_two_needs_four_in_pool() {
        let mut state = two_player_game(1);
        state.pool.put(Color::Brown.into(), 0);
        assert_eq!(
            take_two(&mut state, 0, Color::Brown),
            Err(RuleViolation::NotEnoughForTwo)
        );

        let red_before = state.pool.get(Color::Red.into());
        assert!(red_before > 3);
        take_two(&mut state, 0, Color::Red).unwrap();
        assert_eq!(state.pool.get(Color::Red.into()), red_before - 2);
        assert_eq!(state.players[0].tokens().get(Color::Red.into()), 2);
    }

    #[test]
    fn test_take_three_with_few_colors_left() {
        let mut state = two_player_game(2);
        state.pool = TokenSet::new([0, 1, 0, 2, 0, 5]);
        assert_eq!(
            take_three(&mut state, 0, colors(&[Color::Red])),
            Err(RuleViolation::MustTakeAllRemaining)
        );
        take_three(&mut state, 0, colors(&[Color::Red, Color::Blue])).unwrap();
        assert_eq!(state.pool, TokenSet::new([0, 0, 0, 1, 0, 5]));
    }

    #[test]
    fn test_take_three_rejects_wrong_sizes_and_empty_colors() {
        let mut state = two_player_game(3);
        assert_eq!(
            take_three(&mut state, 0, colors(&[Color::Red, Color::Blue])),
            Err(RuleViolation::MustTakeThree)
        );
        state.pool.put(Color::Green.into(), 0);
        assert_eq!(
            take_three(&mut state, 0, colors(&[Color::Red, Color::Blue, Color::Green])),
            Err(RuleViolation::ColorExhausted(Color::Green))
        );
    }

    #[test]
    fn test_reserve_pile_top_gives_gold_and_stays_hidden() {
        let mut state = two_player_game(4);
        let top = state.decks[Tier::Mid.index()].peek().unwrap();
        reserve(&mut state, 1, CardRef::Hidden(top)).unwrap();

        assert_eq!(state.players[1].tokens().get(TokenColor::Gold), 1);
        assert_eq!(state.pool.get(TokenColor::Gold), 4);
        let held = state.players[1].reserved()[0];
        assert!(held.is_hidden());
        assert!(!state.unhide_for(1, &held).is_hidden());
        assert!(state.unhide_for(0, &held).is_hidden());
    }

    #[test]
    fn test_reserve_without_gold_left() {
        let mut state = two_player_game(5);
        state.pool.put(TokenColor::Gold, 0);
        let card = CardRef::Face(state.decks[0].display()[0]);
        reserve(&mut state, 0, card).unwrap();
        assert_eq!(state.players[0].tokens().size(), 0);
        assert!(!state.decks[0].in_display(&card));
    }

    #[test]
    fn test_purchase_hidden_requires_reservation() {
        let mut state = two_player_game(6);
        let top = CardRef::Hidden(state.decks[0].peek().unwrap());
        assert_eq!(
            purchase(&mut state, 0, top, TokenSet::empty()),
            Err(RuleViolation::MustReserveHidden)
        );
    }

    #[test]
    fn test_purchase_returns_payment_to_pool() {
        let mut state = two_player_game(7);
        let card = state.decks[0].display()[0];
        let grant = TokenSet::from_gems(&card.cost());
        state.pool.take_all(&grant);
        state.players[0].give_tokens(&grant);
        let pool_before = state.pool;

        let bad = TokenSet::new([0, 0, 0, 0, 0, 0]);
        assert_eq!(
            purchase(&mut state, 0, CardRef::Face(card), bad),
            Err(RuleViolation::BadPayment)
        );
        purchase(&mut state, 0, CardRef::Face(card), grant).unwrap();
        assert_eq!(state.pool, pool_before.add(&grant));
        assert!(state.players[0].tokens().is_empty());
        assert_eq!(state.players[0].owned(), &[card]);
    }

    /// Every token set `held` could hand over, gold included.
    fn payments_within(held: &TokenSet) -> Vec<TokenSet> {
        let mut out = vec![TokenSet::empty()];
        for (color, n) in held.iter() {
            out = out
                .into_iter()
                .flat_map(|base| {
                    (0..=n).map(move |k| {
                        let mut p = base;
                        p.put(color, k);
                        p
                    })
                })
                .collect();
        }
        out
    }

    #[test]
    fn test_every_accepted_payment_settles_cleanly() {
        let mut rng = rng::seeded(0x5eed);
        let mut accepted = 0usize;
        for trial in 0..120u64 {
            let mut state = two_player_game(1000 + trial);
            let tier = Tier::ALL[rng.gen_range(0..3)];
            let display = state.deck(tier).display();
            let target = display[rng.gen_range(0..display.len())];

            let extra = rng.gen_range(0..6);
            let bonus: Vec<Card> = catalog::cards()
                .iter()
                .copied()
                .filter(|c| c.id() != target.id() && rng.gen_bool(0.06))
                .take(extra)
                .collect();
            let held = TokenSet::new(std::array::from_fn(|_| rng.gen_range(0..=3)));
            {
                let player = &mut state.players[0];
                for card in bonus {
                    player.give_tokens(&TokenSet::from_gems(&card.cost()));
                    let payment = player.canonical_payment(&card).unwrap();
                    assert!(player.purchase(card, payment));
                }
                let leftover = *player.tokens();
                player.take_tokens(&leftover);
                player.give_tokens(&held);
            }

            let gems = *state.players[0].gems();
            let pool = state.pool;
            let mut found = 0usize;
            for payment in payments_within(&held) {
                if !state.players[0].can_purchase_with(&target, &payment) {
                    continue;
                }
                found += 1;

                let mut min_gold = 0u32;
                let mut max_gold = 0u32;
                for c in Color::ALL {
                    let cost = target.cost().get(c);
                    let paid = payment.get(c.into());
                    assert!(paid <= cost, "{payment} overpays {c:?} for {target}");
                    min_gold += (cost - paid).saturating_sub(gems.get(c)) as u32;
                    max_gold += (cost - paid) as u32;
                }
                let gold = payment.get(TokenColor::Gold) as u32;
                assert!(
                    (min_gold..=max_gold).contains(&gold),
                    "{payment} spends {gold} gold outside {min_gold}..={max_gold}"
                );

                let mut after = state.clone();
                purchase(&mut after, 0, CardRef::Face(target), payment).unwrap();
                assert!(payment.dominated_by(&held));
                assert_eq!(*after.players[0].tokens(), held.sub(&payment));
                assert_eq!(after.pool, pool.add(&payment));
                assert!(after.players[0].owns(&CardRef::Face(target)));
            }
            if state.players[0].can_purchase(&target) {
                assert!(found > 0, "no payment accepted for affordable {target}");
            }
            accepted += found;
        }
        assert!(accepted > 0);
    }

    #[test]
    fn test_discard_requires_exact_excess() {
        let mut state = two_player_game(8);
        state.players[0].give_tokens(&TokenSet::new([3, 3, 3, 3, 0, 0]));
        state.pool = state.pool.sub(&TokenSet::new([3, 3, 3, 3, 0, 0]));
        assert_eq!(excess_tokens(&state, 0), 2);
        assert_eq!(
            discard(&mut state, 0, None),
            Err(RuleViolation::WrongDiscardCount {
                expected: 2,
                actual: 0
            })
        );
        assert_eq!(
            discard(&mut state, 0, Some(TokenSet::new([0, 0, 0, 0, 2, 0]))),
            Err(RuleViolation::DiscardNotHeld)
        );
        discard(&mut state, 0, Some(TokenSet::new([1, 1, 0, 0, 0, 0]))).unwrap();
        assert_eq!(excess_tokens(&state, 0), 0);
    }

    #[test]
    fn test_noble_visit_must_be_offered() {
        let mut state = two_player_game(9);
        let offered = state.nobles.nobles()[..1].to_vec();
        let other = state.nobles.nobles()[1];
        assert_eq!(
            noble_visit(&mut state, 0, &offered, None),
            Err(RuleViolation::NoNoble)
        );
        assert_eq!(
            noble_visit(&mut state, 0, &offered, Some(other)),
            Err(RuleViolation::NobleNotOffered)
        );
        noble_visit(&mut state, 0, &offered, Some(offered[0])).unwrap();
        assert_eq!(state.players[0].points(), 3);
        assert!(!state.nobles.contains(&offered[0]));
    }
}
