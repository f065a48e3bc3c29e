//! The contract between the controller and whoever makes the decisions.

use crate::error::{AgentAbort, RuleViolation};
use crate::gems::TokenSet;
use crate::moves::Move;
use crate::noble::Noble;
use crate::view::GameView;

/// Makes every decision for one seat.
///
/// The controller calls the plain methods first and the `*_after_rejection`
/// methods with the reason each time a choice is refused. Returning `None`
/// is allowed and is treated as an illegal choice. The default rejection
/// handlers give up, which ends the game with an error.
pub trait DecisionProvider {
    fn choose_move(&mut self, view: &GameView<'_>) -> Result<Option<Move>, AgentAbort>;

    fn choose_move_after_rejection(
        &mut self,
        _view: &GameView<'_>,
        reason: &RuleViolation,
    ) -> Result<Option<Move>, AgentAbort> {
        Err(AgentAbort::rejected(reason))
    }

    /// Pick exactly `count` held tokens to give back.
    fn discard(&mut self, view: &GameView<'_>, count: u32) -> Result<Option<TokenSet>, AgentAbort>;

    fn discard_after_rejection(
        &mut self,
        _view: &GameView<'_>,
        _count: u32,
        reason: &RuleViolation,
    ) -> Result<Option<TokenSet>, AgentAbort> {
        Err(AgentAbort::rejected(reason))
    }

    /// Pick one of several nobles willing to visit.
    fn choose_noble(
        &mut self,
        view: &GameView<'_>,
        offered: &[Noble],
    ) -> Result<Option<Noble>, AgentAbort>;

    fn choose_noble_after_rejection(
        &mut self,
        _view: &GameView<'_>,
        _offered: &[Noble],
        reason: &RuleViolation,
    ) -> Result<Option<Noble>, AgentAbort> {
        Err(AgentAbort::rejected(reason))
    }

    fn notify_noble_visit(&mut self, _view: &GameView<'_>, _noble: &Noble) {}
}

impl<D: DecisionProvider + ?Sized> DecisionProvider for Box<D> {
    fn choose_move(&mut self, view: &GameView<'_>) -> Result<Option<Move>, AgentAbort> {
        (**self).choose_move(view)
    }

    fn choose_move_after_rejection(
        &mut self,
        view: &GameView<'_>,
        reason: &RuleViolation,
    ) -> Result<Option<Move>, AgentAbort> {
        (**self).choose_move_after_rejection(view, reason)
    }

    fn discard(&mut self, view: &GameView<'_>, count: u32) -> Result<Option<TokenSet>, AgentAbort> {
        (**self).discard(view, count)
    }

    fn discard_after_rejection(
        &mut self,
        view: &GameView<'_>,
        count: u32,
        reason: &RuleViolation,
    ) -> Result<Option<TokenSet>, AgentAbort> {
        (**self).discard_after_rejection(view, count, reason)
    }

    fn choose_noble(
        &mut self,
        view: &GameView<'_>,
        offered: &[Noble],
    ) -> Result<Option<Noble>, AgentAbort> {
        (**self).choose_noble(view, offered)
    }

    fn choose_noble_after_rejection(
        &mut self,
        view: &GameView<'_>,
        offered: &[Noble],
        reason: &RuleViolation,
    ) -> Result<Option<Noble>, AgentAbort> {
        (**self).choose_noble_after_rejection(view, offered, reason)
    }

    fn notify_noble_visit(&mut self, view: &GameView<'_>, noble: &Noble) {
        (**self).notify_noble_visit(view, noble)
    }
}
