//! Replayable decisions for one turn inside the search simulator.
//!
//! A tree edge stores the move that leads to it plus the discard and noble
//! choices made on the first visit, so every later descent through the edge
//! replays exactly the same turn.

use games_splendor::{
    AgentAbort, DecisionProvider, DefaultAgent, GameView, Move, Noble, TokenSet,
};

/// The decisions one seat made during one turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Script {
    pub mv: Option<Move>,
    pub discard: Option<TokenSet>,
    pub noble: Option<Noble>,
}

impl Script {
    /// A turn that opens with `mv` and has not been played yet.
    pub fn play(mv: Move) -> Self {
        Self {
            mv: Some(mv),
            ..Self::default()
        }
    }
}

/// Agent seated in the search simulator.
///
/// Answers from the loaded script, and fills the blanks from the default
/// policy so the next replay makes the same choices.
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    script: Script,
    fallback: DefaultAgent,
}

impl ScriptedAgent {
    pub fn new(fallback: DefaultAgent) -> Self {
        Self {
            script: Script::default(),
            fallback,
        }
    }

    pub fn load(&mut self, script: Script) {
        self.script = script;
    }

    /// Take back the script, including any choices filled in while playing.
    pub fn unload(&mut self) -> Script {
        std::mem::take(&mut self.script)
    }
}

impl DecisionProvider for ScriptedAgent {
    fn choose_move(&mut self, view: &GameView<'_>) -> Result<Option<Move>, AgentAbort> {
        let mv = *self
            .script
            .mv
            .get_or_insert_with(|| DefaultAgent::pick_move(view));
        Ok(Some(mv))
    }

    fn discard(&mut self, view: &GameView<'_>, count: u32) -> Result<Option<TokenSet>, AgentAbort> {
        if self.script.discard.is_none() {
            self.script.discard = self.fallback.discard(view, count)?;
        }
        Ok(self.script.discard)
    }

    fn choose_noble(
        &mut self,
        view: &GameView<'_>,
        offered: &[Noble],
    ) -> Result<Option<Noble>, AgentAbort> {
        if self.script.noble.is_none() {
            self.script.noble = self.fallback.choose_noble(view, offered)?;
        }
        Ok(self.script.noble)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::rng;
    use games_splendor::{Color, ColorSet, GameState, TokenColor};

    #[test]
    fn test_loaded_move_is_replayed() {
        let mut rng = rng::seeded(1);
        let state = GameState::new(2, 15, &mut rng).unwrap();
        let view = GameView::new(&state, 0);
        let mut agent = ScriptedAgent::new(DefaultAgent::seeded(1));

        let mv = Move::TakeTwo(Color::Red);
        agent.load(Script::play(mv));
        assert_eq!(agent.choose_move(&view), Ok(Some(mv)));
        assert_eq!(agent.unload().mv, Some(mv));
    }

    #[test]
    fn test_blank_script_is_filled_from_default_policy() {
        let mut rng = rng::seeded(2);
        let state = GameState::new(2, 15, &mut rng).unwrap();
        let view = GameView::new(&state, 0);
        let mut agent = ScriptedAgent::new(DefaultAgent::seeded(2));

        let picked = agent.choose_move(&view).unwrap();
        assert_eq!(picked, Some(DefaultAgent::pick_move(&view)));
        let script = agent.unload();
        assert_eq!(script.mv, picked);
        assert_eq!(agent.unload(), Script::default());
    }

    #[test]
    fn test_cached_discard_is_reused() {
        let mut rng = rng::seeded(3);
        let state = GameState::new(2, 15, &mut rng).unwrap();
        let view = GameView::new(&state, 0);
        let mut agent = ScriptedAgent::new(DefaultAgent::seeded(3));

        let mut fixed = TokenSet::empty();
        fixed.give(TokenColor::Gem(Color::Blue), 1);
        agent.load(Script {
            mv: Some(Move::TakeThree(ColorSet::empty())),
            discard: Some(fixed),
            noble: None,
        });
        assert_eq!(agent.discard(&view, 1), Ok(Some(fixed)));
        assert_eq!(agent.discard(&view, 1), Ok(Some(fixed)));
    }
}
