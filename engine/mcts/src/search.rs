//! MCTS search over the transactional simulator.
//!
//! Each decision forks the live state once (reshuffling the hidden piles) and
//! then explores it in place:
//! 1. Selection: replay tree edges with the selection policy until a leaf
//! 2. Expansion: add one child per legal move of the player to act
//! 3. Rollout: for each new child, play its turn, finish the game on a
//!    throwaway copy with default agents, and record the result
//! 4. Backpropagation: credit wins and sims from the child up to the root
//!
//! Every step is rolled back with `mark`/`undo`, so the simulator returns to
//! the root position at the end of each iteration.

use std::time::{Duration, Instant};

use engine_core::{rng, GameRng};
use games_splendor::{
    AgentAbort, CardRef, DecisionProvider, DefaultAgent, EngineError, GameView, Move, Noble,
    SetupError, Simulator, TokenSet,
};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::policy::{legal_moves, TakeCache};
use crate::script::{Script, ScriptedAgent};
use crate::tree::Tree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("simulation failed: {0}")]
    Engine(#[from] EngineError),

    #[error("could not set up simulation: {0}")]
    Setup(#[from] SetupError),

    #[error("simulator marker was no longer on the stack")]
    MarkerNotFound,
}

/// Per-edge statistics. `seat` is the player whose turn the edge plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchNode {
    pub seat: usize,
    pub script: Script,
    pub wins: u32,
    pub sims: u32,
}

impl SearchNode {
    pub fn new(seat: usize, mv: Move) -> Self {
        Self {
            seat,
            script: Script::play(mv),
            wins: 0,
            sims: 0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.sims == 0 {
            0.0
        } else {
            self.wins as f64 / self.sims as f64
        }
    }
}

/// Statistics from one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub iterations: u32,
    pub rollouts: u32,
    pub tree_nodes: usize,
    pub max_depth: u32,
    pub elapsed: Duration,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best root move, valid on the live state. `None` if the root was never
    /// expanded.
    pub best: Option<Move>,

    pub tree: Tree<SearchNode>,

    pub stats: SearchStats,
}

/// Agent that chooses moves by Monte Carlo Tree Search.
///
/// Discards and noble choices are left to the default policy.
#[derive(Debug, Clone)]
pub struct MctsAgent {
    config: MctsConfig,
    rng: GameRng,
    takes: TakeCache,
    fallback: DefaultAgent,
}

impl MctsAgent {
    pub fn new(config: MctsConfig, mut rng: GameRng) -> Self {
        let fallback = DefaultAgent::seeded(rng.gen());
        Self {
            config,
            rng,
            takes: TakeCache::new(),
            fallback,
        }
    }

    pub fn seeded(config: MctsConfig, seed: u64) -> Self {
        Self::new(config, rng::seeded(seed))
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Search from the position seen by `view`, whose seat must be the one
    /// to move.
    pub fn search(&mut self, view: &GameView<'_>) -> Result<SearchOutcome, SearchError> {
        let start = Instant::now();
        let selection = self.config.variant.selection();
        let expansion = self.config.variant.expansion();

        let state = view.fork_state(&mut self.rng);
        let agents: Vec<ScriptedAgent> = (0..state.num_players())
            .map(|_| ScriptedAgent::new(DefaultAgent::seeded(self.rng.gen())))
            .collect();
        let mut sim = Simulator::from_state(state, agents)?;

        let mut tree = Tree::new(SearchNode {
            seat: view.seat(),
            ..SearchNode::default()
        });
        let root = tree.root();
        let mut stats = SearchStats::default();

        loop {
            let root_mark = sim.mark();

            let mut node = root;
            while let Some(child) = selection.select(&tree, node, &mut self.rng) {
                let script = advance(&mut sim, tree.data(child).script)?;
                tree.data_mut(child).script = script;
                node = child;
            }

            if sim.is_over() {
                let winners = sim.winners().unwrap_or_default();
                backpropagate(&mut tree, node, &winners);
            } else {
                let seat = sim.state().current();
                let moves = expansion.apply(legal_moves(&sim.view(seat), &mut self.takes));
                for mv in moves {
                    let child = tree.add_child(node, SearchNode::new(seat, mv));
                    let mark = sim.mark();
                    let script = advance(&mut sim, Script::play(mv))?;
                    tree.data_mut(child).script = script;

                    let winners = self.rollout(&sim)?;
                    stats.rollouts += 1;
                    backpropagate(&mut tree, child, &winners);

                    if !sim.undo(mark) {
                        return Err(SearchError::MarkerNotFound);
                    }
                }
            }

            if !sim.undo(root_mark) {
                return Err(SearchError::MarkerNotFound);
            }
            stats.iterations += 1;

            let capped = self
                .config
                .max_iterations
                .is_some_and(|max| stats.iterations >= max);
            if capped || start.elapsed() >= self.config.time_budget {
                break;
            }
        }

        let best = best_child(&tree).and_then(|id| rebind(tree.data(id).script.mv?, view));

        let tree_stats = tree.stats();
        stats.tree_nodes = tree_stats.total_nodes;
        stats.max_depth = tree_stats.max_depth;
        stats.elapsed = start.elapsed();

        debug!(
            seat = view.seat(),
            variant = %self.config.variant,
            iterations = stats.iterations,
            rollouts = stats.rollouts,
            tree_nodes = stats.tree_nodes,
            max_depth = stats.max_depth,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            best = ?best,
            "MCTS search complete"
        );

        Ok(SearchOutcome { best, tree, stats })
    }

    /// Finish the game on a copy played by default agents. A rollout still
    /// running past the round limit has no winners.
    fn rollout(&mut self, sim: &Simulator<ScriptedAgent>) -> Result<Vec<usize>, SearchError> {
        let agents: Vec<DefaultAgent> = (0..sim.state().num_players())
            .map(|_| DefaultAgent::seeded(self.rng.gen()))
            .collect();
        let mut game = sim.controller().fork_with(agents, &mut self.rng)?;
        while game.next()? {
            if game.state().round() > self.config.rollout_round_limit {
                trace!(round = game.state().round(), "rollout hit round limit");
                return Ok(Vec::new());
            }
        }
        Ok(game.winners().unwrap_or_default())
    }
}

/// Play one whole turn (move, discard, visit) for the seat to act, replaying
/// `script`. Returns the script with every choice filled in.
fn advance(
    sim: &mut Simulator<ScriptedAgent>,
    script: Script,
) -> Result<Script, EngineError> {
    let seat = sim.state().current();
    sim.agent_mut(seat).load(script);
    for _ in 0..3 {
        if !sim.next()? {
            break;
        }
    }
    Ok(sim.agent_mut(seat).unload())
}

/// Add a sim to `from` and each ancestor, and a win to each non-root node
/// whose seat is among `winners`.
fn backpropagate(tree: &mut Tree<SearchNode>, from: NodeId, winners: &[usize]) {
    let root = tree.root();
    let path: Vec<NodeId> = tree.path_to_root(from).collect();
    for id in path {
        let node = tree.data_mut(id);
        node.sims += 1;
        if id != root && winners.contains(&node.seat) {
            node.wins += 1;
        }
    }
}

/// Root child with the strictly highest win rate; the first one wins ties.
fn best_child(tree: &Tree<SearchNode>) -> Option<NodeId> {
    let mut best = None;
    let mut best_rate = -1.0;
    for &child in tree.children(tree.root()) {
        let rate = tree.data(child).win_rate();
        if rate > best_rate {
            best_rate = rate;
            best = Some(child);
        }
    }
    best
}

/// Translate a move found on the forked state to the live one. Reserving a
/// hidden pile top means reserving whatever is on top of the live pile.
fn rebind(mv: Move, view: &GameView<'_>) -> Option<Move> {
    match mv {
        Move::Reserve(card) if card.is_hidden() => view
            .deck(card.tier())
            .peek()
            .map(|top| Move::Reserve(CardRef::Hidden(top))),
        other => Some(other),
    }
}

impl DecisionProvider for MctsAgent {
    fn choose_move(&mut self, view: &GameView<'_>) -> Result<Option<Move>, AgentAbort> {
        let outcome = self
            .search(view)
            .map_err(|e| AgentAbort::new(e.to_string()))?;
        Ok(Some(
            outcome.best.unwrap_or_else(|| DefaultAgent::pick_move(view)),
        ))
    }

    fn discard(&mut self, view: &GameView<'_>, count: u32) -> Result<Option<TokenSet>, AgentAbort> {
        self.fallback.discard(view, count)
    }

    fn choose_noble(
        &mut self,
        view: &GameView<'_>,
        offered: &[Noble],
    ) -> Result<Option<Noble>, AgentAbort> {
        self.fallback.choose_noble(view, offered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchVariant;
    use games_splendor::{Controller, GameState, Phase, Tier};

    fn opening(seed: u64) -> GameState {
        let mut rng = rng::seeded(seed);
        GameState::new(2, 15, &mut rng).unwrap()
    }

    #[test]
    fn test_single_iteration_expands_every_root_move() {
        let state = opening(1);
        let view = GameView::new(&state, 0);
        let mut agent = MctsAgent::seeded(MctsConfig::for_testing().with_max_iterations(1), 1);

        let outcome = agent.search(&view).unwrap();
        let root = outcome.tree.root();

        assert_eq!(outcome.stats.iterations, 1);
        assert_eq!(outcome.tree.children(root).len(), 30);
        assert_eq!(outcome.stats.rollouts, 30);
        assert_eq!(outcome.tree.data(root).sims, 30);
        for &child in outcome.tree.children(root) {
            assert_eq!(outcome.tree.data(child).sims, 1);
            assert_eq!(outcome.tree.data(child).seat, 0);
        }
        assert!(outcome.best.is_some());
    }

    #[test]
    fn test_children_visited_before_parent_revisited() {
        let state = opening(2);
        let view = GameView::new(&state, 0);
        let mut agent = MctsAgent::seeded(MctsConfig::for_testing(), 2);

        let outcome = agent.search(&view).unwrap();
        let tree = &outcome.tree;
        let root = tree.root();

        let child_sims: u32 = tree.children(root).iter().map(|&c| tree.data(c).sims).sum();
        assert_eq!(tree.data(root).sims, child_sims);

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            for &child in tree.children(id) {
                assert!(tree.data(child).sims >= 1);
                assert!(tree.data(child).wins <= tree.data(child).sims);
                stack.push(child);
            }
        }
        // a second-level expansion belongs to the other seat
        if let Some(&grandchild) = tree
            .children(root)
            .iter()
            .flat_map(|&c| tree.children(c))
            .next()
        {
            assert_eq!(tree.data(grandchild).seat, 1);
        }
    }

    #[test]
    fn test_search_leaves_live_state_untouched() {
        let state = opening(3);
        let before = state.summary();
        let pool = *state.pool();
        let view = GameView::new(&state, 0);
        let mut agent = MctsAgent::seeded(MctsConfig::for_testing(), 3);

        agent.search(&view).unwrap();
        assert_eq!(state.summary(), before);
        assert_eq!(*state.pool(), pool);
        assert_eq!(state.phase(), Phase::Move);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let state = opening(4);
        let view = GameView::new(&state, 0);
        let config = MctsConfig::for_testing().with_max_iterations(3);

        let a = MctsAgent::seeded(config.clone(), 9).search(&view).unwrap();
        let b = MctsAgent::seeded(config, 9).search(&view).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.stats.rollouts, b.stats.rollouts);
    }

    #[test]
    fn test_no_reserve_variant_skips_reserves() {
        let state = opening(5);
        let view = GameView::new(&state, 0);
        let config = MctsConfig::for_testing()
            .with_max_iterations(1)
            .with_variant(SearchVariant::Ucb1NoReserve);
        let outcome = MctsAgent::seeded(config, 5).search(&view).unwrap();
        let tree = &outcome.tree;

        assert_eq!(tree.children(tree.root()).len(), 15);
        assert!(!outcome.best.unwrap().is_reserve());
    }

    #[test]
    fn test_hidden_reserve_rebinds_to_live_pile_top() {
        let live = opening(6);
        let mut rng = rng::seeded(60);
        let forked = live.fork(&mut rng);
        let sim_top = forked.deck(Tier::Mid).peek().unwrap();

        let view = GameView::new(&live, 0);
        let rebound = rebind(Move::Reserve(CardRef::Hidden(sim_top)), &view).unwrap();
        let live_top = live.deck(Tier::Mid).peek().unwrap();
        assert_eq!(rebound, Move::Reserve(CardRef::Hidden(live_top)));

        let face = CardRef::Face(live.deck(Tier::Low).display()[0]);
        assert_eq!(rebind(Move::Reserve(face), &view), Some(Move::Reserve(face)));
    }

    #[test]
    fn test_best_child_prefers_first_of_equal_rates() {
        let mut tree = Tree::new(SearchNode::default());
        let root = tree.root();
        let mv = Move::TakeTwo(games_splendor::Color::Red);
        let a = tree.add_child(root, SearchNode { wins: 1, sims: 2, ..SearchNode::new(0, mv) });
        tree.add_child(root, SearchNode { wins: 2, sims: 4, ..SearchNode::new(0, mv) });
        let c = tree.add_child(root, SearchNode { wins: 0, sims: 0, ..SearchNode::new(0, mv) });

        assert_eq!(best_child(&tree), Some(a));
        tree.data_mut(c).wins = 3;
        tree.data_mut(c).sims = 4;
        assert_eq!(best_child(&tree), Some(c));
        assert_eq!(best_child(&Tree::new(SearchNode::default())), None);
    }

    #[test]
    fn test_chosen_moves_are_accepted_by_live_controller() {
        let mut rng = rng::seeded(7);
        let agents: Vec<Box<dyn DecisionProvider>> = vec![
            Box::new(MctsAgent::seeded(MctsConfig::for_testing().with_max_iterations(2), 7)),
            Box::new(DefaultAgent::seeded(8)),
        ];
        let mut controller = Controller::new(agents, 15, &mut rng)
            .unwrap()
            .with_max_rejections(0);

        // two full rounds: any rejected search move would fail immediately
        for _ in 0..12 {
            assert!(controller.next().unwrap());
        }
        assert_eq!(controller.state().round(), 2);
    }
}
