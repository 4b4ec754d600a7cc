//! UCT search: selection, expansion, simulation and backpropagation over a fresh tree per decision.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace, warn};

use crate::{
    Move,
    board::{BoardState, Grid, Player},
    config::SearchConfig,
    error::{Result, SearchError},
    game::{GameAdapter, Outcome},
    tree::{NodeId, SearchNode, SearchTree}
};

/// Statistics of one root child, for reporting after a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildStats {
    pub mv: Move,
    pub wins: u32,
    pub visits: u32
}

pub struct Mcts<G: GameAdapter> {
    tree: SearchTree,
    game: G,
    config: SearchConfig,
    rng: ChaCha20Rng
}

impl<G: GameAdapter> Mcts<G> {
    /// `player` is the one making the next move on `grid`.
    pub fn new(grid: Grid, player: Player, game: G, config: SearchConfig) -> Self {
        let untried = game.candidates(&grid);
        let mut root = SearchNode::new(BoardState::new(grid, player), untried);
        if root.untried.is_empty() {
            root.outcome = Some(Outcome::Tie)
        }

        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy()
        };

        Self { tree: SearchTree::new(root), game, config, rng }
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the configured number of iterations and return the move with the best win rate at the root.
    pub fn uct_search(&mut self) -> Result<Move> {
        let root = self.tree.root();
        if self.tree.get(root).is_terminal() {
            warn!("no candidate moves at the root, nothing to search");
            return Err(SearchError::NoChildren)
        }

        debug!(iterations = self.config.iterations, player = ?self.tree.get(root).state.player, "starting search");

        for _ in 0..self.config.iterations {
            let selected = self.selection(root)?;
            let outcome = self.simulation(selected);
            self.backpropagation(selected, outcome);
        }

        for stats in self.root_stats() {
            trace!(mv = ?stats.mv, wins = stats.wins, visits = stats.visits, "root child");
        }

        let mv = self.tree.best_move(root)?;
        debug!(nodes = self.tree.len(), children = self.tree.get(root).children.len(), mv = ?mv, "search finished");
        Ok(mv)
    }

    /// Walk down by UCB until a terminal node, or expand the first node that still has untried moves and return
    /// the new child. At most one node is expanded per call.
    pub fn selection(&mut self, node: NodeId) -> Result<NodeId> {
        let mut current = node;
        while !self.tree.get(current).is_terminal() {
            if !self.tree.get(current).is_fully_expanded() {
                return self.expansion(current)
            }
            current = self.tree.max_ucb(current, self.config.exploration)?;
        }
        Ok(current)
    }

    /// Pop one untried move of `node` and add the resulting position as a child.
    pub fn expansion(&mut self, node: NodeId) -> Result<NodeId> {
        let parent = self.tree.get_mut(node);
        let mv = parent.untried.pop().ok_or(SearchError::NoChildren)?;
        let mover = parent.state.player;
        let state = parent.state.play(mv)?;

        let outcome = self.game.check_win(&state.grid, mover, mv);
        let untried = if outcome.is_some() { vec![] } else { self.game.candidates(&state.grid) };

        let mut child = SearchNode::new(state, untried);
        child.outcome = outcome;
        if child.untried.is_empty() && child.outcome.is_none() {
            // nothing reasonable left to play
            child.outcome = Some(Outcome::Tie)
        }

        let id = self.tree.add_child(node, mv, child);
        trace!(mv = ?mv, player = ?mover, outcome = ?self.tree.get(id).outcome, "expanded");
        Ok(id)
    }

    /// The cached outcome for terminal nodes, otherwise a random rollout on a copy of the node's grid.
    pub fn simulation(&mut self, node: NodeId) -> Outcome {
        let node = self.tree.get(node);
        if let Some(outcome) = node.outcome {
            return outcome
        }
        self.game.rollout(node.state.grid.clone(), node.state.player, &mut self.rng)
    }

    pub fn backpropagation(&mut self, node: NodeId, outcome: Outcome) {
        self.tree.backpropagate(node, outcome)
    }

    pub fn root_stats(&self) -> Vec<ChildStats> {
        self.tree
            .children(self.tree.root())
            .filter_map(|child| Some(ChildStats { mv: child.prev_move?, wins: child.wins, visits: child.visits }))
            .collect()
    }
}

/// Build a fresh tree for `state`, search it, and return the chosen move. Nothing is kept afterwards.
pub fn compute_next_move<G: GameAdapter>(state: &BoardState, game: G, config: SearchConfig) -> Result<Move> {
    Mcts::new(state.grid.clone(), state.player, game, config).uct_search()
}
