//! Arena-backed search tree.
//!
//! A node owns its children through the arena (`children` holds their ids); the `parent` id is only a back
//! reference used to walk up during backpropagation. The whole tree is dropped once a move is chosen.

use ordered_float::OrderedFloat;

use crate::{Move, board::{BoardState, Grid}, error::{Result, SearchError}, game::Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: BoardState,
    pub visits: u32,
    /// simulations won by the player that moved INTO this node, i.e. not `state.player`
    pub wins: u32,
    /// last computed score, refreshed by `max_ucb` and `best_move`
    pub ucb: f64,
    /// the move that produced this node. `None` for the root.
    pub prev_move: Option<Move>,
    /// candidate moves not yet expanded. Popped from the back.
    pub untried: Vec<Move>,
    /// `Some` once the game is decided at this node
    pub outcome: Option<Outcome>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>
}

impl SearchNode {
    pub fn new(state: BoardState, untried: Vec<Move>) -> Self {
        SearchNode { state, visits: 0, wins: 0, ucb: 0., prev_move: None, untried, outcome: None, parent: None, children: vec![] }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.visits as f64
    }

    fn ucb1(&self, ln_parent_visits: f64, exploration: f64) -> f64 {
        self.win_rate() + (exploration * ln_parent_visits / self.visits as f64).sqrt()
    }
}

/// Every empty cell inside the bounding box of the placed pieces, grown by one on each side and clamped to the
/// board. An empty board only offers the center.
pub fn candidate_moves(grid: &Grid) -> Vec<Move> {
    let size = grid.size();
    if size == 0 {
        return vec![]
    }
    let max_rc = size - 1;

    let mut occupied = grid.occupied().peekable();
    let Some(&(r0, c0)) = occupied.peek() else {
        return vec![(max_rc / 2, max_rc / 2)]
    };

    let (mut min_r, mut max_r, mut min_c, mut max_c) = (r0, r0, c0, c0);
    for (r, c) in occupied {
        min_r = min_r.min(r);
        max_r = max_r.max(r);
        min_c = min_c.min(c);
        max_c = max_c.max(c);
    }

    let (min_r, max_r) = (min_r.saturating_sub(1), (max_r + 1).min(max_rc));
    let (min_c, max_c) = (min_c.saturating_sub(1), (max_c + 1).min(max_rc));

    let mut options = vec![];
    for r in min_r..=max_r {
        for c in min_c..=max_c {
            if grid[(r, c)].is_empty() {
                options.push((r, c))
            }
        }
    }
    options
}

#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>
}

impl SearchTree {
    pub fn new(root: SearchNode) -> Self {
        SearchTree { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item=(NodeId, &SearchNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item=&SearchNode> {
        self.get(id).children.iter().map(move |&c| self.get(c))
    }

    /// attach `child` under `parent` as the result of playing `mv`
    pub fn add_child(&mut self, parent: NodeId, mv: Move, mut child: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        child.parent = Some(parent);
        child.prev_move = Some(mv);
        self.nodes.push(child);
        self.get_mut(parent).children.push(id);
        id
    }

    /// the child maximizing `wins/visits + sqrt(exploration * ln(parent visits) / visits)`.
    pub fn max_ucb(&mut self, id: NodeId, exploration: f64) -> Result<NodeId> {
        let parent_visits = self.get(id).visits;
        if parent_visits == 0 {
            return Err(SearchError::UnvisitedChild)
        }
        let ln_n = (parent_visits as f64).ln();
        self.score_children(id, |child| child.ucb1(ln_n, exploration))
    }

    /// the move leading to the child with the best win rate, without any exploration bonus.
    pub fn best_move(&mut self, id: NodeId) -> Result<Move> {
        let best = self.score_children(id, SearchNode::win_rate)?;
        self.get(best).prev_move.ok_or(SearchError::NoChildren)
    }

    // refreshes `ucb` on every child, then picks the first maximum so creation order breaks ties
    fn score_children(&mut self, id: NodeId, score: impl Fn(&SearchNode) -> f64) -> Result<NodeId> {
        let children = std::mem::take(&mut self.get_mut(id).children);
        let mut scored = Ok(());
        for &child_id in &children {
            let child = &mut self.nodes[child_id.0];
            if child.visits == 0 {
                scored = Err(SearchError::UnvisitedChild);
                break
            }
            child.ucb = score(child);
        }
        self.get_mut(id).children = children;
        scored?;

        self.get(id).children.iter().rev().max_by_key(|&&c| OrderedFloat(self.get(c).ucb)).copied().ok_or(SearchError::NoChildren)
    }

    /// Walk from `leaf` up to the root. Every node on the way counts a visit; unless the game was tied, a node
    /// counts a win when the winner is not the player to move there.
    pub fn backpropagate(&mut self, leaf: NodeId, outcome: Outcome) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            if let Some(winner) = outcome.winner() {
                if winner != node.state.player {
                    node.wins += 1
                }
            }
            current = node.parent;
        }
    }
}
