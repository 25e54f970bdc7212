//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices for cache locality and simpler memory management.

use crate::policy;
use uct_core::Action;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the MCTS tree.
///
/// Each node owns a perspective-normalized snapshot of the game state: the
/// player to move at this node owns the `+1` marks. `win_score` sums the
/// rewards backpropagated through this node, read by the parent's selection.
#[derive(Clone, Debug)]
pub struct Node<S> {
    /// Game state at this node.
    pub state: S,

    /// Creating node (None for root). Only used to walk back up during backpropagation.
    pub parent: Option<NodeId>,

    /// Action that led to this node from the parent state (None for root).
    pub action_taken: Option<Action>,

    /// Children in creation order.
    pub children: Vec<NodeId>,

    /// Legal actions not yet expanded into children.
    pub untried_actions: Vec<Action>,

    /// Number of simulations backpropagated through this node.
    pub visit_count: u32,

    /// Sum of rewards backpropagated through this node.
    pub win_score: f64,
}

impl<S> Node<S> {
    /// Create the root node.
    pub fn root(state: S, legal_actions: Vec<Action>) -> Self {
        Self::new(state, None, None, legal_actions)
    }

    /// Create a node reached by playing `action` from `parent`.
    pub fn child(state: S, parent: NodeId, action: Action, legal_actions: Vec<Action>) -> Self {
        Self::new(state, Some(parent), Some(action), legal_actions)
    }

    fn new(
        state: S,
        parent: Option<NodeId>,
        action_taken: Option<Action>,
        untried_actions: Vec<Action>,
    ) -> Self {
        Self {
            state,
            parent,
            action_taken,
            children: Vec::new(),
            untried_actions,
            visit_count: 0,
            win_score: 0.0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// True once every legal action has a child.
    ///
    /// A node with no legal actions and no children (a finished game) is
    /// never fully expanded; selection stops there.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty() && !self.children.is_empty()
    }

    /// Mean reward for the player who moved into this node.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn win_rate(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.win_score / self.visit_count as f64
        }
    }

    /// UCT score of this node as seen from its parent.
    #[inline]
    pub fn uct(&self, parent_visit_count: u32, exploration_constant: f64) -> f64 {
        policy::uct(
            self.win_score,
            self.visit_count,
            parent_visit_count,
            exploration_constant,
        )
    }
}
