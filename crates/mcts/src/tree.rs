//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>. The tree owns every
//! node; parent links are plain indices used only to walk back to the root.

use crate::config::TieBreak;
use crate::node::{Node, NodeId};
use crate::policy;
use rand::seq::SliceRandom;
use rand::Rng;
use uct_core::{GameOracle, Result, Reward, Sign, UctError};

/// Arena-allocated MCTS tree over oracle `G`.
#[derive(Debug)]
pub struct Tree<G: GameOracle> {
    nodes: Vec<Node<G::State>>,
}

impl<G: GameOracle> Tree<G> {
    /// Create a tree whose root holds `root_state`.
    pub fn new(oracle: &G, root_state: G::State) -> Self {
        let legal = oracle.legal_actions(&root_state);
        Self {
            nodes: vec![Node::root(root_state, legal)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<G::State> {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node<G::State> {
        &mut self.nodes[id.0]
    }

    pub fn root(&self) -> &Node<G::State> {
        self.get(NodeId::ROOT)
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id` in creation order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node<G::State>> + '_ {
        self.get(id).children.iter().map(move |&child| self.get(child))
    }

    /// True if the node's position ended the game.
    ///
    /// The root has no `action_taken` and is therefore never terminal.
    pub fn is_terminal(&self, oracle: &G, id: NodeId) -> bool {
        let node = self.get(id);
        oracle.is_terminal(&node.state, node.action_taken)
    }

    /// Expand one untried action of `id` into a new child and return it.
    ///
    /// The action is drawn uniformly at random and removed from the untried
    /// set. The parent's player to move plays it as `+1`, then the resulting
    /// board is flipped so the child's player to move is `+1` again.
    ///
    /// # Errors
    /// Returns `UctError::NodeExhausted` if no untried actions remain, or any
    /// error the oracle reports for the transition.
    pub fn expand<R: Rng + ?Sized>(&mut self, oracle: &G, id: NodeId, rng: &mut R) -> Result<NodeId> {
        let node = self.get_mut(id);
        if node.untried_actions.is_empty() {
            return Err(UctError::NodeExhausted);
        }
        let pick = rng.gen_range(0..node.untried_actions.len());
        let action = node.untried_actions[pick];

        // The action stays untried if the oracle rejects it
        let next = oracle.apply_action(&node.state, action, Sign::Plus)?;
        node.untried_actions.swap_remove(pick);
        let state = oracle.flip_perspective(&next, Sign::Minus);
        let legal = oracle.legal_actions(&state);

        let child_id = NodeId(self.nodes.len());
        self.nodes.push(Node::child(state, id, action, legal));
        self.get_mut(id).children.push(child_id);
        Ok(child_id)
    }

    /// Estimate the value of `id` with a terminal shortcut or a random rollout.
    ///
    /// A node that already ends the game returns its exact outcome. Otherwise
    /// a uniformly random playout runs to the end of the game, starting with
    /// the node's player to move as `+1`, and returns the oracle's outcome for
    /// the move that ended it: 1 for a win by that move, 0.5 for a draw.
    ///
    /// # Errors
    /// Returns `UctError::MissingOutcome` if the oracle breaks its contract
    /// (a finished game without a verdict, or a live game without moves).
    pub fn simulate<R: Rng + ?Sized>(&self, oracle: &G, id: NodeId, rng: &mut R) -> Result<Reward> {
        let node = self.get(id);
        if oracle.is_terminal(&node.state, node.action_taken) {
            return oracle
                .outcome(&node.state, node.action_taken)
                .reward()
                .ok_or(UctError::MissingOutcome);
        }

        let mut state = node.state.clone();
        let mut player = Sign::Plus;

        loop {
            let action = *oracle
                .legal_actions(&state)
                .choose(rng)
                .ok_or(UctError::MissingOutcome)?;
            state = oracle.apply_action(&state, action, player)?;

            if oracle.is_terminal(&state, Some(action)) {
                return oracle
                    .outcome(&state, Some(action))
                    .reward()
                    .ok_or(UctError::MissingOutcome);
            }

            player = player.flip();
        }
    }

    /// Walk from `leaf` to the root, counting the visit and crediting `reward`.
    ///
    /// The reward flips at every level because consecutive plies belong to
    /// opposite players.
    pub fn backpropagate(&mut self, leaf: NodeId, reward: Reward) {
        let mut current = Some(leaf);
        let mut reward = reward;

        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visit_count += 1;
            node.win_score += reward.get();
            reward = reward.flip();
            current = node.parent;
        }
    }

    /// Child of `id` with the highest UCT score.
    ///
    /// Returns `None` if the node has no children.
    pub fn select_child<R: Rng + ?Sized>(
        &self,
        id: NodeId,
        exploration_constant: f64,
        tie_break: TieBreak,
        rng: &mut R,
    ) -> Option<NodeId> {
        let node = self.get(id);
        let parent_visits = node.visit_count;
        let scored = node.children.iter().map(|&child| {
            let score = self.get(child).uct(parent_visits, exploration_constant);
            (child, score)
        });
        policy::argmax(scored, tie_break, rng)
    }

    /// Child of `id` with the highest visit count (robust child).
    ///
    /// Returns `None` if the node has no children.
    pub fn most_visited_child<R: Rng + ?Sized>(
        &self,
        id: NodeId,
        tie_break: TieBreak,
        rng: &mut R,
    ) -> Option<NodeId> {
        let scored = self
            .get(id)
            .children
            .iter()
            .map(|&child| (child, self.get(child).visit_count as f64));
        policy::argmax(scored, tie_break, rng)
    }
}
