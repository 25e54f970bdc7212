//! Monte Carlo Tree Search implementation.
//!
//! Each simulation runs the four classic phases:
//!
//! 1. **Selection**: from the root, follow the max-UCT child while the
//!    current node is fully expanded
//! 2. **Expansion**: unless the node already ends the game, add one child
//!    for a random untried action
//! 3. **Simulation**: play uniformly random moves to the end of the game
//! 4. **Backpropagation**: credit the result to every node on the path,
//!    flipping it at each ply
//!
//! The final move is the root child with the most visits (robust child).

use crate::{
    config::SearchConfig,
    node::NodeId,
    tree::Tree,
};
use rand::Rng;
use tracing::{debug, trace};
use uct_core::{Action, GameOracle, Result, UctError};

/// Result of an MCTS search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Most visited root action.
    pub best_action: Action,

    /// Visit count for each expanded root action, in creation order.
    pub visit_counts: Vec<(Action, u32)>,

    /// Win rate of `best_action` for the player to move at the root.
    pub best_win_rate: f64,

    /// Simulations run.
    pub simulations: usize,

    /// Nodes in the tree when the search finished (root included).
    pub tree_size: usize,
}

impl SearchResult {
    /// Total visits over root children.
    pub fn total_visits(&self) -> u32 {
        self.visit_counts.iter().map(|(_, count)| *count).sum()
    }

    /// Visits of a given root action, or 0 if it was never expanded.
    pub fn visits(&self, action: Action) -> u32 {
        self.visit_counts
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

/// Monte Carlo Tree Search with UCT selection and random rollouts.
///
/// Generic over the random number generator. The game is injected per call,
/// and every call builds and drops its own tree, so one `Mcts` can serve
/// any number of independent decisions.
pub struct Mcts<R: Rng> {
    config: SearchConfig,
    rng: R,
}

impl<R: Rng> Mcts<R> {
    /// Create a new MCTS instance.
    pub fn new(config: SearchConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Pick a move for the player to move in `root_state` using the configured budget.
    ///
    /// `root_state` must be perspective-normalized (player to move is `+1`).
    ///
    /// # Errors
    /// Returns `UctError::InvalidConfiguration` if the configuration is
    /// invalid or the root has no legal actions.
    pub fn run<G: GameOracle>(&mut self, oracle: &G, root_state: &G::State) -> Result<Action> {
        self.search(oracle, root_state).map(|result| result.best_action)
    }

    /// Like [`Mcts::run`], returning the root statistics as well.
    pub fn search<G: GameOracle>(&mut self, oracle: &G, root_state: &G::State) -> Result<SearchResult> {
        self.config.validate()?;

        let mut tree = Tree::new(oracle, root_state.clone());
        if tree.root().untried_actions.is_empty() {
            return Err(UctError::InvalidConfiguration(format!(
                "{} root position has no legal actions",
                oracle.name()
            )));
        }

        for iteration in 0..self.config.simulations {
            self.simulate_once(oracle, &mut tree, iteration)?;
        }

        self.extract_result(&tree)
    }

    /// Pick a move with an explicit simulation budget, leaving the rest of
    /// the configuration unchanged.
    ///
    /// # Errors
    /// Returns `UctError::InvalidConfiguration` if `simulation_budget` is zero
    /// or the root has no legal actions.
    pub fn run_with_budget<G: GameOracle>(
        &mut self,
        oracle: &G,
        root_state: &G::State,
        simulation_budget: usize,
    ) -> Result<Action> {
        let saved = self.config.simulations;
        self.config.simulations = simulation_budget;
        let result = self.run(oracle, root_state);
        self.config.simulations = saved;
        result
    }

    /// Run a single simulation: select -> expand -> simulate -> backpropagate.
    fn simulate_once<G: GameOracle>(
        &mut self,
        oracle: &G,
        tree: &mut Tree<G>,
        iteration: usize,
    ) -> Result<()> {
        let mut current = NodeId::ROOT;
        let mut depth = 0usize;

        // SELECT: descend while every action of the node has a child
        while tree.get(current).is_fully_expanded() {
            current = tree
                .select_child(
                    current,
                    self.config.exploration_constant,
                    self.config.tie_break,
                    &mut self.rng,
                )
                .ok_or(UctError::NodeExhausted)?;
            depth += 1;
        }

        // EXPAND: a finished game is scored directly
        let terminal = tree.is_terminal(oracle, current);
        if !terminal {
            current = tree.expand(oracle, current, &mut self.rng)?;
            depth += 1;
        }

        // SIMULATE
        let reward = tree.simulate(oracle, current, &mut self.rng)?;

        // BACKPROPAGATE
        tree.backpropagate(current, reward);

        trace!(
            iteration,
            depth,
            terminal,
            reward = reward.get(),
            "MCTS simulation complete"
        );
        Ok(())
    }

    /// Extract search results from root node.
    fn extract_result<G: GameOracle>(&mut self, tree: &Tree<G>) -> Result<SearchResult> {
        let visit_counts: Vec<(Action, u32)> = tree
            .children(NodeId::ROOT)
            .filter_map(|child| child.action_taken.map(|a| (a, child.visit_count)))
            .collect();

        // The root is never terminal, so at least one child exists after one simulation
        let best_id = tree
            .most_visited_child(NodeId::ROOT, self.config.tie_break, &mut self.rng)
            .ok_or(UctError::NodeExhausted)?;
        let best = tree.get(best_id);
        let best_action = best.action_taken.ok_or(UctError::NodeExhausted)?;

        let result = SearchResult {
            best_action,
            visit_counts,
            best_win_rate: best.win_rate(),
            simulations: self.config.simulations,
            tree_size: tree.len(),
        };

        debug!(
            best_action = result.best_action,
            visits = best.visit_count,
            win_rate = result.best_win_rate,
            tree_size = result.tree_size,
            simulations = result.simulations,
            "MCTS search finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uct_core::{Outcome, Sign};

    // Simple test game: race to 5
    // Players take turns adding 1 or 2. Whoever reaches exactly 5 wins.
    // Actions: index 0 adds 1, index 1 adds 2.
    // Positions 2 and 5 are lost for the player to move; from 0, adding 2 wins.
    #[derive(Clone)]
    struct RaceToFive;

    impl GameOracle for RaceToFive {
        type State = u8;

        fn name(&self) -> &'static str {
            "race-to-five"
        }

        fn num_actions(&self) -> usize {
            2
        }

        fn initial_state(&self) -> Self::State {
            0
        }

        fn legal_actions(&self, state: &Self::State) -> Vec<Action> {
            match *state {
                s if s >= 5 => Vec::new(),
                4 => vec![0],
                _ => vec![0, 1],
            }
        }

        fn apply_action(&self, state: &Self::State, action: Action, _mover: Sign) -> Result<Self::State> {
            if !self.legal_actions(state).contains(&action) {
                return Err(UctError::InvalidAction { action });
            }
            Ok(state + action as u8 + 1)
        }

        fn is_terminal(&self, state: &Self::State, last_action: Option<Action>) -> bool {
            last_action.is_some() && *state >= 5
        }

        fn outcome(&self, state: &Self::State, last_action: Option<Action>) -> Outcome {
            if self.is_terminal(state, last_action) {
                Outcome::Win
            } else {
                Outcome::Ongoing
            }
        }

        // The running total carries no owner marks
        fn flip_perspective(&self, state: &Self::State, _sign: Sign) -> Self::State {
            *state
        }

        fn render(&self, state: &Self::State) -> String {
            state.to_string()
        }
    }

    fn mcts(seed: u64, simulations: usize) -> Mcts<ChaCha8Rng> {
        Mcts::new(
            SearchConfig::with_simulations(simulations),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_mcts_basic() {
        let game = RaceToFive;
        let result = mcts(42, 100).search(&game, &game.initial_state()).unwrap();

        assert!(result.best_action == 0 || result.best_action == 1);
        assert_eq!(result.total_visits(), 100);
        assert_eq!(result.simulations, 100);
        assert!(result.tree_size > 1);
    }

    #[test]
    fn test_mcts_finds_winning_line() {
        // From 0, adding 2 leaves the opponent on the lost position 2
        let game = RaceToFive;
        let action = mcts(7, 500).run(&game, &0).unwrap();
        assert_eq!(action, 1);

        // From 3, adding 2 reaches 5 immediately
        let action = mcts(7, 100).run(&game, &3).unwrap();
        assert_eq!(action, 1);
    }

    #[test]
    fn test_mcts_deterministic() {
        let game = RaceToFive;
        let result1 = mcts(12345, 50).search(&game, &0).unwrap();
        let result2 = mcts(12345, 50).search(&game, &0).unwrap();

        assert_eq!(result1, result2);
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        let game = RaceToFive;
        let err = mcts(1, 0).run(&game, &0).unwrap_err();
        assert!(matches!(err, UctError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_root_without_moves_is_rejected() {
        let game = RaceToFive;
        let err = mcts(1, 10).run(&game, &5).unwrap_err();
        assert!(matches!(err, UctError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_single_simulation() {
        let game = RaceToFive;
        let result = mcts(3, 1).search(&game, &0).unwrap();
        assert_eq!(result.visit_counts.len(), 1);
        assert_eq!(result.total_visits(), 1);
        assert_eq!(result.tree_size, 2);
    }

    #[test]
    fn test_run_with_budget_restores_config() {
        let game = RaceToFive;
        let mut search = mcts(9, 30);
        assert!(search.run_with_budget(&game, &0, 0).is_err());
        assert!(search.run_with_budget(&game, &0, 20).is_ok());
        assert_eq!(search.config().simulations, 30);
    }
}
