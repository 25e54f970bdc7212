//! Monte Carlo Tree Search with UCT selection.
//!
//! This crate provides a game-agnostic MCTS engine for two-player, zero-sum,
//! turn-alternating games. Games plug in through
//! [`uct_core::GameOracle`]; the engine never inspects a state itself.
//!
//! # Features
//!
//! - **Generic**: Works with any `GameOracle` implementation
//! - **UCT Selection**: `W/N + C * sqrt(ln(N_parent) / N)`, unvisited children first
//! - **Random Rollouts**: Uniform random playouts to the end of the game
//! - **Robust Child**: The final move is the most visited root child
//! - **Configurable Ties**: First-created or uniformly random tie-breaking
//!
//! # Example
//!
//! ```
//! use uct_mcts::{games::TicTacToe, Mcts, SearchConfig};
//! use uct_core::GameOracle;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let game = TicTacToe::default();
//! let state = game.initial_state();
//!
//! let config = SearchConfig::with_simulations(200);
//! let mut mcts = Mcts::new(config, ChaCha8Rng::seed_from_u64(42));
//!
//! let result = mcts.search(&game, &state).unwrap();
//! assert!(game.legal_actions(&state).contains(&result.best_action));
//! assert_eq!(result.total_visits(), 200);
//! ```

pub mod config;
pub mod games;
mod node;
mod policy;
pub mod search;
mod tree;

pub use config::{SearchConfig, TieBreak};
pub use node::{Node, NodeId};
pub use policy::uct;
pub use search::{Mcts, SearchResult};
pub use tree::Tree;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uct_core::{Action, GameOracle, Result};

/// Pick a move for the player to move in `root_state` with default settings
/// and an entropy-seeded generator.
///
/// `root_state` must be perspective-normalized (player to move is `+1`).
///
/// # Errors
/// Returns `UctError::InvalidConfiguration` if `simulation_budget` is zero or
/// the root has no legal actions.
pub fn run<G: GameOracle>(root_state: &G::State, oracle: &G, simulation_budget: usize) -> Result<Action> {
    let config = SearchConfig::with_simulations(simulation_budget);
    Mcts::new(config, ChaCha8Rng::from_entropy()).run(oracle, root_state)
}
