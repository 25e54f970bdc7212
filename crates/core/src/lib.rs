//! UCT Core - Game oracle abstraction and common types
//!
//! This crate provides the `GameOracle` trait that any rule set must
//! implement to be searched by the UCT engine, plus the shared error type.
//!
//! # Types
//!
//! - [`GameOracle`] - Trait for game rule sets
//! - [`Sign`] - Player sign relative to the player to move
//! - [`Outcome`] - Verdict after a move (win, draw, ongoing)
//! - [`Reward`] - Backpropagated score in [0, 1]

mod error;
mod game;
mod types;

pub use error::{Result, UctError};
pub use game::GameOracle;
pub use types::{Outcome, Reward, Sign};

/// Index into an oracle's flattened action space.
pub type Action = usize;
