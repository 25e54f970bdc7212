//! Grid games implementing [`GameOracle`](uct_core::GameOracle).
//!
//! Used by the command-line tools and to validate the search on games with
//! known answers.

mod board;
pub mod connect4;
pub mod tictactoe;

pub use board::Board;
pub use connect4::Connect4;
pub use tictactoe::TicTacToe;
