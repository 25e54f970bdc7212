//! Connect Four on the standard 6×7 board.
//!
//! Actions are column indices. A piece drops to the lowest empty row of its
//! column; four in a row in any direction through the landing cell wins.

use super::board::{symbol, Board};
use uct_core::{Action, GameOracle, Outcome, Result, Sign, UctError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
const CONNECT: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Connect4;

impl Connect4 {
    /// Build a position from row-major cells, top row first.
    ///
    /// # Errors
    /// Returns `UctError::InvalidBoard` if the cells do not fit a 6×7 board.
    pub fn board_from_cells(&self, cells: Vec<i8>) -> Result<Board> {
        Board::from_cells(ROWS, COLS, cells)
    }

    /// Flattened index of the top piece in `col`, if any.
    fn landing_cell(board: &Board, col: usize) -> Option<usize> {
        (0..ROWS)
            .find(|&row| board.at(row, col) != 0)
            .map(|row| row * COLS + col)
    }

    fn is_win(board: &Board, last_action: Action) -> bool {
        if last_action >= COLS {
            return false;
        }
        Self::landing_cell(board, last_action)
            .map_or(false, |cell| board.longest_line_through(cell) >= CONNECT)
    }

    fn top_row_full(board: &Board) -> bool {
        (0..COLS).all(|col| board.at(0, col) != 0)
    }
}

impl GameOracle for Connect4 {
    type State = Board;

    fn name(&self) -> &'static str {
        "connect4"
    }

    fn num_actions(&self) -> usize {
        COLS
    }

    fn initial_state(&self) -> Self::State {
        Board::empty(ROWS, COLS)
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Action> {
        (0..COLS).filter(|&col| state.at(0, col) == 0).collect()
    }

    fn apply_action(&self, state: &Self::State, action: Action, mover: Sign) -> Result<Self::State> {
        if action >= COLS {
            return Err(UctError::InvalidAction { action });
        }
        let row = (0..ROWS)
            .rev()
            .find(|&row| state.at(row, action) == 0)
            .ok_or(UctError::InvalidAction { action })?;

        let mut next = state.clone();
        next.set(row * COLS + action, mover);
        Ok(next)
    }

    fn is_terminal(&self, state: &Self::State, last_action: Option<Action>) -> bool {
        match last_action {
            Some(action) => Self::is_win(state, action) || Self::top_row_full(state),
            None => false,
        }
    }

    fn outcome(&self, state: &Self::State, last_action: Option<Action>) -> Outcome {
        match last_action {
            Some(action) if Self::is_win(state, action) => Outcome::Win,
            Some(_) if Self::top_row_full(state) => Outcome::Draw,
            _ => Outcome::Ongoing,
        }
    }

    fn flip_perspective(&self, state: &Self::State, sign: Sign) -> Self::State {
        state.flipped(sign)
    }

    fn render(&self, state: &Self::State) -> String {
        let mut out = String::new();
        for row in 0..ROWS {
            out.push('|');
            for col in 0..COLS {
                out.push(symbol(state.at(row, col)));
                out.push('|');
            }
            out.push('\n');
        }
        out.push_str(&"-".repeat(2 * COLS + 1));
        out.push('\n');
        out.push('|');
        for col in 0..COLS {
            out.push_str(&format!("{}|", col));
        }
        out
    }
}
