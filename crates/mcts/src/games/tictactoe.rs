//! N×N tic-tac-toe for MCTS validation.
//!
//! The classic 3×3 game is solved (perfect play draws), which makes it a
//! good yardstick for the search:
//! - MCTS should never lose against a random opponent
//! - MCTS should take an immediate win and block an immediate loss
//!
//! A player wins by owning an entire row, column or diagonal.

use super::board::{symbol, Board};
use uct_core::{Action, GameOracle, Outcome, Result, Sign, UctError};

/// Tic-tac-toe on a `size`×`size` board.
///
/// Actions are flattened cell indices in `0..size * size`, row-major:
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TicTacToe {
    size: usize,
}

impl TicTacToe {
    pub const DEFAULT_SIZE: usize = 3;

    /// Create a game on a `size`×`size` board.
    ///
    /// # Errors
    /// Returns `UctError::InvalidConfiguration` if `size` is below 2.
    pub fn new(size: usize) -> Result<Self> {
        if size < 2 {
            return Err(UctError::InvalidConfiguration(format!(
                "tic-tac-toe board size must be at least 2, got {}",
                size
            )));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Build a position from row-major cells (`1`, `-1` or `0`).
    ///
    /// # Errors
    /// Returns `UctError::InvalidBoard` if the cells do not fit this board.
    pub fn board_from_cells(&self, cells: Vec<i8>) -> Result<Board> {
        Board::from_cells(self.size, self.size, cells)
    }

    /// True if the owner of `last_action` now holds a full line through it.
    fn is_win(&self, board: &Board, last_action: Action) -> bool {
        board.longest_line_through(last_action) >= self.size
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
        }
    }
}

impl GameOracle for TicTacToe {
    type State = Board;

    fn name(&self) -> &'static str {
        "tictactoe"
    }

    fn num_actions(&self) -> usize {
        self.size * self.size
    }

    fn initial_state(&self) -> Self::State {
        Board::empty(self.size, self.size)
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Action> {
        state.empty_cells().collect()
    }

    fn apply_action(&self, state: &Self::State, action: Action, mover: Sign) -> Result<Self::State> {
        if action >= state.len() || state.get(action) != 0 {
            return Err(UctError::InvalidAction { action });
        }
        let mut next = state.clone();
        next.set(action, mover);
        Ok(next)
    }

    fn is_terminal(&self, state: &Self::State, last_action: Option<Action>) -> bool {
        match last_action {
            Some(action) => self.is_win(state, action) || state.is_full(),
            None => false,
        }
    }

    fn outcome(&self, state: &Self::State, last_action: Option<Action>) -> Outcome {
        match last_action {
            Some(action) if self.is_win(state, action) => Outcome::Win,
            Some(_) if state.is_full() => Outcome::Draw,
            _ => Outcome::Ongoing,
        }
    }

    fn flip_perspective(&self, state: &Self::State, sign: Sign) -> Self::State {
        state.flipped(sign)
    }

    fn render(&self, state: &Self::State) -> String {
        let separator = "-".repeat(4 * self.size - 3);
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| symbol(state.at(row, col)).to_string())
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join(&format!("\n{}\n", separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &TicTacToe, moves: &[Action]) -> (Board, Option<Action>) {
        let mut state = game.initial_state();
        let mut mover = Sign::Plus;
        let mut last = None;
        for &action in moves {
            state = game.apply_action(&state, action, mover).unwrap();
            mover = mover.flip();
            last = Some(action);
        }
        (state, last)
    }

    #[test]
    fn test_initial_state() {
        let game = TicTacToe::default();
        let state = game.initial_state();

        assert_eq!(game.num_actions(), 9);
        assert_eq!(game.legal_actions(&state).len(), 9);
        assert!(!game.is_terminal(&state, None));
        assert_eq!(game.outcome(&state, None), Outcome::Ongoing);
    }

    #[test]
    fn test_size_validation() {
        assert!(matches!(
            TicTacToe::new(1),
            Err(UctError::InvalidConfiguration(_))
        ));
        let game = TicTacToe::new(4).unwrap();
        assert_eq!(game.num_actions(), 16);
    }

    #[test]
    fn test_apply_move() {
        let game = TicTacToe::default();
        let state = game.initial_state();

        let next = game.apply_action(&state, 4, Sign::Plus).unwrap();
        assert_eq!(next.get(4), 1);
        assert_eq!(game.legal_actions(&next).len(), 8);
        assert!(!game.legal_actions(&next).contains(&4));
        // The input state is untouched
        assert_eq!(state.get(4), 0);
    }

    #[test]
    fn test_illegal_moves_rejected() {
        let game = TicTacToe::default();
        let state = game.apply_action(&game.initial_state(), 0, Sign::Plus).unwrap();

        assert_eq!(
            game.apply_action(&state, 0, Sign::Minus),
            Err(UctError::InvalidAction { action: 0 })
        );
        assert_eq!(
            game.apply_action(&state, 9, Sign::Minus),
            Err(UctError::InvalidAction { action: 9 })
        );
    }

    #[test]
    fn test_x_wins_top_row() {
        let game = TicTacToe::default();
        let (state, last) = play(&game, &[0, 3, 1, 4, 2]);

        assert!(game.is_terminal(&state, last));
        assert_eq!(game.outcome(&state, last), Outcome::Win);
    }

    #[test]
    fn test_o_wins_anti_diagonal() {
        let game = TicTacToe::default();
        let (state, last) = play(&game, &[0, 2, 1, 4, 3, 6]);

        assert!(game.is_terminal(&state, last));
        assert_eq!(game.outcome(&state, last), Outcome::Win);
        assert_eq!(state.get(6), -1);
    }

    #[test]
    fn test_win_only_counts_the_last_move() {
        // X owns the top row, but the last move (O at 8) completes nothing
        let game = TicTacToe::default();
        let state = game
            .board_from_cells(vec![1, 1, 1, -1, -1, 0, 0, 0, -1])
            .unwrap();

        assert!(!game.is_terminal(&state, Some(8)));
        assert!(game.is_terminal(&state, Some(1)));
    }

    #[test]
    fn test_draw() {
        // X O X
        // X O O
        // O X X
        let game = TicTacToe::default();
        let (state, last) = play(&game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

        assert!(state.is_full());
        assert!(game.is_terminal(&state, last));
        assert_eq!(game.outcome(&state, last), Outcome::Draw);
        assert!(game.legal_actions(&state).is_empty());
    }

    #[test]
    fn test_winning_final_move_is_a_win_not_a_draw() {
        // X O X / O X O / O X _ ; X fills 8 completing the main diagonal
        let game = TicTacToe::default();
        let state = game
            .board_from_cells(vec![1, -1, 1, -1, 1, -1, -1, 1, 1])
            .unwrap();
        assert_eq!(game.outcome(&state, Some(8)), Outcome::Win);
    }

    #[test]
    fn test_four_by_four_needs_full_line() {
        let game = TicTacToe::new(4).unwrap();
        let (state, last) = play(&game, &[0, 4, 1, 5, 2]);
        assert!(!game.is_terminal(&state, last));

        let (state, last) = play(&game, &[0, 4, 1, 5, 2, 6, 3]);
        assert_eq!(game.outcome(&state, last), Outcome::Win);
    }

    #[test]
    fn test_flip_perspective_symmetry() {
        let game = TicTacToe::default();
        let (state, _) = play(&game, &[4, 0, 8]);

        let flipped = game.flip_perspective(&state, Sign::Minus);
        assert_eq!(flipped.get(4), -1);
        assert_eq!(flipped.get(0), 1);
        assert_eq!(game.flip_perspective(&flipped, Sign::Minus), state);
        assert_eq!(game.legal_actions(&flipped), game.legal_actions(&state));
    }

    #[test]
    fn test_render() {
        let game = TicTacToe::default();
        let (state, _) = play(&game, &[0, 4]);

        let rendered = game.render(&state);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "X |   |  ");
        assert_eq!(lines[1], "---------");
        assert_eq!(lines[2], "  | O |  ");
    }
}
