//! Row-major grid of signed marks shared by the grid games.

use std::fmt;
use uct_core::{Result, Sign, UctError};

/// Directions checked for lines: horizontal, vertical, diagonal, anti-diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A grid board.
///
/// Cells hold `1` (player to move), `-1` (opponent) or `0` (empty).
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<i8>,
}

impl Board {
    /// Create an empty board.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Create a board from row-major cells.
    ///
    /// # Errors
    /// Returns `UctError::InvalidBoard` if the cell count does not match the
    /// dimensions or a cell is not one of -1, 0, 1.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<i8>) -> Result<Self> {
        if cells.len() != rows * cols {
            return Err(UctError::InvalidBoard(format!(
                "expected {} cells for a {}x{} board, got {}",
                rows * cols,
                rows,
                cols,
                cells.len()
            )));
        }
        if let Some(bad) = cells.iter().find(|c| !(-1..=1).contains(*c)) {
            return Err(UctError::InvalidBoard(format!(
                "cell value {} is not one of -1, 0, 1",
                bad
            )));
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    /// Mark at a flattened index, 0 if out of range.
    pub fn get(&self, index: usize) -> i8 {
        self.cells.get(index).copied().unwrap_or(0)
    }

    /// Mark at `(row, col)`, 0 if out of range.
    pub fn at(&self, row: usize, col: usize) -> i8 {
        if row >= self.rows || col >= self.cols {
            return 0;
        }
        self.cells[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, index: usize, sign: Sign) {
        self.cells[index] = sign.as_i8();
    }

    /// Flattened indices of empty cells, ascending.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == 0)
            .map(|(i, _)| i)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }

    /// Number of cells marked by `sign`.
    pub fn count(&self, sign: Sign) -> usize {
        let mark = sign.as_i8();
        self.cells.iter().filter(|&&c| c == mark).count()
    }

    /// Every mark multiplied by `sign`.
    pub fn flipped(&self, sign: Sign) -> Self {
        let factor = sign.as_i8();
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|&c| c * factor).collect(),
        }
    }

    /// Length of the longest straight run of same-owner marks through `index`.
    ///
    /// Returns 0 for an empty or out-of-range cell.
    pub fn longest_line_through(&self, index: usize) -> usize {
        if index >= self.cells.len() {
            return 0;
        }
        let owner = self.cells[index];
        if owner == 0 {
            return 0;
        }
        let row = (index / self.cols) as isize;
        let col = (index % self.cols) as isize;

        DIRECTIONS
            .iter()
            .map(|&(dr, dc)| {
                1 + self.run_length(row, col, dr, dc, owner)
                    + self.run_length(row, col, -dr, -dc, owner)
            })
            .max()
            .unwrap_or(0)
    }

    /// Consecutive `owner` marks starting one step from `(row, col)` towards `(dr, dc)`.
    fn run_length(&self, row: isize, col: isize, dr: isize, dc: isize, owner: i8) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row + dr, col + dc);
        while r >= 0
            && c >= 0
            && (r as usize) < self.rows
            && (c as usize) < self.cols
            && self.cells[r as usize * self.cols + c as usize] == owner
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

/// Symbol for a mark: `X` for +1, `O` for -1, blank when empty.
pub fn symbol(mark: i8) -> char {
    match mark {
        1 => 'X',
        -1 => 'O',
        _ => ' ',
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                write!(f, "{}", symbol(self.at(row, col)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
