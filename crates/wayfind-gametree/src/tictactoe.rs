use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

/// Rows, then columns, then the two diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

/// A tic-tac-toe board. X is the maximizing player and moves first.
///
/// The text form lists the cells row by row as `X`, `O` and `.` (or `_`, `-` for empty);
/// whitespace and `/` are ignored, so `"O.X/XOO/X.."` is a valid board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TicTacToe {
    pub cells: [[Cell; 3]; 3],
}

impl TicTacToe {
    pub fn new(cells: [[Cell; 3]; 3]) -> Self {
        TicTacToe { cells }
    }

    /// Owner of the first complete line, looking at rows, then columns, then diagonals.
    pub fn winner(&self) -> Option<Cell> {
        LINES.iter().find_map(|line| {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            (a != Cell::Empty && a == b && b == c).then_some(a)
        })
    }

    /// Coordinates of the empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .filter(|&(row, col)| self.cells[row][col] == Cell::Empty)
    }

    /// Whether X moves next, assuming X moved first.
    pub fn x_to_move(&self) -> bool {
        let count = |cell: Cell| self.cells.iter().flatten().filter(|&&c| c == cell).count();
        count(Cell::X) <= count(Cell::O)
    }

    /// The cell that was filled to get from `self` to `next`, if exactly one was.
    pub fn move_to(&self, next: &TicTacToe) -> Option<(usize, usize)> {
        let mut changed = self
            .empty_cells()
            .filter(|&(row, col)| next.cells[row][col] != Cell::Empty);
        let cell = changed.next()?;
        changed.next().is_none().then_some(cell)
    }
}

impl GameState for TicTacToe {
    /// One successor per empty cell, in row-major order. Play continues past a completed line
    /// until the board is full.
    fn successors(&self, max_to_move: bool, out: &mut Vec<Self>) {
        let mark = if max_to_move { Cell::X } else { Cell::O };
        for (row, col) in self.empty_cells() {
            let mut next = *self;
            next.cells[row][col] = mark;
            out.push(next);
        }
    }

    /// `1` if X owns a line, `-1` if O does, `0` otherwise.
    fn score(&self) -> f64 {
        match self.winner() {
            Some(Cell::X) => 1.0,
            Some(Cell::O) => -1.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("invalid cell {0:?}")]
    InvalidCell(char),
    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },
    #[error("disc at row {row}, column {col} has nothing below it")]
    Floating { row: usize, col: usize },
}

impl FromStr for TicTacToe {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|&c| c != '/' && !c.is_whitespace())
            .map(|c| match c {
                'X' | 'x' => Ok(Cell::X),
                'O' | 'o' => Ok(Cell::O),
                '.' | '_' | '-' => Ok(Cell::Empty),
                _ => Err(ParseBoardError::InvalidCell(c)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if cells.len() != 9 {
            return Err(ParseBoardError::CellCount {
                expected: 9,
                found: cells.len(),
            });
        }

        let mut board = TicTacToe::default();
        for (i, cell) in cells.into_iter().enumerate() {
            board.cells[i / 3][i % 3] = cell;
        }
        Ok(board)
    }
}
