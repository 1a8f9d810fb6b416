use std::fmt;
use std::str::FromStr;

use crate::{alpha_beta_decide_depth, GameState, ParseBoardError};

const ROWS: usize = 6;
const COLS: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Disc {
    #[default]
    Empty,
    /// The human player. Moves first and minimizes.
    Red,
    /// The computer. Maximizes.
    Yellow,
}

impl Disc {
    fn as_char(self) -> char {
        match self {
            Disc::Empty => '.',
            Disc::Red => 'R',
            Disc::Yellow => 'Y',
        }
    }
}

/// Every line of four cells on the board: horizontal, vertical and both diagonals.
fn windows() -> impl Iterator<Item = [(usize, usize); 4]> {
    const STEPS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];
    (0..ROWS)
        .flat_map(|row| (0..COLS).map(move |col| (row, col)))
        .flat_map(|start| STEPS.iter().map(move |&step| (start, step)))
        .filter_map(|((row, col), (dr, dc))| {
            let end_row = row as isize + 3 * dr;
            let end_col = col as isize + 3 * dc;
            if !(0..ROWS as isize).contains(&end_row) || !(0..COLS as isize).contains(&end_col) {
                return None;
            }
            Some([0, 1, 2, 3].map(|i| {
                (
                    (row as isize + i * dr) as usize,
                    (col as isize + i * dc) as usize,
                )
            }))
        })
}

/// A Connect Four board of 6 rows by 7 columns. Row 0 is the top; discs fall towards row 5.
///
/// The text form lists rows top to bottom as `R`, `Y` and `.`, with `/` or whitespace between
/// rows ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ConnectFour {
    pub cells: [[Disc; COLS]; ROWS],
}

impl ConnectFour {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;

    /// Row a disc dropped into `col` lands on, or `None` if the column is full or off the board.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Disc::Empty)
    }

    /// The board after dropping `disc` into `col`.
    pub fn dropped(&self, col: usize, disc: Disc) -> Option<ConnectFour> {
        let row = self.landing_row(col)?;
        let mut next = *self;
        next.cells[row][col] = disc;
        Some(next)
    }

    /// Owner of the first line of four found.
    pub fn four_in_a_row(&self) -> Option<Disc> {
        windows().find_map(|window| {
            let [a, b, c, d] = window.map(|(row, col)| self.cells[row][col]);
            (a != Disc::Empty && a == b && b == c && c == d).then_some(a)
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|&disc| disc != Disc::Empty)
    }

    /// Whether Yellow moves next. Red moves first.
    pub fn yellow_to_move(&self) -> bool {
        let count = |disc: Disc| self.cells.iter().flatten().filter(|&&d| d == disc).count();
        count(Disc::Red) > count(Disc::Yellow)
    }

    /// The column played to get from `self` to `next`, if exactly one disc was added.
    pub fn move_to(&self, next: &ConnectFour) -> Option<usize> {
        let mut changed = (0..COLS).filter(|&col| {
            (0..ROWS).any(|row| self.cells[row][col] != next.cells[row][col])
        });
        let col = changed.next()?;
        changed.next().is_none().then_some(col)
    }

    /// Drops a red disc into `col`. Fails if the game is over or the column cannot take a disc.
    pub fn try_player_move(&mut self, col: usize) -> bool {
        if self.is_terminal() {
            return false;
        }
        match self.dropped(col, Disc::Red) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    /// Plays the computer's move, searching `depth` moves ahead, and returns the column played.
    pub fn cpu_move(&mut self, depth: usize) -> Option<usize> {
        let choice = alpha_beta_decide_depth(&*self, depth)?;
        let col = self.move_to(&choice.state);
        *self = choice.state;
        col
    }

    /// Estimate of a position that is not over, strictly between -1 and 1.
    ///
    /// Each line of four holding discs of only one colour counts the square of its disc count,
    /// for Yellow and against Red.
    fn heuristic(&self) -> f64 {
        let mut total = 0.0;
        for window in windows() {
            let discs = window.map(|(row, col)| self.cells[row][col]);
            let yellow = discs.iter().filter(|&&d| d == Disc::Yellow).count() as f64;
            let red = discs.iter().filter(|&&d| d == Disc::Red).count() as f64;
            if red == 0.0 {
                total += yellow * yellow;
            } else if yellow == 0.0 {
                total -= red * red;
            }
        }
        total / (total.abs() + 100.0)
    }
}

impl GameState for ConnectFour {
    /// One successor per column that can take a disc, left to right.
    fn successors(&self, max_to_move: bool, out: &mut Vec<Self>) {
        if self.is_terminal() {
            return;
        }
        let disc = if max_to_move { Disc::Yellow } else { Disc::Red };
        out.extend((0..COLS).filter_map(|col| self.dropped(col, disc)));
    }

    /// `1` for a Yellow win, `-1` for a Red win, `0` for a draw, and the heuristic estimate for
    /// a game still in progress.
    fn score(&self) -> f64 {
        match self.four_in_a_row() {
            Some(Disc::Yellow) => 1.0,
            Some(_) => -1.0,
            None if self.is_full() => 0.0,
            None => self.heuristic(),
        }
    }

    fn is_terminal(&self) -> bool {
        self.is_full() || self.four_in_a_row().is_some()
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            for disc in row {
                write!(f, "{}", disc.as_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for ConnectFour {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let discs = s
            .chars()
            .filter(|&c| c != '/' && !c.is_whitespace())
            .map(|c| match c {
                'R' | 'r' => Ok(Disc::Red),
                'Y' | 'y' => Ok(Disc::Yellow),
                '.' | '_' | '-' => Ok(Disc::Empty),
                _ => Err(ParseBoardError::InvalidCell(c)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if discs.len() != ROWS * COLS {
            return Err(ParseBoardError::CellCount {
                expected: ROWS * COLS,
                found: discs.len(),
            });
        }

        let mut board = ConnectFour::default();
        for (i, disc) in discs.into_iter().enumerate() {
            board.cells[i / COLS][i % COLS] = disc;
        }
        for row in 0..ROWS - 1 {
            for col in 0..COLS {
                if board.cells[row][col] != Disc::Empty && board.cells[row + 1][col] == Disc::Empty
                {
                    return Err(ParseBoardError::Floating { row, col });
                }
            }
        }
        Ok(board)
    }
}
