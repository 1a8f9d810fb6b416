use std::fmt;

use serde::Deserialize;

/// Row and column of a cell. Row 0 is the top row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct TileCoord {
    pub row: usize,
    pub col: usize,
}

impl TileCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        TileCoord { row, col }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Dense row-major `rows x cols` array of cells.
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Box<[T]>,
}

impl<T> Grid<T> {
    pub fn new(rows: usize, cols: usize, f: impl FnMut(TileCoord) -> T) -> Self {
        let cells = (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| TileCoord { row, col }))
            .map(f)
            .collect();
        Grid { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn storage(&self) -> &[T] {
        &self.cells
    }

    pub fn storage_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn get(&self, coord: TileCoord) -> Option<&T> {
        self.contains(coord).then(|| &self.cells[self.index(coord)])
    }

    pub fn get_mut(&mut self, coord: TileCoord) -> Option<&mut T> {
        match self.contains(coord) {
            true => {
                let index = self.index(coord);
                Some(&mut self.cells[index])
            }
            false => None,
        }
    }

    /// Row-major position of `coord` in [`Grid::storage`].
    #[inline(always)]
    pub fn index(&self, coord: TileCoord) -> usize {
        self.cols * coord.row + coord.col
    }

    /// Inverse of [`Grid::index`].
    #[inline(always)]
    pub fn coord(&self, index: usize) -> TileCoord {
        TileCoord {
            row: index / self.cols,
            col: index % self.cols,
        }
    }

    /// Every coordinate of the grid in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| TileCoord { row, col }))
    }

    #[track_caller]
    #[inline(always)]
    fn bounds_check(&self, coord: TileCoord) {
        assert!(coord.row < self.rows, "row out of bounds");
        assert!(coord.col < self.cols, "col out of bounds");
    }
}

impl<T> std::ops::Index<TileCoord> for Grid<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, coord: TileCoord) -> &T {
        self.bounds_check(coord);
        &self.cells[self.index(coord)]
    }
}

impl<T> std::ops::IndexMut<TileCoord> for Grid<T> {
    #[track_caller]
    fn index_mut(&mut self, coord: TileCoord) -> &mut T {
        self.bounds_check(coord);
        let index = self.index(coord);
        &mut self.cells[index]
    }
}
