use enumset::EnumSetType;

use crate::TileCoord;

/// Orthogonal step between neighbouring tiles. North is towards row 0.
#[derive(EnumSetType, Debug, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub fn backwards(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// The neighbour of `coord` in this direction, if it lies inside a `rows x cols` grid.
    pub fn step(self, coord: TileCoord, rows: usize, cols: usize) -> Option<TileCoord> {
        let TileCoord { row, col } = coord;
        let (row, col) = match self {
            Direction::North => (row.checked_sub(1)?, col),
            Direction::South => (row + 1, col),
            Direction::West => (row, col.checked_sub(1)?),
            Direction::East => (row, col + 1),
        };
        (row < rows && col < cols).then_some(TileCoord { row, col })
    }
}

#[cfg(test)]
mod tests {
    use enumset::EnumSet;

    use super::*;

    #[test]
    fn steps_stay_in_bounds() {
        let corner = TileCoord::new(0, 0);
        assert_eq!(Direction::North.step(corner, 2, 2), None);
        assert_eq!(Direction::West.step(corner, 2, 2), None);
        assert_eq!(Direction::South.step(corner, 2, 2), Some(TileCoord::new(1, 0)));
        assert_eq!(Direction::East.step(corner, 2, 2), Some(TileCoord::new(0, 1)));
        assert_eq!(Direction::East.step(TileCoord::new(0, 1), 2, 2), None);
    }

    #[test]
    fn backwards_undoes_step() {
        let middle = TileCoord::new(1, 1);
        for dir in EnumSet::<Direction>::all() {
            let there = dir.step(middle, 3, 3).unwrap();
            assert_eq!(dir.backwards().step(there, 3, 3), Some(middle));
        }
    }
}
