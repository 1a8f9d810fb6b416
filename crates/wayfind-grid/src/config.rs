use serde::Deserialize;

use crate::{GridError, TileCoord};

/// Layout of a [`TowerGrid`](crate::TowerGrid).
///
/// Missing fields take their [`Default`] values: a 7 x 16 level with 64-unit tiles.
///
/// ```toml
/// rows = 5
/// cols = 8
/// tile_size = 32.0
/// start = { row = 2, col = 0 }
/// base = { row = 2, col = 7 }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Side length of a tile in world units; also the cost of moving between neighbours.
    pub tile_size: f64,
    /// World-space y coordinate of the centre of row 0.
    pub start_y: f64,
    pub start: TileCoord,
    pub base: TileCoord,
}

impl GridConfig {
    /// A `rows x cols` grid with Start on the left edge and Base on the right edge of the middle
    /// row.
    pub fn sized(rows: usize, cols: usize) -> Self {
        GridConfig {
            rows,
            cols,
            start: TileCoord::new(rows / 2, 0),
            base: TileCoord::new(rows / 2, cols.saturating_sub(1)),
            ..GridConfig::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, GridError> {
        let config: GridConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::Empty {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let tiles = self.rows.checked_mul(self.cols);
        if tiles.map_or(true, |n| u32::try_from(n).is_err()) {
            return Err(GridError::TooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(GridError::TileSize(self.tile_size));
        }
        for (which, coord) in [("start", self.start), ("base", self.base)] {
            if coord.row >= self.rows || coord.col >= self.cols {
                return Err(GridError::OutOfBounds {
                    which,
                    coord,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        if self.start == self.base {
            return Err(GridError::StartIsBase(self.start));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            rows: 7,
            cols: 16,
            tile_size: 64.0,
            start_y: 192.0,
            start: TileCoord::new(3, 0),
            base: TileCoord::new(3, 15),
        }
    }
}
