use thiserror::Error;

use crate::TileCoord;

/// Invalid grid configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GridError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    Empty { rows: usize, cols: usize },

    #[error("a {rows}x{cols} grid has more tiles than node ids can address")]
    TooLarge { rows: usize, cols: usize },

    #[error("tile size must be positive and finite, got {0}")]
    TileSize(f64),

    #[error("{which} tile {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        which: &'static str,
        coord: TileCoord,
        rows: usize,
        cols: usize,
    },

    #[error("start and base must be different tiles, both are {0}")]
    StartIsBase(TileCoord),

    #[error("failed to parse grid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Why a tower could not be built.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    #[error("no tile is selected")]
    NoSelection,

    #[error("tile {0} already has a tower")]
    AlreadyBlocked(TileCoord),

    #[error("a tower on {0} would cut every path from start to base")]
    WouldBlockPath(TileCoord),
}
