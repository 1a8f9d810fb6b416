//! Tile grid for a tower-defense game, searched with A*.
//!
//! The grid keeps a path from its Start tile to its Base tile at all times: a tower that would
//! cut every path is refused.

mod config;
mod direction;
mod error;
mod grid;
mod tile;
mod tower_grid;

pub use self::config::*;
pub use self::direction::*;
pub use self::error::*;
pub use self::grid::*;
pub use self::tile::*;
pub use self::tower_grid::*;
