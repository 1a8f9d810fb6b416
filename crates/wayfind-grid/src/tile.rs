use enumset::EnumSet;

use crate::Direction;

/// What a tile shows. Purely presentational; only `blocked` affects pathfinding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TileState {
    #[default]
    Default,
    /// On the current path from Start to Base.
    Path,
    /// Where enemies enter.
    Start,
    /// What enemies walk towards.
    Base,
}

/// World-space coordinate of a tile's centre.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn distance(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Clone, Debug)]
pub struct Tile {
    pub(crate) state: TileState,
    pub(crate) blocked: bool,
    pub(crate) selected: bool,
    pub(crate) position: Position,
    pub(crate) neighbors: EnumSet<Direction>,
}

impl Tile {
    pub(crate) fn new(position: Position) -> Self {
        Tile {
            state: TileState::Default,
            blocked: false,
            selected: false,
            position,
            neighbors: EnumSet::empty(),
        }
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    /// Whether a tower stands on this tile.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Directions of the in-bounds orthogonal neighbours, blocked or not.
    pub fn neighbors(&self) -> EnumSet<Direction> {
        self.neighbors
    }
}
