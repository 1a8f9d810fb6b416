use std::fmt;

use enumset::EnumSet;
use log::{debug, info};
use wayfind_core::traits::{Cost, Edge, Expander};
use wayfind_core::{NodeId, OwnerId};
use wayfind_search::AStarSearcher;

use crate::{
    BuildError, Direction, Grid, GridConfig, GridError, Position, Tile, TileCoord, TileState,
};

/// Move between two orthogonally adjacent tiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
    pub direction: Direction,
}

impl Edge for GridEdge {
    fn source(&self) -> NodeId {
        self.from
    }

    fn target(&self) -> NodeId {
        self.to
    }
}

impl Cost for GridEdge {
    fn cost(&self) -> f64 {
        self.cost
    }
}

/// The tiles of a [`TowerGrid`] seen as a graph.
///
/// Every tile is a node connected to its in-bounds orthogonal neighbours. Blocked tiles have no
/// edges in either direction. Moving between tiles costs the tile size.
pub struct TileMap {
    owner: OwnerId,
    tiles: Grid<Tile>,
    tile_size: f64,
}

impl TileMap {
    /// Node of the tile at `coord`.
    #[track_caller]
    pub fn node(&self, coord: TileCoord) -> NodeId {
        assert!(self.tiles.contains(coord), "tile coordinate out of bounds");
        NodeId::new(self.owner, self.tiles.index(coord))
    }

    /// Tile coordinate of a node of this map.
    #[track_caller]
    pub fn coord(&self, node: NodeId) -> TileCoord {
        assert!(self.owns(node), "node belongs to a different graph");
        self.tiles.coord(node.index())
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// Straight-line distance between the centres of two tiles.
    ///
    /// Never more than the cost of walking between them, so it is an admissible A* heuristic.
    pub fn distance(&self, a: NodeId, b: NodeId) -> f64 {
        let a = self.tiles[self.coord(a)].position;
        let b = self.tiles[self.coord(b)].position;
        a.distance(b)
    }
}

impl Expander for TileMap {
    type Edge = GridEdge;

    fn owns(&self, node: NodeId) -> bool {
        node.owner() == self.owner && node.index() < self.tiles.storage().len()
    }

    fn expand(&self, node: NodeId, edges: &mut Vec<GridEdge>) {
        let from = self.coord(node);
        let tile = &self.tiles[from];
        if tile.blocked {
            return;
        }
        for direction in tile.neighbors {
            let Some(to) = direction.step(from, self.tiles.rows(), self.tiles.cols()) else {
                continue;
            };
            if self.tiles[to].blocked {
                continue;
            }
            edges.push(GridEdge {
                from: node,
                to: self.node(to),
                cost: self.tile_size,
                direction,
            });
        }
    }
}

/// Tower-defense play field.
///
/// Enemies walk from the Start tile to the Base tile. Towers block tiles; a tower is only built if
/// some path from Start to Base remains afterwards, so such a path always exists.
///
/// Paths are searched from Base back to Start, so the parent of each tile found by the search is
/// the next tile on the way to Base.
pub struct TowerGrid {
    config: GridConfig,
    map: TileMap,
    searcher: AStarSearcher<GridEdge>,
    selected: Option<TileCoord>,
}

impl TowerGrid {
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;

        let GridConfig {
            rows,
            cols,
            tile_size,
            start_y,
            start,
            base,
        } = config;
        let mut tiles = Grid::new(rows, cols, |coord| {
            Tile::new(Position {
                x: tile_size / 2.0 + coord.col as f64 * tile_size,
                y: start_y + coord.row as f64 * tile_size,
            })
        });
        tiles[start].state = TileState::Start;
        tiles[base].state = TileState::Base;

        let mut grid = TowerGrid {
            config,
            map: TileMap {
                owner: OwnerId::fresh(),
                tiles,
                tile_size,
            },
            searcher: AStarSearcher::new(),
            selected: None,
        };
        grid.build_adjacency();
        grid.find_path(base, start);
        grid.update_path_tiles();
        Ok(grid)
    }

    /// Connects every tile to its in-bounds orthogonal neighbours.
    pub fn build_adjacency(&mut self) {
        let (rows, cols) = (self.rows(), self.cols());
        for coord in self.map.tiles.coords() {
            self.map.tiles[coord].neighbors = EnumSet::<Direction>::all()
                .iter()
                .filter(|dir| dir.step(coord, rows, cols).is_some())
                .collect();
        }
    }

    /// Runs A* from `start` to `goal` over the unblocked tiles and returns whether a path exists.
    ///
    /// Afterwards [`TowerGrid::next_hop`] and [`TowerGrid::path`] describe this search.
    #[track_caller]
    pub fn find_path(&mut self, start: TileCoord, goal: TileCoord) -> bool {
        let map = &self.map;
        let found = self
            .searcher
            .search(map, map.node(start), map.node(goal), |node, goal| {
                map.distance(node, goal)
            });
        matches!(found, Ok(true))
    }

    /// Retags tiles so that exactly the tiles strictly between Start and Base on the current path
    /// are [`TileState::Path`].
    pub fn update_path_tiles(&mut self) {
        for tile in self.map.tiles.storage_mut() {
            if !matches!(tile.state, TileState::Start | TileState::Base) {
                tile.state = TileState::Default;
            }
        }

        let path = self.path();
        if let [_, between @ .., _] = path.as_slice() {
            for &coord in between {
                self.map.tiles[coord].state = TileState::Path;
            }
        }
    }

    /// Selects the tile under the screen coordinate `(x, y)`.
    ///
    /// Returns the selected tile, or `None` if the point is outside the grid or on the Start or
    /// Base tile, in which case the selection is unchanged.
    pub fn process_click(&mut self, x: i32, y: i32) -> Option<TileCoord> {
        let tile_size = self.config.tile_size;
        let col = (x as f64 / tile_size).floor();
        let row = ((y as f64 - (self.config.start_y - tile_size / 2.0)) / tile_size).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        self.select_tile(TileCoord::new(row as usize, col as usize))
    }

    /// Selects `coord`, deselecting the previous selection. Start, Base and coordinates off the
    /// grid cannot be selected.
    pub fn select_tile(&mut self, coord: TileCoord) -> Option<TileCoord> {
        let tile = self.map.tiles.get(coord)?;
        if matches!(tile.state, TileState::Start | TileState::Base) {
            return None;
        }
        if let Some(previous) = self.selected.take() {
            self.map.tiles[previous].selected = false;
        }
        self.map.tiles[coord].selected = true;
        self.selected = Some(coord);
        Some(coord)
    }

    /// Builds a tower on the selected tile, unless that would leave no path from Start to Base.
    pub fn build_tower(&mut self) -> Result<TileCoord, BuildError> {
        let coord = self.selected.ok_or(BuildError::NoSelection)?;
        if self.map.tiles[coord].blocked {
            return Err(BuildError::AlreadyBlocked(coord));
        }

        let (start, base) = (self.start_tile(), self.end_tile());
        self.map.tiles[coord].blocked = true;
        let result = if self.find_path(base, start) {
            info!("built tower at {coord}");
            Ok(coord)
        } else {
            debug!("tower at {coord} would block the path");
            self.map.tiles[coord].blocked = false;
            self.find_path(base, start);
            Err(BuildError::WouldBlockPath(coord))
        };
        self.update_path_tiles();
        result
    }

    pub fn start_tile(&self) -> TileCoord {
        self.config.start
    }

    pub fn end_tile(&self) -> TileCoord {
        self.config.base
    }

    pub fn selected(&self) -> Option<TileCoord> {
        self.selected
    }

    #[track_caller]
    pub fn tile(&self, coord: TileCoord) -> &Tile {
        &self.map.tiles[coord]
    }

    /// All tiles with their coordinates, in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (TileCoord, &Tile)> {
        self.map.tiles.coords().zip(self.map.tiles.storage())
    }

    /// Coordinates of every tower.
    pub fn towers(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.tiles()
            .filter(|(_, tile)| tile.blocked)
            .map(|(coord, _)| coord)
    }

    /// The tile to move to from `coord` on the way to the goal of the last search's start, i.e. the
    /// parent of `coord` in the last search. For the grid's own searches that is the next tile
    /// towards Base.
    pub fn next_hop(&self, coord: TileCoord) -> Option<TileCoord> {
        let node = self.map.node(coord);
        let edge = self.searcher.record(node)?.parent_edge?;
        Some(self.map.coord(edge.from))
    }

    /// Tiles of the last search's path, from its goal back to its start. For the grid's own
    /// searches that is Start to Base. Empty if the last search failed.
    pub fn path(&self) -> Vec<TileCoord> {
        let Some(path) = self.searcher.path() else {
            return vec![];
        };
        path.nodes()
            .into_iter()
            .rev()
            .map(|node| self.map.coord(node))
            .collect()
    }

    /// The tiles as a graph, for running other searches over the same layout.
    pub fn tile_map(&self) -> &TileMap {
        &self.map
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.map.tiles.rows()
    }

    pub fn cols(&self) -> usize {
        self.map.tiles.cols()
    }
}

/// One character per tile: `S` start, `B` base, `#` tower, `*` path, `.` anything else.
impl fmt::Display for TowerGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let tile = self.tile(TileCoord::new(row, col));
                let c = match tile.state {
                    TileState::Start => 'S',
                    TileState::Base => 'B',
                    _ if tile.blocked => '#',
                    TileState::Path => '*',
                    TileState::Default => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_pcg::Pcg64;
    use wayfind_search::BreadthFirstSearcher;

    use super::*;

    fn small() -> TowerGrid {
        TowerGrid::new(GridConfig {
            tile_size: 1.0,
            start_y: 0.0,
            ..GridConfig::sized(3, 4)
        })
        .unwrap()
    }

    fn build_at(grid: &mut TowerGrid, coord: TileCoord) -> Result<TileCoord, BuildError> {
        assert_eq!(grid.select_tile(coord), Some(coord));
        grid.build_tower()
    }

    #[test]
    fn initial_path_is_straight() {
        let grid = TowerGrid::new(GridConfig::default()).unwrap();
        let path = grid.path();
        assert_eq!(path.len(), 16);
        assert_eq!(path.first(), Some(&grid.start_tile()));
        assert_eq!(path.last(), Some(&grid.end_tile()));
        assert!(path.iter().all(|c| c.row == 3));
        assert_eq!(grid.tile(TileCoord::new(3, 0)).state(), TileState::Start);
        assert_eq!(grid.tile(TileCoord::new(3, 15)).state(), TileState::Base);
        assert_eq!(grid.tile(TileCoord::new(3, 7)).state(), TileState::Path);
        assert_eq!(grid.tile(TileCoord::new(2, 7)).state(), TileState::Default);
        assert_eq!(
            grid.tiles()
                .filter(|(_, t)| t.state() == TileState::Path)
                .count(),
            14
        );
    }

    #[test]
    fn next_hop_leads_to_base() {
        let grid = TowerGrid::new(GridConfig::default()).unwrap();
        let mut coord = grid.start_tile();
        let mut steps = 0;
        while coord != grid.end_tile() {
            coord = grid.next_hop(coord).unwrap();
            steps += 1;
        }
        assert_eq!(steps, 15);
        assert_eq!(grid.next_hop(grid.end_tile()), None);
    }

    #[test]
    fn positions_follow_layout() {
        let grid = TowerGrid::new(GridConfig::default()).unwrap();
        let tile = grid.tile(TileCoord::new(2, 3));
        assert_eq!(tile.position(), Position { x: 224.0, y: 320.0 });
    }

    #[test]
    fn adjacency_is_orthogonal() {
        let grid = small();
        let corner = grid.tile(TileCoord::new(0, 0)).neighbors();
        assert_eq!(corner, Direction::South | Direction::East);
        assert_eq!(grid.tile(TileCoord::new(1, 1)).neighbors(), EnumSet::all());
    }

    #[test]
    fn click_selects_tiles() {
        let mut grid = TowerGrid::new(GridConfig::default()).unwrap();
        // Row 0 spans y in [160, 224).
        assert_eq!(grid.process_click(10, 165), Some(TileCoord::new(0, 0)));
        assert!(grid.tile(TileCoord::new(0, 0)).is_selected());
        assert_eq!(grid.process_click(70, 230), Some(TileCoord::new(1, 1)));
        assert!(!grid.tile(TileCoord::new(0, 0)).is_selected());
        assert_eq!(grid.selected(), Some(TileCoord::new(1, 1)));

        assert_eq!(grid.process_click(10, 100), None);
        assert_eq!(grid.process_click(-5, 165), None);
        assert_eq!(grid.process_click(16 * 64, 165), None);
        assert_eq!(grid.process_click(10, 160 + 7 * 64), None);
        // Start tile.
        assert_eq!(grid.process_click(10, 160 + 3 * 64), None);
        assert_eq!(grid.selected(), Some(TileCoord::new(1, 1)));
    }

    #[test]
    fn tower_diverts_path() {
        let mut grid = TowerGrid::new(GridConfig::default()).unwrap();
        let on_path = TileCoord::new(3, 5);
        assert_eq!(build_at(&mut grid, on_path), Ok(on_path));
        assert!(grid.tile(on_path).is_blocked());
        assert_ne!(grid.tile(on_path).state(), TileState::Path);
        let path = grid.path();
        assert!(!path.contains(&on_path));
        assert_eq!(path.len(), 18);
        assert_eq!(grid.towers().collect::<Vec<_>>(), vec![on_path]);
        assert_eq!(
            build_at(&mut grid, on_path),
            Err(BuildError::AlreadyBlocked(on_path))
        );
    }

    #[test]
    fn refuses_to_cut_the_last_path() {
        let mut grid = TowerGrid::new(GridConfig::default()).unwrap();
        for row in [0, 1, 2, 4, 5, 6] {
            let coord = TileCoord::new(row, 5);
            assert_eq!(build_at(&mut grid, coord), Ok(coord));
        }

        let gap = TileCoord::new(3, 5);
        assert_eq!(build_at(&mut grid, gap), Err(BuildError::WouldBlockPath(gap)));
        assert!(!grid.tile(gap).is_blocked());
        assert_eq!(grid.tile(gap).state(), TileState::Path);
        assert_eq!(grid.path().len(), 16);
        assert!(grid.find_path(grid.end_tile(), grid.start_tile()));
    }

    #[test]
    fn build_without_selection() {
        let mut grid = small();
        assert_eq!(grid.build_tower(), Err(BuildError::NoSelection));
    }

    #[test]
    fn start_and_base_cannot_be_selected() {
        let mut grid = small();
        assert_eq!(grid.select_tile(grid.start_tile()), None);
        assert_eq!(grid.select_tile(grid.end_tile()), None);
        assert_eq!(grid.selected(), None);
    }

    #[test]
    fn selecting_off_the_grid_keeps_the_selection() {
        let mut grid = small();
        let inside = TileCoord::new(0, 0);
        assert_eq!(grid.select_tile(inside), Some(inside));
        for outside in [
            TileCoord::new(grid.rows(), 0),
            TileCoord::new(0, grid.cols()),
            TileCoord::new(usize::MAX, usize::MAX),
        ] {
            assert_eq!(grid.select_tile(outside), None);
        }
        assert_eq!(grid.selected(), Some(inside));
        assert!(grid.tile(inside).is_selected());
    }

    #[test]
    fn random_towers_never_cut_the_path() {
        let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
        let mut grid = TowerGrid::new(GridConfig::sized(6, 8)).unwrap();
        let mut rejected = 0;
        for _ in 0..200 {
            let coord = TileCoord::new(rng.gen_range(0..6), rng.gen_range(0..8));
            if grid.select_tile(coord).is_none() {
                continue;
            }
            match grid.build_tower() {
                Ok(built) => assert_eq!(built, coord),
                Err(BuildError::WouldBlockPath(_)) => {
                    rejected += 1;
                    assert!(!grid.tile(coord).is_blocked());
                }
                Err(BuildError::AlreadyBlocked(_)) => {}
                Err(BuildError::NoSelection) => unreachable!(),
            }
            assert!(grid.find_path(grid.end_tile(), grid.start_tile()));
            let path = grid.path();
            assert_eq!(path.first(), Some(&grid.start_tile()));
            assert_eq!(path.last(), Some(&grid.end_tile()));
            assert!(path.iter().all(|&c| !grid.tile(c).is_blocked()));
        }
        assert!(rejected > 0);
    }

    #[test]
    fn blocked_tiles_have_no_edges() {
        let mut grid = small();
        let wall = TileCoord::new(1, 1);
        build_at(&mut grid, wall).unwrap();
        let map = grid.tile_map();
        let mut edges = vec![];
        map.expand(map.node(wall), &mut edges);
        assert!(edges.is_empty());
        map.expand(map.node(TileCoord::new(0, 1)), &mut edges);
        assert!(edges.iter().all(|e| e.to != map.node(wall)));
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn other_searchers_can_share_the_map() {
        let grid = TowerGrid::new(GridConfig::default()).unwrap();
        let map = grid.tile_map();
        let mut bfs = BreadthFirstSearcher::new();
        let found = bfs.search(map, map.node(grid.start_tile()), map.node(grid.end_tile()));
        assert_eq!(found, Ok(true));
        assert_eq!(bfs.path().unwrap().hops(), 15);
    }

    #[test]
    fn renders_as_text() {
        let mut grid = small();
        build_at(&mut grid, TileCoord::new(1, 2)).unwrap();
        let text = grid.to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(1).unwrap().starts_with('S'));
        assert!(text.lines().nth(1).unwrap().ends_with('B'));
        assert_eq!(text.matches('#').count(), 1);
    }
}
