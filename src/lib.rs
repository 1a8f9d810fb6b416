//! Graph search for games: breadth-first, greedy best-first and A* over any graph, a
//! tower-defense grid that keeps its path open, and minimax game trees.

pub use wayfind_core::*;
pub use wayfind_gametree as gametree;
pub use wayfind_grid as grid;
pub use wayfind_search::*;
