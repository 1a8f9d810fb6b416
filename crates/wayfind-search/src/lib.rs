//! Breadth-first, greedy best-first and A* search over any [`Expander`].
//!
//! Every searcher owns its scratch data and clears it at the start of each search, so one
//! immutable graph can be searched by several searchers at the same time.
//!
//! [`Expander`]: wayfind_core::traits::Expander

mod astar;
mod bfs;
mod gbfs;

pub use crate::astar::*;
pub use crate::bfs::*;
pub use crate::gbfs::*;

use wayfind_core::NodeId;

/// Heuristic that always estimates zero remaining cost.
///
/// A* with this heuristic expands nodes in order of cost from the start, like Dijkstra's
/// algorithm; it is admissible but gives no guidance.
pub fn zero_heuristic(_node: NodeId, _goal: NodeId) -> f64 {
    0.0
}

#[track_caller]
fn checked_heuristic(h: f64) -> f64 {
    assert!(!h.is_nan(), "heuristic returned NaN");
    h
}
