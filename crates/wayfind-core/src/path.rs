use crate::traits::{Cost, Edge};
use crate::NodeId;

/// A path from a start node to a goal node, as the sequence of edges traversed.
#[derive(Clone, Debug, PartialEq)]
pub struct Path<E> {
    start: NodeId,
    edges: Vec<E>,
}

impl<E: Edge> Path<E> {
    /// Rebuilds a path by following parent edges backwards from `goal` until `start` is reached.
    ///
    /// Returns `None` if some node on the way has no parent edge.
    pub fn from_parents(
        start: NodeId,
        goal: NodeId,
        mut parent: impl FnMut(NodeId) -> Option<E>,
    ) -> Option<Self> {
        let mut edges = vec![];
        let mut node = goal;
        while node != start {
            let edge = parent(node)?;
            node = edge.source();
            edges.push(edge);
        }
        edges.reverse();
        Some(Path { start, edges })
    }

    /// First node of the path.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Last node of the path.
    pub fn end(&self) -> NodeId {
        self.edges.last().map_or(self.start, |e| e.target())
    }

    /// The traversed edges, in order from start to end.
    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.edges.len()
    }

    /// Whether the path starts at its goal.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All nodes on the path, from start to end inclusive.
    pub fn nodes(&self) -> Vec<NodeId> {
        std::iter::once(self.start)
            .chain(self.edges.iter().map(|e| e.target()))
            .collect()
    }
}

impl<E: Edge + Cost> Path<E> {
    /// Total cost of the traversed edges.
    pub fn cost(&self) -> f64 {
        self.edges.iter().map(|e| e.cost()).sum()
    }
}
