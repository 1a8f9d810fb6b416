use std::collections::VecDeque;

use ahash::AHashMap;
use log::debug;
use wayfind_core::traits::{Edge, Expander};
use wayfind_core::{GraphError, NodeId, Path};

/// Shortest path by number of edges. Edge costs are ignored.
pub struct BreadthFirstSearcher<E> {
    // The start node maps to `None`; every other reached node maps to the edge it was first
    // reached through.
    parents: AHashMap<NodeId, Option<E>>,
    queue: VecDeque<NodeId>,
    edges: Vec<E>,
    last: Option<(NodeId, NodeId, bool)>,
}

impl<E: Edge> BreadthFirstSearcher<E> {
    pub fn new() -> Self {
        BreadthFirstSearcher {
            parents: AHashMap::new(),
            queue: VecDeque::new(),
            edges: vec![],
            last: None,
        }
    }

    /// Searches for a path from `start` to `goal` with the fewest edges.
    ///
    /// Returns `Ok(false)` when the goal is unreachable.
    pub fn search<X>(
        &mut self,
        expander: &X,
        start: NodeId,
        goal: NodeId,
    ) -> Result<bool, GraphError>
    where
        X: Expander<Edge = E>,
    {
        expander.check(start)?;
        expander.check(goal)?;

        self.parents.clear();
        self.queue.clear();
        debug!("breadth-first search from {start:?} to {goal:?}");

        let mut found = false;
        self.parents.insert(start, None);
        self.queue.push_back(start);

        while let Some(current) = self.queue.pop_front() {
            if current == goal {
                found = true;
                break;
            }

            self.edges.clear();
            expander.expand(current, &mut self.edges);
            for &edge in &self.edges {
                let node = edge.target();
                if !self.parents.contains_key(&node) {
                    self.parents.insert(node, Some(edge));
                    self.queue.push_back(node);
                }
            }
        }

        debug!(
            "breadth-first search {} after reaching {} nodes",
            if found { "reached goal" } else { "exhausted queue" },
            self.parents.len()
        );
        self.last = Some((start, goal, found));
        Ok(found)
    }

    /// Whether the last search reached `node`.
    pub fn reached(&self, node: NodeId) -> bool {
        self.parents.contains_key(&node)
    }

    /// The node `node` was first reached from, or `None` for the start and unreached nodes.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent_edge(node).map(|e| e.source())
    }

    /// The edge `node` was first reached through.
    pub fn parent_edge(&self, node: NodeId) -> Option<E> {
        self.parents.get(&node).copied().flatten()
    }

    /// Every node reached by the last search, with its parent.
    pub fn parents(&self) -> impl Iterator<Item = (NodeId, Option<NodeId>)> + '_ {
        self.parents
            .iter()
            .map(|(&node, edge)| (node, edge.map(|e| e.source())))
    }

    /// Path with the fewest edges found by the last search, if it reached the goal.
    pub fn path(&self) -> Option<Path<E>> {
        let (start, goal, true) = self.last? else {
            return None;
        };
        Path::from_parents(start, goal, |node| self.parent_edge(node))
    }
}

impl<E: Edge> Default for BreadthFirstSearcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use wayfind_core::{Graph, WeightedGraph};

    use super::*;

    fn lattice(rows: usize, cols: usize) -> (Graph, Vec<NodeId>) {
        let mut graph = Graph::new();
        let nodes: Vec<_> = (0..rows * cols).map(|_| graph.add_node()).collect();
        for i in 0..rows {
            for j in 0..cols {
                let node = nodes[i * cols + j];
                if i > 0 {
                    graph.add_edge(node, nodes[(i - 1) * cols + j]).unwrap();
                }
                if i + 1 < rows {
                    graph.add_edge(node, nodes[(i + 1) * cols + j]).unwrap();
                }
                if j > 0 {
                    graph.add_edge(node, nodes[i * cols + j - 1]).unwrap();
                }
                if j + 1 < cols {
                    graph.add_edge(node, nodes[i * cols + j + 1]).unwrap();
                }
            }
        }
        (graph, nodes)
    }

    #[test]
    fn sample_lattice() {
        let (graph, nodes) = lattice(5, 5);
        let mut bfs = BreadthFirstSearcher::new();
        assert_eq!(bfs.search(&graph, nodes[0], nodes[9]), Ok(true));
        let path = bfs.path().unwrap();
        assert_eq!(path.hops(), 5);
        assert_eq!(path.nodes().first(), Some(&nodes[0]));
        assert_eq!(path.nodes().last(), Some(&nodes[9]));
        assert_eq!(bfs.parent(nodes[0]), None);
        assert!(bfs.reached(nodes[0]));
    }

    #[test]
    fn start_is_never_reenqueued() {
        let mut graph = Graph::new();
        let a = graph.add_node();
        let b = graph.add_node();
        let c = graph.add_node();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, a).unwrap();
        graph.add_edge(b, c).unwrap();
        let mut bfs = BreadthFirstSearcher::new();
        assert_eq!(bfs.search(&graph, a, c), Ok(true));
        assert_eq!(bfs.parent(a), None);
        assert_eq!(bfs.parent(b), Some(a));
        assert_eq!(bfs.parent(c), Some(b));
        assert_eq!(bfs.parents().count(), 3);
    }

    #[test]
    fn ignores_weights() {
        let mut graph = WeightedGraph::new();
        let [s, a, g] = [(); 3].map(|_| graph.add_node());
        graph.add_edge(s, g, 100.0).unwrap();
        graph.add_edge(s, a, 1.0).unwrap();
        graph.add_edge(a, g, 1.0).unwrap();
        let mut bfs = BreadthFirstSearcher::new();
        assert_eq!(bfs.search(&graph, s, g), Ok(true));
        assert_eq!(bfs.path().unwrap().hops(), 1);
    }

    #[test]
    fn unreachable_goal() {
        let mut graph = Graph::new();
        let a = graph.add_node();
        let b = graph.add_node();
        graph.add_edge(b, a).unwrap();
        let mut bfs = BreadthFirstSearcher::new();
        assert_eq!(bfs.search(&graph, a, b), Ok(false));
        assert!(!bfs.reached(b));
        assert!(bfs.path().is_none());
    }

    #[test]
    fn foreign_start() {
        let (graph, _) = lattice(2, 2);
        let (_, other) = lattice(2, 2);
        let mut bfs = BreadthFirstSearcher::new();
        assert_eq!(
            bfs.search(&graph, other[0], other[1]),
            Err(GraphError::ForeignNode(other[0]))
        );
    }
}
