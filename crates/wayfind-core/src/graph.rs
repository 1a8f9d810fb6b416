use crate::traits::{Cost, Edge, Expander};
use crate::{GraphError, NodeId, OwnerId};

/// Unweighted edge of a [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hop {
    /// Source node.
    pub from: NodeId,
    /// Target node.
    pub to: NodeId,
}

impl Edge for Hop {
    fn source(&self) -> NodeId {
        self.from
    }

    fn target(&self) -> NodeId {
        self.to
    }
}

/// Directed edge of a [`WeightedGraph`].
///
/// Weights are validated to be finite and non-negative when the edge is added.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedEdge {
    /// Source node.
    pub from: NodeId,
    /// Target node.
    pub to: NodeId,
    /// Cost of traversing the edge.
    pub weight: f64,
}

impl Edge for WeightedEdge {
    fn source(&self) -> NodeId {
        self.from
    }

    fn target(&self) -> NodeId {
        self.to
    }
}

impl Cost for WeightedEdge {
    fn cost(&self) -> f64 {
        self.weight
    }
}

/// Unweighted directed graph stored as adjacency lists.
pub struct Graph {
    owner: OwnerId,
    adjacent: Vec<Vec<NodeId>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Graph {
            owner: OwnerId::fresh(),
            adjacent: vec![],
        }
    }

    /// Adds a node with no edges.
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId::new(self.owner, self.adjacent.len());
        self.adjacent.push(vec![]);
        id
    }

    /// Adds a directed edge from `from` to `to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.check(from)?;
        self.check(to)?;
        self.adjacent[from.index()].push(to);
        Ok(())
    }

    /// Nodes reachable from `node` over one edge, in insertion order.
    #[track_caller]
    pub fn adjacent(&self, node: NodeId) -> &[NodeId] {
        assert!(self.owns(node), "node belongs to a different graph");
        &self.adjacent[node.index()]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adjacent.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacent.is_empty()
    }

    /// Whether `node` is a node of this graph.
    pub fn contains(&self, node: NodeId) -> bool {
        self.owns(node)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        (0..self.adjacent.len()).map(|i| NodeId::new(self.owner, i))
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Expander for Graph {
    type Edge = Hop;

    fn owns(&self, node: NodeId) -> bool {
        node.owner() == self.owner && node.index() < self.adjacent.len()
    }

    fn expand(&self, node: NodeId, edges: &mut Vec<Hop>) {
        edges.extend(self.adjacent(node).iter().map(|&to| Hop { from: node, to }));
    }
}

/// Weighted directed multigraph stored as adjacency lists of [`WeightedEdge`]s.
pub struct WeightedGraph {
    owner: OwnerId,
    edges: Vec<Vec<WeightedEdge>>,
}

impl WeightedGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        WeightedGraph {
            owner: OwnerId::fresh(),
            edges: vec![],
        }
    }

    /// Builds a `rows x cols` lattice where every cell is connected to its 4 orthogonal
    /// neighbours with edges of the given weight. Cell `(i, j)` is node `i * cols + j`.
    pub fn lattice(rows: usize, cols: usize, weight: f64) -> Result<Self, GraphError> {
        let mut graph = WeightedGraph::new();
        let nodes: Vec<_> = (0..rows * cols).map(|_| graph.add_node()).collect();
        for i in 0..rows {
            for j in 0..cols {
                let node = nodes[i * cols + j];
                if i > 0 {
                    graph.add_edge(node, nodes[(i - 1) * cols + j], weight)?;
                }
                if i + 1 < rows {
                    graph.add_edge(node, nodes[(i + 1) * cols + j], weight)?;
                }
                if j > 0 {
                    graph.add_edge(node, nodes[i * cols + j - 1], weight)?;
                }
                if j + 1 < cols {
                    graph.add_edge(node, nodes[i * cols + j + 1], weight)?;
                }
            }
        }
        Ok(graph)
    }

    /// Adds a node with no edges.
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId::new(self.owner, self.edges.len());
        self.edges.push(vec![]);
        id
    }

    /// Adds a directed edge. Parallel edges between the same pair of nodes are allowed.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<(), GraphError> {
        self.check(from)?;
        self.check(to)?;
        if !weight.is_finite() {
            return Err(GraphError::NonFiniteWeight(weight));
        }
        if weight < 0.0 {
            return Err(GraphError::NegativeWeight(weight));
        }
        self.edges[from.index()].push(WeightedEdge { from, to, weight });
        Ok(())
    }

    /// Outgoing edges of `node`, in insertion order.
    #[track_caller]
    pub fn edges(&self, node: NodeId) -> &[WeightedEdge] {
        assert!(self.owns(node), "node belongs to a different graph");
        &self.edges[node.index()]
    }

    /// Returns the `index`th node of the graph, if it exists.
    pub fn node(&self, index: usize) -> Option<NodeId> {
        (index < self.edges.len()).then(|| NodeId::new(self.owner, index))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether `node` is a node of this graph.
    pub fn contains(&self, node: NodeId) -> bool {
        self.owns(node)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        (0..self.edges.len()).map(|i| NodeId::new(self.owner, i))
    }
}

impl Default for WeightedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Expander for WeightedGraph {
    type Edge = WeightedEdge;

    fn owns(&self, node: NodeId) -> bool {
        node.owner() == self.owner && node.index() < self.edges.len()
    }

    fn expand(&self, node: NodeId, edges: &mut Vec<WeightedEdge>) {
        edges.extend_from_slice(self.edges(node));
    }
}
