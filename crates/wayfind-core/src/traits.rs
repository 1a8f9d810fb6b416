//! The seams every search is generic over.

use crate::{GraphError, NodeId};

/// Produces the outgoing edges of a node.
pub trait Expander {
    /// Edge type produced by [`Expander::expand`].
    type Edge: Edge;

    /// Whether `node` was created by this expander's graph.
    fn owns(&self, node: NodeId) -> bool;

    /// Appends the traversable outgoing edges of `node` to `edges`.
    fn expand(&self, node: NodeId, edges: &mut Vec<Self::Edge>);

    /// Fails with [`GraphError::ForeignNode`] unless `node` belongs to this expander.
    fn check(&self, node: NodeId) -> Result<(), GraphError> {
        match self.owns(node) {
            true => Ok(()),
            false => Err(GraphError::ForeignNode(node)),
        }
    }
}

/// A directed edge between two nodes.
pub trait Edge: Copy {
    /// The node this edge leaves.
    fn source(&self) -> NodeId;

    /// The node this edge enters.
    fn target(&self) -> NodeId;
}

/// An edge with a traversal cost.
pub trait Cost {
    /// Non-negative, finite cost of traversing the edge.
    fn cost(&self) -> f64;
}
