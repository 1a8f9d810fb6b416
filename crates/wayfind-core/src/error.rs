use thiserror::Error;

use crate::NodeId;

/// Precondition violations when building or searching a graph.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    /// A node id created by another graph, or past the end of this one.
    #[error("node {0:?} does not belong to this graph")]
    ForeignNode(NodeId),

    /// Edge weights must be non-negative.
    #[error("edge weight {0} is negative")]
    NegativeWeight(f64),

    /// Edge weights must be finite.
    #[error("edge weight {0} is not finite")]
    NonFiniteWeight(f64),
}
